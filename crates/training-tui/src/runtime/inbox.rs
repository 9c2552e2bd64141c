//! Inbox channel types.
//!
//! Async handlers send their result `UiEvent` here; the runtime drains the
//! receiver once per loop iteration.

use tokio::sync::mpsc;

use crate::events::UiEvent;

/// Sender half of the runtime inbox.
pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;

/// Receiver half of the runtime inbox.
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;
