//! UI event types.
//!
//! All external inputs (terminal, async results) are converted to `UiEvent`
//! before being processed by the reducer.
//!
//! ## Inbox Pattern
//!
//! Async operations send their single result event directly to the runtime's
//! event inbox, which is drained once per loop iteration.

use crossterm::event::Event as CrosstermEvent;
use training_core::models::Course;

use crate::features::auth::AuthAction;
use crate::features::courses::{FetchAction, Screen};

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Periodic tick for animation.
    Tick,

    /// Terminal input (keys, paste, resize).
    Terminal(CrosstermEvent),

    /// Login form and handshake results.
    Auth(AuthAction),

    /// Fetch-state action scoped to one screen.
    Courses {
        screen: Screen,
        action: FetchAction<Course>,
    },

    /// Show a tab.
    TabSelected(Screen),
}
