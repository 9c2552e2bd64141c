//! Shared leaf types for TUI features.
//!
//! IMPORTANT: This module must NOT import UiEvent or feature-specific state
//! to avoid circular dependencies.

pub mod render_utils;
pub mod request_id;
pub mod text;

pub use request_id::{LatestOnly, RequestId};
pub use text::{mask, sanitize_for_display, truncate_start_with_ellipsis, truncate_with_ellipsis};
