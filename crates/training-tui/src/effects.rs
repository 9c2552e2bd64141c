//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! This keeps the reducer pure: it only mutates state and returns effects,
//! never performs I/O or spawns tasks directly.

use training_core::Password;

use crate::common::RequestId;
use crate::features::courses::Screen;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Run the two-step login handshake.
    Login { username: String, password: Password },

    /// Fetch one screen's course list. The result comes back tagged with `req`.
    FetchCourses {
        screen: Screen,
        req: RequestId,
        emid: String,
    },
}
