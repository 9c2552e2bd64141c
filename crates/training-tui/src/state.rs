//! Application state for the shell.
//!
//! Owned by the runtime and mutated only by `update::update`.

use enum_map::EnumMap;

use crate::features::auth::AuthState;
use crate::features::courses::{CourseScreen, Screen};

#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Login form and session.
    pub auth: AuthState,
    /// One course list per screen; never shared across screens.
    pub screens: EnumMap<Screen, CourseScreen>,
    /// Selected tab.
    pub tab: Screen,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_screen(&self) -> &CourseScreen {
        &self.screens[self.tab]
    }

    /// Whether any async request is in flight (drives the fast tick).
    pub fn is_busy(&self) -> bool {
        self.auth.login_in_flight
            || self
                .screens
                .values()
                .any(|screen| screen.unit.is_refreshing())
    }
}
