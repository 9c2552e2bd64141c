//! Course screens reducer.

use crossterm::event::{KeyCode, KeyEvent};
use training_core::ApiError;
use training_core::models::Course;

use super::state::{CourseScreen, FetchAction, Screen};
use crate::effects::UiEffect;

/// Error shown when a personal list is requested without an employee id.
pub const MISSING_EMID_MESSAGE: &str = "No employee id for the signed-in user";

/// Shows a screen. The first display starts exactly one refresh.
pub fn show(screen: Screen, state: &mut CourseScreen) -> Vec<UiEffect> {
    if state.unit.state().is_started() {
        return vec![];
    }
    refresh(screen, state)
}

/// Starts a refresh and returns the fetch effect.
pub fn refresh(screen: Screen, state: &mut CourseScreen) -> Vec<UiEffect> {
    let Some(emid) = state.query_emid(screen) else {
        tracing::warn!(screen = screen.tab_label(), "refresh without employee id");
        state.unit.reject(ApiError::new(MISSING_EMID_MESSAGE));
        state.clamp_selection();
        return vec![];
    };

    match state.unit.update(FetchAction::RequestRefresh) {
        Some(req) => vec![UiEffect::FetchCourses { screen, req, emid }],
        None => vec![],
    }
}

/// Handles a fetch-state action for one screen.
pub fn handle_action(
    screen: Screen,
    state: &mut CourseScreen,
    action: FetchAction<Course>,
) -> Vec<UiEffect> {
    match action {
        FetchAction::RequestRefresh => refresh(screen, state),
        action @ FetchAction::ResponseReceived { .. } => {
            if let FetchAction::ResponseReceived { result: Err(e), .. } = &action {
                tracing::warn!(screen = screen.tab_label(), error = %e, "course refresh failed");
            }
            state.unit.update(action);
            state.clamp_selection();
            vec![]
        }
    }
}

/// Handles list navigation keys. Returns `None` for keys the screen ignores.
pub fn handle_key(screen: Screen, state: &mut CourseScreen, key: KeyEvent) -> Option<Vec<UiEffect>> {
    let len = state.courses().len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.selected = state.selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.selected + 1 < len {
                state.selected += 1;
            }
        }
        KeyCode::Home | KeyCode::Char('g') => state.selected = 0,
        KeyCode::End | KeyCode::Char('G') => state.selected = len.saturating_sub(1),
        KeyCode::Char('r') => return Some(refresh(screen, state)),
        _ => return None,
    }
    Some(vec![])
}
