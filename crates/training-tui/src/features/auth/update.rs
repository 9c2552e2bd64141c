//! Auth unit reducer.
//!
//! Handles login form edits, the handshake trigger and its result.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{AlertMessage, AuthAction, AuthState, LoginField};
use crate::effects::UiEffect;

/// Applies an auth action.
pub fn reduce(auth: &mut AuthState, action: AuthAction) -> Vec<UiEffect> {
    match action {
        AuthAction::UsernameChanged(username) => {
            auth.username = username;
            vec![]
        }
        AuthAction::PasswordChanged(password) => {
            auth.password = password;
            vec![]
        }
        AuthAction::FocusNext => {
            auth.focus = auth.focus.next();
            vec![]
        }
        AuthAction::LoginTapped => {
            if auth.login_in_flight || auth.is_authenticated() {
                return vec![];
            }
            auth.login_in_flight = true;
            tracing::info!(username = %auth.username, "login started");
            vec![UiEffect::Login {
                username: auth.username.clone(),
                password: auth.password.clone(),
            }]
        }
        AuthAction::LoginSucceeded(session) => {
            auth.login_in_flight = false;
            auth.login_error_alert = None;
            auth.password = Default::default();
            auth.session = Some(session);
            vec![]
        }
        AuthAction::LoginFailed(error) => {
            tracing::warn!(error = %error, "login failed");
            auth.login_in_flight = false;
            auth.login_error_alert = Some(AlertMessage::login_failed());
            vec![]
        }
        AuthAction::LoginErrorAlertDismissed => {
            auth.login_error_alert = None;
            vec![]
        }
    }
}

/// Maps a key on the login form to auth actions and applies them.
pub fn handle_key(auth: &mut AuthState, key: KeyEvent) -> Vec<UiEffect> {
    if auth.login_error_alert.is_some() {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc => reduce(auth, AuthAction::LoginErrorAlertDismissed),
            _ => vec![],
        };
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            reduce(auth, AuthAction::FocusNext)
        }
        KeyCode::Enter => {
            if auth.focus == LoginField::Username && auth.password.is_empty() {
                reduce(auth, AuthAction::FocusNext)
            } else {
                reduce(auth, AuthAction::LoginTapped)
            }
        }
        KeyCode::Backspace => edit_focused(auth, |text| {
            text.pop();
        }),
        KeyCode::Char(c) if !ctrl => edit_focused(auth, |text| text.push(c)),
        _ => vec![],
    }
}

/// Inserts pasted text into the focused field.
pub fn handle_paste(auth: &mut AuthState, text: &str) -> Vec<UiEffect> {
    if auth.login_error_alert.is_some() {
        return vec![];
    }
    let text: String = text.chars().filter(|c| !c.is_control()).collect();
    edit_focused(auth, |field| field.push_str(&text))
}

/// Computes the edited value of the focused field and dispatches the change.
fn edit_focused(auth: &mut AuthState, edit: impl FnOnce(&mut String)) -> Vec<UiEffect> {
    if auth.login_in_flight {
        return vec![];
    }
    match auth.focus {
        LoginField::Username => {
            let mut username = auth.username.clone();
            edit(&mut username);
            reduce(auth, AuthAction::UsernameChanged(username))
        }
        LoginField::Password => {
            let mut password = auth.password.expose().to_string();
            edit(&mut password);
            reduce(auth, AuthAction::PasswordChanged(password.into()))
        }
    }
}
