//! Auth unit state.

use training_core::models::User;
use training_core::{LOGIN_FAILED_MESSAGE, LoginError, Password, Session};

/// Focused field of the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

impl LoginField {
    pub fn next(self) -> Self {
        match self {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        }
    }
}

/// A modal message the user has to dismiss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub title: String,
    pub message: String,
}

impl AlertMessage {
    pub fn login_failed() -> Self {
        Self {
            title: "Login".to_string(),
            message: LOGIN_FAILED_MESSAGE.to_string(),
        }
    }
}

/// Login form and session state.
///
/// `Idle → LoggingIn → Authenticated | Idle (with alert)`. Authenticated is
/// terminal for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub username: String,
    pub password: Password,
    pub focus: LoginField,
    pub session: Option<Session>,
    pub login_in_flight: bool,
    pub login_error_alert: Option<AlertMessage>,
}

impl AuthState {
    pub fn logged_in_user(&self) -> Option<&User> {
        self.session.as_ref().map(|session| &session.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

/// Inputs to the auth unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    UsernameChanged(String),
    PasswordChanged(Password),
    LoginTapped,
    LoginSucceeded(Session),
    LoginFailed(LoginError),
    LoginErrorAlertDismissed,
    FocusNext,
}
