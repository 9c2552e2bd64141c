//! Two-step login handshake.

use std::fmt;

use crate::api::{ApiError, TrainingApi};
use crate::cas::{AuthError, Password, TicketIssuer, ticket_prefix};
use crate::models::{LoginRequest, User};

/// The one message shown to the user for any failed login.
pub const LOGIN_FAILED_MESSAGE: &str = "Login Failed — please try again later";

/// An authenticated session, held in memory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub ticket: String,
    pub auth_id: String,
    pub user: User,
}

/// Failure of either handshake step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// The ticket issuer refused or could not be reached.
    Ticket(AuthError),
    /// The backend rejected the service ticket.
    Api(ApiError),
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::Ticket(e) => write!(f, "Ticket issuance failed: {e}"),
            LoginError::Api(e) => write!(f, "Backend login failed: {e}"),
        }
    }
}

impl std::error::Error for LoginError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoginError::Ticket(e) => Some(e),
            LoginError::Api(e) => Some(e),
        }
    }
}

impl From<AuthError> for LoginError {
    fn from(error: AuthError) -> Self {
        LoginError::Ticket(error)
    }
}

impl From<ApiError> for LoginError {
    fn from(error: ApiError) -> Self {
        LoginError::Api(error)
    }
}

/// Runs the handshake: issue a service ticket, then exchange it for a session.
///
/// The backend is never contacted when ticket issuance fails.
pub async fn authenticate(
    issuer: &dyn TicketIssuer,
    api: &dyn TrainingApi,
    username: &str,
    password: &Password,
) -> Result<Session, LoginError> {
    tracing::debug!(username, "issuing service ticket");
    let ticket = issuer.issue_ticket(username, password).await?;

    tracing::debug!(ticket = %ticket_prefix(&ticket), "exchanging service ticket");
    let response = api.login(LoginRequest::new(ticket.clone())).await?;

    tracing::info!(user = %response.emp.screen_name, "logged in");
    Ok(Session {
        ticket,
        auth_id: response.auth_id,
        user: response.emp,
    })
}
