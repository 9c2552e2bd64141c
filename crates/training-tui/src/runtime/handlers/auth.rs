//! Login handshake handler.

use training_core::session;
use training_core::{Clients, Password};

use crate::events::UiEvent;
use crate::features::auth::AuthAction;

/// Runs the ticket → backend login handshake.
pub async fn login(clients: Clients, username: String, password: Password) -> UiEvent {
    let result = session::authenticate(
        clients.tickets.as_ref(),
        clients.api.as_ref(),
        &username,
        &password,
    )
    .await;

    UiEvent::Auth(match result {
        Ok(session) => AuthAction::LoginSucceeded(session),
        Err(error) => AuthAction::LoginFailed(error),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use training_core::TrainingApi;
    use training_core::mock::{DemoTicketIssuer, DemoTrainingApi};

    use super::*;

    #[tokio::test]
    async fn test_login_success_event() {
        let event = login(Clients::demo(), "HE170".to_string(), "secret".into()).await;

        assert!(matches!(
            event,
            UiEvent::Auth(AuthAction::LoginSucceeded(session)) if session.user.id == 135
        ));
    }

    #[tokio::test]
    async fn test_ticket_failure_skips_backend() {
        let api = Arc::new(DemoTrainingApi::new());
        let clients = Clients {
            api: Arc::clone(&api) as Arc<dyn TrainingApi>,
            tickets: Arc::new(DemoTicketIssuer::failing("HTTP 401")),
        };

        let event = login(clients, "HE170".to_string(), "wrong".into()).await;

        assert!(matches!(event, UiEvent::Auth(AuthAction::LoginFailed(_))));
        assert_eq!(api.login_calls.load(Ordering::SeqCst), 0);
    }
}
