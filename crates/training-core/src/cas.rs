//! Ticket issuer: CAS REST protocol client.
//!
//! Obtaining a service ticket takes two round trips:
//! 1. `POST {cas}/v1/tickets` with the credentials yields `201 Created` and a
//!    `Location` header naming the ticket-granting ticket (TGT).
//! 2. `POST {tgt}` with the service name yields `200 OK` and the service
//!    ticket as a plain-text body.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::future::BoxFuture;
use reqwest::StatusCode;
use reqwest::header::LOCATION;
use url::Url;

use crate::api::http::USER_AGENT;

/// Ticket-issuance failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthError {
    message: String,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AuthError {}

/// A password that never shows up in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[redacted]")
    }
}

impl From<String> for Password {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

impl From<&str> for Password {
    fn from(secret: &str) -> Self {
        Self(secret.to_string())
    }
}

/// Exchanges credentials for an opaque service ticket.
///
/// The service the ticket is issued for is fixed per issuer.
pub trait TicketIssuer: Send + Sync {
    fn issue_ticket<'a>(
        &'a self,
        username: &'a str,
        password: &'a Password,
    ) -> BoxFuture<'a, Result<String, AuthError>>;
}

/// Longest ticket prefix that may appear in logs.
const TICKET_PREFIX_MAX: usize = 8;

/// Returns a loggable prefix of a ticket: at most half of it, never all.
pub fn ticket_prefix(ticket: &str) -> String {
    let keep = (ticket.chars().count() / 2).min(TICKET_PREFIX_MAX);
    let prefix: String = ticket.chars().take(keep).collect();
    format!("{prefix}…")
}

/// CAS REST client.
#[derive(Debug, Clone)]
pub struct CasTicketIssuer {
    http: reqwest::Client,
    tickets_url: Url,
    service: String,
}

impl CasTicketIssuer {
    /// Creates an issuer for `service` against the CAS server at `cas_base_url`.
    ///
    /// # Errors
    /// Returns an error if the CAS URL is malformed.
    pub fn new(cas_base_url: &str, service: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut tickets_url = Url::parse(cas_base_url)
            .with_context(|| format!("Invalid CAS base URL: {cas_base_url}"))?;
        tickets_url
            .path_segments_mut()
            .map_err(|()| anyhow::anyhow!("CAS base URL cannot carry a path: {cas_base_url}"))?
            .pop_if_empty()
            .extend(["v1", "tickets"]);

        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::none());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            tickets_url,
            service: service.to_string(),
        })
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    async fn granting_ticket(&self, username: &str, password: &Password) -> Result<Url, AuthError> {
        tracing::debug!(url = %self.tickets_url, username, "requesting ticket-granting ticket");

        let response = self
            .http
            .post(self.tickets_url.clone())
            .form(&[("username", username), ("password", password.expose())])
            .send()
            .await
            .map_err(|e| AuthError::new(format!("CAS request failed: {}", e.without_url())))?;

        let status = response.status();
        if status != StatusCode::CREATED {
            return Err(AuthError::new(format!("CAS rejected credentials (HTTP {status})")));
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AuthError::new("CAS response has no ticket-granting ticket location"))?;

        self.tickets_url
            .join(location)
            .map_err(|e| AuthError::new(format!("Invalid ticket-granting ticket location: {e}")))
    }

    async fn service_ticket(&self, tgt_url: Url) -> Result<String, AuthError> {
        tracing::debug!(service = %self.service, "requesting service ticket");

        let response = self
            .http
            .post(tgt_url)
            .form(&[("service", self.service.as_str())])
            .send()
            .await
            .map_err(|e| AuthError::new(format!("CAS request failed: {}", e.without_url())))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AuthError::new(format!("CAS refused service ticket (HTTP {status})")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| {
                AuthError::new(format!("Failed to read service ticket: {}", e.without_url()))
            })?;
        let ticket = body.trim();
        if ticket.is_empty() {
            return Err(AuthError::new("CAS returned an empty service ticket"));
        }

        tracing::debug!(ticket = %ticket_prefix(ticket), "service ticket issued");
        Ok(ticket.to_string())
    }

    async fn issue(&self, username: &str, password: &Password) -> Result<String, AuthError> {
        let tgt_url = self.granting_ticket(username, password).await?;
        self.service_ticket(tgt_url).await
    }
}

impl TicketIssuer for CasTicketIssuer {
    fn issue_ticket<'a>(
        &'a self,
        username: &'a str,
        password: &'a Password,
    ) -> BoxFuture<'a, Result<String, AuthError>> {
        Box::pin(self.issue(username, password))
    }
}
