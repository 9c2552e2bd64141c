//! Core training catalog library (models, API gateway, ticket issuer, config).

pub mod api;
pub mod cas;
pub mod config;
pub mod logging;
pub mod mock;
pub mod models;
pub mod session;

pub use api::{ApiError, TrainingApi};
pub use cas::{AuthError, Password, TicketIssuer};
pub use config::Config;
pub use mock::Clients;
pub use session::{LOGIN_FAILED_MESSAGE, LoginError, Session};
