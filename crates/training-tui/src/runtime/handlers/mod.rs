//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that perform I/O and return the single
//! `UiEvent` carrying the result. They never touch state; the runtime spawns
//! them and sends the result to the inbox.

pub mod auth;
pub mod courses;

pub use auth::login;
pub use courses::fetch_courses;
