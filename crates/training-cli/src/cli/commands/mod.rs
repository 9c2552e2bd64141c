//! CLI command handlers.

pub mod config;
pub mod courses;
pub mod login;
pub mod tui;
