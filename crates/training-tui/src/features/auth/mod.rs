//! Auth feature: login form, handshake trigger and session.

mod render;
mod state;
mod update;

pub use render::{render_alert, render_login_form};
pub use state::{AlertMessage, AuthAction, AuthState, LoginField};
pub use update::{handle_key, handle_paste, reduce};
