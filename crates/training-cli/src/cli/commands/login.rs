//! Login command handler.

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use training_core::{Clients, LOGIN_FAILED_MESSAGE, Password, session};

/// Environment variable holding the password for non-interactive sign-in.
pub const PASSWORD_ENV: &str = "TRAINING_PASSWORD";

/// Reads the password from `TRAINING_PASSWORD`, else the first stdin line.
fn read_password() -> Result<Password> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(Password::new(password));
    }

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;
    Ok(Password::new(line.trim_end_matches(['\r', '\n'])))
}

pub async fn run(clients: &Clients, username: &str) -> Result<()> {
    let password = read_password()?;

    let session = match session::authenticate(
        clients.tickets.as_ref(),
        clients.api.as_ref(),
        username,
        &password,
    )
    .await
    {
        Ok(session) => session,
        Err(error) => {
            tracing::warn!(error = %error, "login failed");
            anyhow::bail!(LOGIN_FAILED_MESSAGE);
        }
    };

    let user = &session.user;
    println!("Signed in as {} ({})", user.display_name(), user.screen_name);
    if let Some(emid) = &user.emid {
        println!("Employee id: {emid}");
    }
    Ok(())
}
