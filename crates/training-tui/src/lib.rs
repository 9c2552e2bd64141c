//! Full-screen TUI for the training catalog.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::Result;
pub use runtime::{Environment, TuiRuntime};

/// Runs the interactive app until the user quits.
pub async fn run_interactive(env: Environment) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The interactive app requires a terminal.\n\
             Use `training courses <list>` for non-interactive output."
        );
    }

    tracing::info!("starting interactive session");
    let mut runtime = TuiRuntime::new(env)?;
    runtime.run()?;
    tracing::info!("interactive session ended");

    Ok(())
}
