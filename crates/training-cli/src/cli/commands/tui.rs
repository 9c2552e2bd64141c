//! Interactive app command.

use anyhow::Result;
use training_core::{Clients, Config};

#[cfg(feature = "tui")]
pub async fn run(config: &Config, clients: Clients) -> Result<()> {
    training_tui::run_interactive(training_tui::Environment::new(clients, config)).await
}

#[cfg(not(feature = "tui"))]
pub async fn run(_config: &Config, _clients: Clients) -> Result<()> {
    anyhow::bail!("TUI support is disabled in this build (feature \"tui\").");
}
