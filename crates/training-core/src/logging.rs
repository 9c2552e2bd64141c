//! Tracing subscriber setup.
//!
//! The interactive UI owns the terminal, so it logs to a daily rolling file
//! under `$TRAINING_HOME/logs`. One-shot commands log to stderr.

use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, paths};

/// Environment variable holding a log filter; wins over `log_level`.
pub const LOG_ENV: &str = "TRAINING_LOG";

const LOG_FILE_PREFIX: &str = "training.log";

fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs a file subscriber. Keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn init_file(config: &Config) -> Result<WorkerGuard> {
    let dir = paths::logs_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;

    tracing::info!(dir = %dir.display(), "logging initialized");
    Ok(guard)
}

/// Installs a stderr subscriber. Logging is best effort here: a second
/// initialization is ignored.
pub fn init_stderr(config: &Config) {
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        tracing::warn!(error = %e, "tracing init failed");
    }
}

