//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use training_core::{Clients, Config, config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "training")]
#[command(version)]
#[command(about = "Browse the corporate training catalog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use the built-in demo backend instead of the configured servers
    #[arg(long, global = true)]
    demo: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in and print the signed-in user
    Login {
        /// Account name for the ticket server
        #[arg(short, long)]
        username: String,
    },

    /// Print one course list
    Courses {
        /// Which list to print
        #[arg(value_enum)]
        list: commands::courses::CourseList,

        /// Employee id for the personal lists
        #[arg(long, value_name = "EMID", env = "TRAINING_EMID")]
        emid: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Print a fresh config generated from the defaults
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

fn clients(config: &Config, demo: bool) -> Result<Clients> {
    if demo {
        tracing::info!("using demo backend");
        return Ok(Clients::demo());
    }
    Clients::live(config).context("configure HTTP clients")
}

/// Loads config for a one-shot command, which logs to stderr.
fn load_for_command() -> Result<Config> {
    let config = Config::load().context("load config")?;
    logging::init_stderr(&config);
    tracing::debug!(path = %config::paths::config_path().display(), "config loaded");
    Ok(config)
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, demo } = cli;

    // default to the interactive app
    let Some(command) = command else {
        let config = Config::load().context("load config")?;
        let _guard = logging::init_file(&config)?;
        return commands::tui::run(&config, clients(&config, demo)?).await;
    };

    match command {
        Commands::Login { username } => {
            let config = load_for_command()?;
            commands::login::run(&clients(&config, demo)?, &username).await
        }
        Commands::Courses { list, emid, json } => {
            let config = load_for_command()?;
            let options = commands::courses::CoursesOptions {
                list,
                emid: emid.as_deref(),
                json,
                upcoming_window_hours: config.upcoming_window_hours,
            };
            commands::courses::run(&clients(&config, demo)?, &options).await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        },
    }
}
