//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use mediq_core::config::{self, Config};
use mediq_core::session::SessionStore;

mod commands;

#[derive(Parser)]
#[command(name = "mediq")]
#[command(version = "0.1")]
#[command(about = "Terminal client for the mediq doctor portal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the backend API base URL (also via MEDIQ_API_URL)
    #[arg(long, value_name = "URL", global = true)]
    api_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show the logged-in account
    Whoami,
    /// Clear the stored session
    Logout,
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
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;
    let env_url = std::env::var("MEDIQ_API_URL").ok();
    let base_url = config::resolve_base_url(cli.api_url.as_deref(), env_url.as_deref(), &config);
    let store = SessionStore::new();

    // default to the interactive interface
    let Some(command) = cli.command else {
        mediq_core::logging::init().context("init logging")?;
        tracing::info!(base_url, "starting interactive session");
        return mediq_tui::run(&base_url, store).await;
    };

    match command {
        Commands::Whoami => commands::session::whoami(&store),
        Commands::Logout => commands::session::logout(&store),
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
