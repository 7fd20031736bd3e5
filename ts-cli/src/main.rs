//! Telesocial CLI - drive the Telesocial API from the terminal.
//!
//! Registers users, records and blasts media, and runs conference calls
//! against a Telesocial server. Useful for scripting and for checking a
//! server by hand.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use ts_core::config::AppConfig;
use ts_core::error::TsResult;
use ts_core::logging;

/// Telesocial - registrant, media, and conference call control.
#[derive(Parser)]
#[command(
    name = "telesocial",
    version,
    about = "Telesocial API client CLI",
    long_about = "A command-line interface for the Telesocial telephony API.\n\
                  Register users, record and play back media, and orchestrate conference calls."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Server host (overrides config).
    #[arg(long, global = true)]
    host: Option<String>,

    /// Application key (overrides config).
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the client and server API versions.
    Version,
    /// Register, check, and delete users.
    User {
        #[command(subcommand)]
        action: commands::users::UserAction,
    },
    /// Create, record, blast, and download media.
    Media {
        #[command(subcommand)]
        action: commands::media::MediaAction,
    },
    /// Create and control conference calls.
    Conference {
        #[command(subcommand)]
        action: commands::conference::ConferenceAction,
    },
    /// View or write the configuration file.
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let format = cli.format;

    if let Err(e) = run(cli).await {
        commands::print_error(&e, format);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> TsResult<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => AppConfig::default_config_path()?,
    };
    let mut config = AppConfig::load_or_default(&config_path)?;

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(key) = cli.api_key {
        config.server.api_key = key;
    }

    let log_level = if cli.verbose { "debug" } else { config.logging.level.as_str() };
    let log_dir = config.effective_log_dir()?;
    let _guard = logging::init_logging(log_level, &log_dir, config.logging.json_output)?;

    debug!("Telesocial CLI v{}", ts_core::constants::APP_VERSION);

    // Dispatch to command handlers
    match cli.command {
        Commands::Version => commands::version::run(&config, cli.format).await,
        Commands::User { action } => commands::users::run(&config, action, cli.format).await,
        Commands::Media { action } => commands::media::run(&config, action, cli.format).await,
        Commands::Conference { action } => {
            commands::conference::run(&config, action, cli.format).await
        }
        Commands::Config { action } => {
            commands::config::run(&config, &config_path, action, cli.format)
        }
    }
}
