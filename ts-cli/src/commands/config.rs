//! Configuration commands.

use std::path::Path;

use clap::Subcommand;
use console::style;

use ts_core::config::AppConfig;
use ts_core::error::TsResult;

use crate::OutputFormat;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration (API key masked).
    Show,
    /// Write the effective configuration to the config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

pub fn run(
    config: &AppConfig,
    config_path: &Path,
    action: ConfigAction,
    format: OutputFormat,
) -> TsResult<()> {
    match action {
        ConfigAction::Show => {
            let server = &config.server;
            match format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::json!({
                            "path": config_path.display().to_string(),
                            "host": server.host,
                            "apiKey": server.masked_api_key(),
                            "requestTimeoutSecs": server.request_timeout_secs,
                            "connectTimeoutSecs": server.connect_timeout_secs,
                            "acceptInvalidCerts": server.accept_invalid_certs,
                            "proxy": server.proxy.as_ref().map(|p| p.host.clone()),
                            "logLevel": config.logging.level,
                        })
                    );
                }
                OutputFormat::Text => {
                    println!("  {}", style("Configuration").bold().underlined());
                    println!("  File:          {}", config_path.display());
                    println!("  Host:          {}", server.host);
                    println!("  API key:       {}", server.masked_api_key());
                    println!(
                        "  Timeouts:      {}s request, {}s connect",
                        server.request_timeout_secs, server.connect_timeout_secs
                    );
                    if server.accept_invalid_certs {
                        println!("  TLS:           {}", style("certificate checks disabled").red());
                    }
                    if let Some(proxy) = &server.proxy {
                        println!("  Proxy:         {:?} {}", proxy.kind, proxy.host);
                    }
                    println!("  Log level:     {}", config.logging.level);
                    if !config.is_server_configured() {
                        println!(
                            "  {} host or API key is not set",
                            style("WARNING").yellow().bold()
                        );
                    }
                }
            }
        }
        ConfigAction::Init { force } => {
            if config_path.exists() && !force {
                println!(
                    "  {} already exists; pass --force to overwrite.",
                    config_path.display()
                );
                return Ok(());
            }
            config.save_to_file(config_path)?;
            println!("  {} wrote {}", style("OK").green().bold(), config_path.display());
        }
    }
    Ok(())
}
