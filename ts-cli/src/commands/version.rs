//! Version command.

use console::style;

use ts_core::config::AppConfig;
use ts_core::constants::{APP_VERSION, SUPPORTED_API_VERSION};
use ts_core::error::TsResult;
use ts_core::paths;

use crate::OutputFormat;

pub async fn run(config: &AppConfig, format: OutputFormat) -> TsResult<()> {
    let api = super::create_api_client(config)?;
    let server_version = api.get_version().await?;
    let matches = server_version == SUPPORTED_API_VERSION;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "client": APP_VERSION,
                    "server": server_version,
                    "supported": SUPPORTED_API_VERSION,
                    "matches": matches,
                    "os": paths::os_label(),
                })
            );
        }
        OutputFormat::Text => {
            println!("  Client:   telesocial {} ({})", APP_VERSION, paths::os_label());
            println!("  Server:   {}", api.server_root());
            println!("  API:      {}", style(&server_version).bold());
            if !matches {
                println!(
                    "  {} this client was built against API {}",
                    style("WARNING").yellow().bold(),
                    SUPPORTED_API_VERSION
                );
            }
        }
    }
    Ok(())
}
