//! CLI command implementations.

pub mod conference;
pub mod config;
pub mod media;
pub mod users;
pub mod version;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use console::style;

use ts_api::{ApiClient, ServerResponse};
use ts_core::config::AppConfig;
use ts_core::error::{TsError, TsResult};

use crate::OutputFormat;

/// Helper to create an API client from config.
pub fn create_api_client(config: &AppConfig) -> TsResult<ApiClient> {
    ApiClient::new(&config.server)
}

/// Print the result of an operation that may answer negatively.
pub fn print_outcome(what: &str, result: Option<ServerResponse>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let value = match &result {
                Some(resp) => serde_json::json!({ "ok": true, "response": resp }),
                None => serde_json::json!({ "ok": false }),
            };
            println!("{value}");
        }
        OutputFormat::Text => match result {
            Some(resp) => {
                println!("  {} {what}", style("OK").green().bold());
                print_response_table(&resp);
            }
            None => {
                println!("  {} {what}: server declined", style("NO").yellow().bold());
            }
        },
    }
}

/// Render the known fields of a response as a two-column table.
pub fn print_response_table(resp: &ServerResponse) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["status".to_string(), resp.status.to_string()]);

    let fields = [
        ("message", resp.message.clone()),
        ("mediaId", resp.media_id.clone()),
        ("conferenceId", resp.conference_id.clone()),
        ("uri", resp.uri.clone()),
        ("downloadUrl", resp.download_url.clone()),
        ("fileSize", resp.file_size.map(|s| s.to_string())),
    ];
    for (name, value) in fields {
        if let Some(v) = value {
            table.add_row(vec![name.to_string(), v]);
        }
    }
    for (name, value) in &resp.extra {
        table.add_row(vec![name.clone(), value.to_string()]);
    }

    println!("{table}");
}

/// Print an error with its code.
pub fn print_error(error: &TsError, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            eprintln!(
                "{}",
                serde_json::json!({ "ok": false, "code": error.code(), "message": error.message() })
            );
        }
        OutputFormat::Text => {
            eprintln!(
                "  {} [{}] {}",
                style("ERROR").red().bold(),
                error.code(),
                error.message()
            );
            if error.is_retryable() {
                eprintln!("  {}", style("This error is transient; try again later.").dim());
            }
        }
    }
}

/// Format a byte count as a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
