//! Registrant commands.

use clap::Subcommand;
use console::style;
use dialoguer::Confirm;

use ts_core::config::AppConfig;
use ts_core::error::TsResult;

use crate::OutputFormat;

#[derive(Subcommand)]
pub enum UserAction {
    /// Register a network ID with a phone number.
    Register {
        /// Network ID of the user.
        network_id: String,
        /// Phone number; non-digits are stripped.
        phone: String,
    },
    /// Check whether a network ID is registered.
    Check {
        /// Network ID of the user.
        network_id: String,
        /// Only check that the ID exists, not that it belongs to this application.
        #[arg(long)]
        exists_only: bool,
    },
    /// Delete a registered user.
    Delete {
        /// Network ID of the user.
        network_id: String,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn run(config: &AppConfig, action: UserAction, format: OutputFormat) -> TsResult<()> {
    let api = super::create_api_client(config)?;

    match action {
        UserAction::Register { network_id, phone } => {
            let resp = api.register_user(&network_id, &phone).await?;
            super::print_outcome(&format!("registered {network_id}"), Some(resp), format);
        }
        UserAction::Check { network_id, exists_only } => {
            let registered = api.check_user_registration(&network_id, !exists_only).await?;
            match format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::json!({ "networkId": network_id, "registered": registered })
                    );
                }
                OutputFormat::Text => {
                    let label = if registered {
                        style("registered").green().bold()
                    } else {
                        style("not registered").yellow().bold()
                    };
                    println!("  {network_id}: {label}");
                }
            }
        }
        UserAction::Delete { network_id, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("  Delete user {network_id}?"))
                    .default(false)
                    .interact()
                    .unwrap_or(false);
                if !confirmed {
                    println!("  Delete cancelled.");
                    return Ok(());
                }
            }
            let resp = api.delete_user(&network_id).await?;
            super::print_outcome(&format!("deleted {network_id}"), resp, format);
        }
    }

    Ok(())
}
