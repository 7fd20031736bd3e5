//! Conference commands.

use clap::Subcommand;

use ts_core::config::AppConfig;
use ts_core::error::TsResult;

use crate::OutputFormat;

#[derive(Subcommand)]
pub enum ConferenceAction {
    /// Create a conference and call the first participant.
    Create {
        /// Network ID of the first participant.
        network_id: String,
        /// Media ID to record the conference into.
        #[arg(long)]
        recording: Option<String>,
        /// Media ID to play as a greeting.
        #[arg(long)]
        greeting: Option<String>,
    },
    /// Add participants to a conference.
    Add {
        /// Conference ID.
        conference_id: String,
        /// Network IDs to add.
        #[arg(required = true)]
        network_ids: Vec<String>,
        /// Media ID to play as a greeting.
        #[arg(long)]
        greeting: Option<String>,
    },
    /// Close a conference and hang up everyone.
    Close {
        /// Conference ID.
        conference_id: String,
    },
    /// Hang up one participant.
    Hangup {
        /// Conference ID.
        conference_id: String,
        /// Network ID of the participant.
        network_id: String,
    },
    /// Move a participant to another conference.
    Move {
        /// Conference the participant is in.
        from: String,
        /// Conference to move the participant to.
        to: String,
        /// Network ID of the participant.
        network_id: String,
    },
    /// Mute a participant.
    Mute {
        /// Conference ID.
        conference_id: String,
        /// Network ID of the participant.
        network_id: String,
    },
    /// Unmute a participant.
    Unmute {
        /// Conference ID.
        conference_id: String,
        /// Network ID of the participant.
        network_id: String,
    },
}

pub async fn run(
    config: &AppConfig,
    action: ConferenceAction,
    format: OutputFormat,
) -> TsResult<()> {
    let api = super::create_api_client(config)?;

    let (what, result) = match action {
        ConferenceAction::Create { network_id, recording, greeting } => {
            let resp = api
                .create_conference(&network_id, recording.as_deref(), greeting.as_deref())
                .await?;
            ("conference created".to_string(), resp)
        }
        ConferenceAction::Add { conference_id, network_ids, greeting } => {
            let ids: Vec<&str> = network_ids.iter().map(String::as_str).collect();
            let resp = api
                .add_to_conference(&ids, &conference_id, greeting.as_deref())
                .await?;
            (format!("added {} to {conference_id}", network_ids.join(", ")), resp)
        }
        ConferenceAction::Close { conference_id } => {
            let resp = api.close_conference(&conference_id).await?;
            (format!("closed {conference_id}"), resp)
        }
        ConferenceAction::Hangup { conference_id, network_id } => {
            let resp = api.hangup_call(&network_id, &conference_id).await?;
            (format!("hung up {network_id}"), resp)
        }
        ConferenceAction::Move { from, to, network_id } => {
            let resp = api.move_call(&from, &to, &network_id).await?;
            (format!("moved {network_id} to {to}"), resp)
        }
        ConferenceAction::Mute { conference_id, network_id } => {
            let resp = api.mute_call(&conference_id, &network_id).await?;
            (format!("muted {network_id}"), resp)
        }
        ConferenceAction::Unmute { conference_id, network_id } => {
            let resp = api.unmute_call(&conference_id, &network_id).await?;
            (format!("unmuted {network_id}"), resp)
        }
    };

    super::print_outcome(&what, result, format);
    Ok(())
}
