//! Media commands.

use std::path::PathBuf;
use std::time::Duration;

use clap::Subcommand;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use ts_core::config::AppConfig;
use ts_core::error::{TsError, TsResult};

use crate::OutputFormat;

#[derive(Subcommand)]
pub enum MediaAction {
    /// Create a media slot owned by a network ID.
    Create {
        /// Network ID that owns the media.
        network_id: String,
    },
    /// Call a user and record into a media slot.
    Record {
        /// Network ID to call.
        network_id: String,
        /// Media ID to record into.
        media_id: String,
    },
    /// Call a user and play a media file.
    Blast {
        /// Network ID to call.
        network_id: String,
        /// Media ID to play.
        media_id: String,
    },
    /// Show the status of a media slot.
    Status {
        /// Media ID.
        media_id: String,
    },
    /// Poll until a recording has content.
    Wait {
        /// Media ID.
        media_id: String,
        /// Seconds between polls.
        #[arg(short, long, default_value = "5")]
        interval: u64,
        /// Maximum number of polls.
        #[arg(short = 'n', long, default_value = "24")]
        attempts: u32,
    },
    /// Request an upload grant for a media slot.
    Grant {
        /// Media ID.
        media_id: String,
    },
    /// Remove the content of a media slot.
    Remove {
        /// Media ID.
        media_id: String,
    },
    /// Download a recording to a local file.
    Download {
        /// Media ID; its download URL is looked up first.
        media_id: String,
        /// Output file path.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub async fn run(config: &AppConfig, action: MediaAction, format: OutputFormat) -> TsResult<()> {
    let api = super::create_api_client(config)?;

    match action {
        MediaAction::Create { network_id } => {
            let resp = api.create_media(&network_id).await?;
            super::print_outcome("media created", resp, format);
        }
        MediaAction::Record { network_id, media_id } => {
            let resp = api.record_call(&network_id, &media_id).await?;
            super::print_outcome(&format!("recording {network_id} into {media_id}"), resp, format);
        }
        MediaAction::Blast { network_id, media_id } => {
            let resp = api.blast_call(&network_id, &media_id).await?;
            super::print_outcome(&format!("playing {media_id} to {network_id}"), resp, format);
        }
        MediaAction::Status { media_id } => {
            let resp = api.get_media_status(&media_id).await?;
            super::print_outcome(&format!("status of {media_id}"), resp, format);
        }
        MediaAction::Wait { media_id, interval, attempts } => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("  {spinner} [{elapsed_precise}] {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message(format!("Waiting for {media_id} to have content"));
            pb.enable_steady_tick(Duration::from_millis(100));

            let result = api
                .await_recording(&media_id, Duration::from_secs(interval), attempts)
                .await;
            pb.finish_and_clear();

            let resp = result?;
            if resp.is_none() && matches!(format, OutputFormat::Text) {
                println!(
                    "  {} no content after {attempts} polls",
                    style("TIMEOUT").yellow().bold()
                );
                return Ok(());
            }
            super::print_outcome(&format!("{media_id} is ready"), resp, format);
        }
        MediaAction::Grant { media_id } => {
            let resp = api.upload_grant_request(&media_id).await?;
            super::print_outcome(&format!("upload grant for {media_id}"), resp, format);
        }
        MediaAction::Remove { media_id } => {
            let resp = api.remove_media(&media_id).await?;
            super::print_outcome(&format!("removed {media_id}"), resp, format);
        }
        MediaAction::Download { media_id, output } => {
            let status = api.get_media_status(&media_id).await?.ok_or_else(|| {
                TsError::Rejected(format!("Media {media_id} has no content yet"))
            })?;
            let uri = status.download_url.as_deref().ok_or_else(|| {
                TsError::UnexpectedReply(format!("No download URL for media {media_id}"))
            })?;
            let path = output.unwrap_or_else(|| PathBuf::from(format!("{media_id}.mp3")));

            let pb = ProgressBar::new(status.file_size.unwrap_or(0));
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  Downloading [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-"),
            );

            let pb_clone = pb.clone();
            let written = api
                .download_file_with_progress(uri, &path, move |downloaded, total| {
                    if total > 0 {
                        pb_clone.set_length(total);
                    }
                    pb_clone.set_position(downloaded);
                })
                .await;
            pb.finish_and_clear();
            let written = written?;

            match format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::json!({
                            "mediaId": media_id,
                            "path": path.display().to_string(),
                            "bytes": written,
                        })
                    );
                }
                OutputFormat::Text => {
                    println!(
                        "  {} Saved {} ({})",
                        style("OK").green().bold(),
                        path.display(),
                        super::format_bytes(written)
                    );
                }
            }
        }
    }

    Ok(())
}
