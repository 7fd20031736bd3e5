//! Media endpoints: create, record, blast, status, upload grants, removal.

use std::time::Duration;

use reqwest::Method;
use tracing::debug;

use ts_core::constants::tags;
use ts_core::error::{TsError, TsResult};

use crate::client::ApiClient;
use crate::endpoints::{any_blank, is_blank};
use crate::outcome::{FailKind, Message, Outcome, StatusTable};
use crate::response::ServerResponse;

const MISSING_PARAMETERS: &str = "Missing parameter(s)";
const MISSING_OR_INVALID: &str = "Missing or invalid parameter";

const CREATE_MEDIA: StatusTable = StatusTable {
    entries: &[(201, Outcome::Success), (400, Outcome::Negative)],
    otherwise: Outcome::Negative,
};

const RECORD_CALL: StatusTable = StatusTable {
    entries: &[
        (201, Outcome::Success),
        (400, Outcome::Fail(FailKind::InvalidParameter, Message::Fixed(MISSING_PARAMETERS))),
        (500, Outcome::Negative),
        (502, Outcome::FailOrNegative(FailKind::InvalidParameter)),
    ],
    otherwise: Outcome::Negative,
};

const BLAST_CALL: StatusTable = StatusTable {
    entries: &[
        (201, Outcome::Success),
        (400, Outcome::Fail(FailKind::InvalidParameter, Message::Fixed(MISSING_PARAMETERS))),
        (500, Outcome::Negative),
    ],
    otherwise: Outcome::Negative,
};

const MEDIA_STATUS: StatusTable = StatusTable {
    entries: &[(200, Outcome::Success), (204, Outcome::Negative)],
    otherwise: Outcome::Negative,
};

const UPLOAD_GRANT: StatusTable = StatusTable {
    entries: &[
        (201, Outcome::Success),
        (400, Outcome::Fail(FailKind::InvalidParameter, Message::Fixed(MISSING_OR_INVALID))),
        (401, Outcome::Negative),
    ],
    otherwise: Outcome::Negative,
};

const REMOVE_MEDIA: StatusTable = StatusTable {
    entries: &[
        (200, Outcome::Success),
        (404, Outcome::Negative),
        (
            401,
            Outcome::Fail(
                FailKind::NotRemovable,
                Message::Fixed("The content associated with the media ID cannot be removed."),
            ),
        ),
        (
            400,
            Outcome::Fail(
                FailKind::InvalidParameter,
                Message::ServerOr("Missing or invalid parameter(s)."),
            ),
        ),
    ],
    otherwise: Outcome::Negative,
};

impl ApiClient {
    /// Allocate a media ID for later `record_call` / `blast_call` use.
    pub async fn create_media(&self, network_id: &str) -> TsResult<Option<ServerResponse>> {
        if is_blank(network_id) {
            return Err(TsError::InvalidParameter("Network ID should not be blank".into()));
        }
        let resp = self.call(Method::POST, &["media"], &[], tags::MEDIA).await?;
        CREATE_MEDIA.resolve(resp)
    }

    /// Call `network_id` and play a "record greeting" prompt into `media_id`.
    ///
    /// Progress is followed with `get_media_status`. `None` means the
    /// recording cannot be started right now.
    pub async fn record_call(
        &self,
        network_id: &str,
        media_id: &str,
    ) -> TsResult<Option<ServerResponse>> {
        self.media_action(media_id, "record", network_id, &RECORD_CALL).await
    }

    /// Call `network_id` and play the greeting previously recorded into
    /// `media_id`. Blank arguments yield `None` without contacting the server.
    pub async fn blast_call(
        &self,
        network_id: &str,
        media_id: &str,
    ) -> TsResult<Option<ServerResponse>> {
        if any_blank(&[network_id, media_id]) {
            return Ok(None);
        }
        self.media_action(media_id, "blast", network_id, &BLAST_CALL).await
    }

    /// Status of a media ID and the operation in progress. `None` while the
    /// media is still blank.
    pub async fn get_media_status(&self, media_id: &str) -> TsResult<Option<ServerResponse>> {
        if is_blank(media_id) {
            return Err(TsError::InvalidParameter(MISSING_PARAMETERS.into()));
        }
        let resp = self
            .call(Method::GET, &["media", media_id], &[], tags::MEDIA)
            .await?;
        MEDIA_STATUS.resolve(resp)
    }

    /// Ask for a single-use upload grant for `media_id`, valid for 24 hours.
    /// `None` if the media ID does not belong to this application.
    pub async fn upload_grant_request(&self, media_id: &str) -> TsResult<Option<ServerResponse>> {
        if is_blank(media_id) {
            return Err(TsError::InvalidParameter(MISSING_OR_INVALID.into()));
        }
        let resp = self
            .call(
                Method::POST,
                &["media", media_id],
                &[("action", "upload_grant")],
                tags::UPLOAD,
            )
            .await?;
        UPLOAD_GRANT.resolve(resp)
    }

    /// Remove a media instance. `None` if the media ID is unknown.
    pub async fn remove_media(&self, media_id: &str) -> TsResult<Option<ServerResponse>> {
        if is_blank(media_id) {
            return Err(TsError::InvalidParameter(MISSING_OR_INVALID.into()));
        }
        let resp = self
            .call(
                Method::POST,
                &["media", media_id],
                &[("action", "remove")],
                tags::MEDIA,
            )
            .await?;
        REMOVE_MEDIA.resolve(resp)
    }

    /// Poll `get_media_status` until the recording has content.
    ///
    /// Returns the first status with `fileSize > 0`, or `None` once
    /// `attempts` polls have come back empty. Errors end the poll at once.
    pub async fn await_recording(
        &self,
        media_id: &str,
        interval: Duration,
        attempts: u32,
    ) -> TsResult<Option<ServerResponse>> {
        for attempt in 1..=attempts {
            if let Some(status) = self.get_media_status(media_id).await? {
                if status.has_content() {
                    return Ok(Some(status));
                }
            }
            debug!("media {media_id} still empty (poll {attempt}/{attempts})");
            if attempt < attempts {
                tokio::time::sleep(interval).await;
            }
        }
        Ok(None)
    }

    async fn media_action(
        &self,
        media_id: &str,
        action: &str,
        network_id: &str,
        table: &StatusTable,
    ) -> TsResult<Option<ServerResponse>> {
        let resp = self
            .call(
                Method::POST,
                &["media", media_id],
                &[("action", action), ("networkid", network_id)],
                tags::MEDIA,
            )
            .await?;
        table.resolve(resp)
    }
}
