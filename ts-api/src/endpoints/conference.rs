//! Conference endpoints: create, add legs, close, and per-leg actions
//! (hangup, move, mute, unmute).

use reqwest::Method;
use tracing::info;

use ts_core::constants::tags;
use ts_core::error::{TsError, TsResult};

use crate::client::ApiClient;
use crate::endpoints::{any_blank, is_blank};
use crate::outcome::{
    FailKind, Message, Outcome, StatusTable, CALL_LEG_ACTION, NOT_ASSOCIATED,
};
use crate::response::ServerResponse;

const CREATE_CONFERENCE: StatusTable = StatusTable {
    entries: &[(201, Outcome::Success)],
    otherwise: Outcome::Negative,
};

const ADD_TO_CONFERENCE: StatusTable = StatusTable {
    entries: &[
        (200, Outcome::Success),
        (202, Outcome::Success),
        (502, Outcome::Negative),
        (401, Outcome::Fail(FailKind::Rejected, Message::Fixed(NOT_ASSOCIATED))),
        (
            400,
            Outcome::Fail(
                FailKind::InvalidParameter,
                Message::ServerOr("Missing or invalid parameters."),
            ),
        ),
    ],
    otherwise: Outcome::Negative,
};

const CLOSE_CONFERENCE: StatusTable = StatusTable {
    entries: &[
        (200, Outcome::Success),
        (202, Outcome::Success),
        (404, Outcome::Negative),
        (502, Outcome::Negative),
        (401, Outcome::Fail(FailKind::Rejected, Message::Fixed(NOT_ASSOCIATED))),
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
    /// Create a conference led by `network_id`.
    ///
    /// `recording_id` records the conference audio into that media ID;
    /// `greeting_id` plays a greeting to joining legs.
    pub async fn create_conference(
        &self,
        network_id: &str,
        recording_id: Option<&str>,
        greeting_id: Option<&str>,
    ) -> TsResult<Option<ServerResponse>> {
        if is_blank(network_id) {
            return Err(TsError::InvalidParameter("networkId should be set".into()));
        }
        let mut params = vec![("networkid", network_id)];
        if let Some(id) = recording_id.filter(|id| !is_blank(id)) {
            params.push(("recordingid", id));
        }
        if let Some(id) = greeting_id.filter(|id| !is_blank(id)) {
            params.push(("greetingid", id));
        }

        let resp = self
            .call(Method::POST, &["conference"], &params, tags::CONFERENCE)
            .await?;
        let created = CREATE_CONFERENCE.resolve(resp)?;
        if let Some(conf) = &created {
            info!("created conference {}", conf.conference_id.as_deref().unwrap_or("?"));
        }
        Ok(created)
    }

    /// Add one or more network IDs (call legs) to a conference.
    pub async fn add_to_conference(
        &self,
        network_ids: &[&str],
        conference_id: &str,
        greeting_id: Option<&str>,
    ) -> TsResult<Option<ServerResponse>> {
        let mut params = vec![("action", "add")];
        params.extend(network_ids.iter().map(|id| ("networkid", *id)));
        if let Some(id) = greeting_id.filter(|id| !is_blank(id)) {
            params.push(("greetingid", id));
        }

        let resp = self
            .call(
                Method::POST,
                &["conference", conference_id],
                &params,
                tags::CONFERENCE,
            )
            .await?;
        ADD_TO_CONFERENCE.resolve(resp)
    }

    /// Close a conference and terminate any legs still in progress.
    /// `None` if the conference ID is unknown.
    pub async fn close_conference(&self, conference_id: &str) -> TsResult<Option<ServerResponse>> {
        if is_blank(conference_id) {
            return Err(TsError::InvalidParameter("Missing or invalid parameter".into()));
        }
        let resp = self
            .call(
                Method::POST,
                &["conference", conference_id],
                &[("action", "close")],
                tags::CONFERENCE,
            )
            .await?;
        CLOSE_CONFERENCE.resolve(resp)
    }

    /// Terminate one conference leg.
    pub async fn hangup_call(
        &self,
        network_id: &str,
        conference_id: &str,
    ) -> TsResult<Option<ServerResponse>> {
        if any_blank(&[network_id, conference_id]) {
            return Err(TsError::InvalidParameter("Missing parameters.".into()));
        }
        self.leg_action(conference_id, network_id, &[("action", "hangup")])
            .await
    }

    /// Move a call leg from one conference to another.
    pub async fn move_call(
        &self,
        from_conference_id: &str,
        to_conference_id: &str,
        network_id: &str,
    ) -> TsResult<Option<ServerResponse>> {
        if any_blank(&[from_conference_id, to_conference_id, network_id]) {
            return Err(TsError::InvalidParameter("Missing or invalid parameter".into()));
        }
        self.leg_action(
            from_conference_id,
            network_id,
            &[("toconferenceid", to_conference_id), ("action", "move")],
        )
        .await
    }

    /// Mute one conference leg.
    pub async fn mute_call(
        &self,
        conference_id: &str,
        network_id: &str,
    ) -> TsResult<Option<ServerResponse>> {
        if any_blank(&[conference_id, network_id]) {
            return Err(TsError::InvalidParameter("Missing or invalid parameter(s).".into()));
        }
        self.leg_action(conference_id, network_id, &[("action", "mute")])
            .await
    }

    /// Unmute one conference leg.
    pub async fn unmute_call(
        &self,
        conference_id: &str,
        network_id: &str,
    ) -> TsResult<Option<ServerResponse>> {
        if any_blank(&[conference_id, network_id]) {
            return Err(TsError::InvalidParameter("Missing parameter(s).".into()));
        }
        self.leg_action(conference_id, network_id, &[("action", "unmute")])
            .await
    }

    /// POST to `conference/{conference_id}/{network_id}`.
    async fn leg_action(
        &self,
        conference_id: &str,
        network_id: &str,
        params: &[(&str, &str)],
    ) -> TsResult<Option<ServerResponse>> {
        let resp = self
            .call(
                Method::POST,
                &["conference", conference_id, network_id],
                params,
                tags::CONFERENCE,
            )
            .await?;
        CALL_LEG_ACTION.resolve(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> ServerResponse {
        ServerResponse { status, ..ServerResponse::default() }
    }

    #[test]
    fn test_create_conference_table() {
        assert!(CREATE_CONFERENCE.resolve(response(201)).unwrap().is_some());
        assert!(CREATE_CONFERENCE.resolve(response(200)).unwrap().is_none());
    }

    #[test]
    fn test_close_conference_table() {
        assert!(CLOSE_CONFERENCE.resolve(response(200)).unwrap().is_some());
        assert!(CLOSE_CONFERENCE.resolve(response(404)).unwrap().is_none());
        assert!(CLOSE_CONFERENCE.resolve(response(502)).unwrap().is_none());
        assert_eq!(CLOSE_CONFERENCE.resolve(response(401)).unwrap_err().code(), 200);
    }

    #[test]
    fn test_add_to_conference_table() {
        assert!(ADD_TO_CONFERENCE.resolve(response(202)).unwrap().is_some());
        assert!(ADD_TO_CONFERENCE.resolve(response(502)).unwrap().is_none());
        let err = ADD_TO_CONFERENCE.resolve(response(400)).unwrap_err();
        assert_eq!(err.message(), "Missing or invalid parameters.");
    }
}
