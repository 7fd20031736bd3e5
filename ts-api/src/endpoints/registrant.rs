//! Registrant endpoints: register, check, and delete network IDs.

use reqwest::Method;
use tracing::info;

use ts_core::constants::tags;
use ts_core::error::{TsError, TsResult};

use crate::client::ApiClient;
use crate::endpoints::{any_blank, is_blank};
use crate::outcome::{FailKind, Message, Outcome, StatusTable};
use crate::response::ServerResponse;

const CHECK_REGISTRATION: StatusTable = StatusTable {
    entries: &[
        (200, Outcome::Success),
        (404, Outcome::Negative),
        (
            401,
            Outcome::Fail(
                FailKind::Unavailable,
                Message::Fixed(
                    "Network ID exists but it not associated with the specified application",
                ),
            ),
        ),
    ],
    otherwise: Outcome::Negative,
};

const REGISTER_USER: StatusTable = StatusTable {
    entries: &[(201, Outcome::Success)],
    otherwise: Outcome::Fail(FailKind::Rejected, Message::ServerOr("User registration failed")),
};

const DELETE_USER: StatusTable = StatusTable {
    entries: &[(200, Outcome::Success)],
    otherwise: Outcome::Negative,
};

/// Strip everything but digits from a phone number.
pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

impl ApiClient {
    /// Check whether a network ID is registered.
    ///
    /// With `check_associated` the server also checks that the registrant
    /// is related to this application; a registrant that exists but is not
    /// related fails with code 300.
    pub async fn check_user_registration(
        &self,
        network_id: &str,
        check_associated: bool,
    ) -> TsResult<bool> {
        if is_blank(network_id) {
            return Err(TsError::InvalidParameter("Network ID should not be blank".into()));
        }
        let query = if check_associated { "related" } else { "exists" };
        let resp = self
            .call(
                Method::POST,
                &["registrant", network_id],
                &[("query", query)],
                tags::REGISTRANT,
            )
            .await?;
        Ok(CHECK_REGISTRATION.resolve(resp)?.is_some())
    }

    /// Register a network ID and phone number pair with this application.
    ///
    /// Non-digit characters are stripped from the phone number. On success
    /// the response carries the registrant `uri`; any status other than 201
    /// fails with code 200 and the message from that same reply, or
    /// "User registration failed" when it carried none. A message left over
    /// from an earlier call is never used.
    pub async fn register_user(&self, network_id: &str, phone: &str) -> TsResult<ServerResponse> {
        if any_blank(&[network_id, phone]) {
            return Err(TsError::MissingParameter("Expected parameters are empty".into()));
        }
        let phone = digits_only(phone);
        let resp = self
            .call(
                Method::POST,
                &["registrant"],
                &[("networkid", network_id), ("phone", phone.as_str())],
                tags::REGISTRATION,
            )
            .await?;

        match REGISTER_USER.resolve(resp)? {
            Some(registered) => {
                info!("registered {network_id}");
                Ok(registered)
            }
            // The table has no negative outcome; treat one as a rejection.
            None => Err(TsError::Rejected("User registration failed".into())),
        }
    }

    /// Delete a registrant and everything associated with it (media, etc).
    ///
    /// This destroys the registrant's data on the server.
    pub async fn delete_user(&self, network_id: &str) -> TsResult<Option<ServerResponse>> {
        if is_blank(network_id) {
            return Err(TsError::InvalidParameter("Missing or invalid parameter".into()));
        }
        let resp = self
            .call(
                Method::DELETE,
                &["registrant", network_id],
                &[],
                tags::REGISTRATION,
            )
            .await?;
        let deleted = DELETE_USER.resolve(resp)?;
        if deleted.is_some() {
            info!("deleted registrant {network_id}");
        }
        Ok(deleted)
    }
}
