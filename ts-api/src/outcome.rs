//! Per-operation status tables.
//!
//! The server reuses status codes with different meanings across
//! operations (401 is "not authorized" for some calls and "not found" for
//! others), so each endpoint declares its own `StatusTable` instead of
//! sharing a general rule.

use ts_core::error::{TsError, TsResult};

use crate::response::ServerResponse;

/// Message for a 404 on an operation that does not list 404 itself.
pub const INVALID_API_KEY: &str = "API key is invalid";

/// Message for a conference leg that does not belong to the application.
pub const NOT_ASSOCIATED: &str =
    "The specified network ID is not associated with the application identified by the application key.";

/// Which error to raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailKind {
    InvalidApiKey,
    InvalidParameter,
    NotRemovable,
    Rejected,
    Unavailable,
}

impl FailKind {
    fn into_error(self, message: String) -> TsError {
        match self {
            Self::InvalidApiKey => TsError::InvalidApiKey(message),
            Self::InvalidParameter => TsError::InvalidParameter(message),
            Self::NotRemovable => TsError::NotRemovable(message),
            Self::Rejected => TsError::Rejected(message),
            Self::Unavailable => TsError::Unavailable(message),
        }
    }
}

/// Where the error message comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Fixed(&'static str),
    /// The server's message, or the fallback if it sent none.
    ServerOr(&'static str),
}

/// What a status code means for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Hand the response to the caller.
    Success,
    /// The "false" answer: nothing happened, but nothing is wrong either.
    Negative,
    Fail(FailKind, Message),
    /// Fail with the server's message if it sent one, otherwise negative.
    FailOrNegative(FailKind),
}

static UNLISTED_NOT_FOUND: Outcome =
    Outcome::Fail(FailKind::InvalidApiKey, Message::Fixed(INVALID_API_KEY));

/// Status code to outcome mapping for a single operation.
#[derive(Debug)]
pub struct StatusTable {
    pub entries: &'static [(u16, Outcome)],
    /// Outcome for any status not listed (except 404, see `outcome_for`).
    pub otherwise: Outcome,
}

impl StatusTable {
    /// Look up the outcome for a status.
    ///
    /// A listed status always wins. An unlisted 404 means the server did not
    /// recognise the application key.
    pub fn outcome_for(&self, status: u16) -> &Outcome {
        if let Some((_, outcome)) = self.entries.iter().find(|(s, _)| *s == status) {
            return outcome;
        }
        if status == 404 {
            return &UNLISTED_NOT_FOUND;
        }
        &self.otherwise
    }

    /// Apply the table: `Some` on success, `None` on a negative answer.
    pub fn resolve(&self, response: ServerResponse) -> TsResult<Option<ServerResponse>> {
        match *self.outcome_for(response.status) {
            Outcome::Success => Ok(Some(response)),
            Outcome::Negative => Ok(None),
            Outcome::Fail(kind, Message::Fixed(text)) => Err(kind.into_error(text.to_string())),
            Outcome::Fail(kind, Message::ServerOr(fallback)) => {
                let text = response.non_empty_message().unwrap_or(fallback);
                Err(kind.into_error(text.to_string()))
            }
            Outcome::FailOrNegative(kind) => match response.non_empty_message() {
                Some(text) => Err(kind.into_error(text.to_string())),
                None => Ok(None),
            },
        }
    }
}

/// Table shared by the leg-level conference actions: hangup, move, mute, unmute.
pub const CALL_LEG_ACTION: StatusTable = StatusTable {
    entries: &[
        (200, Outcome::Success),
        (202, Outcome::Success),
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
