//! Server response envelope.
//!
//! Every Telesocial reply is a JSON object keyed by a response tag:
//! ```json
//! { "MediaResponse": { "status": 201, "mediaId": "8af0...", "message": "..." } }
//! ```
//! Errors the server detects on its own arrive under `ErrorResponse`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use ts_core::constants::tags;
use ts_core::error::{TsError, TsResult};

/// Message used whenever a reply cannot be interpreted.
pub const UNEXPECTED_REPLY: &str = "Unexpected reply from server";

/// The object found under the response tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerResponse {
    /// Status code embedded in the reply body.
    #[serde(deserialize_with = "de_status")]
    pub status: u16,
    /// Human-readable message, with the API key masked.
    #[serde(default, deserialize_with = "de_opt_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "mediaId", default, deserialize_with = "de_opt_string", skip_serializing_if = "Option::is_none")]
    pub media_id: Option<String>,
    #[serde(rename = "conferenceId", default, deserialize_with = "de_opt_string", skip_serializing_if = "Option::is_none")]
    pub conference_id: Option<String>,
    /// Resource URI of the registrant, conference leg, or media.
    #[serde(default, deserialize_with = "de_opt_string", skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(rename = "downloadUrl", default, deserialize_with = "de_opt_string", skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// Size of the recorded file; 0 while recording is in progress.
    #[serde(rename = "fileSize", default, deserialize_with = "de_opt_u64", skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    /// Any other keys the server sent (grant codes, leg lists, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Tag the object was found under.
    #[serde(skip)]
    pub tag: String,
}

impl ServerResponse {
    /// Whether the reply came under `ErrorResponse` instead of the expected tag.
    pub fn is_error_response(&self) -> bool {
        self.tag == tags::ERROR
    }

    /// The message if it is present and not blank.
    pub fn non_empty_message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }

    /// Look up a key the struct does not model directly.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Whether a recording has content (`fileSize` above zero).
    pub fn has_content(&self) -> bool {
        self.file_size.unwrap_or(0) > 0
    }
}

/// Decode a raw body and pick the object under `expected_tag`.
///
/// Falls back to `ErrorResponse` when the expected tag is missing or has no
/// `status`. Anything else is `UnexpectedReply`.
pub fn decode_envelope(body: &[u8], expected_tag: &str) -> TsResult<ServerResponse> {
    let mut root = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => return Err(TsError::UnexpectedReply(UNEXPECTED_REPLY.into())),
    };

    let tag = if has_status(&root, expected_tag) {
        expected_tag
    } else if root.contains_key(tags::ERROR) {
        tags::ERROR
    } else {
        return Err(TsError::UnexpectedReply(UNEXPECTED_REPLY.into()));
    };

    let object = root.remove(tag).unwrap_or(Value::Null);
    let mut response: ServerResponse = serde_json::from_value(object)
        .map_err(|_| TsError::UnexpectedReply(UNEXPECTED_REPLY.into()))?;
    response.tag = tag.to_string();
    Ok(response)
}

fn has_status(root: &Map<String, Value>, tag: &str) -> bool {
    root.get(tag)
        .and_then(Value::as_object)
        .is_some_and(|o| o.contains_key("status"))
}

/// Accepts either a JSON number or a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Number(serde_json::Number),
    Text(String),
}

fn de_status<'de, D: Deserializer<'de>>(d: D) -> Result<u16, D::Error> {
    let raw = Lenient::deserialize(d)?;
    let parsed = match raw {
        Lenient::Number(n) => n.as_u64().and_then(|v| u16::try_from(v).ok()),
        Lenient::Text(s) => s.trim().parse::<u16>().ok(),
    };
    parsed.ok_or_else(|| serde::de::Error::custom("status is not a valid status code"))
}

fn de_opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Lenient>::deserialize(d)? {
        Some(Lenient::Text(s)) => Some(s),
        Some(Lenient::Number(n)) => Some(n.to_string()),
        None => None,
    })
}

fn de_opt_u64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    Ok(match Option::<Lenient>::deserialize(d)? {
        Some(Lenient::Number(n)) => n.as_u64(),
        Some(Lenient::Text(s)) => s.trim().parse::<u64>().ok(),
        None => None,
    })
}
