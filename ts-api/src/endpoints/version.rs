//! API version endpoint.

use ts_core::error::{TsError, TsResult};
use crate::client::ApiClient;

/// Message for a version reply that is not `xx.yy.zz`.
pub const MALFORMED_VERSION: &str = "Unexpected answer from Telesocial server";

impl ApiClient {
    /// Get the server API version in `xx.yy.zz` form (e.g. "01.02.06").
    pub async fn get_version(&self) -> TsResult<String> {
        let body = self.get_text(&["version"]).await?;
        parse_version(&body)
    }
}

/// Accept exactly three non-empty, all-digit components separated by dots.
pub fn parse_version(body: &str) -> TsResult<String> {
    let version = body.trim();
    let parts: Vec<&str> = version.split('.').collect();
    let well_formed = parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));

    if well_formed {
        Ok(version.to_string())
    } else {
        Err(TsError::MalformedVersion(MALFORMED_VERSION.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_accepts_three_parts() {
        assert_eq!(parse_version("01.02.06\n").unwrap(), "01.02.06");
        assert_eq!(parse_version("1.2.3").unwrap(), "1.2.3");
    }

    #[test]
    fn test_parse_version_rejects_other_shapes() {
        for body in ["", "01.02", "01.02.06.1", "1..3", "a.b.c", "{\"status\":200}"] {
            let err = parse_version(body).unwrap_err();
            assert_eq!(err.code(), 101, "body {body:?}");
            assert_eq!(err.message(), MALFORMED_VERSION);
        }
    }
}
