//! Error types for the Telesocial client.
//!
//! Every failure surfaces as a single `TsError` carrying a human-readable
//! message and a numeric code. Codes fall into three bands:
//!
//! - 100-199: caller error, check the query parameters or configuration
//! - 200-299: network or protocol error, the caller may send the query again
//! - 300-399: the server reports that the feature is not available

use thiserror::Error;

/// Convenience type alias for Results using TsError.
pub type TsResult<T> = Result<T, TsError>;

/// Unified error type for every connector operation.
#[derive(Error, Debug)]
pub enum TsError {
    // -- Caller errors (100-199) --
    /// Malformed server host, missing API key, or unreadable config file.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required parameter was blank.
    #[error("missing parameter: {0}")]
    MissingParameter(String),

    /// The server answered 404 to an operation that has no meaning for it.
    #[error("invalid API key: {0}")]
    InvalidApiKey(String),

    /// The version endpoint returned something other than `xx.yy.zz`.
    #[error("malformed version reply: {0}")]
    MalformedVersion(String),

    /// A parameter was blank or rejected by the server.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The media content cannot be removed.
    #[error("media not removable: {0}")]
    NotRemovable(String),

    /// Writing a downloaded file to the local path failed.
    #[error("local io error: {0}")]
    LocalIo(#[from] std::io::Error),

    // -- Network errors (200-299) --
    /// HTTP request failed at the transport level.
    #[error("http error: {0}")]
    Http(String),

    /// HTTP request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// The reply could not be decoded or had no recognised response tag.
    #[error("unexpected reply: {0}")]
    UnexpectedReply(String),

    /// The server refused an operation (registration failure, leg not
    /// associated with the application, and so on).
    #[error("rejected by server: {0}")]
    Rejected(String),

    // -- Server errors (300-399) --
    /// The feature is not available for this registrant or application.
    #[error("feature unavailable: {0}")]
    Unavailable(String),
}

/// The three error code bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorBand {
    /// 100-199: fix the parameters before calling again.
    Caller,
    /// 200-299: transient, the query can be re-sent later.
    Network,
    /// 300-399: the server does not offer this at the moment.
    Server,
}

impl ErrorBand {
    /// Classify a numeric error code.
    pub fn from_code(code: u16) -> Self {
        match code {
            200..=299 => Self::Network,
            300..=399 => Self::Server,
            _ => Self::Caller,
        }
    }
}

impl TsError {
    /// Numeric error code.
    pub fn code(&self) -> u16 {
        match self {
            Self::Config(_) | Self::MissingParameter(_) | Self::InvalidApiKey(_) => 100,
            Self::MalformedVersion(_) => 101,
            Self::InvalidParameter(_) => 102,
            Self::NotRemovable(_) => 103,
            Self::LocalIo(_) => 104,
            Self::Http(_) | Self::Timeout(_) | Self::UnexpectedReply(_) | Self::Rejected(_) => 200,
            Self::Unavailable(_) => 300,
        }
    }

    /// The bare message, without the category prefix used by `Display`.
    pub fn message(&self) -> String {
        match self {
            Self::Config(m)
            | Self::MissingParameter(m)
            | Self::InvalidApiKey(m)
            | Self::MalformedVersion(m)
            | Self::InvalidParameter(m)
            | Self::NotRemovable(m)
            | Self::Http(m)
            | Self::Timeout(m)
            | Self::UnexpectedReply(m)
            | Self::Rejected(m)
            | Self::Unavailable(m) => m.clone(),
            Self::LocalIo(e) => e.to_string(),
        }
    }

    /// The band this error's code falls in.
    pub fn band(&self) -> ErrorBand {
        ErrorBand::from_code(self.code())
    }

    /// Whether re-sending the same query later may succeed.
    pub fn is_retryable(&self) -> bool {
        self.band() == ErrorBand::Network
    }
}

impl From<serde_json::Error> for TsError {
    fn from(e: serde_json::Error) -> Self {
        TsError::UnexpectedReply(e.to_string())
    }
}

impl From<toml::de::Error> for TsError {
    fn from(e: toml::de::Error) -> Self {
        TsError::Config(e.to_string())
    }
}
