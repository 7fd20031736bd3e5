//! Application-wide constants.

/// Application name.
pub const APP_NAME: &str = "Telesocial";

/// Client version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("telesocial-rs/", env!("CARGO_PKG_VERSION"));

/// Path prefix of every REST endpoint, relative to the server root.
pub const API_ROOT: &str = "api/rest/";

/// Server API version this client was written against.
pub const SUPPORTED_API_VERSION: &str = "01.02.06";

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Port that implies `https://` when the host has no scheme.
pub const HTTPS_PORT: u16 = 443;

/// Top-level response tags used by the server envelope.
pub mod tags {
    pub const REGISTRANT: &str = "RegistrantResponse";
    pub const REGISTRATION: &str = "RegistrationResponse";
    pub const MEDIA: &str = "MediaResponse";
    pub const CONFERENCE: &str = "ConferenceResponse";
    pub const UPLOAD: &str = "UploadResponse";
    pub const ERROR: &str = "ErrorResponse";
}
