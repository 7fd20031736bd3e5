//! Telesocial API - HTTP client for the Telesocial REST API.
//!
//! Covers registrant management, media recording and blasting, and
//! conference call control. Each operation sends one request, decodes the
//! tagged JSON envelope, and maps the embedded status through that
//! operation's own status table to a response, a negative `None`/`false`,
//! or a `TsError` with a banded error code.

pub mod client;
pub mod endpoints;
pub mod outcome;
pub mod response;

// Re-export key types
pub use client::ApiClient;
pub use endpoints::version::parse_version;
pub use response::ServerResponse;
pub use ts_core::error::{ErrorBand, TsError, TsResult};
