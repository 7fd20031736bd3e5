//! API endpoint modules organized by resource.
//!
//! Each module adds methods to `ApiClient` and declares the status table
//! for every operation it exposes.

pub mod conference;
pub mod download;
pub mod media;
pub mod registrant;
pub mod version;

/// Whether a required parameter is missing.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Whether any of the required parameters is missing.
pub(crate) fn any_blank(values: &[&str]) -> bool {
    values.iter().any(|v| is_blank(v))
}
