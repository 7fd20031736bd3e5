//! Telesocial Core - error codes, configuration, and logging.
//!
//! Shared foundation for the API client and the CLI:
//! - `TsError` with the 100/200/300 error code bands
//! - Server connection and logging configuration (TOML)
//! - Structured logging with tracing
//! - Per-user file locations and constants

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod paths;

// Re-export commonly used items at the crate root
pub use config::{AppConfig, ServerConfig};
pub use error::{ErrorBand, TsError, TsResult};
pub use logging::{init_logging, LogGuard};
