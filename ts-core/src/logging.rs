//! Tracing setup for the library and the CLI.
//!
//! Everything goes to stderr in compact form. When a log directory is given,
//! a daily rolling `telesocial.log` is written as well, plain or JSON.
//! `RUST_LOG` overrides the configured level.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::TsResult;

const LOG_FILE_PREFIX: &str = "telesocial.log";

/// Holds the file writer's worker. Dropping it flushes pending lines.
pub struct LogGuard {
    _worker: WorkerGuard,
}

/// Install the global subscriber with a console layer and a rolling file layer.
///
/// Only the first successful call in a process takes effect; later calls
/// still create the directory and return a guard.
pub fn init_logging(level: &str, log_dir: &Path, json_output: bool) -> TsResult<LogGuard> {
    std::fs::create_dir_all(log_dir)?;
    let (writer, worker) = tracing_appender::non_blocking(rolling::daily(log_dir, LOG_FILE_PREFIX));

    let file_layer = if json_output {
        fmt::layer()
            .json()
            .with_writer(writer)
            .with_current_span(false)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_line_number(true)
            .boxed()
    };

    let installed = tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer())
        .with(filter(level))
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(level, dir = %log_dir.display(), "logging initialized");
    }
    Ok(LogGuard { _worker: worker })
}

/// Console-only logging for tests and embedding applications.
pub fn init_console_logging(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(console_layer())
        .with(filter(level))
        .try_init();
}

fn console_layer<S>() -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer().with_writer(std::io::stderr).with_target(true).compact()
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_logging_is_idempotent() {
        init_console_logging("debug");
        init_console_logging("not a valid directive ===");
    }

    #[test]
    fn test_init_logging_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("logs");
        let _guard = init_logging("info", &log_dir, true).unwrap();
        assert!(log_dir.is_dir());
    }
}
