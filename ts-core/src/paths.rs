//! Per-user file locations.

use std::path::PathBuf;

use crate::constants::APP_NAME;
use crate::error::{TsError, TsResult};

const CONFIG_FILE: &str = "config.toml";
const LOG_SUBDIR: &str = "logs";

/// `<config dir>/Telesocial`, e.g. `~/.config/Telesocial` on Linux.
pub fn config_dir() -> TsResult<PathBuf> {
    app_dir(dirs::config_dir(), "config")
}

/// `<data dir>/Telesocial`, e.g. `~/.local/share/Telesocial` on Linux.
pub fn data_dir() -> TsResult<PathBuf> {
    app_dir(dirs::data_dir(), "data")
}

/// Default location of the TOML configuration file.
pub fn config_file() -> TsResult<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Default directory for rolling log files.
pub fn log_dir() -> TsResult<PathBuf> {
    Ok(data_dir()?.join(LOG_SUBDIR))
}

/// Short OS label for version output ("linux", "macos", "windows", ...).
pub fn os_label() -> &'static str {
    std::env::consts::OS
}

fn app_dir(base: Option<PathBuf>, what: &str) -> TsResult<PathBuf> {
    base.map(|b| b.join(APP_NAME))
        .ok_or_else(|| TsError::Config(format!("could not determine {what} directory")))
}
