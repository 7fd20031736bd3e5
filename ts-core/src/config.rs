//! Application configuration management.
//!
//! Holds the server connection settings (host, API key, timeouts, TLS and
//! proxy options) and logging preferences. Configuration is persisted as
//! TOML on disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{TsError, TsResult};
use crate::paths;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server connection settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Telesocial server host, with or without scheme
    /// (e.g. "api.telesocial.com" or "http://10.0.0.5:8080/").
    #[serde(default)]
    pub host: String,

    /// Application key issued by Telesocial.
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Skip TLS certificate verification.
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// Optional proxy applied to every request.
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,
}

/// Proxy protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyKind {
    #[default]
    Http,
    Socks5,
}

/// Proxy settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Proxy host name or address.
    pub host: String,

    /// Proxy port. The scheme default is used when unset.
    #[serde(default)]
    pub port: Option<u16>,

    /// Proxy protocol.
    #[serde(default)]
    pub kind: ProxyKind,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

// Default value functions for serde

fn default_request_timeout() -> u64 {
    constants::DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_connect_timeout() -> u64 {
    constants::DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            api_key: String::new(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            accept_invalid_certs: false,
            proxy: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl ServerConfig {
    /// Create a config for the given host and key with default timeouts.
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Validate the host and return it normalized to `scheme://host[:port]/...`
    /// with a trailing slash.
    ///
    /// A host without a scheme gets `https://` unless it names a port other
    /// than 443, in which case `http://` is used.
    pub fn normalized_host(&self) -> TsResult<String> {
        let trimmed = self.host.trim().trim_matches('"').trim();

        // A leading dot counts as no dot at all.
        if trimmed.is_empty() || !matches!(trimmed.find('.'), Some(i) if i > 0) {
            return Err(TsError::Config("Server Host is not specified".into()));
        }

        let with_scheme = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            let authority = trimmed.split('/').next().unwrap_or(trimmed);
            let port = authority
                .rsplit_once(':')
                .and_then(|(_, p)| p.parse::<u16>().ok());
            match port {
                Some(p) if p != constants::HTTPS_PORT => format!("http://{trimmed}"),
                _ => format!("https://{trimmed}"),
            }
        };

        if with_scheme.ends_with('/') {
            Ok(with_scheme)
        } else {
            Ok(format!("{with_scheme}/"))
        }
    }

    /// Return the API key, failing if it is blank.
    pub fn require_api_key(&self) -> TsResult<&str> {
        let key = self.api_key.trim();
        if key.is_empty() {
            return Err(TsError::Config("API Key is not specified".into()));
        }
        Ok(key)
    }

    /// The API key masked for display, keeping only the last four characters.
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        let visible = if chars.len() > 8 { 4 } else { 0 };
        let hidden = chars.len() - visible;
        let tail: String = chars[hidden..].iter().collect();
        format!("{}{tail}", "*".repeat(hidden))
    }
}

impl AppConfig {
    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> TsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> TsResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TsError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> TsResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| TsError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> TsResult<PathBuf> {
        paths::config_file()
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> TsResult<PathBuf> {
        if self.logging.directory.is_empty() {
            paths::log_dir()
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }

    /// Check whether the server connection is configured.
    pub fn is_server_configured(&self) -> bool {
        !self.server.host.trim().is_empty() && !self.server.api_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.request_timeout_secs, 120);
        assert_eq!(config.server.connect_timeout_secs, 10);
        assert_eq!(config.logging.level, "info");
        assert!(!config.is_server_configured());
    }

    #[test]
    fn test_normalized_host_infers_scheme() {
        let host = |h: &str| ServerConfig::new(h, "key").normalized_host().unwrap();
        assert_eq!(host("api.telesocial.com"), "https://api.telesocial.com/");
        assert_eq!(host("api.telesocial.com:443"), "https://api.telesocial.com:443/");
        assert_eq!(host("10.0.0.5:8080"), "http://10.0.0.5:8080/");
        assert_eq!(host("http://api.telesocial.com"), "http://api.telesocial.com/");
        assert_eq!(host("  \"https://api.telesocial.com/\" "), "https://api.telesocial.com/");
    }

    #[test]
    fn test_normalized_host_rejects_dotless() {
        for bad in ["", "   ", "localhost", ".telesocial"] {
            let err = ServerConfig::new(bad, "key").normalized_host().unwrap_err();
            assert_eq!(err.code(), 100, "host {bad:?}");
            assert_eq!(err.message(), "Server Host is not specified");
        }
    }

    #[test]
    fn test_require_api_key() {
        let err = ServerConfig::new("api.telesocial.com", " ").require_api_key().unwrap_err();
        assert_eq!(err.code(), 100);
        assert_eq!(err.message(), "API Key is not specified");
        assert_eq!(
            ServerConfig::new("api.telesocial.com", "abc").require_api_key().unwrap(),
            "abc"
        );
    }

    #[test]
    fn test_masked_api_key() {
        let config = ServerConfig::new("api.telesocial.com", "0123456789abcdef");
        assert_eq!(config.masked_api_key(), "************cdef");
        let short = ServerConfig::new("api.telesocial.com", "abc");
        assert_eq!(short.masked_api_key(), "***");
    }

    #[test]
    fn test_proxy_toml() {
        let toml_src = r#"
            [server]
            host = "api.telesocial.com"
            api_key = "secret"

            [server.proxy]
            host = "proxy.local"
            port = 1080
            kind = "socks5"
        "#;
        let config: AppConfig = toml::from_str(toml_src).unwrap();
        let proxy = config.server.proxy.unwrap();
        assert_eq!(proxy.kind, ProxyKind::Socks5);
        assert_eq!(proxy.port, Some(1080));
        assert!(proxy.username.is_none());
        assert_eq!(config.server.request_timeout_secs, 120);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.server = ServerConfig::new("api.telesocial.com", "secret");
        config.logging.json_output = true;
        config.save_to_file(&path).unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.server.host, "api.telesocial.com");
        assert!(loaded.logging.json_output);
        assert!(loaded.is_server_configured());
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = AppConfig::load_from_file(Path::new("/nonexistent/telesocial.toml")).unwrap_err();
        assert_eq!(err.code(), 100);
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let fresh = AppConfig::load_or_default(&path).unwrap();
        assert!(!fresh.is_server_configured());

        std::fs::write(&path, "[server]\nhost = \"api.telesocial.com\"\napi_key = \"k\"\n").unwrap();
        let loaded = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded.server.host, "api.telesocial.com");
        assert_eq!(loaded.server.request_timeout_secs, 120);

        std::fs::write(&path, "[server\n").unwrap();
        assert_eq!(AppConfig::load_or_default(&path).unwrap_err().code(), 100);
    }
}
