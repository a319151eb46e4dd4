//! Configuration management for the Freesound MCP server.
//!
//! Configuration is assembled once at startup from environment variables
//! (optionally seeded from a `.env` file) and shared read-only afterwards.

use std::time::Duration;
use tracing::{info, warn};

use super::error::{Error, Result};

/// Base URL of the Freesound API v2.
pub const FREESOUND_BASE_URL: &str = "https://freesound.org/apiv2";

/// Where users can request a Freesound API key.
pub const FREESOUND_KEY_URL: &str = "https://freesound.org/apiv2/apply/";

/// Placeholder value shipped in sample `.env` files.
const API_KEY_PLACEHOLDER: &str = "your_freesound_api_key_here";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Freesound API access.
    pub freesound: FreesoundConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Freesound API settings.
#[derive(Clone)]
pub struct FreesoundConfig {
    /// API token sent with every search request.
    pub api_key: Option<String>,

    /// API root, without trailing slash.
    pub base_url: String,

    /// Upper bound on a single search request.
    pub request_timeout: Duration,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for FreesoundConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreesoundConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for FreesoundConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: FREESOUND_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl FreesoundConfig {
    /// The API key, or an empty token when none is configured.
    pub fn token(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    /// Check that a usable API key is present.
    pub fn validate(&self) -> Result<()> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() && key != API_KEY_PLACEHOLDER => Ok(()),
            _ => Err(Error::config(format!(
                "FREESOUND_API_KEY is missing or still set to the placeholder value. \
                 Get your API key from: {FREESOUND_KEY_URL}"
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "freesound".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            freesound: FreesoundConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Reads `MCP_SERVER_NAME`, `MCP_LOG_LEVEL` and `FREESOUND_API_KEY`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        match std::env::var("FREESOUND_API_KEY") {
            Ok(api_key) => {
                config.freesound.api_key = Some(api_key);
                info!("Freesound API key loaded from environment");
            }
            Err(_) => warn!("FREESOUND_API_KEY not set"),
        }

        config
    }

    /// Validate settings that must hold before the server starts.
    pub fn validate(&self) -> Result<()> {
        self.freesound.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env var tests must not interleave.
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn with_key(key: &str) -> FreesoundConfig {
        FreesoundConfig {
            api_key: Some(key.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_api_key_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("FREESOUND_API_KEY", "test_key_12345");
        }
        let config = Config::from_env();
        assert_eq!(config.freesound.api_key.as_deref(), Some("test_key_12345"));
        assert!(config.validate().is_ok());
        unsafe {
            std::env::remove_var("FREESOUND_API_KEY");
        }
    }

    #[test]
    fn test_log_level_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_LOG_LEVEL", "debug");
        }
        let config = Config::from_env();
        assert_eq!(config.logging.level, "debug");
        unsafe {
            std::env::remove_var("MCP_LOG_LEVEL");
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.name, "freesound");
        assert_eq!(config.freesound.base_url, "https://freesound.org/apiv2");
        assert_eq!(config.freesound.request_timeout, Duration::from_secs(30));
        assert!(config.freesound.api_key.is_none());
    }

    #[test]
    fn test_validate_rejects_missing_key() {
        let err = Config::default().validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains(FREESOUND_KEY_URL));
    }

    #[test]
    fn test_validate_rejects_placeholder_and_blank() {
        assert!(with_key("your_freesound_api_key_here").validate().is_err());
        assert!(with_key("   ").validate().is_err());
        assert!(with_key("abc123").validate().is_ok());
    }

    #[test]
    fn test_api_key_redacted_in_debug() {
        let debug_str = format!("{:?}", with_key("super_secret_key"));
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }

    #[test]
    fn test_token_defaults_to_empty() {
        assert_eq!(FreesoundConfig::default().token(), "");
        assert_eq!(with_key("k").token(), "k");
    }
}
