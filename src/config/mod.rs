//! Configuration management.
//!
//! Supports configuration from:
//! - TOML config files
//! - Environment variables (`PROMPTGATE_*`)
//!
//! Also defines [`Settings`], the persisted caller-preferences object used
//! by paste-intercepting front ends. Settings resolution is lenient: a
//! missing or corrupt settings store falls back to built-in defaults so a
//! broken store never disables scanning outright.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::engine::{ThresholdMode, ThresholdPolicy};
use crate::error::{GateError, Result};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration section
    #[serde(default)]
    pub server: ServerSection,

    /// Default scan settings
    #[serde(default)]
    pub defaults: Settings,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| GateError::Config(format!("Failed to read config file: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| GateError::Config(format!("Failed to parse config: {e}")))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("PROMPTGATE_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("PROMPTGATE_PORT") {
            if let Ok(port) = port.parse() {
                config.server.port = port;
            }
        }
        if let Ok(strict) = std::env::var("PROMPTGATE_STRICT") {
            if let Ok(strict) = strict.parse() {
                config.defaults.strict_mode = strict;
            }
        }

        config
    }

    /// Default config file location (`<config dir>/promptgate/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("promptgate").join("config.toml"))
    }
}

/// HTTP server configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Default sensitivity when a request omits `strict_mode`
    pub strict_default: bool,

    /// Maximum accepted text length in characters
    pub max_text_len: usize,

    /// Maximum batch size
    pub max_batch: usize,

    /// Provisioned API keys (issuance is out of scope; keys are static)
    #[serde(default)]
    pub api_keys: Vec<ApiKeyEntry>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8300,
            strict_default: false,
            max_text_len: 50_000,
            max_batch: 20,
            api_keys: Vec::new(),
        }
    }
}

/// A provisioned API key with its plan and per-minute quota
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyEntry {
    /// The key value presented in the `x-api-key` header
    pub key: String,

    /// Plan name echoed back in responses
    pub plan: String,

    /// Requests allowed per minute window
    pub per_minute: u32,
}

/// Persisted caller preferences (the paste-intercept surface's settings
/// object).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scanning enabled at all
    pub enabled: bool,

    /// Strict sensitivity bit
    pub strict_mode: bool,

    /// Three-way warn threshold mode
    pub warn_threshold_mode: ThresholdMode,

    /// Per-site enable overrides, keyed by hostname
    pub site_overrides: HashMap<String, bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            strict_mode: false,
            warn_threshold_mode: ThresholdMode::Yellow,
            site_overrides: HashMap::new(),
        }
    }
}

impl Settings {
    /// Parse settings from stored JSON, falling back to defaults when the
    /// store is unavailable or the payload is corrupt.
    pub fn from_json_lossy(raw: Option<&str>) -> Self {
        match raw {
            Some(json) => serde_json::from_str(json).unwrap_or_else(|err| {
                tracing::warn!(%err, "settings store unreadable, using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// The threshold policy these settings select.
    pub fn policy(&self) -> ThresholdPolicy {
        ThresholdPolicy::new(self.warn_threshold_mode, self.strict_mode)
    }

    /// Whether scanning is enabled for a given site, honoring per-site
    /// overrides.
    pub fn enabled_for(&self, host: &str) -> bool {
        if !self.enabled {
            return false;
        }
        self.site_overrides.get(host).copied().unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8300);
        assert_eq!(config.server.max_text_len, 50_000);
        assert_eq!(config.server.max_batch, 20);
        assert!(config.defaults.enabled);
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 9100
            strict_default = true
            max_text_len = 50000
            max_batch = 10

            [[server.api_keys]]
            key = "pg_test_1"
            plan = "free"
            per_minute = 60

            [defaults]
            enabled = true
            strict_mode = true
            warn_threshold_mode = "red"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9100);
        assert!(config.server.strict_default);
        assert_eq!(config.server.api_keys.len(), 1);
        assert_eq!(config.server.api_keys[0].plan, "free");
        assert_eq!(config.defaults.warn_threshold_mode, ThresholdMode::Red);
    }

    #[test]
    fn test_config_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nhost = \"127.0.0.1\"\nport = 8111\nstrict_default = false\nmax_text_len = 50000\nmax_batch = 20"
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 8111);
    }

    #[test]
    fn test_config_from_missing_file() {
        assert!(Config::from_file("/nonexistent/promptgate.toml").is_err());
    }

    #[test]
    fn test_settings_lossy_fallback() {
        let defaults = Settings::from_json_lossy(None);
        assert!(defaults.enabled);
        assert!(!defaults.strict_mode);

        let corrupt = Settings::from_json_lossy(Some("{not json"));
        assert!(corrupt.enabled);
        assert_eq!(corrupt.warn_threshold_mode, ThresholdMode::Yellow);

        let partial = Settings::from_json_lossy(Some(r#"{"strict_mode": true}"#));
        assert!(partial.strict_mode);
        assert!(partial.enabled);
    }

    #[test]
    fn test_settings_policy_selection() {
        let mut settings = Settings::default();
        assert_eq!(settings.policy().flag_threshold(), 35);

        settings.strict_mode = true;
        assert_eq!(settings.policy().flag_threshold(), 25);

        settings.warn_threshold_mode = ThresholdMode::Red;
        assert_eq!(settings.policy().flag_threshold(), 55);

        settings.warn_threshold_mode = ThresholdMode::Off;
        assert!(settings.policy().flag_threshold() > 100);
    }

    #[test]
    fn test_site_overrides() {
        let mut settings = Settings::default();
        settings.site_overrides.insert("chat.example.com".to_string(), false);

        assert!(!settings.enabled_for("chat.example.com"));
        assert!(settings.enabled_for("other.example.com"));

        settings.enabled = false;
        assert!(!settings.enabled_for("other.example.com"));
    }
}
