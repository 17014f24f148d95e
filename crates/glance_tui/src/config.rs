//! Application configuration management.
//!
//! Handles loading of the provider and logging settings from TOML files
//! with environment variable override support.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "value-glance.toml";

/// Application configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GlanceConfig {
    /// Financial data provider base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Ticker whose statements are fetched
    #[serde(default = "default_ticker")]
    pub ticker: String,

    /// Statement period
    #[serde(default = "default_period")]
    pub period: String,

    /// Provider API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log file (the TUI owns the terminal, so logs never go to stdout)
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://financialmodelingprep.com".to_string()
}

fn default_ticker() -> String {
    "AAPL".to_string()
}

fn default_period() -> String {
    "annual".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("value-glance.log")
}

fn default_request_timeout_secs() -> u64 {
    15
}

impl Default for GlanceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            ticker: default_ticker(),
            period: default_period(),
            api_key: None,
            log_level: default_log_level(),
            log_file: default_log_file(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl GlanceConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path` or return default config if it is absent
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(mut self) -> Self {
        if let Ok(base_url) = std::env::var("GLANCE_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(ticker) = std::env::var("GLANCE_TICKER") {
            self.ticker = ticker;
        }

        if let Ok(period) = std::env::var("GLANCE_PERIOD") {
            self.period = period;
        }

        if let Ok(api_key) = std::env::var("GLANCE_API_KEY") {
            self.api_key = Some(api_key);
        }

        if let Ok(log_level) = std::env::var("GLANCE_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Ok(log_file) = std::env::var("GLANCE_LOG_FILE") {
            self.log_file = PathBuf::from(log_file);
        }

        self
    }

    /// Validate the configuration
    ///
    /// A missing API key is not checked: the provider rejects the request
    /// and the table surfaces that failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            errors.push(format!(
                "Invalid base_url '{}'. Must start with http:// or https://",
                self.base_url
            ));
        }

        if self.ticker.trim().is_empty() {
            errors.push("ticker cannot be empty".to_string());
        } else if !self
            .ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            errors.push(format!(
                "Invalid ticker '{}'. Use letters, digits, '.' or '-'",
                self.ticker
            ));
        }

        let valid_periods = ["annual", "quarter"];
        if !valid_periods.contains(&self.period.as_str()) {
            errors.push(format!(
                "Invalid period '{}'. Valid values: {:?}",
                self.period, valid_periods
            ));
        }

        if self.request_timeout_secs == 0 {
            errors.push("request_timeout_secs must be greater than 0".to_string());
        }

        if self.log_file.as_os_str().is_empty() {
            errors.push("log_file cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Configuration error type
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
