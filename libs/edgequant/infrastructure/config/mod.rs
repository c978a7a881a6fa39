use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Backend origin used when neither the config file nor the environment sets one
pub const DEFAULT_BACKEND_URL: &str =
    "https://edgequant-backend-final.eba-ddmvghnd.ap-south-1.elasticbeanstalk.com";

/// Environment variable overriding `backend_url`
pub const ENV_BACKEND_URL: &str = "EDGEQUANT_BACKEND_URL";
/// Environment variable overriding `ws_url`
pub const ENV_BACKEND_WS: &str = "EDGEQUANT_BACKEND_WS";
/// Environment variable overriding `log_level`
pub const ENV_LOG_LEVEL: &str = "EDGEQUANT_LOG_LEVEL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// REST origin of the EdgeQuant backend
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Live feed URL. Derived from `backend_url` when unset.
    #[serde(default)]
    pub ws_url: Option<String>,
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log file used while the terminal UI is running
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Number of tick prices kept for the price strip
    #[serde(default = "default_tick_history")]
    pub tick_history: usize,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "edgequant-dashboard.log".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_tick_history() -> usize {
    120
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            ws_url: None,
            log_level: default_log_level(),
            log_file: default_log_file(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            tick_history: default_tick_history(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a YAML file, then apply environment overrides.
    ///
    /// A missing or empty file yields the defaults.
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let path = config_path.as_ref();

        let mut config = if path.exists() {
            let yaml_content = std::fs::read_to_string(path)?;
            if yaml_content.trim().is_empty() {
                Self::default()
            } else {
                serde_yaml::from_str(&yaml_content)?
            }
        } else {
            info!("Config file {} not found, using defaults", path.display());
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_BACKEND_URL).filter(|v| !v.is_empty()) {
            info!("Overriding backend URL from environment variable");
            self.backend_url = url;
        }

        if let Some(ws) = lookup(ENV_BACKEND_WS).filter(|v| !v.is_empty()) {
            info!("Overriding WebSocket URL from environment variable");
            self.ws_url = Some(ws);
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
            self.log_level = level;
        }
    }

    /// Backend origin without a trailing slash
    pub fn rest_base(&self) -> &str {
        self.backend_url.trim_end_matches('/')
    }

    /// Live feed URL: explicit `ws_url`, else the backend origin with its
    /// `http` scheme swapped for `ws` plus `/ws`
    pub fn websocket_url(&self) -> String {
        if let Some(ws) = self.ws_url.as_deref().filter(|v| !v.is_empty()) {
            return ws.to_string();
        }

        let base = self.rest_base();
        match base.strip_prefix("http") {
            Some(rest) => format!("ws{}/ws", rest),
            None => format!("{}/ws", base),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.backend_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "backend_url cannot be empty".to_string(),
            ));
        }

        if !(self.backend_url.starts_with("http://") || self.backend_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "backend_url must start with http:// or https://, got '{}'",
                self.backend_url
            )));
        }

        let ws_url = self.websocket_url();
        if !(ws_url.starts_with("ws://") || ws_url.starts_with("wss://")) {
            return Err(ConfigError::ValidationError(format!(
                "ws_url must start with ws:// or wss://, got '{}'",
                ws_url
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "connect_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.tick_history == 0 {
            return Err(ConfigError::ValidationError(
                "tick_history must be greater than 0".to_string(),
            ));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of: {}",
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }

    /// Log configuration summary
    pub fn log(&self) {
        info!("Configuration loaded:");
        info!("  Backend URL: {}", self.backend_url);
        info!("  WebSocket URL: {}", self.websocket_url());
        info!("  Log level: {}", self.log_level);
        info!("  Log file: {}", self.log_file);
        info!(
            "  HTTP timeouts: {}s request / {}s connect",
            self.request_timeout_secs, self.connect_timeout_secs
        );
        info!("  Tick history: {} prices", self.tick_history);
    }
}
