//! CLI utilities for binaries
//!
//! Handles configuration paths, environment variables and the small set of
//! command line flags the dashboard accepts.

use anyhow::{bail, Result};
use std::path::PathBuf;

/// Type of configuration to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigType {
    /// Dashboard configuration (config/dashboard.yaml)
    Dashboard,
    /// Custom path
    Custom(String),
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Dashboard => "config/dashboard.yaml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Get the environment variable name for this config type
    pub fn env_var_name(&self) -> Option<&str> {
        match self {
            ConfigType::Dashboard => Some("DASHBOARD_CONFIG_PATH"),
            ConfigType::Custom(_) => None,
        }
    }
}

/// Load configuration path from environment or use default
///
/// A custom path is used as given.
///
/// # Examples
/// ```
/// use edgequant_dashboard::bin_common::{load_config_from_env, ConfigType};
///
/// let path = load_config_from_env(ConfigType::Custom("demo.yaml".to_string()));
/// assert_eq!(path.to_str(), Some("demo.yaml"));
/// ```
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    config_type
        .env_var_name()
        .and_then(|name| std::env::var(name).ok())
        .filter(|path| !path.is_empty())
        .unwrap_or_else(|| config_type.default_path().to_string())
        .into()
}

/// Parse command line arguments for a binary
///
/// Returns a vector of arguments (excluding the program name)
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}

/// Parsed dashboard flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Run loader and feed without the terminal UI
    pub headless: bool,
    /// Explicit config file (`--config <path>`)
    pub config_path: Option<String>,
}

impl CliArgs {
    pub fn config_type(&self) -> ConfigType {
        match &self.config_path {
            Some(path) => ConfigType::Custom(path.clone()),
            None => ConfigType::Dashboard,
        }
    }
}

/// Parse `--headless` and `--config <path>` (or `--config=<path>`)
pub fn parse_cli(args: &[String]) -> Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--headless" => cli.headless = true,
            "--config" => match iter.next() {
                Some(path) => cli.config_path = Some(path.clone()),
                None => bail!("--config requires a path"),
            },
            other => match other.strip_prefix("--config=") {
                Some(path) if !path.is_empty() => cli.config_path = Some(path.to_string()),
                _ => bail!("Unknown argument: {}", other),
            },
        }
    }

    Ok(cli)
}
