//! Integration test: Configuration utilities
//!
//! Tests the bin_common configuration path handling and loading the
//! dashboard config from disk.

use edgequant::DashboardConfig;
use edgequant_dashboard::bin_common::{load_config_from_env, parse_cli, ConfigType};
use std::env;
use std::io::Write;

#[test]
fn test_dashboard_config_default() {
    // Clear env var to test default
    env::remove_var("DASHBOARD_CONFIG_PATH");

    let config_path = load_config_from_env(ConfigType::Dashboard);
    assert_eq!(config_path.to_str().unwrap(), "config/dashboard.yaml");
}

#[test]
fn test_custom_config() {
    let custom = ConfigType::Custom("custom/path.yaml".to_string());
    let config_path = load_config_from_env(custom);

    assert_eq!(config_path.to_str().unwrap(), "custom/path.yaml");
}

#[test]
fn test_cli_config_flag_selects_custom_path() {
    let args = vec!["--config".to_string(), "alt/dashboard.yaml".to_string()];
    let cli = parse_cli(&args).unwrap();

    let config_path = load_config_from_env(cli.config_type());
    assert_eq!(config_path.to_str().unwrap(), "alt/dashboard.yaml");
}

#[test]
fn test_load_dashboard_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "backend_url: \"http://10.0.0.5:9000/\"\nrequest_timeout_secs: 3\ntick_history: 40"
    )
    .unwrap();

    let config = DashboardConfig::load(file.path()).unwrap();
    assert_eq!(config.request_timeout_secs, 3);
    assert_eq!(config.tick_history, 40);
    assert_eq!(config.connect_timeout_secs, 5);

    if env::var("EDGEQUANT_BACKEND_URL").is_err() && env::var("EDGEQUANT_BACKEND_WS").is_err() {
        assert_eq!(config.rest_base(), "http://10.0.0.5:9000");
        assert_eq!(config.websocket_url(), "ws://10.0.0.5:9000/ws");
    }
}

#[test]
fn test_shipped_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/dashboard.yaml");
    let config = DashboardConfig::load(path).unwrap();
    assert_eq!(config.tick_history, 120);
}
