//! Integration test: Configuration utilities
//!
//! Tests the bin_common configuration path resolution.

use quotedeck::bin_common::{load_config_from_env, ConfigType};
use std::env;

#[test]
fn test_viewer_config_resolution() {
    // Default when the env var is absent
    env::remove_var("QUOTEDECK_CONFIG_PATH");
    let config_path = load_config_from_env(ConfigType::Viewer);
    assert_eq!(config_path.to_str().unwrap(), "config.yaml");

    // Env var takes precedence
    env::set_var("QUOTEDECK_CONFIG_PATH", "elsewhere/viewer.yaml");
    let config_path = load_config_from_env(ConfigType::Viewer);
    assert_eq!(config_path.to_str().unwrap(), "elsewhere/viewer.yaml");

    env::remove_var("QUOTEDECK_CONFIG_PATH");
}

#[test]
fn test_custom_config() {
    let custom = ConfigType::Custom("custom/path.yaml".to_string());
    assert_eq!(custom.default_path(), "custom/path.yaml");
}

#[test]
fn test_config_type_env_var_names() {
    assert_eq!(ConfigType::Viewer.env_var_name(), "QUOTEDECK_CONFIG_PATH");
    assert_eq!(
        ConfigType::Custom("x.yaml".into()).env_var_name(),
        "QUOTEDECK_CONFIG_PATH"
    );
}
