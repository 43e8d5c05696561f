//! Viewer configuration
//!
//! Loaded from an optional YAML file with an environment override for
//! the feed URL; a missing file just means defaults.

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default feed endpoint
pub const DEFAULT_FEED_URL: &str = "ws://localhost:8000/ws";

/// Environment variable overriding the feed endpoint
pub const FEED_URL_ENV: &str = "QUOTEDECK_FEED_URL";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// WebSocket endpoint of the trade feed
    pub feed_url: String,
    /// Delay between reconnection attempts
    pub reconnect_delay_ms: u64,
    /// Interval for the periodic ping while connected
    pub heartbeat_interval_secs: u64,
    /// Prices kept per symbol for the trend line
    pub window_capacity: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            reconnect_delay_ms: 2_000,
            heartbeat_interval_secs: 30,
            window_capacity: 30,
        }
    }
}

impl ViewerConfig {
    /// Load from a YAML file, falling back to defaults when the file
    /// does not exist, then apply the environment override
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            serde_yaml::from_str(&raw)?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var(FEED_URL_ENV) {
            if !url.trim().is_empty() {
                config.feed_url = url;
            }
        }

        Ok(config)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_always_on_dashboard() {
        let config = ViewerConfig::default();

        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
        assert_eq!(config.reconnect_delay(), Duration::from_secs(2));
        assert_eq!(config.heartbeat_interval(), Duration::from_secs(30));
        assert_eq!(config.window_capacity, 30);
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let config: ViewerConfig =
            serde_yaml::from_str("feed_url: ws://feed.example:9000/ws\n").unwrap();

        assert_eq!(config.feed_url, "ws://feed.example:9000/ws");
        assert_eq!(config.reconnect_delay_ms, 2_000);
        assert_eq!(config.window_capacity, 30);
    }

    #[test]
    fn full_yaml_round_trips() {
        let config: ViewerConfig = serde_yaml::from_str(
            "feed_url: ws://other:1234/ws\nreconnect_delay_ms: 500\nheartbeat_interval_secs: 10\nwindow_capacity: 12\n",
        )
        .unwrap();

        assert_eq!(config.feed_url, "ws://other:1234/ws");
        assert_eq!(config.reconnect_delay(), Duration::from_millis(500));
        assert_eq!(config.heartbeat_interval(), Duration::from_secs(10));
        assert_eq!(config.window_capacity, 12);
    }

    #[test]
    fn missing_file_means_defaults() {
        let config = ViewerConfig::load(Path::new("does/not/exist.yaml")).unwrap();
        // feed_url is checked in the env override test, which owns the
        // environment variable
        assert_eq!(config.reconnect_delay_ms, 2_000);
        assert_eq!(config.window_capacity, 30);
    }

    #[test]
    fn env_var_overrides_feed_url() {
        std::env::set_var(FEED_URL_ENV, "ws://override:7777/ws");
        let config = ViewerConfig::load(Path::new("does/not/exist.yaml")).unwrap();
        assert_eq!(config.feed_url, "ws://override:7777/ws");
        std::env::remove_var(FEED_URL_ENV);
    }
}
