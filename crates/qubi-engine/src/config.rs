//! Configuration types for the qubi engine.
//!
//! Configuration is a small JSON file. Every field has a default, so a
//! missing file or a partial file both work.

use crate::replies::default_replies;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory (relative to the working directory) holding qubi files.
pub const QUBI_DIR: &str = ".qubi";

/// Shortest tick interval the TUI will poll with.
pub const MIN_TICK_RATE_MS: u64 = 10;

/// Main configuration for qubi.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Delay before the counterpart replies, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,

    /// Canned replies to pick from.
    #[serde(default = "default_replies")]
    pub replies: Vec<String>,

    /// Seed for reply selection. Unset means a fresh seed per run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_seed: Option<u64>,

    /// Cancel pending replies when their conversation is closed.
    #[serde(default)]
    pub cancel_pending_on_close: bool,

    /// TUI tick interval in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_reply_delay_ms() -> u64 {
    1000
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration, falling back to defaults when the file is missing.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Default config file location under `root`.
    pub fn default_path(root: &Path) -> PathBuf {
        root.join(QUBI_DIR).join("config.json")
    }

    /// Reply delay as a [`Duration`].
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// Tick interval as a [`Duration`], never shorter than [`MIN_TICK_RATE_MS`].
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(MIN_TICK_RATE_MS))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
            replies: default_replies(),
            reply_seed: None,
            cancel_pending_on_close: false,
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.reply_delay(), Duration::from_millis(1000));
        assert_eq!(config.replies.len(), 4);
        assert!(config.reply_seed.is_none());
        assert!(!config.cancel_pending_on_close);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"reply_seed": 9}"#).unwrap();
        assert_eq!(config.reply_seed, Some(9));
        assert_eq!(config.reply_delay_ms, 1000);
        assert_eq!(config.tick_rate_ms, 250);
        assert_eq!(config.replies, default_replies());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = Config::default_path(dir.path());

        let config = Config {
            reply_delay_ms: 10,
            replies: vec!["ok".into()],
            reply_seed: Some(3),
            cancel_pending_on_close: true,
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_tick_rate_has_floor() {
        let config: Config = serde_json::from_str(r#"{"tick_rate_ms": 0}"#).unwrap();
        assert_eq!(config.tick_rate(), Duration::from_millis(MIN_TICK_RATE_MS));
        assert_eq!(Config::default().tick_rate(), Duration::from_millis(250));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }
}
