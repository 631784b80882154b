//! Configuration management for gator.
//!
//! Configuration is read from `~/.config/gator/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.
//! `register` and `login` write the current user name back to the same file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ingest::DEFAULT_MAX_REPORTED_FAILURES;
use crate::scheduler::{SchedulerConfig, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_STORE_FAILURES};

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Set by `register`/`login`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_user_name: Option<String>,
    /// Database file (default: `<data dir>/gator/gator.db`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
    pub scheduler: SchedulerSettings,
}

/// Settings for `gator agg`. The interval itself is given on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    pub fetch_timeout_secs: u64,
    pub max_store_failures: u32,
    pub max_reported_failures: usize,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT.as_secs(),
            max_store_failures: DEFAULT_MAX_STORE_FAILURES,
            max_reported_failures: DEFAULT_MAX_REPORTED_FAILURES,
        }
    }
}

impl SchedulerSettings {
    pub fn to_scheduler_config(&self, interval: Duration) -> SchedulerConfig {
        SchedulerConfig {
            interval,
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
            max_store_failures: self.max_store_failures,
            max_reported_failures: self.max_reported_failures,
        }
    }
}

impl Config {
    /// Load configuration from `path`.
    ///
    /// If the file doesn't exist, creates a default one with comments.
    /// If the file exists but is invalid, returns an error.
    /// Missing fields use default values.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::write_file(path, DEFAULT_CONFIG)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/gator/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("gator").join("config.toml"))
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        Self::write_file(path, &content)
    }

    /// Record `name` as the current user and persist it.
    pub fn set_current_user(&mut self, name: &str, path: &Path) -> Result<(), ConfigError> {
        self.current_user_name = Some(name.to_string());
        self.save(path)
    }

    fn write_file(path: &Path, content: &str) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

const DEFAULT_CONFIG: &str = r##"# gator configuration
#
# `gator register <name>` and `gator login <name>` set the current user:
# current_user_name = "alice"
#
# Database location (default: <data dir>/gator/gator.db):
# db_path = "/home/alice/.local/share/gator/gator.db"

[scheduler]
# Upper bound on a single feed fetch, in seconds
fetch_timeout_secs = 30

# Consecutive database failures tolerated before `gator agg` gives up (0 = never)
max_store_failures = 5

# Failure messages logged per feed update
max_reported_failures = 10
"##;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
