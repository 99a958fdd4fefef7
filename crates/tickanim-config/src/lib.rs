//! Tickanim configuration system
//!
//! Loads timing, demo and logging settings from `tickanim.toml`, with
//! environment variables taking precedence over file values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default location of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tickanim.toml";

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure for tickanim
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TickanimConfig {
    /// Tick cadence and default playback speed
    pub timing: TimingConfig,
    /// Demo binary settings
    pub demo: DemoConfig,
    /// Log output settings
    pub logging: LoggingConfig,
}

/// Timer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Interval between animation ticks in milliseconds (~60 Hz by default)
    pub interval_ms: u64,
    /// Time scale used when an animation description does not set one
    pub time_scale: f64,
}

/// Demo application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DemoConfig {
    /// JSON animation description to play when none is given on the command line
    pub description: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `env_logger` filter used when `RUST_LOG` is not set
    pub filter: String,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            interval_ms: 16,
            time_scale: 1.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl TickanimConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from the default location (tickanim.toml in the current directory)
    /// or return default configuration if file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file(DEFAULT_CONFIG_FILE).unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        self.merge_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Unparseable values are ignored and the current setting is kept.
    pub fn merge_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("TICKANIM_INTERVAL_MS") {
            if let Ok(interval) = val.parse::<u64>() {
                self.timing.interval_ms = interval;
            }
        }
        if let Some(val) = lookup("TICKANIM_TIME_SCALE") {
            if let Ok(scale) = val.parse::<f64>() {
                self.timing.time_scale = scale;
            }
        }
        if let Some(path) = lookup("TICKANIM_DESCRIPTION") {
            self.demo.description = Some(PathBuf::from(path));
        }
        if let Some(filter) = lookup("TICKANIM_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from tickanim.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }

    /// Tick interval as a [`std::time::Duration`], never zero.
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timing.interval_ms.max(1))
    }
}
