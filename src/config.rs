//! Backend and client configuration.
//!
//! Loaded from a TOML file when one is given; every field has a default,
//! so a partial file (or none at all) is fine.
//!
//! ```toml
//! round_robin_quantum = 4
//! queue_capacity = 128
//! request_timeout_ms = 5000
//! max_slices = 1000000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scheduler::DEFAULT_QUANTUM;

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Scheduler service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Time slice for `RR` requests.
    pub round_robin_quantum: i64,
    /// Bound of the request and reply channels.
    pub queue_capacity: usize,
    /// How long a client waits for a reply. `None` waits forever.
    pub request_timeout_ms: Option<u64>,
    /// Most time slices a round-robin request may need.
    pub max_slices: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            round_robin_quantum: DEFAULT_QUANTUM,
            queue_capacity: 64,
            request_timeout_ms: None,
            max_slices: 1_000_000,
        }
    }
}

impl SchedulerConfig {
    /// Reads and validates a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Parses and validates TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.round_robin_quantum <= 0 {
            return Err(ConfigError::Invalid(format!(
                "round_robin_quantum must be positive, got {}",
                self.round_robin_quantum
            )));
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::Invalid("queue_capacity must be at least 1".into()));
        }
        if self.max_slices == 0 {
            return Err(ConfigError::Invalid("max_slices must be at least 1".into()));
        }
        Ok(())
    }

    /// Reply timeout as a duration.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}
