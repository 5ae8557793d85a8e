//! Pipeline configuration loaded from the environment or a TOML file.
//!
//! The status dump is opt-in: without a status directory the pipeline is
//! built disabled and trackers publish nothing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Directory receiving one JSON status file per node.
pub const STATUS_DUMP_ENV: &str = "PFP_STATUS_DUMP";
/// Capacity of the bounded snapshot queue.
pub const QUEUE_CAPACITY_ENV: &str = "PFP_STATUS_QUEUE_CAPACITY";

/// Where inspection tools look when nothing else is configured.
pub const DEFAULT_BASE_DIRECTORY: &str = "/run/pfpstatus";
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Status directory. `None` disables the pipeline.
    pub status_dir: Option<PathBuf>,

    /// Bounded queue size; roughly the number of nodes expected to report.
    pub queue_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            status_dir: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl PipelineConfig {
    pub fn enabled(status_dir: impl Into<PathBuf>) -> Self {
        Self {
            status_dir: Some(status_dir.into()),
            ..Self::default()
        }
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.status_dir.is_some()
    }

    /// Reads [`STATUS_DUMP_ENV`] and [`QUEUE_CAPACITY_ENV`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_dir = lookup(STATUS_DUMP_ENV);
        let status_dir = match raw_dir.as_deref().map(str::trim) {
            Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
            _ => None,
        };

        let queue_capacity = match lookup(QUEUE_CAPACITY_ENV) {
            Some(raw) if !raw.trim().is_empty() => {
                raw.trim()
                    .parse::<usize>()
                    .map_err(|e| ConfigError::InvalidValue {
                        key: QUEUE_CAPACITY_ENV,
                        value: raw.clone(),
                        reason: e.to_string(),
                    })?
            }
            _ => DEFAULT_QUEUE_CAPACITY,
        };

        let cfg = Self {
            status_dir,
            queue_capacity,
        };
        cfg.validate()?;

        match &cfg.status_dir {
            Some(dir) => info!("PFP status dump enabled, statusDirectory={}", dir.display()),
            None => info!(
                "PFP status dump disabled (variableFound={}, valueGiven={})",
                raw_dir.is_some(),
                raw_dir.as_deref().is_some_and(|v| !v.is_empty())
            ),
        }

        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queue_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "queue_capacity",
                value: "0".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Load config from a TOML file path.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<PipelineConfig, ConfigError> {
    let p = path.as_ref();
    let s = fs::read_to_string(p).map_err(|source| ConfigError::Read {
        path: p.to_path_buf(),
        source,
    })?;
    let cfg: PipelineConfig = toml::from_str(&s)?;
    cfg.validate()?;
    Ok(cfg)
}
