//! Serializable reconciliation configuration.
//!
//! Loaded from a TOML file with a single `[reconcile]` table:
//!
//! ```toml
//! [reconcile]
//! tradebook = "tradebook.csv"
//! market_suffix = ".NS"
//! as_of = "2024-06-28"        # optional; CLI defaults it to today
//! output_dir = "results"
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for a single reconciliation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Path to the tradebook CSV.
    pub tradebook: PathBuf,

    /// Suffix appended to symbols to form tickers (exchange qualifier).
    #[serde(default = "default_market_suffix")]
    pub market_suffix: String,

    /// Observation date for open positions. When absent, the CLI resolves
    /// it to the local date; nothing below the CLI reads the clock.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,

    /// Directory artifact bundles are written under.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_market_suffix() -> String {
    ".NS".into()
}

fn default_output_dir() -> PathBuf {
    "results".into()
}

/// Top-level file shape: everything under `[reconcile]`.
#[derive(Deserialize)]
struct ConfigFile {
    reconcile: ReconcileConfig,
}

impl ReconcileConfig {
    /// Build a config directly from its parts, applying defaults.
    pub fn new(tradebook: impl Into<PathBuf>) -> Self {
        Self {
            tradebook: tradebook.into(),
            market_suffix: default_market_suffix(),
            as_of: None,
            output_dir: default_output_dir(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        let config = file.reconcile;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tradebook.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("tradebook path is empty".into()));
        }
        Ok(())
    }
}
