//! Board configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file is a valid config:
//!
//! ```toml
//! placeholder = "TP_TEAM"
//! addressing = "auto"         # auto | explicit | derived
//! parallel_threshold = 4096   # 0 disables parallel aggregation
//!
//! [output]
//! format = "table"            # table | json | csv
//! ```

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use seasonboard_core::{Aggregator, SeasonAddressing, DEFAULT_PARALLEL_THRESHOLD, TP_TEAM};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How a board is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(ConfigError::Invalid(format!(
                "unknown output format '{other}'. Valid: table, json, csv"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Team name marking non-scoring test completions.
    pub placeholder: String,
    pub addressing: SeasonAddressing,
    /// Completion count at which aggregation goes parallel; 0 disables it.
    pub parallel_threshold: usize,
    pub output: OutputConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            placeholder: TP_TEAM.to_string(),
            addressing: SeasonAddressing::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            output: OutputConfig::default(),
        }
    }
}

impl BoardConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.placeholder.trim().is_empty() {
            return Err(ConfigError::Invalid("placeholder must not be blank".into()));
        }
        Ok(())
    }

    /// An aggregator carrying this config's placeholder and threshold.
    pub fn aggregator(&self) -> Aggregator {
        Aggregator::new()
            .with_placeholder(self.placeholder.clone())
            .with_parallel_threshold(self.parallel_threshold)
    }
}
