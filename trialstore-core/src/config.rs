//! Configuration parsing and management.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::error::FilterError;
use crate::field_filter::FieldFilter;
use crate::matcher::MatchMode;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the trialstore.yml schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// How actor name/class/implementation patterns are compared
    #[serde(default)]
    pub matching: MatchMode,

    #[serde(default)]
    pub output: OutputConfig,

    /// Fields kept when a request names none. Empty keeps everything.
    #[serde(default)]
    pub default_fields: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print projected samples instead of one JSON object per line
    #[serde(default)]
    pub pretty: bool,

    /// Print a projection summary once the stream is drained
    #[serde(default)]
    pub report: bool,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Field filter applied when a request does not name any field
    pub fn default_field_filter(&self) -> Result<FieldFilter, FilterError> {
        FieldFilter::parse(&self.default_fields)
    }
}
