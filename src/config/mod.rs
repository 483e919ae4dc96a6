//! Run configuration, stored as JSON

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::Level;

use crate::pager::DEFAULT_PAGE_SIZE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("No input file configured")]
    MissingInput,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// How command results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text file with one key per line
    pub input: Option<PathBuf>,
    /// Page size applied at startup
    pub page_size: usize,
    pub log_level: String,
    pub log_json: bool,
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            page_size: DEFAULT_PAGE_SIZE,
            log_level: "warn".to_string(),
            log_json: false,
            output: OutputFormat::Table,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(&self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Configured input path
    pub fn input(&self) -> ConfigResult<&Path> {
        self.input.as_deref().ok_or(ConfigError::MissingInput)
    }

    /// Parse the configured log level
    pub fn level(&self) -> ConfigResult<Level> {
        Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}
