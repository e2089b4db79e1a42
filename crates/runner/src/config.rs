//! Runner configuration
//!
//! A JSON file supplies the base configuration; `MIDAS_*` environment
//! variables override individual fields. Everything has a default, so the
//! binary runs with no configuration at all.

use midas_pipeline::RefreshConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {error}")]
    Io { path: String, error: String },

    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("invalid value for {var}: {value}")]
    Env { var: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Seconds between refresh runs
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Quote endpoint base URL; without one the runner wires the seeded
    /// demo oracle instead
    #[serde(default)]
    pub oracle_url: Option<String>,

    /// Per-request oracle timeout
    #[serde(default = "default_oracle_timeout_ms")]
    pub oracle_timeout_ms: u64,

    /// Pipeline tuning
    #[serde(default)]
    pub refresh: RefreshConfig,
}

fn default_interval_secs() -> u64 {
    300
}

fn default_oracle_timeout_ms() -> u64 {
    5000
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            oracle_url: None,
            oracle_timeout_ms: default_oracle_timeout_ms(),
            refresh: RefreshConfig::default(),
        }
    }
}

impl RunnerConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `MIDAS_*` environment overrides on top of the loaded values
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(value) = read_env("MIDAS_INTERVAL_SECS") {
            self.interval_secs = parse_env("MIDAS_INTERVAL_SECS", &value)?;
        }
        if let Some(value) = read_env("MIDAS_BATCH_SIZE") {
            self.refresh.batch_size = parse_env("MIDAS_BATCH_SIZE", &value)?;
        }
        if let Some(value) = read_env("MIDAS_CONCURRENCY") {
            self.refresh.concurrency = parse_env("MIDAS_CONCURRENCY", &value)?;
        }
        if let Some(value) = read_env("MIDAS_ORACLE_URL") {
            self.oracle_url = Some(value);
        }
        Ok(self)
    }
}

fn read_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Env {
        var: var.to_string(),
        value: value.to_string(),
    })
}
