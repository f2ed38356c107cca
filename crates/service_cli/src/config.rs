//! CLI configuration management
//!
//! Handles loading defaults from environment variables, an optional TOML
//! file and command-line arguments.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (`RISKQ_*`)
//! 3. Config file (`riskq.toml`)
//! 4. Default values
//!
//! Per-command flags such as `--iterations` and a scenario's
//! `[simulation]` table are applied on top of the resolved [`CliConfig`]
//! by the commands themselves.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use riskq_sim::mc::{DEFAULT_CONFIDENCE_LEVEL, DEFAULT_ITERATIONS, MAX_ITERATIONS};
use riskq_viz::grid::{
    DEFAULT_GRID_ITERATIONS, DEFAULT_RESOLUTION, MAX_RESOLUTION, MIN_GRID_ITERATIONS,
};

/// Default config file name, read from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "riskq.toml";

/// Default number of points for `riskq curve`.
pub const DEFAULT_CURVE_POINTS: usize = 100;

const ENV_ITERATIONS: &str = "RISKQ_ITERATIONS";
const ENV_CONFIDENCE: &str = "RISKQ_CONFIDENCE";
const ENV_SEED: &str = "RISKQ_SEED";
const ENV_GRID_SAMPLES: &str = "RISKQ_GRID_SAMPLES";
const ENV_LOG_LEVEL: &str = "RISKQ_LOG_LEVEL";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid iteration count: {0}. Must be between 1 and 10000000")]
    InvalidIterations(String),

    #[error("Invalid confidence level: {0}. Must lie strictly between 0 and 1")]
    InvalidConfidence(String),

    #[error("Invalid seed: {0}. Must be an unsigned 64-bit integer")]
    InvalidSeed(String),

    #[error("Invalid grid setting: {0}")]
    InvalidGrid(String),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Engine defaults used by every command
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Monte Carlo trials per simulation
    pub iterations: usize,
    /// VaR confidence level
    pub confidence_level: f64,
    /// Seed for reproducible runs
    pub seed: Option<u64>,
    /// Heat-map bins per axis
    pub grid_resolution: usize,
    /// Heat-map joint samples
    pub grid_samples: usize,
    /// Points per closed-form curve
    pub curve_points: usize,
    /// Log level when `RUST_LOG` is unset
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            seed: None,
            grid_resolution: DEFAULT_RESOLUTION,
            grid_samples: DEFAULT_GRID_ITERATIONS,
            curve_points: DEFAULT_CURVE_POINTS,
            log_level: LogLevel::Warn,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `RISKQ_*` overrides read through `lookup`
    ///
    /// Unset variables leave the current value untouched.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_ITERATIONS) {
            self.iterations = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidIterations(value.clone()))?;
        }
        if let Some(value) = lookup(ENV_CONFIDENCE) {
            self.confidence_level = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidConfidence(value.clone()))?;
        }
        if let Some(value) = lookup(ENV_SEED) {
            self.seed = Some(
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidSeed(value.clone()))?,
            );
        }
        if let Some(value) = lookup(ENV_GRID_SAMPLES) {
            self.grid_samples = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidGrid(format!("grid samples {}", value)))?;
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(value.trim())?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(log_level) = cli.log_level {
            self.log_level = log_level;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 || self.iterations > MAX_ITERATIONS {
            return Err(ConfigError::InvalidIterations(self.iterations.to_string()));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ConfigError::InvalidConfidence(
                self.confidence_level.to_string(),
            ));
        }
        if self.grid_resolution == 0 || self.grid_resolution > MAX_RESOLUTION {
            return Err(ConfigError::InvalidGrid(format!(
                "resolution {} outside [1, {}]",
                self.grid_resolution, MAX_RESOLUTION
            )));
        }
        if self.grid_samples < MIN_GRID_ITERATIONS {
            return Err(ConfigError::InvalidGrid(format!(
                "grid samples {} below {}",
                self.grid_samples, MIN_GRID_ITERATIONS
            )));
        }
        Ok(())
    }
}

/// Global CLI arguments that override configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<LogLevel>,
}

/// Build configuration from all sources
///
/// An explicitly named config file must exist; the default `riskq.toml` is
/// read only when present.
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with_env(cli, |key| std::env::var(key).ok())
}

fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            CliConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => CliConfig::default(),
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}
