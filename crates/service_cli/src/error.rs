//! CLI error types

use riskq_sim::mc::SimulationError;
use riskq_viz::grid::GridError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `riskq` commands
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be resolved
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Scenario file could not be parsed
    #[error("Invalid scenario file {path}: {source}")]
    Scenario {
        /// Scenario path
        path: String,
        /// TOML parse error
        #[source]
        source: toml::de::Error,
    },

    /// Simulation failed
    #[error("Simulation failed: {0}")]
    Simulation(#[from] SimulationError),

    /// Density grid failed
    #[error("Heat-map failed: {0}")]
    Grid(#[from] GridError),

    /// Engine self-check did not reproduce the closed-form result
    #[error("Self-check failed: {0}")]
    SelfCheck(String),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV output failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;
