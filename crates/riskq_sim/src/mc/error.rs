//! Error types for the Monte Carlo aggregator.
//!
//! [`ConfigError`] is raised when a [`SimulationConfig`](super::SimulationConfig)
//! is built with out-of-range values. [`SimulationError`] covers everything
//! that can stop a run: bad input detected before sampling starts,
//! cancellation, and a panicking worker thread.

use riskq_core::types::{EventRole, ParameterError};
use thiserror::Error;

/// Configuration error for the loss aggregator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Iteration count outside [1, 10_000_000].
    #[error("Invalid iteration count {0}: must be in range [1, 10_000_000]")]
    InvalidIterations(usize),

    /// Confidence level not strictly between 0 and 1.
    #[error("Invalid confidence level {0}: must lie strictly between 0 and 1")]
    InvalidConfidenceLevel(f64),
}

/// Errors returned by a simulation run.
///
/// Input problems are reported before any sampling work begins; a run never
/// returns a zeroed result in place of an error.
///
/// # Examples
/// ```
/// use riskq_sim::mc::SimulationError;
///
/// let err = SimulationError::EmptyEventList;
/// assert!(err.to_string().contains("at least one risk event"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// No risk events were supplied.
    #[error("Event list is empty: at least one risk event is required")]
    EmptyEventList,

    /// A risk event carries an invalid distribution.
    #[error("Event {index} has an invalid {role} distribution: {source}")]
    InvalidEvent {
        /// Position of the event in the input list
        index: usize,
        /// Which distribution of the event failed
        role: EventRole,
        /// Underlying parameter error
        #[source]
        source: ParameterError,
    },

    /// The simulation configuration is invalid.
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    /// The run was cancelled through its token.
    #[error("Simulation cancelled after {completed} of {requested} trials")]
    Cancelled {
        /// Trials finished before the cancellation was observed
        completed: usize,
        /// Trials requested
        requested: usize,
    },

    /// The run finished without producing any trial losses.
    #[error("Simulation produced no trials")]
    NoTrials,

    /// The background worker thread panicked.
    #[error("Simulation worker panicked")]
    WorkerPanicked,
}

impl SimulationError {
    /// Returns `true` for [`SimulationError::Cancelled`].
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidIterations(0);
        assert!(err.to_string().contains("Invalid iteration count 0"));

        let err = ConfigError::InvalidConfidenceLevel(1.5);
        assert!(err.to_string().contains("1.5"));
    }

    #[test]
    fn test_invalid_event_names_input() {
        let err = SimulationError::InvalidEvent {
            index: 3,
            role: EventRole::Frequency,
            source: ParameterError::NonPositive {
                name: "lambda",
                value: 0.0,
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("Event 3"));
        assert!(msg.contains("frequency"));
        assert!(msg.contains("lambda"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_error_converts() {
        let err: SimulationError = ConfigError::InvalidIterations(0).into();
        assert!(matches!(err, SimulationError::InvalidConfig(_)));
        assert!(!err.is_cancelled());
        assert!(SimulationError::Cancelled {
            completed: 1,
            requested: 2
        }
        .is_cancelled());
    }
}
