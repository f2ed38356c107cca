//! Error types for the density grid builder.

use riskq_core::types::{EventRole, ParameterError};
use thiserror::Error;

/// Errors returned when configuring or building a density grid.
///
/// Degenerate domains and discarded samples are not errors; they are
/// handled by epsilon widening and the grid's discard counter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Bins per axis outside [1, 500].
    #[error("Invalid grid resolution {0}: must be in range [1, 500]")]
    InvalidResolution(usize),

    /// Joint sample count outside [1_000, 10_000_000].
    #[error("Invalid grid sample count {0}: must be in range [1_000, 10_000_000]")]
    InvalidIterations(usize),

    /// The event carries an invalid distribution.
    #[error("Invalid {role} distribution: {source}")]
    InvalidEvent {
        /// Which distribution of the event failed
        role: EventRole,
        /// Underlying parameter error
        #[source]
        source: ParameterError,
    },
}
