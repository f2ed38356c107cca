//! Error types for distribution parameter validation.
//!
//! Raw input is sanitised by [`build_distribution`](super::build_distribution)
//! and never produces these errors. They surface only when a caller builds a
//! [`DistributionSpec`](super::DistributionSpec) by hand and asks for
//! [`validate`](super::DistributionSpec::validate).

use thiserror::Error;

/// Parameter validation errors.
///
/// # Examples
/// ```
/// use riskq_core::types::ParameterError;
///
/// let err = ParameterError::NonPositive { name: "scale", value: -1.0 };
/// assert_eq!(format!("{}", err), "Parameter 'scale' must be strictly positive, got -1");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter is NaN or infinite.
    #[error("Parameter '{name}' must be finite, got {value}")]
    NonFinite {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// A scale, shape or rate parameter is zero or negative.
    #[error("Parameter '{name}' must be strictly positive, got {value}")]
    NonPositive {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// A probability lies outside (0, 1].
    #[error("Probability '{name}' must lie in (0, 1], got {value}")]
    InvalidProbability {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// A count parameter is zero.
    #[error("Count '{name}' must be a positive integer")]
    ZeroCount {
        /// Parameter name
        name: &'static str,
    },

    /// Bounds are out of order (min <= mode <= max violated).
    #[error("Bounds out of order: min={min}, mode={mode}, max={max}")]
    BoundsOutOfOrder {
        /// Lower bound
        min: f64,
        /// Mode (equal to min when the family has no mode)
        mode: f64,
        /// Upper bound
        max: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::InvalidProbability {
            name: "p",
            value: 1.5,
        };
        assert!(err.to_string().contains("(0, 1]"));

        let err = ParameterError::BoundsOutOfOrder {
            min: 3.0,
            mode: 1.0,
            max: 2.0,
        };
        assert!(err.to_string().contains("min=3"));

        let err = ParameterError::ZeroCount { name: "n" };
        assert_eq!(err.to_string(), "Count 'n' must be a positive integer");
    }
}
