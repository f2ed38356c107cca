//! Risk events.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::distribution::DistributionSpec;
use super::error::ParameterError;

/// Role a distribution plays inside a [`RiskEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventRole {
    /// Per-occurrence loss amount
    Severity,
    /// Annual number of occurrences
    Frequency,
}

impl fmt::Display for EventRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventRole::Severity => write!(f, "severity"),
            EventRole::Frequency => write!(f, "frequency"),
        }
    }
}

/// A single loss scenario: how much each occurrence costs and how often it happens.
///
/// The frequency distribution may produce fractional counts; the aggregator
/// treats the remainder as the probability of one extra occurrence.
///
/// # Examples
/// ```
/// use riskq_core::types::{DistributionSpec, RiskEvent};
///
/// let event = RiskEvent::new(
///     DistributionSpec::Triangular { min: 1_000.0, mode: 5_000.0, max: 20_000.0 },
///     DistributionSpec::Poisson { lambda: 0.5 },
/// );
/// assert!(event.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskEvent {
    /// Per-occurrence loss distribution
    pub severity: DistributionSpec,
    /// Annual occurrence count distribution
    pub frequency: DistributionSpec,
}

impl RiskEvent {
    /// Creates a new event.
    pub fn new(severity: DistributionSpec, frequency: DistributionSpec) -> Self {
        Self {
            severity,
            frequency,
        }
    }

    /// Returns the spec for the given role.
    pub fn spec(&self, role: EventRole) -> &DistributionSpec {
        match role {
            EventRole::Severity => &self.severity,
            EventRole::Frequency => &self.frequency,
        }
    }

    /// Validates both distributions.
    ///
    /// # Errors
    ///
    /// Returns the role of the failing distribution alongside its error.
    pub fn validate(&self) -> Result<(), (EventRole, ParameterError)> {
        self.severity
            .validate()
            .map_err(|e| (EventRole::Severity, e))?;
        self.frequency
            .validate()
            .map_err(|e| (EventRole::Frequency, e))
    }
}
