//! Canonical cache keys.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use riskq_core::types::RiskEvent;
use serde::Serialize;
use tracing::warn;

use crate::mc::SimulationConfig;

/// Every input that influences an aggregation result.
///
/// Display-only inputs such as the currency are deliberately absent.
#[derive(Debug, Serialize)]
struct FingerprintPayload<'a> {
    events: &'a [RiskEvent],
    iterations: usize,
    confidence_level: f64,
    seed: Option<u64>,
}

/// Canonical serialisation of all parameters affecting a simulation result.
///
/// Two fingerprints are equal exactly when their canonical JSON strings are
/// equal. The 64-bit digest is a short form for logs and reports.
///
/// # Examples
/// ```
/// use riskq_core::types::{DistributionSpec, RiskEvent};
/// use riskq_sim::cache::Fingerprint;
/// use riskq_sim::mc::SimulationConfig;
///
/// let events = [RiskEvent::new(
///     DistributionSpec::Uniform { min: 0.0, max: 100.0 },
///     DistributionSpec::Poisson { lambda: 1.0 },
/// )];
/// let config = SimulationConfig::default();
///
/// let a = Fingerprint::new(&events, &config);
/// let b = Fingerprint::new(&events, &config.with_seed(1));
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    canonical: String,
    digest: u64,
}

impl Fingerprint {
    /// Builds the fingerprint of an aggregation request.
    pub fn new(events: &[RiskEvent], config: &SimulationConfig) -> Self {
        let payload = FingerprintPayload {
            events,
            iterations: config.iterations(),
            confidence_level: config.confidence_level(),
            seed: config.seed(),
        };
        let canonical = serde_json::to_string(&payload).unwrap_or_else(|err| {
            warn!(error = %err, "fingerprint serialisation failed, using debug form");
            format!("{:?}", payload)
        });

        let mut hasher = DefaultHasher::new();
        canonical.hash(&mut hasher);
        Self {
            digest: hasher.finish(),
            canonical,
        }
    }

    /// Canonical JSON form.
    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// 64-bit digest of the canonical form.
    #[inline]
    pub fn digest(&self) -> u64 {
        self.digest
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.digest)
    }
}
