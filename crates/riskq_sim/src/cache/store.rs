//! Session-scoped result cache.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use super::fingerprint::Fingerprint;
use crate::mc::SimulationResult;

/// A parameter edit reported by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterChange {
    /// Any event's severity or frequency distribution changed, or events
    /// were added or removed
    Events,
    /// Iteration count changed
    Iterations,
    /// VaR confidence level changed
    ConfidenceLevel,
    /// Seed changed
    Seed,
    /// Display currency changed
    Currency,
}

impl ParameterChange {
    /// Whether the change can alter a simulation result.
    #[inline]
    pub fn affects_results(&self) -> bool {
        !matches!(self, ParameterChange::Currency)
    }
}

/// Cache usage counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that required a computation
    pub misses: u64,
    /// Whole-cache invalidations
    pub invalidations: u64,
    /// Entries currently held
    pub entries: usize,
}

/// Get-or-compute memo of simulation results keyed by [`Fingerprint`].
///
/// Any fingerprint-relevant edit clears the whole cache rather than single
/// entries. The cache takes `&mut self` for every mutation and is meant to
/// be owned by one session; give each session its own instance.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use riskq_core::types::{DistributionSpec, RiskEvent};
/// use riskq_sim::cache::{Fingerprint, ResultCache};
/// use riskq_sim::mc::{aggregate, SimulationConfig};
///
/// let events = [RiskEvent::new(
///     DistributionSpec::Uniform { min: 0.0, max: 10.0 },
///     DistributionSpec::Poisson { lambda: 1.0 },
/// )];
/// let config = SimulationConfig::builder().iterations(1_000).seed(1).build().unwrap();
/// let mut cache = ResultCache::new();
///
/// let fp = Fingerprint::new(&events, &config);
/// let a = cache.get_or_compute(fp.clone(), || aggregate(&events, &config)).unwrap();
/// let b = cache.get_or_compute(fp, || aggregate(&events, &config)).unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<Fingerprint, Arc<SimulationResult>>,
    hits: u64,
    misses: u64,
    invalidations: u64,
}

impl ResultCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a result without computing.
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<Arc<SimulationResult>> {
        self.entries.get(fingerprint).cloned()
    }

    /// Stores a result and returns the shared handle.
    pub fn insert(
        &mut self,
        fingerprint: Fingerprint,
        result: SimulationResult,
    ) -> Arc<SimulationResult> {
        let shared = Arc::new(result);
        self.entries.insert(fingerprint, Arc::clone(&shared));
        shared
    }

    /// Returns the cached result for `fingerprint`, computing and storing it
    /// on a miss.
    ///
    /// # Errors
    ///
    /// Propagates the error of `compute`; nothing is stored in that case.
    pub fn get_or_compute<F, E>(
        &mut self,
        fingerprint: Fingerprint,
        compute: F,
    ) -> Result<Arc<SimulationResult>, E>
    where
        F: FnOnce() -> Result<SimulationResult, E>,
    {
        if let Some(hit) = self.entries.get(&fingerprint) {
            self.hits += 1;
            trace!(fingerprint = %fingerprint, "result cache hit");
            return Ok(Arc::clone(hit));
        }

        self.misses += 1;
        trace!(fingerprint = %fingerprint, "result cache miss");
        let result = compute()?;
        Ok(self.insert(fingerprint, result))
    }

    /// Clears every entry.
    pub fn invalidate(&mut self) {
        if !self.entries.is_empty() {
            debug!(entries = self.entries.len(), "invalidating result cache");
        }
        self.entries.clear();
        self.invalidations += 1;
    }

    /// Reacts to a parameter edit. Returns `true` if the cache was cleared.
    pub fn notify_change(&mut self, change: ParameterChange) -> bool {
        if change.affects_results() {
            self.invalidate();
            true
        } else {
            false
        }
    }

    /// Number of cached results.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no results.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Usage counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            invalidations: self.invalidations,
            entries: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::{aggregate, SimulationConfig, SimulationError};
    use riskq_core::types::{DistributionSpec, RiskEvent};

    fn events() -> Vec<RiskEvent> {
        vec![RiskEvent::new(
            DistributionSpec::Uniform {
                min: 0.0,
                max: 100.0,
            },
            DistributionSpec::Poisson { lambda: 1.0 },
        )]
    }

    fn config() -> SimulationConfig {
        SimulationConfig::builder()
            .iterations(500)
            .seed(8)
            .build()
            .unwrap()
    }

    #[test]
    fn test_hit_returns_same_arc() {
        let mut cache = ResultCache::new();
        let fp = Fingerprint::new(&events(), &config());
        let a = cache
            .get_or_compute(fp.clone(), || aggregate(&events(), &config()))
            .unwrap();
        let b = cache
            .get_or_compute(fp.clone(), || -> Result<_, SimulationError> {
                panic!("must not recompute")
            })
            .unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                invalidations: 0,
                entries: 1
            }
        );
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mut cache = ResultCache::new();
        let fp = Fingerprint::new(&[], &config());
        let err = cache
            .get_or_compute(fp.clone(), || aggregate(&[], &config()))
            .unwrap_err();
        assert_eq!(err, SimulationError::EmptyEventList);
        assert!(cache.is_empty());
        assert!(cache.get(&fp).is_none());
    }

    #[test]
    fn test_currency_change_keeps_entries() {
        let mut cache = ResultCache::new();
        let fp = Fingerprint::new(&events(), &config());
        cache
            .get_or_compute(fp, || aggregate(&events(), &config()))
            .unwrap();

        assert!(!cache.notify_change(ParameterChange::Currency));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_relevant_change_clears_everything() {
        let mut cache = ResultCache::new();
        for seed in 0..3 {
            let cfg = config().with_seed(seed);
            let fp = Fingerprint::new(&events(), &cfg);
            cache.get_or_compute(fp, || aggregate(&events(), &cfg)).unwrap();
        }
        assert_eq!(cache.len(), 3);

        for change in [
            ParameterChange::Events,
            ParameterChange::Iterations,
            ParameterChange::ConfidenceLevel,
            ParameterChange::Seed,
        ] {
            assert!(change.affects_results());
        }
        assert!(cache.notify_change(ParameterChange::ConfidenceLevel));
        assert!(cache.is_empty());
        assert_eq!(cache.stats().invalidations, 1);
    }
}
