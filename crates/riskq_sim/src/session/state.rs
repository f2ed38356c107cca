//! One user's simulation session.

use std::sync::Arc;

use riskq_core::types::RiskEvent;
use tracing::debug;

use super::worker::{SimulationHandle, SimulationWorker};
use crate::cache::{Fingerprint, ParameterChange, ResultCache};
use crate::mc::{
    validate_events, LossAggregator, SimulationConfig, SimulationError, SimulationResult,
};

/// Outcome of [`SimulationSession::submit`].
#[derive(Debug, Clone)]
pub enum Submission {
    /// The result was already cached.
    Ready(Arc<SimulationResult>),
    /// A background run was started; collect it with
    /// [`poll`](SimulationSession::poll) or [`wait`](SimulationSession::wait).
    Pending(Fingerprint),
}

/// Owns a [`ResultCache`] and at most one in-flight background run.
///
/// Submitting new parameters cancels the previous run, so the latest edit
/// always wins. A submission whose fingerprint differs from the previous one
/// clears the cache, so the session holds results for the current
/// parameters only. Sessions are independent: each has its own cache.
///
/// # Examples
/// ```
/// use riskq_core::types::{DistributionSpec, RiskEvent};
/// use riskq_sim::mc::SimulationConfig;
/// use riskq_sim::session::{SimulationSession, Submission};
///
/// let events = vec![RiskEvent::new(
///     DistributionSpec::Uniform { min: 0.0, max: 100.0 },
///     DistributionSpec::Poisson { lambda: 1.0 },
/// )];
/// let config = SimulationConfig::builder().iterations(1_000).seed(2).build().unwrap();
///
/// let mut session = SimulationSession::new();
/// assert!(matches!(session.submit(events.clone(), config.clone()), Ok(Submission::Pending(_))));
/// let first = session.wait().unwrap().unwrap();
///
/// // Same parameters are answered from the cache
/// match session.submit(events, config).unwrap() {
///     Submission::Ready(cached) => assert!(std::sync::Arc::ptr_eq(&first, &cached)),
///     Submission::Pending(_) => unreachable!(),
/// }
/// ```
#[derive(Debug, Default)]
pub struct SimulationSession {
    cache: ResultCache,
    in_flight: Option<(Fingerprint, SimulationHandle)>,
    current: Option<Fingerprint>,
}

impl SimulationSession {
    /// Creates a session with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the session cache.
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Runs on the calling thread, answering from the cache when possible.
    ///
    /// # Errors
    ///
    /// Input and configuration errors from the aggregator.
    pub fn run_blocking(
        &mut self,
        events: &[RiskEvent],
        config: &SimulationConfig,
    ) -> Result<Arc<SimulationResult>, SimulationError> {
        config.validate()?;
        validate_events(events)?;
        let fingerprint = Fingerprint::new(events, config);
        self.track(&fingerprint);
        self.cache.get_or_compute(fingerprint, || {
            LossAggregator::new(config.clone()).run(events)
        })
    }

    /// Submits parameters for a background run.
    ///
    /// Any previous in-flight run is cancelled first.
    ///
    /// # Errors
    ///
    /// Invalid configuration or events are reported immediately, before any
    /// thread is spawned.
    pub fn submit(
        &mut self,
        events: Vec<RiskEvent>,
        config: SimulationConfig,
    ) -> Result<Submission, SimulationError> {
        config.validate()?;
        validate_events(&events)?;
        self.cancel();

        let fingerprint = Fingerprint::new(&events, &config);
        self.track(&fingerprint);
        if let Some(hit) = self.cache.get(&fingerprint) {
            return Ok(Submission::Ready(hit));
        }

        debug!(fingerprint = %fingerprint, "submitting background simulation");
        let handle = SimulationWorker::spawn(events, config);
        self.in_flight = Some((fingerprint.clone(), handle));
        Ok(Submission::Pending(fingerprint))
    }

    /// Whether a background run is outstanding.
    pub fn is_running(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Collects the in-flight result if it has finished.
    ///
    /// Returns `None` when nothing is in flight or the run is still going.
    pub fn poll(&mut self) -> Option<Result<Arc<SimulationResult>, SimulationError>> {
        let finished = matches!(&self.in_flight, Some((_, handle)) if handle.is_finished());
        if finished {
            self.wait()
        } else {
            None
        }
    }

    /// Blocks on the in-flight run and caches its result.
    ///
    /// Returns `None` when nothing is in flight.
    pub fn wait(&mut self) -> Option<Result<Arc<SimulationResult>, SimulationError>> {
        let (fingerprint, handle) = self.in_flight.take()?;
        Some(
            handle
                .join()
                .map(|result| self.cache.insert(fingerprint, result)),
        )
    }

    /// Cancels the in-flight run, if any. Its result is discarded.
    pub fn cancel(&mut self) {
        if let Some((fingerprint, handle)) = self.in_flight.take() {
            debug!(fingerprint = %fingerprint, "cancelling superseded simulation");
            handle.cancel();
        }
    }

    /// Clears the cache when `fingerprint` differs from the last submission.
    fn track(&mut self, fingerprint: &Fingerprint) {
        if self.current.as_ref() == Some(fingerprint) {
            return;
        }
        if self.current.is_some() {
            debug!(fingerprint = %fingerprint, "parameters changed, clearing session cache");
            self.cache.invalidate();
        }
        self.current = Some(fingerprint.clone());
    }

    /// Forwards a parameter edit to the cache.
    ///
    /// Returns `true` if the cache was cleared.
    pub fn notify_change(&mut self, change: ParameterChange) -> bool {
        self.cache.notify_change(change)
    }
}
