//! Background simulation runs.

use std::thread::{self, JoinHandle};

use riskq_core::types::RiskEvent;
use tracing::debug;

use super::cancel::CancellationToken;
use crate::mc::{LossAggregator, SimulationConfig, SimulationError, SimulationResult};

/// Spawns loss aggregations off the calling thread.
///
/// # Examples
/// ```
/// use riskq_core::types::{DistributionSpec, RiskEvent};
/// use riskq_sim::mc::SimulationConfig;
/// use riskq_sim::session::SimulationWorker;
///
/// let events = vec![RiskEvent::new(
///     DistributionSpec::Uniform { min: 0.0, max: 100.0 },
///     DistributionSpec::Poisson { lambda: 2.0 },
/// )];
/// let config = SimulationConfig::builder().iterations(2_000).seed(1).build().unwrap();
///
/// let handle = SimulationWorker::spawn(events, config);
/// let result = handle.join().unwrap();
/// assert_eq!(result.iterations(), 2_000);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationWorker;

impl SimulationWorker {
    /// Starts a run on a new thread with a fresh cancellation token.
    pub fn spawn(events: Vec<RiskEvent>, config: SimulationConfig) -> SimulationHandle {
        Self::spawn_with_token(events, config, CancellationToken::new())
    }

    /// Starts a run on a new thread observing `token`.
    pub fn spawn_with_token(
        events: Vec<RiskEvent>,
        config: SimulationConfig,
        token: CancellationToken,
    ) -> SimulationHandle {
        let worker_token = token.clone();
        let thread = thread::spawn(move || {
            debug!(iterations = config.iterations(), "simulation worker started");
            LossAggregator::new(config).run_cancellable(&events, &worker_token)
        });

        SimulationHandle { token, thread }
    }
}

/// Handle to an in-flight background run.
#[derive(Debug)]
pub struct SimulationHandle {
    token: CancellationToken,
    thread: JoinHandle<Result<SimulationResult, SimulationError>>,
}

impl SimulationHandle {
    /// Requests cancellation; the run stops at its next check.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Token observed by the run.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Whether the worker thread has finished.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Blocks until the run completes.
    ///
    /// # Errors
    ///
    /// The run's own error, or [`SimulationError::WorkerPanicked`] if the
    /// thread panicked.
    pub fn join(self) -> Result<SimulationResult, SimulationError> {
        self.thread
            .join()
            .map_err(|_| SimulationError::WorkerPanicked)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskq_core::types::DistributionSpec;

    fn events() -> Vec<RiskEvent> {
        vec![RiskEvent::new(
            DistributionSpec::Uniform {
                min: 0.0,
                max: 100.0,
            },
            DistributionSpec::Poisson { lambda: 3.0 },
        )]
    }

    #[test]
    fn test_worker_matches_inline_run() {
        let config = SimulationConfig::builder()
            .iterations(3_000)
            .seed(17)
            .build()
            .unwrap();
        let inline = LossAggregator::new(config.clone()).run(&events()).unwrap();
        let background = SimulationWorker::spawn(events(), config).join().unwrap();
        assert_eq!(inline, background);
    }

    #[test]
    fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let config = SimulationConfig::builder()
            .iterations(1_000_000)
            .build()
            .unwrap();
        let handle = SimulationWorker::spawn_with_token(events(), config, token);
        assert!(handle.join().unwrap_err().is_cancelled());
    }

    #[test]
    fn test_worker_reports_input_errors() {
        let handle = SimulationWorker::spawn(Vec::new(), SimulationConfig::default());
        assert_eq!(handle.join().unwrap_err(), SimulationError::EmptyEventList);
    }
}
