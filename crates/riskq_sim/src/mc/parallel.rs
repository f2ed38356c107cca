//! Rayon-parallel loss aggregation.
//!
//! Trials are split into fixed chunks of [`PARALLEL_CHUNK_SIZE`]. Chunk `c`
//! draws from `RiskRng::for_stream(seed, c)`, so the result depends only on
//! the seed and the iteration count, never on the thread count or on how
//! rayon schedules the chunks.
//!
//! The random streams differ from the serial [`LossAggregator`](super::LossAggregator),
//! so the two runners give statistically equivalent but not identical
//! results for the same seed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use riskq_core::rng::RiskRng;
use riskq_core::types::RiskEvent;
use tracing::{debug, info};

use super::aggregator::{finish, simulate_trial_cancellable, validate_events};
use super::config::SimulationConfig;
use super::error::SimulationError;
use super::result::SimulationResult;
use crate::session::CancellationToken;

/// Trials per parallel chunk.
pub const PARALLEL_CHUNK_SIZE: usize = 4096;

/// Runs the aggregation across the rayon thread pool.
///
/// The token is polled before each chunk and during long trials. Unseeded configurations draw one
/// base seed from entropy.
///
/// # Errors
///
/// Same as the serial runner: invalid configuration or events fail before
/// sampling, and a tripped token yields [`SimulationError::Cancelled`].
///
/// # Examples
///
/// ```rust
/// use riskq_core::types::{DistributionSpec, RiskEvent};
/// use riskq_sim::mc::{aggregate_parallel, SimulationConfig};
/// use riskq_sim::session::CancellationToken;
///
/// let events = [RiskEvent::new(
///     DistributionSpec::Pert { min: 10.0, mode: 20.0, max: 80.0, gamma: 4.0 },
///     DistributionSpec::Binomial { n: 4, p: 0.5 },
/// )];
/// let config = SimulationConfig::builder().iterations(20_000).seed(3).build().unwrap();
///
/// let a = aggregate_parallel(&events, &config, &CancellationToken::new()).unwrap();
/// let b = aggregate_parallel(&events, &config, &CancellationToken::new()).unwrap();
/// assert_eq!(a.value_at_risk(), b.value_at_risk());
/// ```
pub fn aggregate_parallel(
    events: &[RiskEvent],
    config: &SimulationConfig,
    token: &CancellationToken,
) -> Result<SimulationResult, SimulationError> {
    config.validate()?;
    validate_events(events)?;

    let iterations = config.iterations();
    let seed = config
        .seed()
        .unwrap_or_else(|| RiskRng::from_entropy().seed());
    let n_chunks = iterations.div_ceil(PARALLEL_CHUNK_SIZE);
    debug!(
        iterations,
        events = events.len(),
        seed,
        chunks = n_chunks,
        "starting parallel loss aggregation"
    );
    let started = Instant::now();
    let completed = AtomicUsize::new(0);

    let chunks: Result<Vec<Vec<f64>>, SimulationError> = (0..n_chunks)
        .into_par_iter()
        .map(|chunk| {
            if token.is_cancelled() {
                return Err(SimulationError::Cancelled {
                    completed: completed.load(Ordering::Relaxed),
                    requested: iterations,
                });
            }
            let start = chunk * PARALLEL_CHUNK_SIZE;
            let len = PARALLEL_CHUNK_SIZE.min(iterations - start);
            let mut rng = RiskRng::for_stream(seed, chunk as u64);
            let mut losses = Vec::with_capacity(len);
            for _ in 0..len {
                match simulate_trial_cancellable(events, &mut rng, token) {
                    Some(loss) => losses.push(loss),
                    None => {
                        return Err(SimulationError::Cancelled {
                            completed: completed.load(Ordering::Relaxed),
                            requested: iterations,
                        })
                    }
                }
            }
            completed.fetch_add(len, Ordering::Relaxed);
            Ok(losses)
        })
        .collect();

    let chunks = chunks.inspect_err(|err| {
        if err.is_cancelled() {
            info!(requested = iterations, "parallel loss aggregation cancelled");
        }
    })?;

    finish(chunks.concat(), config.confidence_level(), started)
}
