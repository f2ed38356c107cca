//! Monte Carlo loss aggregation.
//!
//! # Trial model
//!
//! For every trial and every event an occurrence count `f` is drawn from the
//! frequency distribution. `⌊f⌋` severity draws are summed, and with
//! probability `f − ⌊f⌋` one extra severity draw is added. This lets a mean
//! frequency below one contribute its correctly weighted expected loss.
//! Negative or non-finite counts contribute nothing. The trial loss is the
//! sum over events.
//!
//! # Statistics
//!
//! After sorting the trial losses ascending:
//! - `value_at_risk` is the element at `⌊confidence × N⌋`, clamped into
//!   `[0, N − 1]`. This empirical order statistic is the definition, not an
//!   approximation of an interpolated quantile.
//! - `expected_annual_loss` is the arithmetic mean.

use std::time::Instant;

use riskq_core::rng::{RiskRng, UniformSource};
use riskq_core::types::RiskEvent;
use riskq_models::sampling::SampleDistribution;
use tracing::{debug, info};

use super::config::SimulationConfig;
use super::error::SimulationError;
use super::result::SimulationResult;
use crate::session::CancellationToken;

/// Number of trials, or severity draws within one trial, between
/// cancellation checks.
pub const CANCEL_CHECK_INTERVAL: usize = 1024;

/// Checks the event list before any sampling work.
///
/// # Errors
///
/// - [`SimulationError::EmptyEventList`] for an empty slice
/// - [`SimulationError::InvalidEvent`] naming the first offending event
///   and distribution
pub fn validate_events(events: &[RiskEvent]) -> Result<(), SimulationError> {
    if events.is_empty() {
        return Err(SimulationError::EmptyEventList);
    }
    for (index, event) in events.iter().enumerate() {
        event
            .validate()
            .map_err(|(role, source)| SimulationError::InvalidEvent {
                index,
                role,
                source,
            })?;
    }
    Ok(())
}

/// Simulates the total loss of one year across all events.
///
/// # Examples
/// ```
/// use riskq_core::rng::RiskRng;
/// use riskq_core::types::{DistributionSpec, RiskEvent};
/// use riskq_sim::mc::simulate_trial;
///
/// // Exactly two occurrences costing 50 each
/// let event = RiskEvent::new(
///     DistributionSpec::Uniform { min: 50.0, max: 50.0 },
///     DistributionSpec::DiscreteUniform { min: 2, max: 2 },
/// );
/// let mut rng = RiskRng::from_seed(0);
/// assert_eq!(simulate_trial(&[event], &mut rng), 100.0);
/// ```
pub fn simulate_trial<U: UniformSource + ?Sized>(events: &[RiskEvent], rng: &mut U) -> f64 {
    let mut total = 0.0;
    for event in events {
        let count = event.frequency.sample(rng);
        if !count.is_finite() || count <= 0.0 {
            continue;
        }

        let whole = count.floor();
        let remainder = count - whole;

        for _ in 0..whole as u64 {
            total += event.severity.sample(rng);
        }
        if remainder > 0.0 && rng.next_uniform() < remainder {
            total += event.severity.sample(rng);
        }
    }
    total
}

/// As [`simulate_trial`], polling `token` every [`CANCEL_CHECK_INTERVAL`]
/// severity draws.
///
/// Returns `None` once the token is tripped. Draws from `rng` in the same
/// order as [`simulate_trial`], so an uncancelled trial gives the same loss.
pub fn simulate_trial_cancellable<U: UniformSource + ?Sized>(
    events: &[RiskEvent],
    rng: &mut U,
    token: &CancellationToken,
) -> Option<f64> {
    let mut total = 0.0;
    for event in events {
        let count = event.frequency.sample(rng);
        if !count.is_finite() || count <= 0.0 {
            continue;
        }

        let whole = count.floor();
        let remainder = count - whole;

        for draw in 0..whole as u64 {
            if draw % CANCEL_CHECK_INTERVAL as u64 == 0 && draw > 0 && token.is_cancelled() {
                return None;
            }
            total += event.severity.sample(rng);
        }
        if remainder > 0.0 && rng.next_uniform() < remainder {
            total += event.severity.sample(rng);
        }
    }
    Some(total)
}

/// Serial Monte Carlo loss aggregator.
///
/// Holds the configuration and its random stream. With a seeded
/// configuration, a fresh aggregator always reproduces the same result;
/// repeated runs on the same aggregator continue the stream.
///
/// # Examples
///
/// ```rust
/// use riskq_core::types::{DistributionSpec, RiskEvent};
/// use riskq_sim::mc::{LossAggregator, SimulationConfig};
///
/// let config = SimulationConfig::builder().iterations(5_000).seed(7).build().unwrap();
/// let events = [RiskEvent::new(
///     DistributionSpec::Triangular { min: 1_000.0, mode: 5_000.0, max: 20_000.0 },
///     DistributionSpec::Poisson { lambda: 0.8 },
/// )];
///
/// let result = LossAggregator::new(config).run(&events).unwrap();
/// assert!(result.value_at_risk() >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct LossAggregator {
    config: SimulationConfig,
    rng: RiskRng,
}

impl LossAggregator {
    /// Creates an aggregator, seeding from the configuration or from entropy.
    pub fn new(config: SimulationConfig) -> Self {
        let rng = match config.seed() {
            Some(seed) => RiskRng::from_seed(seed),
            None => RiskRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Seed of the underlying random stream.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Runs the aggregation to completion.
    ///
    /// # Errors
    ///
    /// Fails before sampling if the configuration or an event is invalid.
    pub fn run(&mut self, events: &[RiskEvent]) -> Result<SimulationResult, SimulationError> {
        self.run_cancellable(events, &CancellationToken::new())
    }

    /// Runs the aggregation, polling `token` every
    /// [`CANCEL_CHECK_INTERVAL`] trials and every [`CANCEL_CHECK_INTERVAL`]
    /// severity draws inside a trial.
    ///
    /// # Errors
    ///
    /// As [`run`](Self::run), plus [`SimulationError::Cancelled`] when the
    /// token is tripped before the last trial.
    pub fn run_cancellable(
        &mut self,
        events: &[RiskEvent],
        token: &CancellationToken,
    ) -> Result<SimulationResult, SimulationError> {
        self.config.validate()?;
        validate_events(events)?;

        let iterations = self.config.iterations();
        debug!(
            iterations,
            events = events.len(),
            seed = self.rng.seed(),
            "starting loss aggregation"
        );
        let started = Instant::now();

        let cancelled = |completed: usize| {
            info!(completed, requested = iterations, "loss aggregation cancelled");
            SimulationError::Cancelled {
                completed,
                requested: iterations,
            }
        };

        let mut losses = Vec::with_capacity(iterations);
        for trial in 0..iterations {
            if trial % CANCEL_CHECK_INTERVAL == 0 && token.is_cancelled() {
                return Err(cancelled(trial));
            }
            let loss = simulate_trial_cancellable(events, &mut self.rng, token)
                .ok_or_else(|| cancelled(trial))?;
            losses.push(loss);
        }

        finish(losses, self.config.confidence_level(), started)
    }
}

/// Sorts trial losses into a result and logs the summary.
pub(crate) fn finish(
    losses: Vec<f64>,
    confidence_level: f64,
    started: Instant,
) -> Result<SimulationResult, SimulationError> {
    // Validated configs guarantee at least one trial
    let result =
        SimulationResult::from_losses(losses, confidence_level).ok_or(SimulationError::NoTrials)?;
    debug!(
        expected_annual_loss = result.expected_annual_loss(),
        value_at_risk = result.value_at_risk(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "loss aggregation finished"
    );
    Ok(result)
}

/// Runs a serial aggregation with a fresh [`LossAggregator`].
///
/// # Errors
///
/// See [`LossAggregator::run`].
pub fn aggregate(
    events: &[RiskEvent],
    config: &SimulationConfig,
) -> Result<SimulationResult, SimulationError> {
    LossAggregator::new(config.clone()).run(events)
}
