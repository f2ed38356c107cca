//! Monte Carlo loss aggregation.
//!
//! # Architecture
//!
//! ```text
//! LossAggregator
//! ├── SimulationConfig   (iterations, confidence level, seed)
//! ├── RiskRng            (seeded uniform stream)
//! └── per trial
//!     ├── frequency draw  → ⌊f⌋ severity draws + Bernoulli(f − ⌊f⌋) extra draw
//!     └── sum over events → annual loss
//! ```
//!
//! The resulting [`SimulationResult`] holds the sorted annual losses, the
//! expected annual loss (mean) and Value-at-Risk (empirical order
//! statistic).
//!
//! With the `parallel` feature (default), `aggregate_parallel` runs
//! seed-deterministic chunks on the rayon pool.
//!
//! # Examples
//!
//! ```rust
//! use riskq_core::types::{DistributionSpec, RiskEvent};
//! use riskq_sim::mc::{aggregate, SimulationConfig};
//!
//! let events = vec![RiskEvent::new(
//!     DistributionSpec::Triangular { min: 1_000.0, mode: 5_000.0, max: 20_000.0 },
//!     DistributionSpec::Triangular { min: 0.1, mode: 0.5, max: 2.0 },
//! )];
//! let config = SimulationConfig::builder()
//!     .iterations(20_000)
//!     .confidence_level(0.95)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let result = aggregate(&events, &config).unwrap();
//! assert!(result.value_at_risk() >= result.expected_annual_loss());
//! ```

pub mod aggregator;
pub mod config;
pub mod error;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod result;

pub use aggregator::{
    aggregate, simulate_trial, simulate_trial_cancellable, validate_events, LossAggregator,
    CANCEL_CHECK_INTERVAL,
};
pub use config::{
    SimulationConfig, SimulationConfigBuilder, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_ITERATIONS,
    MAX_ITERATIONS,
};
pub use error::{ConfigError, SimulationError};
#[cfg(feature = "parallel")]
pub use parallel::{aggregate_parallel, PARALLEL_CHUNK_SIZE};
pub use result::{ExceedancePoint, PercentileRow, SimulationResult};
