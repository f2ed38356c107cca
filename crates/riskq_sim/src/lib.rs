//! # riskq_sim: Monte Carlo Loss Aggregation
//!
//! ## Layer 3 (Simulation) Role
//!
//! - [`mc`]: simulation configuration, the loss aggregator (serial,
//!   cancellable and rayon-parallel) and [`mc::SimulationResult`] statistics
//! - [`cache`]: fingerprint-keyed result cache with whole-cache invalidation
//! - [`session`]: cancellation tokens, background workers and the
//!   per-user [`session::SimulationSession`]
//!
//! ## Usage Example
//!
//! ```rust
//! use riskq_core::types::{DistributionSpec, RiskEvent};
//! use riskq_sim::mc::SimulationConfig;
//! use riskq_sim::session::SimulationSession;
//!
//! let events = vec![RiskEvent::new(
//!     DistributionSpec::Lognormal { mean: 9.0, std_dev: 1.2 },
//!     DistributionSpec::Poisson { lambda: 0.4 },
//! )];
//! let config = SimulationConfig::builder()
//!     .iterations(10_000)
//!     .confidence_level(0.99)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let mut session = SimulationSession::new();
//! let result = session.run_blocking(&events, &config).unwrap();
//! assert!(result.value_at_risk() >= 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): `mc::aggregate_parallel` on the rayon pool

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod cache;
pub mod mc;
pub mod session;
