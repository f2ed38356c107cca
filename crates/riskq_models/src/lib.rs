//! # riskq_models: Distribution Samplers and Closed-Form Curves
//!
//! ## Layer 2 (Models) Role
//!
//! - [`sampling`]: one sampler per distribution family, each drawing from an
//!   injected [`UniformSource`](riskq_core::rng::UniformSource)
//! - [`analytical`]: closed-form PDF/CDF, moments, quantiles, plot ranges and
//!   chart curve arrays
//!
//! Analytic curves are for display. Value-at-Risk and expected annual loss
//! are always computed from samples by `riskq_sim`.
//!
//! ## Usage Example
//!
//! ```rust
//! use riskq_core::rng::RiskRng;
//! use riskq_core::types::DistributionSpec;
//! use riskq_models::analytical::{cdf, mean};
//! use riskq_models::sampling::SampleDistribution;
//!
//! let spec = DistributionSpec::Weibull { k: 1.5, lambda: 2.0 };
//! let mut rng = RiskRng::from_seed(42);
//!
//! let x = spec.sample(&mut rng);
//! assert!(x >= 0.0);
//! assert!(cdf(&spec, x) <= 1.0);
//! assert!(mean(&spec) > 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialisation for [`analytical::CurvePoint`]

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod sampling;
