//! # riskq_core: Foundation Layer for the Risk Quantification Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! riskq_core is the bottom layer of the engine and provides:
//! - Distribution descriptions: `DistributionSpec`, `DistributionKind` (`types::distribution`)
//! - Risk events pairing severity and frequency (`types::event`)
//! - Parameter sanitising builder for raw form input (`types::params`)
//! - Error types: `ParameterError` (`types::error`)
//! - Special functions: erf, log-gamma, regularised incomplete beta/gamma (`math::special`)
//! - Seedable uniform random sources (`rng`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other riskq_* crates. External dependencies:
//! - num-traits: generic floating-point special functions
//! - rand: seedable PRNG backing [`rng::RiskRng`]
//! - serde: tagged (de)serialisation of distribution specs
//! - thiserror / tracing: errors and fallback diagnostics
//!
//! ## Usage Examples
//!
//! ```rust
//! use riskq_core::types::{build_distribution, DistributionSpec, RawParams};
//! use riskq_core::math::special::norm_cdf;
//!
//! // Raw form input is always sanitised into a valid spec
//! let raw = RawParams {
//!     min: Some(-10.0),
//!     mode: Some(50.0),
//!     max: Some(20.0),
//!     ..RawParams::default()
//! };
//! let spec = build_distribution("triangular", &raw);
//! assert!(spec.validate().is_ok());
//!
//! // Closed-form evaluation
//! let p = norm_cdf(0.0_f64);
//! # assert!((p - 0.5).abs() < 1e-7);
//! # let _ = DistributionSpec::default();
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod rng;
pub mod types;
