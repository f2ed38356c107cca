//! Core types for the risk engine.
//!
//! This module provides:
//! - [`DistributionSpec`] / [`DistributionKind`]: the closed set of supported distributions
//! - [`RiskEvent`]: severity and frequency pairing for one loss scenario
//! - [`RawParams`] and [`build_distribution`]: sanitising builder for raw input
//! - [`ParameterError`]: structured validation errors

pub mod distribution;
pub mod error;
pub mod event;
pub mod params;

pub use distribution::{DistributionKind, DistributionSpec, DEFAULT_PERT_GAMMA};
pub use error::ParameterError;
pub use event::{EventRole, RiskEvent};
pub use params::{
    build_distribution, RawParams, DEFAULT_FALLBACK_SPEC, MIN_RANGE_EPSILON, POSITIVE_FLOOR,
    PROBABILITY_FLOOR,
};
