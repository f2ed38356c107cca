//! # Random Number Generation Infrastructure
//!
//! Every sampler in the engine draws from an injected [`UniformSource`]
//! rather than a hidden global generator, so simulations are reproducible
//! given a seed and tests can replay exact uniform sequences.
//!
//! ## Module Structure
//!
//! - [`prng`]: seeded PRNG wrapper with stream derivation for parallel chunks
//! - [`source`]: the [`UniformSource`] trait and a replaying [`SequenceSource`]
//!
//! ## Usage Example
//!
//! ```rust
//! use riskq_core::rng::{RiskRng, UniformSource};
//!
//! let mut rng = RiskRng::from_seed(12345);
//! let u = rng.next_uniform();
//! assert!((0.0..1.0).contains(&u));
//!
//! // Independent, reproducible stream for chunk 3 of a parallel run
//! let mut chunk_rng = RiskRng::for_stream(12345, 3);
//! let _ = chunk_rng.next_open_uniform();
//! ```

mod prng;
mod source;

pub use prng::RiskRng;
pub use source::{SequenceSource, UniformSource};

#[cfg(test)]
mod tests;
