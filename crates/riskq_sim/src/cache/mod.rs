//! Result cache.
//!
//! - [`Fingerprint`]: canonical key over events, iterations, confidence
//!   level and seed
//! - [`ResultCache`]: get-or-compute memo with whole-cache invalidation
//! - [`ParameterChange`]: edit notifications that drive invalidation

mod fingerprint;
mod store;

pub use fingerprint::Fingerprint;
pub use store::{CacheStats, ParameterChange, ResultCache};
