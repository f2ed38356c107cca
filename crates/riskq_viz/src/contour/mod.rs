//! Iso-loss contours over a density grid.
//!
//! A contour at loss level `L` is the hyperbola `severity = L / frequency`
//! restricted to the grid rectangle. [`generate_contours`] draws:
//!
//! - five percentile levels (25/50/75/90/95) of the grid's cell losses
//! - optional VaR and EAL levels from a [`RiskOverlay`], each with
//!   `L ± σ` [`ContourKind::ConfidenceBand`] levels when a deviation is
//!   supplied (the lower band is floored at 0)
//!
//! Levels whose curve misses the rectangle keep an empty polyline.

mod generator;
mod level;
mod overlay;

pub use generator::{
    generate_contours, iso_loss_curve, ContourOptions, DEFAULT_SAMPLES_PER_CURVE,
    MIN_SAMPLES_PER_CURVE, PERCENTILE_LEVELS,
};
pub use level::{ContourKind, ContourLevel, ContourPoint, ContourSet};
pub use overlay::RiskOverlay;
