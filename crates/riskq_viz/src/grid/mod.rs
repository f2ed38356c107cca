//! Joint frequency × severity density grid.
//!
//! # Domain
//!
//! Each axis spans the distribution's plotting range
//! ([`plot_range`](riskq_models::analytical::plot_range)): ±4σ for the
//! normal, 1st to 99th percentile for the heavy-tailed families, natural
//! bounds for bounded ones. Lower bounds are clipped at 0 and a zero-width
//! axis is widened to [`DOMAIN_EPSILON`].
//!
//! # Estimation
//!
//! Independent (frequency, severity) pairs are drawn and binned. A cell's
//! `probability_mass` is its share of the retained samples and `density`
//! divides that by the bin area, so the grid is a true density rather than
//! a count histogram. Non-finite, negative and out-of-domain samples are
//! counted in [`DensityGrid::discarded_samples`] and never fail the build.

mod config;
mod density;
mod domain;
mod error;

pub use config::{
    GridConfig, GridConfigBuilder, DEFAULT_GRID_ITERATIONS, DEFAULT_RESOLUTION,
    MAX_GRID_ITERATIONS, MAX_RESOLUTION, MIN_GRID_ITERATIONS,
};
pub use density::{build_density_grid, DensityGrid, GridCell, HEAVY_DISCARD_FRACTION};
pub use domain::{axis_domain, DOMAIN_EPSILON};
pub use error::GridError;
