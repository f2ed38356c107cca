//! Closed-form distribution functions for display curves.
//!
//! This module provides:
//! - `pdf` / `cdf`: density (or mass) and cumulative probability for every family
//! - `mean` / `variance` / `std_dev`: closed-form moments
//! - `quantile` / `plot_range`: inverse CDF and display domains
//! - `density_curve`: raw arrays for line, area and bar charts
//!
//! Nothing here feeds Value-at-Risk or expected annual loss; those come from
//! the Monte Carlo aggregator only.

pub mod curve;
pub mod distributions;
pub mod moments;
pub mod range;

pub use curve::{density_curve, CurvePoint, MIN_CURVE_POINTS};
pub use distributions::{cdf, pdf};
pub use moments::{mean, std_dev, variance};
pub use range::{
    plot_range, quantile, PlotRange, LOWER_PERCENTILE, SPREAD_SIGMAS, UPPER_PERCENTILE,
};
