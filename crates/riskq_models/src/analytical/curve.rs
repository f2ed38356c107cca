//! Chart curve arrays.
//!
//! Continuous families are evaluated on an evenly spaced grid across
//! [`plot_range`]; discrete families on their integer support points inside
//! the same range, thinned to at most `points` bars.

use riskq_core::types::DistributionSpec;

use super::distributions::{cdf, pdf};
use super::range::plot_range;

/// Smallest number of points returned for a continuous curve.
pub const MIN_CURVE_POINTS: usize = 2;

/// One sample of a display curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    /// Abscissa
    pub x: f64,
    /// Density (continuous) or probability mass (discrete)
    pub density: f64,
    /// P(X <= x)
    pub cumulative: f64,
}

/// Evaluates a density/CDF curve for charting.
///
/// # Examples
/// ```
/// use riskq_core::types::DistributionSpec;
/// use riskq_models::analytical::density_curve;
///
/// let spec = DistributionSpec::Uniform { min: 0.0, max: 1.0 };
/// let curve = density_curve(&spec, 11);
/// assert_eq!(curve.len(), 11);
/// assert_eq!(curve[0].x, 0.0);
/// assert_eq!(curve[10].cumulative, 1.0);
/// ```
pub fn density_curve(spec: &DistributionSpec, points: usize) -> Vec<CurvePoint> {
    let range = plot_range(spec);
    let at = |x: f64| CurvePoint {
        x,
        density: pdf(spec, x),
        cumulative: cdf(spec, x),
    };

    if !(range.width() > 0.0) {
        return vec![at(range.lower)];
    }

    if spec.is_discrete() {
        let first = range.lower.ceil();
        let last = range.upper.floor();
        if last < first {
            return Vec::new();
        }
        let count = (last - first) as usize + 1;
        let stride = count.div_ceil(points.max(1)).max(1);
        return (0..count)
            .step_by(stride)
            .map(|i| at(first + i as f64))
            .collect();
    }

    let points = points.max(MIN_CURVE_POINTS);
    let step = range.width() / (points - 1) as f64;
    (0..points)
        .map(|i| {
            let x = if i == points - 1 {
                range.upper
            } else {
                range.lower + step * i as f64
            };
            at(x)
        })
        .collect()
}
