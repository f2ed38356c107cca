//! Axis domains for the density grid.

use riskq_core::types::DistributionSpec;
use riskq_models::analytical::{plot_range, PlotRange};

/// Minimum axis width; narrower domains are widened upward to this.
pub const DOMAIN_EPSILON: f64 = 1e-6;

/// Grid axis for one distribution.
///
/// Starts from [`plot_range`], clips the lower bound at 0 (losses and counts
/// are non-negative) and widens a zero-width interval to [`DOMAIN_EPSILON`].
///
/// # Examples
/// ```
/// use riskq_core::types::DistributionSpec;
/// use riskq_viz::grid::{axis_domain, DOMAIN_EPSILON};
///
/// let normal = axis_domain(&DistributionSpec::Normal { mean: 1.0, std_dev: 1.0 });
/// assert_eq!(normal.lower, 0.0);
/// assert_eq!(normal.upper, 5.0);
///
/// let fixed = axis_domain(&DistributionSpec::DiscreteUniform { min: 1, max: 1 });
/// assert_eq!(fixed.lower, 1.0);
/// assert!((fixed.width() - DOMAIN_EPSILON).abs() < 1e-12);
/// ```
pub fn axis_domain(spec: &DistributionSpec) -> PlotRange {
    let range = plot_range(spec);
    let lower = sanitize(range.lower, 0.0).max(0.0);
    let upper = sanitize(range.upper, lower).max(lower);

    if upper - lower < DOMAIN_EPSILON {
        PlotRange {
            lower,
            upper: lower + DOMAIN_EPSILON,
        }
    } else {
        PlotRange { lower, upper }
    }
}

fn sanitize(x: f64, fallback: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        fallback
    }
}

/// Bin holding `x`, or `None` for non-finite or out-of-domain values.
///
/// The upper bound is closed: `x == range.upper` lands in the last bin.
pub(crate) fn bin_index(x: f64, range: &PlotRange, bins: usize) -> Option<usize> {
    if !x.is_finite() || !range.contains(x) || bins == 0 {
        return None;
    }
    let scaled = (x - range.lower) / range.width() * bins as f64;
    Some((scaled as usize).min(bins - 1))
}

/// Midpoint of bin `index`.
pub(crate) fn bin_midpoint(index: usize, range: &PlotRange, bins: usize) -> f64 {
    let width = range.width() / bins as f64;
    range.lower + (index as f64 + 0.5) * width
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lower_bound_clipped() {
        let range = axis_domain(&DistributionSpec::Normal {
            mean: 0.0,
            std_dev: 10.0,
        });
        assert_eq!(range.lower, 0.0);
        assert_relative_eq!(range.upper, 40.0);
    }

    #[test]
    fn test_entirely_negative_domain_collapses_to_epsilon() {
        let range = axis_domain(&DistributionSpec::Normal {
            mean: -100.0,
            std_dev: 1.0,
        });
        assert_eq!(range.lower, 0.0);
        assert_relative_eq!(range.upper, DOMAIN_EPSILON);
    }

    #[test]
    fn test_bounded_domain_kept() {
        let range = axis_domain(&DistributionSpec::Triangular {
            min: 1_000.0,
            mode: 5_000.0,
            max: 20_000.0,
        });
        assert_eq!(range.lower, 1_000.0);
        assert_eq!(range.upper, 20_000.0);
    }

    #[test]
    fn test_degenerate_uniform_widened() {
        let range = axis_domain(&DistributionSpec::Uniform {
            min: 7.0,
            max: 7.0,
        });
        assert_eq!(range.lower, 7.0);
        assert!(range.width() >= DOMAIN_EPSILON * 0.999);
    }

    #[test]
    fn test_bin_index() {
        let range = PlotRange {
            lower: 0.0,
            upper: 10.0,
        };
        assert_eq!(bin_index(0.0, &range, 20), Some(0));
        assert_eq!(bin_index(0.49, &range, 20), Some(0));
        assert_eq!(bin_index(0.5, &range, 20), Some(1));
        assert_eq!(bin_index(10.0, &range, 20), Some(19));
        assert_eq!(bin_index(10.01, &range, 20), None);
        assert_eq!(bin_index(-0.01, &range, 20), None);
        assert_eq!(bin_index(f64::NAN, &range, 20), None);
        assert_eq!(bin_index(f64::INFINITY, &range, 20), None);
    }

    #[test]
    fn test_bin_midpoint() {
        let range = PlotRange {
            lower: 0.0,
            upper: 10.0,
        };
        assert_relative_eq!(bin_midpoint(0, &range, 20), 0.25);
        assert_relative_eq!(bin_midpoint(19, &range, 20), 9.75);
    }
}
