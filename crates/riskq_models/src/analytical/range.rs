//! Quantiles and display domains.
//!
//! [`plot_range`] picks the interval a chart or density grid should cover
//! for a distribution:
//!
//! | Family | Range |
//! |---|---|
//! | normal | mean ± 4σ |
//! | lognormal, pareto, weibull, gamma, exponential | 1st to 99th percentile |
//! | triangular, pert, uniform, beta, binomial, discrete uniform | natural bounds |
//! | poisson | λ ± 4√λ, floored at 0 |
//! | negative binomial, geometric | mean ± 4σ, floored at the support minimum |

use riskq_core::types::DistributionSpec;

use super::distributions::cdf;
use super::moments::{mean, std_dev};

/// Lower percentile used for unbounded continuous families.
pub const LOWER_PERCENTILE: f64 = 0.01;

/// Upper percentile used for unbounded continuous families.
pub const UPPER_PERCENTILE: f64 = 0.99;

/// Number of standard deviations either side of the mean for spread-based ranges.
pub const SPREAD_SIGMAS: f64 = 4.0;

const BISECTION_STEPS: usize = 200;
const BRACKET_DOUBLINGS: usize = 1_100;

/// A closed interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlotRange {
    /// Lower bound
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
}

impl PlotRange {
    /// Creates a range, swapping the bounds if they are reversed.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { lower: a, upper: b }
        } else {
            Self { lower: b, upper: a }
        }
    }

    /// `upper - lower`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether `x` lies inside the closed interval.
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.lower && x <= self.upper
    }

    /// Midpoint of the interval.
    #[inline]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }
}

/// Inverse CDF: the smallest `x` with `P(X <= x) >= p`.
///
/// Closed form where one exists (triangular, uniform, exponential, pareto,
/// weibull); bisection on [`cdf`] otherwise. Discrete families return an
/// integer support point. `p` is clamped into [0, 1]; `p = 1` on an
/// unbounded family gives `+inf`.
///
/// # Examples
/// ```
/// use riskq_core::types::DistributionSpec;
/// use riskq_models::analytical::quantile;
///
/// let spec = DistributionSpec::Exponential { lambda: 2.0 };
/// assert!((quantile(&spec, 0.5) - 2.0_f64.ln() / 2.0).abs() < 1e-12);
/// ```
pub fn quantile(spec: &DistributionSpec, p: f64) -> f64 {
    let p = if p.is_nan() { 0.5 } else { p.clamp(0.0, 1.0) };

    match *spec {
        DistributionSpec::Triangular { min, mode, max } => {
            let range = max - min;
            if range <= 0.0 {
                return min;
            }
            let split = (mode - min) / range;
            if p < split {
                min + (p * range * (mode - min)).sqrt()
            } else {
                max - ((1.0 - p) * range * (max - mode)).sqrt()
            }
        }
        DistributionSpec::Uniform { min, max } => min + p * (max - min).max(0.0),
        DistributionSpec::Exponential { lambda } => -(-p).ln_1p() / lambda,
        DistributionSpec::Pareto { x_min, alpha } => x_min / (1.0 - p).powf(1.0 / alpha),
        DistributionSpec::Weibull { k, lambda } => lambda * (-(-p).ln_1p()).powf(1.0 / k),
        _ => bisect_quantile(spec, p),
    }
}

fn bisect_quantile(spec: &DistributionSpec, p: f64) -> f64 {
    let (mut lo, mut hi) = bracket(spec, p);
    if !hi.is_finite() {
        return hi;
    }

    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        if cdf(spec, mid) >= p {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    if spec.is_discrete() {
        // hi sits just above the step at the answer
        let k = hi.floor();
        if cdf(spec, k) >= p {
            k
        } else {
            k + 1.0
        }
    } else {
        hi
    }
}

/// Finds `lo < hi` with `cdf(lo) < p <= cdf(hi)`.
fn bracket(spec: &DistributionSpec, p: f64) -> (f64, f64) {
    let centre = {
        let m = mean(spec);
        if m.is_finite() {
            m
        } else {
            0.0
        }
    };
    let mut step = {
        let s = std_dev(spec);
        if s.is_finite() && s > 0.0 {
            s
        } else {
            1.0
        }
    };

    let mut lo = centre - step;
    let mut hi = centre + step;
    for _ in 0..BRACKET_DOUBLINGS {
        let lo_ok = cdf(spec, lo) < p || p <= 0.0;
        let hi_ok = cdf(spec, hi) >= p;
        if lo_ok && hi_ok {
            return (lo, hi);
        }
        step *= 2.0;
        if !lo_ok {
            lo = centre - step;
        }
        if !hi_ok {
            hi = centre + step;
        }
        if !hi.is_finite() {
            return (lo, f64::INFINITY);
        }
    }
    (lo, hi)
}

/// Display domain for a distribution.
///
/// # Examples
/// ```
/// use riskq_core::types::DistributionSpec;
/// use riskq_models::analytical::plot_range;
///
/// let range = plot_range(&DistributionSpec::Normal { mean: 10.0, std_dev: 2.0 });
/// assert_eq!((range.lower, range.upper), (2.0, 18.0));
/// ```
pub fn plot_range(spec: &DistributionSpec) -> PlotRange {
    match *spec {
        DistributionSpec::Normal { mean, std_dev } => PlotRange::new(
            mean - SPREAD_SIGMAS * std_dev,
            mean + SPREAD_SIGMAS * std_dev,
        ),
        DistributionSpec::Lognormal { .. }
        | DistributionSpec::Pareto { .. }
        | DistributionSpec::Weibull { .. }
        | DistributionSpec::Gamma { .. }
        | DistributionSpec::Exponential { .. } => PlotRange::new(
            quantile(spec, LOWER_PERCENTILE),
            quantile(spec, UPPER_PERCENTILE),
        ),
        DistributionSpec::Triangular { min, max, .. }
        | DistributionSpec::Pert { min, max, .. }
        | DistributionSpec::Uniform { min, max } => PlotRange::new(min, max),
        DistributionSpec::Beta { .. } => PlotRange::new(0.0, 1.0),
        DistributionSpec::Binomial { n, .. } => PlotRange::new(0.0, f64::from(n)),
        DistributionSpec::DiscreteUniform { min, max } => PlotRange::new(min as f64, max as f64),
        DistributionSpec::Poisson { lambda } => {
            let spread = SPREAD_SIGMAS * lambda.sqrt();
            PlotRange::new((lambda - spread).max(0.0), lambda + spread)
        }
        DistributionSpec::NegativeBinomial { .. } => spread_range(spec, 0.0),
        DistributionSpec::Geometric { .. } => spread_range(spec, 1.0),
    }
}

fn spread_range(spec: &DistributionSpec, support_min: f64) -> PlotRange {
    let centre = mean(spec);
    let spread = SPREAD_SIGMAS * std_dev(spec);
    PlotRange::new((centre - spread).max(support_min), centre + spread)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plot_range_reorders_bounds() {
        let range = PlotRange::new(5.0, 1.0);
        assert_eq!(range.lower, 1.0);
        assert_eq!(range.width(), 4.0);
        assert!(range.contains(3.0));
        assert_eq!(range.midpoint(), 3.0);
    }

    #[test]
    fn test_normal_quantile_by_bisection() {
        let spec = DistributionSpec::Normal {
            mean: 0.0,
            std_dev: 1.0,
        };
        // Φ⁻¹(0.975) ≈ 1.959964; erfc approximation limits accuracy
        assert_relative_eq!(quantile(&spec, 0.975), 1.959_964, epsilon = 1e-4);
        assert_relative_eq!(quantile(&spec, 0.5), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_gamma_percentile_range() {
        let spec = DistributionSpec::Gamma {
            shape: 2.0,
            scale: 1.0,
        };
        let range = plot_range(&spec);
        assert_relative_eq!(cdf(&spec, range.lower), LOWER_PERCENTILE, epsilon = 1e-8);
        assert_relative_eq!(cdf(&spec, range.upper), UPPER_PERCENTILE, epsilon = 1e-8);
    }

    #[test]
    fn test_lognormal_percentile_range() {
        let spec = DistributionSpec::Lognormal {
            mean: 0.0,
            std_dev: 0.5,
        };
        let range = plot_range(&spec);
        // exp(±2.326 σ)
        assert_relative_eq!(range.lower, (-2.326_348 * 0.5_f64).exp(), max_relative = 1e-3);
        assert_relative_eq!(range.upper, (2.326_348 * 0.5_f64).exp(), max_relative = 1e-3);
    }

    #[test]
    fn test_pareto_and_exponential_closed_forms() {
        let pareto = DistributionSpec::Pareto {
            x_min: 10.0,
            alpha: 2.0,
        };
        let range = plot_range(&pareto);
        assert_relative_eq!(range.lower, 10.0 / 0.99_f64.sqrt(), epsilon = 1e-10);
        assert_relative_eq!(range.upper, 100.0, epsilon = 1e-9);

        let expo = DistributionSpec::Exponential { lambda: 1.0 };
        assert_relative_eq!(plot_range(&expo).upper, 100.0_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_poisson_spread_floored() {
        let range = plot_range(&DistributionSpec::Poisson { lambda: 4.0 });
        assert_eq!(range.lower, 0.0);
        assert_eq!(range.upper, 12.0);

        let range = plot_range(&DistributionSpec::Poisson { lambda: 100.0 });
        assert_eq!((range.lower, range.upper), (60.0, 140.0));
    }

    #[test]
    fn test_geometric_floored_at_one() {
        let range = plot_range(&DistributionSpec::Geometric { p: 0.5 });
        assert_eq!(range.lower, 1.0);
        assert!(range.upper > 2.0);
    }

    #[test]
    fn test_discrete_quantile_is_integer() {
        let spec = DistributionSpec::Poisson { lambda: 3.0 };
        let q = quantile(&spec, 0.5);
        assert_eq!(q.fract(), 0.0);
        assert!(cdf(&spec, q) >= 0.5);
        assert!(cdf(&spec, q - 1.0) < 0.5);
    }

    #[test]
    fn test_bounded_natural_ranges() {
        let pert = DistributionSpec::Pert {
            min: 1.0,
            mode: 2.0,
            max: 9.0,
            gamma: 4.0,
        };
        assert_eq!(plot_range(&pert), PlotRange::new(1.0, 9.0));
        let beta = DistributionSpec::Beta {
            alpha: 2.0,
            beta: 2.0,
        };
        assert_eq!(plot_range(&beta), PlotRange::new(0.0, 1.0));
    }
}
