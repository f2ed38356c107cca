//! Closed-form densities and cumulative distribution functions.
//!
//! - `pdf`: probability density for continuous families, probability mass
//!   (PMF) for discrete families, evaluated at `x`
//! - `cdf`: P(X <= x) for every family
//!
//! Values are for display curves and domain bounds. Degenerate bounded specs
//! (`min == max`) are treated as a point mass: the density is reported as 0
//! and the CDF steps from 0 to 1 at `min`.

use riskq_core::math::special::{
    ln_beta, ln_gamma, norm_cdf, norm_pdf, regularized_incomplete_beta, regularized_lower_gamma,
};
use riskq_core::types::DistributionSpec;

/// `a * ln(x)` with the convention `0 * ln(0) = 0`.
#[inline]
fn xlogy(a: f64, x: f64) -> f64 {
    if a == 0.0 {
        0.0
    } else {
        a * x.ln()
    }
}

/// Integer support point for a discrete family, if `x` is one.
#[inline]
fn support_point(x: f64) -> Option<f64> {
    if x.is_finite() && x >= 0.0 && x.fract() == 0.0 {
        Some(x)
    } else {
        None
    }
}

/// PERT shape parameters on the unit interval.
#[inline]
pub(crate) fn pert_shape(min: f64, mode: f64, max: f64, gamma: f64) -> (f64, f64) {
    let range = max - min;
    (
        1.0 + gamma * (mode - min) / range,
        1.0 + gamma * (max - mode) / range,
    )
}

fn beta_pdf(alpha: f64, beta: f64, x: f64) -> f64 {
    if !(0.0..=1.0).contains(&x) {
        return 0.0;
    }
    if (x == 0.0 && alpha < 1.0) || (x == 1.0 && beta < 1.0) {
        return f64::INFINITY;
    }
    (xlogy(alpha - 1.0, x) + xlogy(beta - 1.0, 1.0 - x) - ln_beta(alpha, beta)).exp()
}

/// Probability density (continuous) or mass (discrete) at `x`.
///
/// # Examples
/// ```
/// use riskq_core::types::DistributionSpec;
/// use riskq_models::analytical::pdf;
///
/// let spec = DistributionSpec::Uniform { min: 0.0, max: 4.0 };
/// assert_eq!(pdf(&spec, 1.0), 0.25);
/// assert_eq!(pdf(&spec, 5.0), 0.0);
/// ```
pub fn pdf(spec: &DistributionSpec, x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }

    match *spec {
        DistributionSpec::Triangular { min, mode, max } => {
            let range = max - min;
            if range <= 0.0 || x < min || x > max {
                0.0
            } else if x < mode {
                2.0 * (x - min) / (range * (mode - min))
            } else if x > mode {
                2.0 * (max - x) / (range * (max - mode))
            } else {
                2.0 / range
            }
        }
        DistributionSpec::Pert {
            min,
            mode,
            max,
            gamma,
        } => {
            let range = max - min;
            if range <= 0.0 {
                return 0.0;
            }
            let (alpha, beta) = pert_shape(min, mode, max, gamma);
            beta_pdf(alpha, beta, (x - min) / range) / range
        }
        DistributionSpec::Normal { mean, std_dev } => norm_pdf((x - mean) / std_dev) / std_dev,
        DistributionSpec::Lognormal { mean, std_dev } => {
            if x <= 0.0 {
                0.0
            } else {
                norm_pdf((x.ln() - mean) / std_dev) / (x * std_dev)
            }
        }
        DistributionSpec::Uniform { min, max } => {
            let range = max - min;
            if range <= 0.0 || x < min || x > max {
                0.0
            } else {
                1.0 / range
            }
        }
        DistributionSpec::Beta { alpha, beta } => beta_pdf(alpha, beta, x),
        DistributionSpec::Poisson { lambda } => match support_point(x) {
            Some(k) => (xlogy(k, lambda) - lambda - ln_gamma(k + 1.0)).exp(),
            None => 0.0,
        },
        DistributionSpec::Exponential { lambda } => {
            if x < 0.0 {
                0.0
            } else {
                lambda * (-lambda * x).exp()
            }
        }
        DistributionSpec::Gamma { shape, scale } => {
            if x < 0.0 {
                0.0
            } else if x == 0.0 {
                match shape.partial_cmp(&1.0) {
                    Some(std::cmp::Ordering::Less) => f64::INFINITY,
                    Some(std::cmp::Ordering::Equal) => 1.0 / scale,
                    _ => 0.0,
                }
            } else {
                ((shape - 1.0) * x.ln() - x / scale - ln_gamma(shape) - shape * scale.ln()).exp()
            }
        }
        DistributionSpec::Pareto { x_min, alpha } => {
            if x < x_min {
                0.0
            } else {
                alpha * x_min.powf(alpha) / x.powf(alpha + 1.0)
            }
        }
        DistributionSpec::Weibull { k, lambda } => {
            if x < 0.0 {
                0.0
            } else if x == 0.0 {
                match k.partial_cmp(&1.0) {
                    Some(std::cmp::Ordering::Less) => f64::INFINITY,
                    Some(std::cmp::Ordering::Equal) => 1.0 / lambda,
                    _ => 0.0,
                }
            } else {
                let z = x / lambda;
                (k / lambda) * z.powf(k - 1.0) * (-z.powf(k)).exp()
            }
        }
        DistributionSpec::NegativeBinomial { r, p } => match support_point(x) {
            Some(k) => {
                let r = f64::from(r);
                (ln_gamma(k + r) - ln_gamma(k + 1.0) - ln_gamma(r)
                    + xlogy(r, p)
                    + xlogy(k, 1.0 - p))
                .exp()
            }
            None => 0.0,
        },
        DistributionSpec::Binomial { n, p } => match support_point(x) {
            Some(k) if k <= f64::from(n) => {
                let n = f64::from(n);
                (ln_gamma(n + 1.0) - ln_gamma(k + 1.0) - ln_gamma(n - k + 1.0)
                    + xlogy(k, p)
                    + xlogy(n - k, 1.0 - p))
                .exp()
            }
            _ => 0.0,
        },
        DistributionSpec::Geometric { p } => match support_point(x) {
            Some(k) if k >= 1.0 => (xlogy(k - 1.0, 1.0 - p)).exp() * p,
            _ => 0.0,
        },
        DistributionSpec::DiscreteUniform { min, max } => {
            let (lo, hi) = (min as f64, max as f64);
            if x.fract() == 0.0 && x >= lo && x <= hi.max(lo) {
                1.0 / (hi.max(lo) - lo + 1.0)
            } else {
                0.0
            }
        }
    }
}

/// Cumulative distribution function P(X <= x).
///
/// Discrete families evaluate at `⌊x⌋`. Results are clamped into [0, 1].
///
/// # Examples
/// ```
/// use riskq_core::types::DistributionSpec;
/// use riskq_models::analytical::cdf;
///
/// let spec = DistributionSpec::Exponential { lambda: 1.0 };
/// assert!((cdf(&spec, 1.0) - (1.0 - (-1.0_f64).exp())).abs() < 1e-12);
/// ```
pub fn cdf(spec: &DistributionSpec, x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }

    let value = match *spec {
        DistributionSpec::Triangular { min, mode, max } => {
            let range = max - min;
            if x < min {
                0.0
            } else if x >= max || range <= 0.0 {
                1.0
            } else if x < mode {
                (x - min).powi(2) / (range * (mode - min))
            } else {
                1.0 - (max - x).powi(2) / (range * (max - mode))
            }
        }
        DistributionSpec::Pert {
            min,
            mode,
            max,
            gamma,
        } => {
            let range = max - min;
            if x < min {
                0.0
            } else if x >= max || range <= 0.0 {
                1.0
            } else {
                let (alpha, beta) = pert_shape(min, mode, max, gamma);
                regularized_incomplete_beta(alpha, beta, (x - min) / range)
            }
        }
        DistributionSpec::Normal { mean, std_dev } => norm_cdf((x - mean) / std_dev),
        DistributionSpec::Lognormal { mean, std_dev } => {
            if x <= 0.0 {
                0.0
            } else {
                norm_cdf((x.ln() - mean) / std_dev)
            }
        }
        DistributionSpec::Uniform { min, max } => {
            if x < min {
                0.0
            } else if x >= max {
                1.0
            } else {
                (x - min) / (max - min)
            }
        }
        DistributionSpec::Beta { alpha, beta } => regularized_incomplete_beta(alpha, beta, x),
        DistributionSpec::Poisson { lambda } => {
            if x < 0.0 {
                0.0
            } else {
                // P(N <= k) = Q(k + 1, λ)
                1.0 - regularized_lower_gamma(x.floor() + 1.0, lambda)
            }
        }
        DistributionSpec::Exponential { lambda } => {
            if x <= 0.0 {
                0.0
            } else {
                -(-lambda * x).exp_m1()
            }
        }
        DistributionSpec::Gamma { shape, scale } => regularized_lower_gamma(shape, x / scale),
        DistributionSpec::Pareto { x_min, alpha } => {
            if x <= x_min {
                0.0
            } else {
                1.0 - (x_min / x).powf(alpha)
            }
        }
        DistributionSpec::Weibull { k, lambda } => {
            if x <= 0.0 {
                0.0
            } else {
                -(-(x / lambda).powf(k)).exp_m1()
            }
        }
        DistributionSpec::NegativeBinomial { r, p } => {
            if x < 0.0 {
                0.0
            } else {
                regularized_incomplete_beta(f64::from(r), x.floor() + 1.0, p)
            }
        }
        DistributionSpec::Binomial { n, p } => {
            let k = x.floor();
            let n = f64::from(n);
            if k < 0.0 {
                0.0
            } else if k >= n {
                1.0
            } else {
                regularized_incomplete_beta(n - k, k + 1.0, 1.0 - p)
            }
        }
        DistributionSpec::Geometric { p } => {
            if x < 1.0 {
                0.0
            } else {
                1.0 - (1.0 - p).powf(x.floor())
            }
        }
        DistributionSpec::DiscreteUniform { min, max } => {
            let (lo, hi) = (min as f64, (max as f64).max(min as f64));
            if x < lo {
                0.0
            } else if x >= hi {
                1.0
            } else {
                (x.floor() - lo + 1.0) / (hi - lo + 1.0)
            }
        }
    };

    value.clamp(0.0, 1.0)
}
