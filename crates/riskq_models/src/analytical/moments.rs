//! Closed-form mean and variance.
//!
//! Heavy-tailed Pareto specs report `+inf` where the moment does not exist
//! (`alpha <= 1` for the mean, `alpha <= 2` for the variance).

use riskq_core::math::special::ln_gamma;
use riskq_core::types::DistributionSpec;

use super::distributions::pert_shape;

/// Expected value of the distribution.
///
/// # Examples
/// ```
/// use riskq_core::types::DistributionSpec;
/// use riskq_models::analytical::mean;
///
/// let spec = DistributionSpec::Triangular { min: 0.0, mode: 3.0, max: 6.0 };
/// assert_eq!(mean(&spec), 3.0);
/// ```
pub fn mean(spec: &DistributionSpec) -> f64 {
    match *spec {
        DistributionSpec::Triangular { min, mode, max } => (min + mode + max) / 3.0,
        DistributionSpec::Pert {
            min,
            mode,
            max,
            gamma,
        } => (min + gamma * mode + max) / (gamma + 2.0),
        DistributionSpec::Normal { mean, .. } => mean,
        DistributionSpec::Lognormal { mean, std_dev } => (mean + 0.5 * std_dev * std_dev).exp(),
        DistributionSpec::Uniform { min, max } => 0.5 * (min + max),
        DistributionSpec::Beta { alpha, beta } => alpha / (alpha + beta),
        DistributionSpec::Poisson { lambda } => lambda,
        DistributionSpec::Exponential { lambda } => 1.0 / lambda,
        DistributionSpec::Gamma { shape, scale } => shape * scale,
        DistributionSpec::Pareto { x_min, alpha } => {
            if alpha > 1.0 {
                alpha * x_min / (alpha - 1.0)
            } else {
                f64::INFINITY
            }
        }
        DistributionSpec::Weibull { k, lambda } => lambda * ln_gamma(1.0 + 1.0 / k).exp(),
        DistributionSpec::NegativeBinomial { r, p } => f64::from(r) * (1.0 - p) / p,
        DistributionSpec::Binomial { n, p } => f64::from(n) * p,
        DistributionSpec::Geometric { p } => 1.0 / p,
        DistributionSpec::DiscreteUniform { min, max } => 0.5 * (min as f64 + max as f64),
    }
}

/// Variance of the distribution.
pub fn variance(spec: &DistributionSpec) -> f64 {
    match *spec {
        DistributionSpec::Triangular { min, mode, max } => {
            (min * min + mode * mode + max * max - min * mode - min * max - mode * max) / 18.0
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
            beta_variance(alpha, beta) * range * range
        }
        DistributionSpec::Normal { std_dev, .. } => std_dev * std_dev,
        DistributionSpec::Lognormal { mean, std_dev } => {
            let s2 = std_dev * std_dev;
            s2.exp_m1() * (2.0 * mean + s2).exp()
        }
        DistributionSpec::Uniform { min, max } => (max - min).powi(2) / 12.0,
        DistributionSpec::Beta { alpha, beta } => beta_variance(alpha, beta),
        DistributionSpec::Poisson { lambda } => lambda,
        DistributionSpec::Exponential { lambda } => 1.0 / (lambda * lambda),
        DistributionSpec::Gamma { shape, scale } => shape * scale * scale,
        DistributionSpec::Pareto { x_min, alpha } => {
            if alpha > 2.0 {
                x_min * x_min * alpha / ((alpha - 1.0).powi(2) * (alpha - 2.0))
            } else {
                f64::INFINITY
            }
        }
        DistributionSpec::Weibull { k, lambda } => {
            let g1 = ln_gamma(1.0 + 1.0 / k).exp();
            let g2 = ln_gamma(1.0 + 2.0 / k).exp();
            lambda * lambda * (g2 - g1 * g1).max(0.0)
        }
        DistributionSpec::NegativeBinomial { r, p } => f64::from(r) * (1.0 - p) / (p * p),
        DistributionSpec::Binomial { n, p } => f64::from(n) * p * (1.0 - p),
        DistributionSpec::Geometric { p } => (1.0 - p) / (p * p),
        DistributionSpec::DiscreteUniform { min, max } => {
            let count = (max as f64 - min as f64).max(0.0) + 1.0;
            (count * count - 1.0) / 12.0
        }
    }
}

/// Standard deviation, `sqrt(variance)`.
#[inline]
pub fn std_dev(spec: &DistributionSpec) -> f64 {
    variance(spec).sqrt()
}

#[inline]
fn beta_variance(alpha: f64, beta: f64) -> f64 {
    let total = alpha + beta;
    alpha * beta / (total * total * (total + 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pert_mean_classic_formula() {
        let spec = DistributionSpec::Pert {
            min: 100.0,
            mode: 400.0,
            max: 1_300.0,
            gamma: 4.0,
        };
        // (a + 4m + b) / 6
        assert_relative_eq!(mean(&spec), 500.0, epsilon = 1e-12);
    }

    #[test]
    fn test_triangular_variance() {
        let spec = DistributionSpec::Triangular {
            min: 0.0,
            mode: 0.0,
            max: 1.0,
        };
        assert_relative_eq!(variance(&spec), 1.0 / 18.0, epsilon = 1e-15);
    }

    #[test]
    fn test_lognormal_moments() {
        let spec = DistributionSpec::Lognormal {
            mean: 0.0,
            std_dev: 1.0,
        };
        let e = std::f64::consts::E;
        assert_relative_eq!(mean(&spec), e.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(variance(&spec), (e - 1.0) * e, epsilon = 1e-12);
    }

    #[test]
    fn test_weibull_k1_is_exponential() {
        let spec = DistributionSpec::Weibull {
            k: 1.0,
            lambda: 3.0,
        };
        assert_relative_eq!(mean(&spec), 3.0, epsilon = 1e-10);
        assert_relative_eq!(variance(&spec), 9.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pareto_moments_may_not_exist() {
        let heavy = DistributionSpec::Pareto {
            x_min: 1.0,
            alpha: 0.9,
        };
        assert!(mean(&heavy).is_infinite());
        let medium = DistributionSpec::Pareto {
            x_min: 1.0,
            alpha: 1.5,
        };
        assert_relative_eq!(mean(&medium), 3.0, epsilon = 1e-12);
        assert!(variance(&medium).is_infinite());
    }

    #[test]
    fn test_discrete_moments() {
        assert_relative_eq!(
            variance(&DistributionSpec::DiscreteUniform { min: 1, max: 6 }),
            35.0 / 12.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            mean(&DistributionSpec::NegativeBinomial { r: 3, p: 0.4 }),
            4.5,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            std_dev(&DistributionSpec::Geometric { p: 0.5 }),
            2.0_f64.sqrt(),
            epsilon = 1e-12
        );
    }
}
