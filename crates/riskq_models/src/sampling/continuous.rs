//! Continuous samplers.
//!
//! All functions consume uniforms from the supplied source and never divide
//! by zero: degenerate bounded inputs (`min == max`) return `min`.

use riskq_core::rng::UniformSource;
use std::f64::consts::PI;

/// Triangular sample by piecewise inverse CDF.
///
/// # Examples
/// ```
/// use riskq_core::rng::SequenceSource;
/// use riskq_models::sampling::continuous::sample_triangular;
///
/// // u = 0.5 on a symmetric triangle lands on the mode
/// let mut source = SequenceSource::constant(0.5);
/// assert!((sample_triangular(&mut source, 0.0, 5.0, 10.0) - 5.0).abs() < 1e-12);
/// ```
pub fn sample_triangular<U: UniformSource + ?Sized>(
    rng: &mut U,
    min: f64,
    mode: f64,
    max: f64,
) -> f64 {
    let range = max - min;
    if range <= 0.0 || !range.is_finite() {
        return min;
    }

    let u = rng.next_uniform();
    let split = (mode - min) / range;
    let x = if u < split {
        min + (u * range * (mode - min)).sqrt()
    } else {
        max - ((1.0 - u) * range * (max - mode)).sqrt()
    };
    // rounding can step one ulp outside the support
    x.clamp(min, max)
}

/// PERT sample via a beta draw re-scaled onto [min, max].
///
/// Shape parameters are `α = 1 + γ(mode − min)/(max − min)` and
/// `β = 1 + γ(max − mode)/(max − min)`.
pub fn sample_pert<U: UniformSource + ?Sized>(
    rng: &mut U,
    min: f64,
    mode: f64,
    max: f64,
    gamma: f64,
) -> f64 {
    let range = max - min;
    if range <= 0.0 || !range.is_finite() {
        return min;
    }

    let alpha = 1.0 + gamma * (mode - min) / range;
    let beta = 1.0 + gamma * (max - mode) / range;
    min + sample_beta(rng, alpha, beta) * range
}

/// Standard normal variate by the Box–Muller transform.
///
/// Consumes two uniforms and returns the cosine branch.
#[inline]
pub fn sample_standard_normal<U: UniformSource + ?Sized>(rng: &mut U) -> f64 {
    let u1 = rng.next_open_uniform();
    let u2 = rng.next_uniform();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Normal sample.
#[inline]
pub fn sample_normal<U: UniformSource + ?Sized>(rng: &mut U, mean: f64, std_dev: f64) -> f64 {
    mean + std_dev * sample_standard_normal(rng)
}

/// Lognormal sample, `exp(normal(μ, σ))`.
#[inline]
pub fn sample_lognormal<U: UniformSource + ?Sized>(rng: &mut U, mu: f64, sigma: f64) -> f64 {
    sample_normal(rng, mu, sigma).exp()
}

/// Uniform sample on [min, max] by linear interpolation.
#[inline]
pub fn sample_uniform<U: UniformSource + ?Sized>(rng: &mut U, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range <= 0.0 || !range.is_finite() {
        return min;
    }
    (min + rng.next_uniform() * range).min(max)
}

/// Gamma sample (shape/scale) by Marsaglia–Tsang.
///
/// For `shape < 1` draws `Γ(shape + 1)` and multiplies by `U^(1/shape)`.
///
/// # Termination
///
/// The rejection loop has no iteration cap. Its acceptance rate exceeds 95%
/// for every shape ≥ 1, so the expected number of rounds is below 1.06 and
/// the loop terminates with probability 1.
pub fn sample_gamma<U: UniformSource + ?Sized>(rng: &mut U, shape: f64, scale: f64) -> f64 {
    if shape < 1.0 {
        let boost = rng.next_open_uniform().powf(1.0 / shape);
        return sample_gamma(rng, shape + 1.0, scale) * boost;
    }

    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();

    loop {
        let (x, v) = loop {
            let x = sample_standard_normal(rng);
            let v = 1.0 + c * x;
            if v > 0.0 {
                break (x, v);
            }
        };

        let v = v * v * v;
        let u = rng.next_uniform();
        let x2 = x * x;

        if u < 1.0 - 0.0331 * x2 * x2 {
            return d * v * scale;
        }
        if u.ln() < 0.5 * x2 + d * (1.0 - v + v.ln()) {
            return d * v * scale;
        }
    }
}

/// Beta sample as `X / (X + Y)` with `X ~ Γ(α, 1)`, `Y ~ Γ(β, 1)`.
///
/// Inherits the termination guarantee of [`sample_gamma`]. If both gamma
/// draws underflow to zero (only possible for extremely small shapes) the
/// mean `α / (α + β)` is returned.
pub fn sample_beta<U: UniformSource + ?Sized>(rng: &mut U, alpha: f64, beta: f64) -> f64 {
    let x = sample_gamma(rng, alpha, 1.0);
    let y = sample_gamma(rng, beta, 1.0);
    let total = x + y;
    if total > 0.0 {
        x / total
    } else {
        alpha / (alpha + beta)
    }
}

/// Exponential sample by inverse CDF, `-ln(1 - u) / λ`.
#[inline]
pub fn sample_exponential<U: UniformSource + ?Sized>(rng: &mut U, lambda: f64) -> f64 {
    -rng.next_open_uniform().ln() / lambda
}

/// Pareto (type I) sample by inverse CDF, `x_min / (1 - u)^(1/α)`.
#[inline]
pub fn sample_pareto<U: UniformSource + ?Sized>(rng: &mut U, x_min: f64, alpha: f64) -> f64 {
    x_min / rng.next_open_uniform().powf(1.0 / alpha)
}

/// Weibull sample by inverse CDF, `λ (-ln(1 - u))^(1/k)`.
#[inline]
pub fn sample_weibull<U: UniformSource + ?Sized>(rng: &mut U, k: f64, lambda: f64) -> f64 {
    lambda * (-rng.next_open_uniform().ln()).powf(1.0 / k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use riskq_core::rng::{RiskRng, SequenceSource};

    fn sample_mean(n: usize, mut draw: impl FnMut() -> f64) -> f64 {
        (0..n).map(|_| draw()).sum::<f64>() / n as f64
    }

    #[test]
    fn test_triangular_inverse_cdf_endpoints() {
        let mut low = SequenceSource::constant(0.0);
        assert_eq!(sample_triangular(&mut low, 1.0, 2.0, 4.0), 1.0);

        // u just below 1 lands just below max
        let mut high = SequenceSource::constant(1.0);
        let x = sample_triangular(&mut high, 1.0, 2.0, 4.0);
        assert!(x <= 4.0 && x > 3.99);
    }

    #[test]
    fn test_triangular_degenerate() {
        let mut rng = RiskRng::from_seed(1);
        for _ in 0..100 {
            assert_eq!(sample_triangular(&mut rng, 7.5, 7.5, 7.5), 7.5);
        }
    }

    #[test]
    fn test_triangular_mode_at_min() {
        let mut rng = RiskRng::from_seed(3);
        for _ in 0..1_000 {
            let x = sample_triangular(&mut rng, 0.0, 0.0, 1.0);
            assert!((0.0..=1.0).contains(&x));
        }
    }

    #[test]
    fn test_uniform_degenerate_and_interpolation() {
        let mut source = SequenceSource::constant(0.25);
        assert_eq!(sample_uniform(&mut source, 4.0, 8.0), 5.0);
        assert_eq!(sample_uniform(&mut source, 3.0, 3.0), 3.0);
        assert_eq!(sample_uniform(&mut source, 5.0, 1.0), 5.0);
    }

    #[test]
    fn test_pert_degenerate() {
        let mut rng = RiskRng::from_seed(9);
        assert_eq!(sample_pert(&mut rng, 2.0, 2.0, 2.0, 4.0), 2.0);
    }

    #[test]
    fn test_box_muller_known_value() {
        // u1 = 1 - 0.0 = 1 => radius 0
        let mut source = SequenceSource::new(vec![0.0, 0.3]);
        assert_eq!(sample_standard_normal(&mut source), 0.0);
    }

    #[test]
    fn test_normal_moments() {
        let mut rng = RiskRng::from_seed(42);
        let n = 200_000;
        let draws: Vec<f64> = (0..n).map(|_| sample_normal(&mut rng, 3.0, 2.0)).collect();
        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        assert_relative_eq!(mean, 3.0, epsilon = 0.02);
        assert_relative_eq!(var, 4.0, epsilon = 0.05);
    }

    #[test]
    fn test_gamma_mean_large_and_small_shape() {
        let mut rng = RiskRng::from_seed(11);
        let mean = sample_mean(100_000, || sample_gamma(&mut rng, 3.0, 2.0));
        assert_relative_eq!(mean, 6.0, max_relative = 0.02);

        let mut rng = RiskRng::from_seed(12);
        let mean = sample_mean(100_000, || sample_gamma(&mut rng, 0.4, 5.0));
        assert_relative_eq!(mean, 2.0, max_relative = 0.03);
    }

    #[test]
    fn test_gamma_is_positive() {
        let mut rng = RiskRng::from_seed(13);
        for _ in 0..10_000 {
            assert!(sample_gamma(&mut rng, 0.2, 1.0) >= 0.0);
        }
    }

    #[test]
    fn test_beta_within_unit_interval() {
        let mut rng = RiskRng::from_seed(5);
        for _ in 0..10_000 {
            let x = sample_beta(&mut rng, 0.5, 0.5);
            assert!((0.0..=1.0).contains(&x));
        }
        let mut rng = RiskRng::from_seed(6);
        let mean = sample_mean(50_000, || sample_beta(&mut rng, 2.0, 6.0));
        assert_relative_eq!(mean, 0.25, epsilon = 0.005);
    }

    #[test]
    fn test_exponential_inverse_cdf() {
        // u = 1 - e^-1 gives x = 1 / λ
        let u = 1.0 - (-1.0_f64).exp();
        let mut source = SequenceSource::constant(u);
        assert_relative_eq!(sample_exponential(&mut source, 4.0), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_pareto_lower_bound() {
        let mut rng = RiskRng::from_seed(21);
        for _ in 0..10_000 {
            assert!(sample_pareto(&mut rng, 50.0, 2.0) >= 50.0);
        }
        let mut source = SequenceSource::constant(0.0);
        assert_eq!(sample_pareto(&mut source, 50.0, 2.0), 50.0);
    }

    #[test]
    fn test_weibull_reduces_to_exponential() {
        let u = 1.0 - (-1.0_f64).exp();
        let mut source = SequenceSource::constant(u);
        assert_relative_eq!(sample_weibull(&mut source, 1.0, 3.0), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lognormal_positive() {
        let mut rng = RiskRng::from_seed(17);
        for _ in 0..10_000 {
            assert!(sample_lognormal(&mut rng, 0.0, 1.5) > 0.0);
        }
    }
}
