//! Closed-form special functions.
//!
//! This module provides:
//! - `erf` / `erfc`: error function (Abramowitz and Stegun 7.1.26)
//! - `norm_cdf` / `norm_pdf`: standard normal CDF and density
//! - `ln_gamma`: log-gamma via the Lanczos series
//! - `regularized_incomplete_beta`: I_x(a, b) via a continued fraction
//! - `regularized_lower_gamma`: P(a, x) via series / continued fraction
//!
//! These feed analytic chart curves and domain bounds only. Value-at-Risk and
//! expected loss always come from Monte Carlo sampling.

use num_traits::Float;
use std::f64::consts::PI;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Convergence tolerance for continued fractions and series.
const EPS: f64 = 1e-14;

/// Guard against division by zero in the modified Lentz algorithm.
const FPMIN: f64 = 1e-300;

/// Iteration cap for continued fractions and series.
const MAX_ITER: usize = 300;

/// Lanczos coefficients (g = 7, n = 9).
const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

#[inline]
fn lit<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Complementary error function.
///
/// Abramowitz and Stegun formula 7.1.26, maximum absolute error 1.5e-7.
/// Negative arguments use erfc(-x) = 2 - erfc(x).
#[inline]
pub fn erfc<T: Float>(x: T) -> T {
    let one = T::one();
    let abs_x = x.abs();

    let a1 = lit::<T>(0.254_829_592);
    let a2 = lit::<T>(-0.284_496_736);
    let a3 = lit::<T>(1.421_413_741);
    let a4 = lit::<T>(-1.453_152_027);
    let a5 = lit::<T>(1.061_405_429);
    let p = lit::<T>(0.327_591_1);

    let t = one / (one + p * abs_x);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    if x < T::zero() {
        lit::<T>(2.0) - erfc_abs
    } else {
        erfc_abs
    }
}

/// Error function, `1 - erfc(x)`.
///
/// # Examples
/// ```
/// use riskq_core::math::special::erf;
///
/// assert!((erf(1.0_f64) - 0.842_700_792_9).abs() < 2e-7);
/// assert!((erf(-1.0_f64) + 0.842_700_792_9).abs() < 2e-7);
/// ```
#[inline]
pub fn erf<T: Float>(x: T) -> T {
    T::one() - erfc(x)
}

/// Standard normal cumulative distribution function.
///
/// Φ(x) = erfc(-x / sqrt(2)) / 2, accurate to about 1e-7.
///
/// # Examples
/// ```
/// use riskq_core::math::special::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(3.0_f64) > 0.998);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let sqrt_2 = lit::<T>(std::f64::consts::SQRT_2);
    lit::<T>(0.5) * erfc(-x / sqrt_2)
}

/// Standard normal probability density function.
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    lit::<T>(FRAC_1_SQRT_2PI) * (lit::<T>(-0.5) * x * x).exp()
}

/// Natural logarithm of the gamma function for `x > 0`.
///
/// Lanczos approximation (g = 7) with the reflection formula below 0.5.
/// Returns `+inf` for non-positive input.
///
/// # Examples
/// ```
/// use riskq_core::math::special::ln_gamma;
///
/// // Γ(5) = 4! = 24
/// assert!((ln_gamma(5.0) - 24.0_f64.ln()).abs() < 1e-12);
/// ```
pub fn ln_gamma(x: f64) -> f64 {
    if x <= 0.0 || x.is_nan() {
        return f64::INFINITY;
    }

    if x < 0.5 {
        // Γ(x) Γ(1-x) = π / sin(πx)
        return PI.ln() - (PI * x).sin().ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut a = LANCZOS_COEFFS[0];
    for (i, &c) in LANCZOS_COEFFS.iter().enumerate().skip(1) {
        a += c / (x + i as f64);
    }
    let t = x + LANCZOS_G + 0.5;
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + a.ln()
}

/// Natural logarithm of the beta function B(a, b).
#[inline]
pub fn ln_beta(a: f64, b: f64) -> f64 {
    ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)
}

/// Regularised incomplete beta function I_x(a, b).
///
/// Evaluated with the modified Lentz continued fraction. When
/// `x >= (a + 1) / (a + b + 2)` the symmetry I_x(a, b) = 1 - I_{1-x}(b, a)
/// is used so the fraction converges quickly.
///
/// # Examples
/// ```
/// use riskq_core::math::special::regularized_incomplete_beta;
///
/// // I_x(1, 1) is the uniform CDF
/// assert!((regularized_incomplete_beta(1.0, 1.0, 0.3) - 0.3).abs() < 1e-12);
/// ```
pub fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let front = (a * x.ln() + b * (1.0 - x).ln() - ln_beta(a, b)).exp();

    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = lentz_guard(1.0 - qab * x / qap).recip();
    let mut h = d;

    for m in 1..=MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        // Even step
        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = lentz_guard(1.0 + aa * d).recip();
        c = lentz_guard(1.0 + aa / c);
        h *= d * c;

        // Odd step
        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = lentz_guard(1.0 + aa * d).recip();
        c = lentz_guard(1.0 + aa / c);
        let del = d * c;
        h *= del;

        if (del - 1.0).abs() < EPS {
            break;
        }
    }

    h
}

/// Regularised lower incomplete gamma function P(a, x).
///
/// Series expansion for `x < a + 1`, continued fraction for the upper
/// function otherwise. Used for gamma and Poisson CDFs.
///
/// # Examples
/// ```
/// use riskq_core::math::special::regularized_lower_gamma;
///
/// // P(1, x) = 1 - exp(-x)
/// assert!((regularized_lower_gamma(1.0, 2.0) - (1.0 - (-2.0_f64).exp())).abs() < 1e-12);
/// ```
pub fn regularized_lower_gamma(a: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x.is_infinite() {
        return 1.0;
    }

    let log_prefactor = -x + a * x.ln() - ln_gamma(a);

    if x < a + 1.0 {
        let mut ap = a;
        let mut del = 1.0 / a;
        let mut sum = del;
        for _ in 0..MAX_ITER {
            ap += 1.0;
            del *= x / ap;
            sum += del;
            if del.abs() < sum.abs() * EPS {
                break;
            }
        }
        (sum * log_prefactor.exp()).clamp(0.0, 1.0)
    } else {
        let mut b = x + 1.0 - a;
        let mut c = 1.0 / FPMIN;
        let mut d = 1.0 / b;
        let mut h = d;
        for i in 1..=MAX_ITER {
            let i = i as f64;
            let an = -i * (i - a);
            b += 2.0;
            d = lentz_guard(an * d + b).recip();
            c = lentz_guard(b + an / c);
            let del = d * c;
            h *= del;
            if (del - 1.0).abs() < EPS {
                break;
            }
        }
        (1.0 - log_prefactor.exp() * h).clamp(0.0, 1.0)
    }
}

#[inline]
fn lentz_guard(value: f64) -> f64 {
    if value.abs() < FPMIN {
        FPMIN
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==========================================================
    // erf / normal tests
    // ==========================================================

    #[test]
    fn test_erf_reference_values() {
        assert_relative_eq!(erf(0.0_f64), 0.0, epsilon = 1e-7);
        assert_relative_eq!(erf(0.5_f64), 0.520_499_877_8, epsilon = 2e-7);
        assert_relative_eq!(erf(2.0_f64), 0.995_322_265_0, epsilon = 2e-7);
    }

    #[test]
    fn test_erf_odd_symmetry() {
        for x in [0.1, 0.7, 1.3, 2.9] {
            assert_relative_eq!(erf(-x), -erf(x), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(1.0_f64), 0.841_344_746_068_542_9, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-2.0_f64), 0.022_750_131_948_179_195, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(2.326_347_874_0_f64), 0.99, epsilon = 1e-6);
    }

    #[test]
    fn test_norm_pdf_reference_values() {
        assert_relative_eq!(norm_pdf(0.0_f64), 0.398_942_280_4, epsilon = 1e-9);
        assert_relative_eq!(norm_pdf(1.0_f64), 0.241_970_724_5, epsilon = 1e-9);
    }

    #[test]
    fn test_norm_cdf_f32() {
        let value = norm_cdf(0.0_f32);
        assert!((value - 0.5).abs() < 1e-6);
    }

    // ==========================================================
    // ln_gamma tests
    // ==========================================================

    #[test]
    fn test_ln_gamma_factorials() {
        assert_relative_eq!(ln_gamma(1.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(ln_gamma(2.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(ln_gamma(10.0), 362_880.0_f64.ln(), epsilon = 1e-10);
    }

    #[test]
    fn test_ln_gamma_half() {
        assert_relative_eq!(ln_gamma(0.5), PI.sqrt().ln(), epsilon = 1e-12);
        // Reflection branch
        assert_relative_eq!(ln_gamma(0.25), 1.288_022_524_698_077_5, epsilon = 1e-10);
    }

    #[test]
    fn test_ln_gamma_non_positive() {
        assert!(ln_gamma(0.0).is_infinite());
        assert!(ln_gamma(-2.0).is_infinite());
    }

    // ==========================================================
    // incomplete beta tests
    // ==========================================================

    #[test]
    fn test_incomplete_beta_bounds() {
        assert_eq!(regularized_incomplete_beta(2.0, 3.0, 0.0), 0.0);
        assert_eq!(regularized_incomplete_beta(2.0, 3.0, 1.0), 1.0);
        assert_eq!(regularized_incomplete_beta(2.0, 3.0, -0.5), 0.0);
    }

    #[test]
    fn test_incomplete_beta_closed_form() {
        // I_x(1, b) = 1 - (1 - x)^b
        for x in [0.05, 0.3, 0.6, 0.95] {
            let expected = 1.0 - (1.0 - x).powf(4.0);
            assert_relative_eq!(
                regularized_incomplete_beta(1.0, 4.0, x),
                expected,
                epsilon = 1e-10
            );
        }
    }

    #[test]
    fn test_incomplete_beta_symmetry() {
        for x in [0.1, 0.4, 0.5, 0.8] {
            let lhs = regularized_incomplete_beta(2.5, 7.0, x);
            let rhs = 1.0 - regularized_incomplete_beta(7.0, 2.5, 1.0 - x);
            assert_relative_eq!(lhs, rhs, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_incomplete_beta_at_swap_threshold() {
        // x exactly at (a+1)/(a+b+2) must not recurse
        let a = 2.0;
        let b = 2.0;
        let x = (a + 1.0) / (a + b + 2.0);
        assert_relative_eq!(regularized_incomplete_beta(a, b, x), 0.5, epsilon = 1e-10);
        assert_relative_eq!(regularized_incomplete_beta(a, b, 0.5), 0.5, epsilon = 1e-10);
    }

    // ==========================================================
    // incomplete gamma tests
    // ==========================================================

    #[test]
    fn test_lower_gamma_closed_form() {
        for x in [0.1, 1.0, 2.5, 8.0, 20.0] {
            let expected = 1.0 - (-x).exp() * (1.0 + x);
            assert_relative_eq!(regularized_lower_gamma(2.0, x), expected, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_lower_gamma_limits() {
        assert_eq!(regularized_lower_gamma(3.0, 0.0), 0.0);
        assert_eq!(regularized_lower_gamma(3.0, f64::INFINITY), 1.0);
        assert!(regularized_lower_gamma(3.0, 100.0) > 0.999_999);
    }
}
