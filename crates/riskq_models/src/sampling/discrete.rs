//! Discrete (count) samplers.
//!
//! Results are returned as `f64` so they plug straight into the aggregator's
//! frequency arithmetic.

use riskq_core::rng::UniformSource;

/// Largest rate handled by a single Knuth pass.
///
/// `exp(-500)` is still a normal `f64`; larger rates are split into chunks.
pub const KNUTH_MAX_LAMBDA: f64 = 500.0;

/// Poisson sample by Knuth's multiplicative algorithm.
///
/// Rates above [`KNUTH_MAX_LAMBDA`] are drawn as a sum of independent
/// Poisson chunks, which is exact since Poisson variates are additive.
/// Non-positive rates yield 0.
///
/// # Examples
/// ```
/// use riskq_core::rng::SequenceSource;
/// use riskq_models::sampling::discrete::sample_poisson;
///
/// // First uniform already below exp(-λ): zero events
/// let mut source = SequenceSource::constant(0.1);
/// assert_eq!(sample_poisson(&mut source, 1.0), 0.0);
/// ```
pub fn sample_poisson<U: UniformSource + ?Sized>(rng: &mut U, lambda: f64) -> f64 {
    if !(lambda > 0.0) || !lambda.is_finite() {
        return 0.0;
    }

    let mut remaining = lambda;
    let mut total = 0u64;
    while remaining > KNUTH_MAX_LAMBDA {
        total += knuth_poisson(rng, KNUTH_MAX_LAMBDA);
        remaining -= KNUTH_MAX_LAMBDA;
    }
    total += knuth_poisson(rng, remaining);
    total as f64
}

fn knuth_poisson<U: UniformSource + ?Sized>(rng: &mut U, lambda: f64) -> u64 {
    let threshold = (-lambda).exp();
    let mut product = 1.0;
    let mut count = 0u64;
    loop {
        product *= rng.next_uniform();
        if product <= threshold {
            return count;
        }
        count += 1;
    }
}

/// Negative binomial sample: Bernoulli failures counted until `r` successes.
///
/// Terminates with probability 1 for `p > 0`; expected work is `r / p`
/// trials. A non-positive `p` can never succeed and yields `+inf`.
pub fn sample_negative_binomial<U: UniformSource + ?Sized>(rng: &mut U, r: u32, p: f64) -> f64 {
    if !(p > 0.0) {
        return f64::INFINITY;
    }

    let mut successes = 0u32;
    let mut failures = 0u64;
    while successes < r {
        if rng.next_uniform() < p {
            successes += 1;
        } else {
            failures += 1;
        }
    }
    failures as f64
}

/// Binomial sample as the sum of `n` Bernoulli trials.
pub fn sample_binomial<U: UniformSource + ?Sized>(rng: &mut U, n: u32, p: f64) -> f64 {
    let mut successes = 0u32;
    for _ in 0..n {
        if rng.next_uniform() < p {
            successes += 1;
        }
    }
    successes as f64
}

/// Geometric sample: number of trials up to and including the first success.
///
/// The support starts at 1. A non-positive `p` yields `+inf`.
pub fn sample_geometric<U: UniformSource + ?Sized>(rng: &mut U, p: f64) -> f64 {
    if !(p > 0.0) {
        return f64::INFINITY;
    }

    let mut trials = 1u64;
    while rng.next_uniform() >= p {
        trials += 1;
    }
    trials as f64
}

/// Discrete uniform sample over the integers in [min, max].
///
/// `min + ⌊u · (max − min + 1)⌋`, clamped to `max`. Returns `min` when
/// `max <= min`.
pub fn sample_discrete_uniform<U: UniformSource + ?Sized>(rng: &mut U, min: i64, max: i64) -> f64 {
    if max <= min {
        return min as f64;
    }

    let span = (max as f64 - min as f64) + 1.0;
    let offset = (rng.next_uniform() * span).floor();
    (min as f64 + offset).min(max as f64)
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
    fn test_poisson_knuth_sequence() {
        // λ = ln 2 => threshold 0.5. Products: 0.9, 0.81, 0.405 -> two events
        let mut source = SequenceSource::new(vec![0.9, 0.9, 0.5]);
        assert_eq!(sample_poisson(&mut source, 2.0_f64.ln()), 2.0);
    }

    #[test]
    fn test_poisson_non_positive_rate() {
        let mut rng = RiskRng::from_seed(1);
        assert_eq!(sample_poisson(&mut rng, 0.0), 0.0);
        assert_eq!(sample_poisson(&mut rng, -2.0), 0.0);
        assert_eq!(sample_poisson(&mut rng, f64::NAN), 0.0);
    }

    #[test]
    fn test_poisson_mean_small_and_chunked() {
        let mut rng = RiskRng::from_seed(2);
        let mean = sample_mean(100_000, || sample_poisson(&mut rng, 3.5));
        assert_relative_eq!(mean, 3.5, epsilon = 0.03);

        let mut rng = RiskRng::from_seed(3);
        let mean = sample_mean(2_000, || sample_poisson(&mut rng, 1_200.0));
        assert_relative_eq!(mean, 1_200.0, max_relative = 0.01);
    }

    #[test]
    fn test_negative_binomial_mean() {
        let mut rng = RiskRng::from_seed(4);
        let mean = sample_mean(50_000, || sample_negative_binomial(&mut rng, 3, 0.4));
        // r(1-p)/p = 4.5
        assert_relative_eq!(mean, 4.5, epsilon = 0.08);
    }

    #[test]
    fn test_negative_binomial_certain_success() {
        let mut rng = RiskRng::from_seed(4);
        assert_eq!(sample_negative_binomial(&mut rng, 5, 1.0), 0.0);
        assert!(sample_negative_binomial(&mut rng, 5, 0.0).is_infinite());
    }

    #[test]
    fn test_binomial_bounds_and_mean() {
        let mut rng = RiskRng::from_seed(5);
        for _ in 0..1_000 {
            let x = sample_binomial(&mut rng, 10, 0.3);
            assert!((0.0..=10.0).contains(&x));
            assert_eq!(x.fract(), 0.0);
        }
        let mean = sample_mean(50_000, || sample_binomial(&mut rng, 10, 0.3));
        assert_relative_eq!(mean, 3.0, epsilon = 0.03);
    }

    #[test]
    fn test_geometric_support_starts_at_one() {
        let mut source = SequenceSource::constant(0.0);
        assert_eq!(sample_geometric(&mut source, 0.5), 1.0);

        let mut rng = RiskRng::from_seed(6);
        let mean = sample_mean(50_000, || sample_geometric(&mut rng, 0.25));
        assert_relative_eq!(mean, 4.0, epsilon = 0.08);
    }

    #[test]
    fn test_discrete_uniform_covers_range() {
        let mut rng = RiskRng::from_seed(7);
        let mut seen = [false; 6];
        for _ in 0..10_000 {
            let x = sample_discrete_uniform(&mut rng, 1, 6);
            assert!((1.0..=6.0).contains(&x));
            seen[(x as usize) - 1] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_discrete_uniform_degenerate() {
        let mut source = SequenceSource::constant(0.99);
        assert_eq!(sample_discrete_uniform(&mut source, 4, 4), 4.0);
        assert_eq!(sample_discrete_uniform(&mut source, 4, 2), 4.0);
        assert_eq!(sample_discrete_uniform(&mut source, 0, 1), 1.0);
    }
}
