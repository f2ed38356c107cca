//! Distribution samplers.
//!
//! Free functions per family live in [`continuous`] and [`discrete`];
//! [`SampleDistribution`] dispatches a [`DistributionSpec`] to the right one.
//!
//! Every sampler draws from an injected [`UniformSource`], so a seeded
//! [`RiskRng`](riskq_core::rng::RiskRng) reproduces the same sequence.

pub mod continuous;
pub mod discrete;

use riskq_core::rng::UniformSource;
use riskq_core::types::DistributionSpec;

/// Types that produce scalar samples from a uniform source.
pub trait SampleDistribution {
    /// Draws one sample.
    fn sample<U: UniformSource + ?Sized>(&self, rng: &mut U) -> f64;

    /// Fills `out` with independent samples.
    fn sample_into<U: UniformSource + ?Sized>(&self, rng: &mut U, out: &mut [f64]) {
        for slot in out.iter_mut() {
            *slot = self.sample(rng);
        }
    }
}

impl SampleDistribution for DistributionSpec {
    fn sample<U: UniformSource + ?Sized>(&self, rng: &mut U) -> f64 {
        match *self {
            DistributionSpec::Triangular { min, mode, max } => {
                continuous::sample_triangular(rng, min, mode, max)
            }
            DistributionSpec::Pert {
                min,
                mode,
                max,
                gamma,
            } => continuous::sample_pert(rng, min, mode, max, gamma),
            DistributionSpec::Normal { mean, std_dev } => {
                continuous::sample_normal(rng, mean, std_dev)
            }
            DistributionSpec::Lognormal { mean, std_dev } => {
                continuous::sample_lognormal(rng, mean, std_dev)
            }
            DistributionSpec::Uniform { min, max } => continuous::sample_uniform(rng, min, max),
            DistributionSpec::Beta { alpha, beta } => continuous::sample_beta(rng, alpha, beta),
            DistributionSpec::Poisson { lambda } => discrete::sample_poisson(rng, lambda),
            DistributionSpec::Exponential { lambda } => continuous::sample_exponential(rng, lambda),
            DistributionSpec::Gamma { shape, scale } => continuous::sample_gamma(rng, shape, scale),
            DistributionSpec::Pareto { x_min, alpha } => {
                continuous::sample_pareto(rng, x_min, alpha)
            }
            DistributionSpec::Weibull { k, lambda } => continuous::sample_weibull(rng, k, lambda),
            DistributionSpec::NegativeBinomial { r, p } => {
                discrete::sample_negative_binomial(rng, r, p)
            }
            DistributionSpec::Binomial { n, p } => discrete::sample_binomial(rng, n, p),
            DistributionSpec::Geometric { p } => discrete::sample_geometric(rng, p),
            DistributionSpec::DiscreteUniform { min, max } => {
                discrete::sample_discrete_uniform(rng, min, max)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use riskq_core::rng::RiskRng;
    use riskq_core::types::{DistributionKind, RawParams};

    #[test]
    fn test_every_family_samples_finite() {
        let mut rng = RiskRng::from_seed(42);
        for kind in DistributionKind::ALL {
            let spec = kind.build(&RawParams::default());
            for _ in 0..200 {
                let x = spec.sample(&mut rng);
                assert!(x.is_finite(), "{} produced {}", kind, x);
            }
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let spec = DistributionSpec::Pert {
            min: 10.0,
            mode: 40.0,
            max: 100.0,
            gamma: 4.0,
        };
        let mut a = vec![0.0; 64];
        let mut b = vec![0.0; 64];
        spec.sample_into(&mut RiskRng::from_seed(7), &mut a);
        spec.sample_into(&mut RiskRng::from_seed(7), &mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_through_trait_object_source() {
        let spec = DistributionSpec::Uniform { min: 0.0, max: 1.0 };
        let mut rng = RiskRng::from_seed(3);
        let source: &mut dyn UniformSource = &mut rng;
        let x = spec.sample(source);
        assert!((0.0..=1.0).contains(&x));
    }

    // ========================================
    // Bound properties
    // ========================================

    proptest! {
        #[test]
        fn prop_triangular_within_bounds(
            min in 0.0..1_000.0f64,
            width in 0.0..1_000.0f64,
            mode_frac in 0.0..=1.0f64,
            seed in any::<u64>(),
        ) {
            let max = min + width;
            let mode = min + mode_frac * width;
            let spec = DistributionSpec::Triangular { min, mode, max };
            let mut rng = RiskRng::from_seed(seed);
            for _ in 0..100 {
                let x = spec.sample(&mut rng);
                prop_assert!(x >= min && x <= max, "{} outside [{}, {}]", x, min, max);
            }
        }

        #[test]
        fn prop_uniform_within_bounds(
            min in -1_000.0..1_000.0f64,
            width in 0.0..1_000.0f64,
            seed in any::<u64>(),
        ) {
            let max = min + width;
            let spec = DistributionSpec::Uniform { min, max };
            let mut rng = RiskRng::from_seed(seed);
            for _ in 0..100 {
                let x = spec.sample(&mut rng);
                prop_assert!(x >= min && x <= max);
            }
        }

        #[test]
        fn prop_degenerate_bounded_returns_constant(value in 0.0..1e6f64, seed in any::<u64>()) {
            let mut rng = RiskRng::from_seed(seed);
            let tri = DistributionSpec::Triangular { min: value, mode: value, max: value };
            let uni = DistributionSpec::Uniform { min: value, max: value };
            prop_assert_eq!(tri.sample(&mut rng), value);
            prop_assert_eq!(uni.sample(&mut rng), value);
        }
    }
}
