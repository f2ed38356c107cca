//! Parameter sanitising builder.
//!
//! Turns raw, possibly missing or nonsensical numeric input into a valid
//! [`DistributionSpec`]. The builder never fails: every input maps to some
//! spec satisfying [`DistributionSpec::validate`], which keeps the aggregator
//! and grid builder free of defensive branching.
//!
//! # Sanitising rules
//!
//! | Rule | Applies to |
//! |------|------------|
//! | NaN / infinite treated as missing | all fields |
//! | min clamped to >= 0 | triangular, pert, uniform, discrete uniform |
//! | max forced above min by [`MIN_RANGE_EPSILON`] (scaled), or +1 for integers | bounded families |
//! | mode clamped into [min, max], default midpoint | triangular, pert |
//! | missing scale/shape/rate -> family default | all |
//! | non-positive scale/shape/rate -> [`POSITIVE_FLOOR`] | all |
//! | probability clamped into [[`PROBABILITY_FLOOR`], 1] | binomial, negative binomial, geometric |
//! | counts rounded, at least 1 | binomial n, negative binomial r |
//!
//! # Family defaults
//!
//! | Family | Defaults |
//! |--------|----------|
//! | triangular | min 0, max min+1, mode midpoint |
//! | pert | as triangular, gamma 4 |
//! | normal / lognormal | mean 0, std_dev 1 |
//! | uniform | min 0, max min+1 |
//! | beta | alpha 2, beta 2 |
//! | poisson / exponential | lambda 1 |
//! | gamma | shape 2, scale 1 |
//! | pareto | x_min 1, alpha 3 |
//! | weibull | k 1.5, lambda 1 |
//! | negative binomial | r 1, p 0.5 |
//! | binomial | n 10, p 0.5 |
//! | geometric | p 0.5 |
//! | discrete uniform | min 0, max 10 |
//!
//! An unrecognised type tag falls back to [`DEFAULT_FALLBACK_SPEC`].

use serde::{Deserialize, Serialize};

use super::distribution::{DistributionKind, DistributionSpec, DEFAULT_PERT_GAMMA};

/// Smallest relative width enforced between min and max.
pub const MIN_RANGE_EPSILON: f64 = 1e-9;

/// Replacement for non-positive scale, shape and rate parameters.
pub const POSITIVE_FLOOR: f64 = 1e-6;

/// Smallest probability accepted for Bernoulli-based families.
pub const PROBABILITY_FLOOR: f64 = 1e-6;

/// Spec used when the distribution type is not recognised.
pub const DEFAULT_FALLBACK_SPEC: DistributionSpec = DistributionSpec::Triangular {
    min: 0.0,
    mode: 0.5,
    max: 1.0,
};

/// Raw numeric fields as captured from a form or scenario file.
///
/// Every field is optional; which ones are read depends on the
/// distribution type passed to [`build_distribution`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawParams {
    /// Lower bound
    pub min: Option<f64>,
    /// Most likely value
    pub mode: Option<f64>,
    /// Upper bound
    pub max: Option<f64>,
    /// Mean (log-space for lognormal)
    #[serde(alias = "mu")]
    pub mean: Option<f64>,
    /// Standard deviation (log-space for lognormal)
    #[serde(alias = "std_dev", alias = "sigma")]
    pub std_dev: Option<f64>,
    /// Shape / tail index
    pub alpha: Option<f64>,
    /// Second beta shape
    pub beta: Option<f64>,
    /// Rate or scale, depending on the family
    #[serde(alias = "rate")]
    pub lambda: Option<f64>,
    /// Gamma shape
    pub shape: Option<f64>,
    /// Gamma scale
    pub scale: Option<f64>,
    /// Pareto scale
    #[serde(alias = "x_min")]
    pub x_min: Option<f64>,
    /// Weibull shape
    pub k: Option<f64>,
    /// Negative binomial success count
    pub r: Option<f64>,
    /// Binomial trial count
    pub n: Option<f64>,
    /// Success probability
    pub p: Option<f64>,
    /// PERT mode weight
    pub gamma: Option<f64>,
}

/// Builds a valid spec from a type tag and raw parameters.
///
/// Unknown tags fall back to [`DEFAULT_FALLBACK_SPEC`] with a warning.
///
/// # Examples
/// ```
/// use riskq_core::types::{build_distribution, DistributionSpec, RawParams, POSITIVE_FLOOR};
///
/// let raw = RawParams { shape: Some(-3.0), ..RawParams::default() };
/// let spec = build_distribution("gamma", &raw);
/// assert_eq!(spec, DistributionSpec::Gamma { shape: POSITIVE_FLOOR, scale: 1.0 });
///
/// let fallback = build_distribution("no-such-thing", &RawParams::default());
/// assert_eq!(fallback, riskq_core::types::DEFAULT_FALLBACK_SPEC);
/// ```
pub fn build_distribution(kind: &str, raw: &RawParams) -> DistributionSpec {
    match kind.parse::<DistributionKind>() {
        Ok(kind) => kind.build(raw),
        Err(err) => {
            tracing::warn!(%err, "falling back to default triangular distribution");
            DEFAULT_FALLBACK_SPEC
        }
    }
}

impl DistributionKind {
    /// Builds a valid spec of this family from raw parameters.
    pub fn build(&self, raw: &RawParams) -> DistributionSpec {
        match self {
            Self::Triangular => {
                let (min, mode, max) = sanitise_bounds(raw, 1.0);
                DistributionSpec::Triangular { min, mode, max }
            }
            Self::Pert => {
                let (min, mode, max) = sanitise_bounds(raw, 1.0);
                DistributionSpec::Pert {
                    min,
                    mode,
                    max,
                    gamma: positive_or(raw.gamma, DEFAULT_PERT_GAMMA),
                }
            }
            Self::Normal => DistributionSpec::Normal {
                mean: finite(raw.mean).unwrap_or(0.0),
                std_dev: positive_or(raw.std_dev, 1.0),
            },
            Self::Lognormal => DistributionSpec::Lognormal {
                mean: finite(raw.mean).unwrap_or(0.0),
                std_dev: positive_or(raw.std_dev, 1.0),
            },
            Self::Uniform => {
                let (min, _, max) = sanitise_bounds(raw, 1.0);
                DistributionSpec::Uniform { min, max }
            }
            Self::Beta => DistributionSpec::Beta {
                alpha: positive_or(raw.alpha, 2.0),
                beta: positive_or(raw.beta, 2.0),
            },
            Self::Poisson => DistributionSpec::Poisson {
                lambda: positive_or(raw.lambda, 1.0),
            },
            Self::Exponential => DistributionSpec::Exponential {
                lambda: positive_or(raw.lambda, 1.0),
            },
            Self::Gamma => DistributionSpec::Gamma {
                shape: positive_or(raw.shape, 2.0),
                scale: positive_or(raw.scale, 1.0),
            },
            Self::Pareto => DistributionSpec::Pareto {
                x_min: positive_or(raw.x_min, 1.0),
                alpha: positive_or(raw.alpha, 3.0),
            },
            Self::Weibull => DistributionSpec::Weibull {
                k: positive_or(raw.k, 1.5),
                lambda: positive_or(raw.lambda, 1.0),
            },
            Self::NegativeBinomial => DistributionSpec::NegativeBinomial {
                r: count_or(raw.r, 1),
                p: probability_or(raw.p, 0.5),
            },
            Self::Binomial => DistributionSpec::Binomial {
                n: count_or(raw.n, 10),
                p: probability_or(raw.p, 0.5),
            },
            Self::Geometric => DistributionSpec::Geometric {
                p: probability_or(raw.p, 0.5),
            },
            Self::DiscreteUniform => {
                let min = finite(raw.min).unwrap_or(0.0).round().max(0.0);
                let max = finite(raw.max).unwrap_or(min + 10.0).round();
                let min = to_i64(min);
                let max = to_i64(max).max(min.saturating_add(1));
                DistributionSpec::DiscreteUniform { min, max }
            }
        }
    }
}

#[inline]
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn positive_or(value: Option<f64>, default: f64) -> f64 {
    match finite(value) {
        Some(v) if v > 0.0 => v,
        Some(_) => POSITIVE_FLOOR,
        None => default,
    }
}

fn probability_or(value: Option<f64>, default: f64) -> f64 {
    finite(value)
        .unwrap_or(default)
        .clamp(PROBABILITY_FLOOR, 1.0)
}

fn count_or(value: Option<f64>, default: u32) -> u32 {
    match finite(value) {
        Some(v) => v.round().clamp(1.0, u32::MAX as f64) as u32,
        None => default,
    }
}

fn to_i64(value: f64) -> i64 {
    value.clamp(i64::MIN as f64, i64::MAX as f64) as i64
}

/// Returns sanitised `(min, mode, max)`.
fn sanitise_bounds(raw: &RawParams, default_span: f64) -> (f64, f64, f64) {
    let min = finite(raw.min).unwrap_or(0.0).max(0.0);
    let mut max = finite(raw.max).unwrap_or(min + default_span);

    let epsilon = MIN_RANGE_EPSILON * min.abs().max(1.0);
    if max - min < epsilon {
        max = min + epsilon;
    }

    let mode = finite(raw.mode)
        .unwrap_or(0.5 * (min + max))
        .clamp(min, max);

    (min, mode, max)
}
