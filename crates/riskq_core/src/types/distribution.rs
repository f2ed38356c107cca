//! Distribution specifications.
//!
//! [`DistributionSpec`] is a closed sum type over every supported family.
//! Each variant carries only the parameters the family needs, so consumers
//! dispatch with an exhaustive `match` and there is no silent
//! "unsupported type" path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ParameterError;

/// Default PERT shape weight applied to the mode.
pub const DEFAULT_PERT_GAMMA: f64 = 4.0;

fn default_pert_gamma() -> f64 {
    DEFAULT_PERT_GAMMA
}

/// A fully specified probability distribution.
///
/// Serialises as an internally tagged object, e.g.
/// `{"type": "triangular", "min": 1.0, "mode": 2.0, "max": 5.0}`.
///
/// # Invariants
///
/// - `min <= mode <= max` where applicable
/// - scale, shape and rate parameters strictly positive
/// - probabilities in (0, 1]
/// - counts are positive integers
///
/// Specs produced by [`build_distribution`](super::build_distribution)
/// always satisfy these; hand-built specs can be checked with
/// [`DistributionSpec::validate`].
///
/// # Examples
/// ```
/// use riskq_core::types::{DistributionKind, DistributionSpec};
///
/// let spec = DistributionSpec::Gamma { shape: 2.0, scale: 1.5 };
/// assert_eq!(spec.kind(), DistributionKind::Gamma);
/// assert!(spec.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DistributionSpec {
    /// Triangular distribution on [min, max] peaking at mode.
    Triangular {
        /// Lower bound
        min: f64,
        /// Most likely value
        mode: f64,
        /// Upper bound
        max: f64,
    },
    /// PERT (modified beta) distribution.
    Pert {
        /// Lower bound
        min: f64,
        /// Most likely value
        mode: f64,
        /// Upper bound
        max: f64,
        /// Weight of the mode (4 for classic PERT)
        #[serde(default = "default_pert_gamma")]
        gamma: f64,
    },
    /// Normal distribution.
    Normal {
        /// Mean
        mean: f64,
        /// Standard deviation
        std_dev: f64,
    },
    /// Lognormal distribution parameterised in log space.
    Lognormal {
        /// Mean of the underlying normal (μ)
        mean: f64,
        /// Standard deviation of the underlying normal (σ)
        std_dev: f64,
    },
    /// Continuous uniform distribution on [min, max].
    Uniform {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },
    /// Beta distribution on [0, 1].
    Beta {
        /// First shape parameter
        alpha: f64,
        /// Second shape parameter
        beta: f64,
    },
    /// Poisson count distribution.
    Poisson {
        /// Mean occurrence rate
        lambda: f64,
    },
    /// Exponential distribution.
    Exponential {
        /// Rate
        lambda: f64,
    },
    /// Gamma distribution (shape/scale parameterisation).
    Gamma {
        /// Shape (k)
        shape: f64,
        /// Scale (θ)
        scale: f64,
    },
    /// Pareto (type I) distribution.
    Pareto {
        /// Scale, the smallest attainable value
        x_min: f64,
        /// Tail index
        alpha: f64,
    },
    /// Weibull distribution.
    Weibull {
        /// Shape
        k: f64,
        /// Scale
        lambda: f64,
    },
    /// Number of failures before `r` successes.
    NegativeBinomial {
        /// Required successes
        r: u32,
        /// Success probability per trial
        p: f64,
    },
    /// Number of successes in `n` trials.
    Binomial {
        /// Trial count
        n: u32,
        /// Success probability per trial
        p: f64,
    },
    /// Number of trials up to and including the first success.
    Geometric {
        /// Success probability per trial
        p: f64,
    },
    /// Uniform over the integers in [min, max].
    DiscreteUniform {
        /// Smallest value
        min: i64,
        /// Largest value
        max: i64,
    },
}

impl Default for DistributionSpec {
    fn default() -> Self {
        super::params::DEFAULT_FALLBACK_SPEC
    }
}

impl DistributionSpec {
    /// Returns the family tag of this spec.
    pub fn kind(&self) -> DistributionKind {
        match self {
            Self::Triangular { .. } => DistributionKind::Triangular,
            Self::Pert { .. } => DistributionKind::Pert,
            Self::Normal { .. } => DistributionKind::Normal,
            Self::Lognormal { .. } => DistributionKind::Lognormal,
            Self::Uniform { .. } => DistributionKind::Uniform,
            Self::Beta { .. } => DistributionKind::Beta,
            Self::Poisson { .. } => DistributionKind::Poisson,
            Self::Exponential { .. } => DistributionKind::Exponential,
            Self::Gamma { .. } => DistributionKind::Gamma,
            Self::Pareto { .. } => DistributionKind::Pareto,
            Self::Weibull { .. } => DistributionKind::Weibull,
            Self::NegativeBinomial { .. } => DistributionKind::NegativeBinomial,
            Self::Binomial { .. } => DistributionKind::Binomial,
            Self::Geometric { .. } => DistributionKind::Geometric,
            Self::DiscreteUniform { .. } => DistributionKind::DiscreteUniform,
        }
    }

    /// Returns `true` for integer-valued families.
    #[inline]
    pub fn is_discrete(&self) -> bool {
        self.kind().is_discrete()
    }

    /// Checks the spec invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParameterError`] found, naming the offending field.
    pub fn validate(&self) -> Result<(), ParameterError> {
        match *self {
            Self::Triangular { min, mode, max } => check_bounds(min, mode, max),
            Self::Pert {
                min,
                mode,
                max,
                gamma,
            } => {
                check_bounds(min, mode, max)?;
                check_positive("gamma", gamma)
            }
            Self::Normal { mean, std_dev } | Self::Lognormal { mean, std_dev } => {
                check_finite("mean", mean)?;
                check_positive("std_dev", std_dev)
            }
            Self::Uniform { min, max } => check_bounds(min, min, max),
            Self::Beta { alpha, beta } => {
                check_positive("alpha", alpha)?;
                check_positive("beta", beta)
            }
            Self::Poisson { lambda } | Self::Exponential { lambda } => {
                check_positive("lambda", lambda)
            }
            Self::Gamma { shape, scale } => {
                check_positive("shape", shape)?;
                check_positive("scale", scale)
            }
            Self::Pareto { x_min, alpha } => {
                check_positive("x_min", x_min)?;
                check_positive("alpha", alpha)
            }
            Self::Weibull { k, lambda } => {
                check_positive("k", k)?;
                check_positive("lambda", lambda)
            }
            Self::NegativeBinomial { r, p } => {
                check_count("r", r)?;
                check_probability("p", p)
            }
            Self::Binomial { n, p } => {
                check_count("n", n)?;
                check_probability("p", p)
            }
            Self::Geometric { p } => check_probability("p", p),
            Self::DiscreteUniform { min, max } => {
                if min > max {
                    Err(ParameterError::BoundsOutOfOrder {
                        min: min as f64,
                        mode: min as f64,
                        max: max as f64,
                    })
                } else {
                    Ok(())
                }
            }
        }
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::NonFinite { name, value })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ParameterError> {
    check_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::NonPositive { name, value })
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ParameterError::InvalidProbability { name, value })
    }
}

fn check_count(name: &'static str, value: u32) -> Result<(), ParameterError> {
    if value == 0 {
        Err(ParameterError::ZeroCount { name })
    } else {
        Ok(())
    }
}

fn check_bounds(min: f64, mode: f64, max: f64) -> Result<(), ParameterError> {
    check_finite("min", min)?;
    check_finite("mode", mode)?;
    check_finite("max", max)?;
    if min <= mode && mode <= max {
        Ok(())
    } else {
        Err(ParameterError::BoundsOutOfOrder { min, mode, max })
    }
}

/// Distribution family tag.
///
/// Parsed leniently from form input: camelCase, kebab-case, snake_case and
/// a few common aliases are accepted, case-insensitively.
///
/// # Examples
/// ```
/// use riskq_core::types::DistributionKind;
///
/// assert_eq!("negative-binomial".parse(), Ok(DistributionKind::NegativeBinomial));
/// assert_eq!("LogNormal".parse(), Ok(DistributionKind::Lognormal));
/// assert!("cauchy".parse::<DistributionKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DistributionKind {
    /// Triangular
    Triangular,
    /// PERT
    Pert,
    /// Normal
    Normal,
    /// Lognormal
    Lognormal,
    /// Continuous uniform
    Uniform,
    /// Beta
    Beta,
    /// Poisson
    Poisson,
    /// Exponential
    Exponential,
    /// Gamma
    Gamma,
    /// Pareto
    Pareto,
    /// Weibull
    Weibull,
    /// Negative binomial
    NegativeBinomial,
    /// Binomial
    Binomial,
    /// Geometric
    Geometric,
    /// Discrete uniform
    DiscreteUniform,
}

impl DistributionKind {
    /// All supported families in declaration order.
    pub const ALL: [DistributionKind; 15] = [
        Self::Triangular,
        Self::Pert,
        Self::Normal,
        Self::Lognormal,
        Self::Uniform,
        Self::Beta,
        Self::Poisson,
        Self::Exponential,
        Self::Gamma,
        Self::Pareto,
        Self::Weibull,
        Self::NegativeBinomial,
        Self::Binomial,
        Self::Geometric,
        Self::DiscreteUniform,
    ];

    /// Canonical (camelCase) name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Triangular => "triangular",
            Self::Pert => "pert",
            Self::Normal => "normal",
            Self::Lognormal => "lognormal",
            Self::Uniform => "uniform",
            Self::Beta => "beta",
            Self::Poisson => "poisson",
            Self::Exponential => "exponential",
            Self::Gamma => "gamma",
            Self::Pareto => "pareto",
            Self::Weibull => "weibull",
            Self::NegativeBinomial => "negativeBinomial",
            Self::Binomial => "binomial",
            Self::Geometric => "geometric",
            Self::DiscreteUniform => "discreteUniform",
        }
    }

    /// Returns `true` for integer-valued families.
    pub fn is_discrete(&self) -> bool {
        matches!(
            self,
            Self::Poisson
                | Self::NegativeBinomial
                | Self::Binomial
                | Self::Geometric
                | Self::DiscreteUniform
        )
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a distribution tag is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDistribution(pub String);

impl fmt::Display for UnknownDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown distribution type: {}", self.0)
    }
}

impl std::error::Error for UnknownDistribution {}

impl FromStr for DistributionKind {
    type Err = UnknownDistribution;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalised.as_str() {
            "triangular" | "triangle" => Ok(Self::Triangular),
            "pert" | "betapert" => Ok(Self::Pert),
            "normal" | "gaussian" => Ok(Self::Normal),
            "lognormal" | "lognorm" => Ok(Self::Lognormal),
            "uniform" => Ok(Self::Uniform),
            "beta" => Ok(Self::Beta),
            "poisson" => Ok(Self::Poisson),
            "exponential" | "exp" => Ok(Self::Exponential),
            "gamma" => Ok(Self::Gamma),
            "pareto" => Ok(Self::Pareto),
            "weibull" => Ok(Self::Weibull),
            "negativebinomial" | "negbinomial" | "nbinom" => Ok(Self::NegativeBinomial),
            "binomial" => Ok(Self::Binomial),
            "geometric" => Ok(Self::Geometric),
            "discreteuniform" => Ok(Self::DiscreteUniform),
            _ => Err(UnknownDistribution(s.to_string())),
        }
    }
}
