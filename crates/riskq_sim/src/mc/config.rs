//! Simulation configuration.
//!
//! [`SimulationConfig`] is immutable once built; construct it through
//! [`SimulationConfig::builder`], which validates at `build()`.

use serde::Serialize;

use super::error::ConfigError;

/// Maximum number of annual trials allowed.
pub const MAX_ITERATIONS: usize = 10_000_000;

/// Default number of annual trials.
pub const DEFAULT_ITERATIONS: usize = 10_000;

/// Default Value-at-Risk confidence level.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Loss aggregation configuration.
///
/// All three fields contribute to the cache fingerprint.
///
/// # Examples
///
/// ```rust
/// use riskq_sim::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .iterations(50_000)
///     .confidence_level(0.99)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.iterations(), 50_000);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationConfig {
    iterations: usize,
    confidence_level: f64,
    seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the number of annual trials.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the VaR confidence level.
    #[inline]
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns a copy of this configuration with a fixed seed.
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self.clone()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `iterations` is 0 or greater than 10,000,000
    /// - `confidence_level` is not finite or not in (0, 1)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 || self.iterations > MAX_ITERATIONS {
            return Err(ConfigError::InvalidIterations(self.iterations));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ConfigError::InvalidConfidenceLevel(self.confidence_level));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
///
/// Unset fields take the defaults (10,000 iterations, 0.95 confidence, no
/// seed).
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    iterations: Option<usize>,
    confidence_level: Option<f64>,
    seed: Option<u64>,
}

impl SimulationConfigBuilder {
    /// Sets the number of annual trials, in [1, 10_000_000].
    #[inline]
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Sets the VaR confidence level, in (0, 1).
    #[inline]
    pub fn confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = Some(confidence_level);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a supplied value is out of range.
    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let config = SimulationConfig {
            iterations: self.iterations.unwrap_or(DEFAULT_ITERATIONS),
            confidence_level: self.confidence_level.unwrap_or(DEFAULT_CONFIDENCE_LEVEL),
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}
