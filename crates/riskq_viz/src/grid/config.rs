//! Density grid configuration.

use serde::Serialize;

use super::error::GridError;

/// Default number of bins per axis.
pub const DEFAULT_RESOLUTION: usize = 20;

/// Largest accepted number of bins per axis.
pub const MAX_RESOLUTION: usize = 500;

/// Minimum number of joint samples per grid.
pub const MIN_GRID_ITERATIONS: usize = 1_000;

/// Default number of joint samples per grid.
pub const DEFAULT_GRID_ITERATIONS: usize = 10_000;

/// Largest accepted number of joint samples per grid.
pub const MAX_GRID_ITERATIONS: usize = 10_000_000;

/// Density grid configuration.
///
/// The sample count is independent of the aggregator's iteration count.
///
/// # Examples
///
/// ```rust
/// use riskq_viz::grid::GridConfig;
///
/// let config = GridConfig::builder()
///     .num_iterations(5_000)
///     .seed(11)
///     .build()
///     .unwrap();
/// assert_eq!(config.resolution(), 20);
/// assert_eq!(config.num_iterations(), 5_000);
///
/// assert!(GridConfig::builder().num_iterations(10).build().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GridConfig {
    resolution: usize,
    num_iterations: usize,
    seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            num_iterations: DEFAULT_GRID_ITERATIONS,
            seed: None,
        }
    }
}

impl GridConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> GridConfigBuilder {
        GridConfigBuilder::default()
    }

    /// Bins per axis.
    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Joint samples drawn per grid.
    #[inline]
    pub fn num_iterations(&self) -> usize {
        self.num_iterations
    }

    /// Optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `GridError` if:
    /// - `resolution` is 0 or greater than 500
    /// - `num_iterations` is below 1,000 or above 10,000,000
    pub fn validate(&self) -> Result<(), GridError> {
        if self.resolution == 0 || self.resolution > MAX_RESOLUTION {
            return Err(GridError::InvalidResolution(self.resolution));
        }
        if !(MIN_GRID_ITERATIONS..=MAX_GRID_ITERATIONS).contains(&self.num_iterations) {
            return Err(GridError::InvalidIterations(self.num_iterations));
        }
        Ok(())
    }
}

/// Builder for [`GridConfig`].
#[derive(Clone, Debug, Default)]
pub struct GridConfigBuilder {
    resolution: Option<usize>,
    num_iterations: Option<usize>,
    seed: Option<u64>,
}

impl GridConfigBuilder {
    /// Sets the bins per axis.
    #[inline]
    pub fn resolution(mut self, resolution: usize) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Sets the joint sample count, at least 1,000.
    #[inline]
    pub fn num_iterations(mut self, num_iterations: usize) -> Self {
        self.num_iterations = Some(num_iterations);
        self
    }

    /// Sets the seed.
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
    /// Returns `GridError` when a supplied value is out of range.
    pub fn build(self) -> Result<GridConfig, GridError> {
        let config = GridConfig {
            resolution: self.resolution.unwrap_or(DEFAULT_RESOLUTION),
            num_iterations: self.num_iterations.unwrap_or(DEFAULT_GRID_ITERATIONS),
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}
