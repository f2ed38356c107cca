//! Joint frequency × severity density estimation.

use riskq_core::rng::RiskRng;
use riskq_core::types::RiskEvent;
use riskq_models::analytical::PlotRange;
use riskq_models::sampling::SampleDistribution;
use serde::Serialize;
use tracing::{debug, warn};

use super::config::GridConfig;
use super::domain::{axis_domain, bin_index, bin_midpoint};
use super::error::GridError;

/// Discard fraction above which a build logs a warning.
pub const HEAVY_DISCARD_FRACTION: f64 = 0.25;

/// One bin of a [`DensityGrid`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GridCell {
    /// Frequency at the bin midpoint
    pub frequency: f64,
    /// Severity at the bin midpoint
    pub severity: f64,
    /// Retained samples falling in the bin
    pub sample_count: u64,
    /// `sample_count / retained samples`
    pub probability_mass: f64,
    /// `probability_mass / bin area`
    pub density: f64,
    /// `frequency × severity` at the midpoint
    pub total_loss: f64,
}

/// Square grid of joint density estimates over a frequency and a severity
/// domain.
///
/// Cells are stored row-major with severity bins as rows and frequency
/// bins as columns; `cell(f, s)` addresses frequency bin `f` and severity
/// bin `s`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DensityGrid {
    resolution: usize,
    frequency_range: PlotRange,
    severity_range: PlotRange,
    cells: Vec<GridCell>,
    retained_samples: u64,
    discarded_samples: u64,
}

impl DensityGrid {
    /// Bins per axis.
    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Frequency (x) domain.
    #[inline]
    pub fn frequency_range(&self) -> PlotRange {
        self.frequency_range
    }

    /// Severity (y) domain.
    #[inline]
    pub fn severity_range(&self) -> PlotRange {
        self.severity_range
    }

    /// All cells, row-major by severity bin.
    #[inline]
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Cell at frequency bin `frequency_bin` and severity bin `severity_bin`.
    pub fn cell(&self, frequency_bin: usize, severity_bin: usize) -> Option<&GridCell> {
        if frequency_bin >= self.resolution || severity_bin >= self.resolution {
            return None;
        }
        self.cells.get(severity_bin * self.resolution + frequency_bin)
    }

    /// Rows of cells, one per severity bin from low to high.
    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(self.resolution)
    }

    /// Samples that were binned.
    #[inline]
    pub fn retained_samples(&self) -> u64 {
        self.retained_samples
    }

    /// Non-finite, negative or out-of-domain samples that were dropped.
    #[inline]
    pub fn discarded_samples(&self) -> u64 {
        self.discarded_samples
    }

    /// Width of one frequency bin.
    #[inline]
    pub fn frequency_bin_width(&self) -> f64 {
        self.frequency_range.width() / self.resolution as f64
    }

    /// Width of one severity bin.
    #[inline]
    pub fn severity_bin_width(&self) -> f64 {
        self.severity_range.width() / self.resolution as f64
    }

    /// Area of one cell in frequency × severity units.
    #[inline]
    pub fn bin_area(&self) -> f64 {
        self.frequency_bin_width() * self.severity_bin_width()
    }

    /// Sum of cell masses; 1 up to rounding when any sample was retained.
    pub fn total_mass(&self) -> f64 {
        self.cells.iter().map(|c| c.probability_mass).sum()
    }

    /// Largest cell density, 0 for an empty grid.
    pub fn max_density(&self) -> f64 {
        self.cells.iter().map(|c| c.density).fold(0.0, f64::max)
    }

    /// Densities as `matrix[severity_bin][frequency_bin]`.
    pub fn density_matrix(&self) -> Vec<Vec<f64>> {
        self.rows()
            .map(|row| row.iter().map(|c| c.density).collect())
            .collect()
    }
}

/// Estimates the joint density of one event's frequency and severity.
///
/// Draws `config.num_iterations()` independent (frequency, severity)
/// pairs, drops non-finite, negative and out-of-domain pairs, and bins the
/// rest over the [`axis_domain`](super::axis_domain) of each distribution.
///
/// # Errors
///
/// [`GridError`] for an invalid configuration or event. Degenerate domains
/// and dropped samples never fail the build.
///
/// # Examples
///
/// ```rust
/// use riskq_core::types::{DistributionSpec, RiskEvent};
/// use riskq_viz::grid::{build_density_grid, GridConfig};
///
/// let event = RiskEvent::new(
///     DistributionSpec::Triangular { min: 1_000.0, mode: 5_000.0, max: 20_000.0 },
///     DistributionSpec::Triangular { min: 0.1, mode: 0.5, max: 2.0 },
/// );
/// let config = GridConfig::builder().seed(42).build().unwrap();
///
/// let grid = build_density_grid(&event, &config).unwrap();
/// assert_eq!(grid.cells().len(), 400);
/// assert!((grid.total_mass() - 1.0).abs() < 1e-9);
/// ```
pub fn build_density_grid(
    event: &RiskEvent,
    config: &GridConfig,
) -> Result<DensityGrid, GridError> {
    config.validate()?;
    event
        .validate()
        .map_err(|(role, source)| GridError::InvalidEvent { role, source })?;

    let resolution = config.resolution();
    let frequency_range = axis_domain(&event.frequency);
    let severity_range = axis_domain(&event.severity);

    let mut rng = match config.seed() {
        Some(seed) => RiskRng::from_seed(seed),
        None => RiskRng::from_entropy(),
    };

    let mut counts = vec![0u64; resolution * resolution];
    let mut retained = 0u64;
    for _ in 0..config.num_iterations() {
        let frequency = event.frequency.sample(&mut rng);
        let severity = event.severity.sample(&mut rng);

        let bins = bin_index(frequency, &frequency_range, resolution)
            .zip(bin_index(severity, &severity_range, resolution));
        if let Some((f, s)) = bins {
            counts[s * resolution + f] += 1;
            retained += 1;
        }
    }
    let discarded = config.num_iterations() as u64 - retained;

    let grid = assemble(
        resolution,
        frequency_range,
        severity_range,
        &counts,
        retained,
        discarded,
    );

    let discard_fraction = discarded as f64 / config.num_iterations() as f64;
    if retained == 0 {
        warn!(
            samples = config.num_iterations(),
            "every grid sample fell outside the domain; grid is empty"
        );
    } else if discard_fraction > HEAVY_DISCARD_FRACTION {
        warn!(discarded, retained, "large share of grid samples discarded");
    }
    debug!(
        resolution,
        retained,
        discarded,
        seed = rng.seed(),
        "density grid built"
    );

    Ok(grid)
}

fn assemble(
    resolution: usize,
    frequency_range: PlotRange,
    severity_range: PlotRange,
    counts: &[u64],
    retained: u64,
    discarded: u64,
) -> DensityGrid {
    let bin_area = (frequency_range.width() / resolution as f64)
        * (severity_range.width() / resolution as f64);

    let cells = counts
        .iter()
        .enumerate()
        .map(|(index, &sample_count)| {
            let frequency = bin_midpoint(index % resolution, &frequency_range, resolution);
            let severity = bin_midpoint(index / resolution, &severity_range, resolution);
            let probability_mass = if retained > 0 {
                sample_count as f64 / retained as f64
            } else {
                0.0
            };
            GridCell {
                frequency,
                severity,
                sample_count,
                probability_mass,
                density: probability_mass / bin_area,
                total_loss: frequency * severity,
            }
        })
        .collect();

    DensityGrid {
        resolution,
        frequency_range,
        severity_range,
        cells,
        retained_samples: retained,
        discarded_samples: discarded,
    }
}
