//! Iso-loss curve generation.

use riskq_models::analytical::PlotRange;
use serde::Serialize;
use tracing::debug;

use super::level::{ContourKind, ContourLevel, ContourPoint, ContourSet};
use super::overlay::RiskOverlay;
use crate::grid::DensityGrid;

/// Percentiles of the cell losses drawn as contour levels.
pub const PERCENTILE_LEVELS: [f64; 5] = [0.25, 0.50, 0.75, 0.90, 0.95];

/// Default number of frequency samples per curve.
pub const DEFAULT_SAMPLES_PER_CURVE: usize = 200;

/// Fewest frequency samples per curve; smaller requests are raised to this.
pub const MIN_SAMPLES_PER_CURVE: usize = 2;

/// Curve generation options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ContourOptions {
    samples_per_curve: usize,
}

impl Default for ContourOptions {
    fn default() -> Self {
        Self {
            samples_per_curve: DEFAULT_SAMPLES_PER_CURVE,
        }
    }
}

impl ContourOptions {
    /// Sets the number of frequency samples per curve (at least 2).
    pub fn with_samples_per_curve(mut self, samples: usize) -> Self {
        self.samples_per_curve = samples.max(MIN_SAMPLES_PER_CURVE);
        self
    }

    /// Frequency samples per curve.
    #[inline]
    pub fn samples_per_curve(&self) -> usize {
        self.samples_per_curve
    }
}

/// Builds percentile and optional VaR/EAL iso-loss contours over a grid.
///
/// Percentile levels are nearest-rank order statistics (index
/// `⌊p·(n−1)⌋`) of the cells' midpoint `total_loss`, unweighted by density.
/// A level that never crosses the grid rectangle gets an empty polyline.
///
/// # Examples
///
/// ```rust
/// use riskq_core::types::{DistributionSpec, RiskEvent};
/// use riskq_viz::contour::{generate_contours, ContourKind, ContourOptions, RiskOverlay};
/// use riskq_viz::grid::{build_density_grid, GridConfig};
///
/// let event = RiskEvent::new(
///     DistributionSpec::Uniform { min: 0.0, max: 100.0 },
///     DistributionSpec::Uniform { min: 0.0, max: 4.0 },
/// );
/// let grid = build_density_grid(&event, &GridConfig::builder().seed(1).build().unwrap()).unwrap();
///
/// // A VaR far above anything the grid can reach
/// let overlay = RiskOverlay::new().with_value_at_risk(1e9, None);
/// let contours = generate_contours(&grid, Some(&overlay), &ContourOptions::default());
///
/// let var = contours.of_kind(ContourKind::ValueAtRisk).next().unwrap();
/// assert!(var.points.is_empty());
/// assert_eq!(contours.of_kind(ContourKind::Percentile).count(), 5);
/// ```
pub fn generate_contours(
    grid: &DensityGrid,
    overlay: Option<&RiskOverlay>,
    options: &ContourOptions,
) -> ContourSet {
    let frequency_range = grid.frequency_range();
    let severity_range = grid.severity_range();
    let samples = options.samples_per_curve().max(MIN_SAMPLES_PER_CURVE);

    let curve = |value: f64| iso_loss_curve(value, &frequency_range, &severity_range, samples);

    let mut losses: Vec<f64> = grid.cells().iter().map(|c| c.total_loss).collect();
    losses.sort_by(f64::total_cmp);

    let mut levels: Vec<ContourLevel> = PERCENTILE_LEVELS
        .iter()
        .filter_map(|&p| {
            let value = nearest_rank(&losses, p)?;
            Some(ContourLevel {
                label: format!("P{}", (p * 100.0).round()),
                value,
                kind: ContourKind::Percentile,
                std_dev: None,
                points: curve(value),
            })
        })
        .collect();

    if let Some(overlay) = overlay {
        push_group(
            &mut levels,
            "VaR",
            ContourKind::ValueAtRisk,
            overlay.value_at_risk,
            overlay.var_std_dev,
            &curve,
        );
        push_group(
            &mut levels,
            "EAL",
            ContourKind::ExpectedAnnualLoss,
            overlay.expected_annual_loss,
            overlay.eal_std_dev,
            &curve,
        );
    }

    debug!(
        levels = levels.len(),
        empty = levels.iter().filter(|l| l.points.is_empty()).count(),
        "contours generated"
    );

    ContourSet::new(levels)
}

/// Points `(f, level / f)` over evenly spaced frequencies of the domain,
/// kept when the severity falls inside `severity_range`.
///
/// Frequencies `≤ 0` are skipped.
///
/// # Examples
/// ```
/// use riskq_models::analytical::PlotRange;
/// use riskq_viz::contour::iso_loss_curve;
///
/// let frequency = PlotRange::new(1.0, 3.0);
/// let severity = PlotRange::new(0.0, 10.0);
///
/// let points = iso_loss_curve(12.0, &frequency, &severity, 3);
/// // f = 1 gives severity 12, outside the domain
/// assert_eq!(points.len(), 2);
/// assert_eq!(points[0].severity, 6.0);
/// assert_eq!(points[1].severity, 4.0);
/// ```
pub fn iso_loss_curve(
    level: f64,
    frequency_range: &PlotRange,
    severity_range: &PlotRange,
    samples: usize,
) -> Vec<ContourPoint> {
    if !level.is_finite() || samples == 0 {
        return Vec::new();
    }
    let step = if samples > 1 {
        frequency_range.width() / (samples - 1) as f64
    } else {
        0.0
    };

    (0..samples)
        .map(|i| {
            if i + 1 == samples && samples > 1 {
                frequency_range.upper
            } else {
                frequency_range.lower + step * i as f64
            }
        })
        .filter(|&frequency| frequency > 0.0)
        .map(|frequency| ContourPoint {
            frequency,
            severity: level / frequency,
        })
        .filter(|point| severity_range.contains(point.severity))
        .collect()
}

fn nearest_rank(sorted: &[f64], p: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let index = ((p * last as f64).floor() as usize).min(last);
    sorted.get(index).copied()
}

fn push_group<F>(
    levels: &mut Vec<ContourLevel>,
    name: &str,
    kind: ContourKind,
    value: Option<f64>,
    std_dev: Option<f64>,
    curve: &F,
) where
    F: Fn(f64) -> Vec<ContourPoint>,
{
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return;
    };
    let std_dev = std_dev.filter(|s| s.is_finite() && *s > 0.0);

    let band = |label: String, band_value: f64, sigma: f64| ContourLevel {
        label,
        value: band_value,
        kind: ContourKind::ConfidenceBand,
        std_dev: Some(sigma),
        points: curve(band_value),
    };

    if let Some(sigma) = std_dev {
        levels.push(band(format!("{name} -1σ"), (value - sigma).max(0.0), sigma));
    }
    levels.push(ContourLevel {
        label: name.to_string(),
        value,
        kind,
        std_dev,
        points: curve(value),
    });
    if let Some(sigma) = std_dev {
        levels.push(band(format!("{name} +1σ"), value + sigma, sigma));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{build_density_grid, GridConfig};
    use approx::assert_relative_eq;
    use riskq_core::types::{DistributionSpec, RiskEvent};

    fn grid() -> DensityGrid {
        let event = RiskEvent::new(
            DistributionSpec::Uniform {
                min: 0.0,
                max: 100.0,
            },
            DistributionSpec::Uniform { min: 0.0, max: 4.0 },
        );
        let config = GridConfig::builder()
            .num_iterations(2_000)
            .seed(5)
            .build()
            .unwrap();
        build_density_grid(&event, &config).unwrap()
    }

    // ========================================
    // Percentile levels
    // ========================================

    #[test]
    fn test_percentile_levels_ascending() {
        let contours = generate_contours(&grid(), None, &ContourOptions::default());
        assert_eq!(contours.len(), 5);

        let labels: Vec<&str> = contours.levels().iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["P25", "P50", "P75", "P90", "P95"]);

        let values: Vec<f64> = contours.levels().iter().map(|l| l.value).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert!(contours.levels().iter().all(|l| l.std_dev.is_none()));
    }

    #[test]
    fn test_nearest_rank_index() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(nearest_rank(&sorted, 0.0), Some(1.0));
        assert_eq!(nearest_rank(&sorted, 0.5), Some(3.0));
        assert_eq!(nearest_rank(&sorted, 0.95), Some(4.0));
        assert_eq!(nearest_rank(&sorted, 1.0), Some(5.0));
        assert_eq!(nearest_rank(&[], 0.5), None);
    }

    #[test]
    fn test_points_lie_on_the_hyperbola() {
        let grid = grid();
        let contours = generate_contours(&grid, None, &ContourOptions::default());
        for level in &contours {
            assert!(level.intersects_grid(), "{} misses the grid", level.label);
            for point in &level.points {
                assert_relative_eq!(
                    point.frequency * point.severity,
                    level.value,
                    max_relative = 1e-12
                );
                assert!(grid.frequency_range().contains(point.frequency));
                assert!(grid.severity_range().contains(point.severity));
            }
        }
    }

    // ========================================
    // Overlay levels
    // ========================================

    #[test]
    fn test_overlay_groups_and_band_floor() {
        let overlay = RiskOverlay::new()
            .with_value_at_risk(120.0, Some(20.0))
            .with_expected_annual_loss(30.0, Some(50.0));
        let contours = generate_contours(&grid(), Some(&overlay), &ContourOptions::default());
        assert_eq!(contours.len(), 11);

        let tail: Vec<(&str, f64)> = contours.levels()[5..]
            .iter()
            .map(|l| (l.label.as_str(), l.value))
            .collect();
        assert_eq!(
            tail,
            [
                ("VaR -1σ", 100.0),
                ("VaR", 120.0),
                ("VaR +1σ", 140.0),
                ("EAL -1σ", 0.0),
                ("EAL", 30.0),
                ("EAL +1σ", 80.0),
            ]
        );
        assert_eq!(contours.of_kind(ContourKind::ConfidenceBand).count(), 4);
        assert_eq!(contours.find("EAL").unwrap().std_dev, Some(50.0));
    }

    #[test]
    fn test_zero_level_skips_zero_frequency() {
        let overlay = RiskOverlay::new().with_expected_annual_loss(10.0, Some(25.0));
        let contours = generate_contours(&grid(), Some(&overlay), &ContourOptions::default());
        let floor = contours.find("EAL -1σ").unwrap();
        assert_eq!(floor.value, 0.0);
        // f = 0 is the only skipped sample; severity 0 is on the domain edge
        assert_eq!(floor.points.len(), DEFAULT_SAMPLES_PER_CURVE - 1);
        assert!(floor.points.iter().all(|p| p.frequency > 0.0));
    }

    #[test]
    fn test_level_outside_grid_is_empty() {
        let overlay = RiskOverlay::new().with_value_at_risk(1e12, Some(1e3));
        let contours = generate_contours(&grid(), Some(&overlay), &ContourOptions::default());
        for label in ["VaR -1σ", "VaR", "VaR +1σ"] {
            assert!(contours.find(label).unwrap().points.is_empty());
        }
    }

    #[test]
    fn test_non_finite_overlay_ignored() {
        let overlay = RiskOverlay::new()
            .with_value_at_risk(f64::NAN, Some(1.0))
            .with_expected_annual_loss(40.0, Some(f64::INFINITY));
        let contours = generate_contours(&grid(), Some(&overlay), &ContourOptions::default());
        assert!(contours.find("VaR").is_none());
        let eal = contours.find("EAL").unwrap();
        assert_eq!(eal.std_dev, None);
        assert_eq!(contours.len(), 6);
    }

    #[test]
    fn test_samples_per_curve_floor() {
        let options = ContourOptions::default().with_samples_per_curve(0);
        assert_eq!(options.samples_per_curve(), MIN_SAMPLES_PER_CURVE);

        let frequency = PlotRange::new(1.0, 2.0);
        let severity = PlotRange::new(0.0, 100.0);
        let points = iso_loss_curve(10.0, &frequency, &severity, 2);
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].frequency, 2.0);
    }
}
