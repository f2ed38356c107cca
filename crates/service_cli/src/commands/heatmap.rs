//! Heatmap command implementation
//!
//! Builds the joint frequency × severity density grid for one scenario
//! event and overlays percentile and VaR/EAL iso-loss contours.

use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

use riskq_sim::mc::{aggregate, SimulationConfig};
use riskq_viz::contour::{generate_contours, ContourOptions, ContourSet, RiskOverlay};
use riskq_viz::grid::{build_density_grid, DensityGrid, GridConfig};

use crate::config::CliConfig;
use crate::output::{format_amount, write_csv, write_json, OutputFormat};
use crate::scenario::Scenario;
use crate::Result;

/// Shading ramp from empty to densest cell.
const SHADES: &[u8] = b" .:-=+*#%@";

/// Flags of the heatmap command
#[derive(Debug, Clone, Default)]
pub struct HeatmapOptions {
    /// Event index within the scenario
    pub event: usize,
    /// Joint sample override
    pub samples: Option<usize>,
    /// Seed override
    pub seed: Option<u64>,
    /// Skip the VaR/EAL overlay simulation
    pub no_overlay: bool,
    /// Report format
    pub format: OutputFormat,
}

/// Serialisable heat-map payload
#[derive(Debug, Clone, Serialize)]
pub struct HeatmapReport {
    /// Event name
    pub event: String,
    /// Display-only currency code
    pub currency: Option<String>,
    /// Density grid
    pub grid: DensityGrid,
    /// Iso-loss contours
    pub contours: ContourSet,
}

/// Run the heatmap command
pub fn run(scenario_path: &Path, options: &HeatmapOptions, config: &CliConfig) -> Result<()> {
    let scenario = Scenario::load(scenario_path)?;
    let report = build_report(&scenario, options, config)?;

    let stdout = std::io::stdout();
    render(&report, options.format, &mut stdout.lock())?;

    info!("Heat-map complete");
    Ok(())
}

/// Build the grid and contours for the selected event
pub fn build_report(
    scenario: &Scenario,
    options: &HeatmapOptions,
    config: &CliConfig,
) -> Result<HeatmapReport> {
    let named = scenario.event(options.event)?;
    let seed = options.seed.or(scenario.simulation.seed).or(config.seed);

    let grid_config = GridConfig::builder()
        .resolution(config.grid_resolution)
        .num_iterations(options.samples.unwrap_or(config.grid_samples))
        .maybe_seed(seed)
        .build()?;

    info!("Building density grid...");
    info!("  Event: {}", named.name);
    info!("  Samples: {}", grid_config.num_iterations());

    let grid = build_density_grid(&named.event, &grid_config)?;

    let overlay = if options.no_overlay {
        None
    } else {
        let sim_config = SimulationConfig::builder()
            .iterations(scenario.simulation.iterations.unwrap_or(config.iterations))
            .confidence_level(
                scenario
                    .simulation
                    .confidence_level
                    .unwrap_or(config.confidence_level),
            )
            .maybe_seed(seed)
            .build()
            .map_err(riskq_sim::mc::SimulationError::from)?;
        let result = aggregate(std::slice::from_ref(&named.event), &sim_config)?;
        Some(RiskOverlay::from_result(&result))
    };

    let contours = generate_contours(&grid, overlay.as_ref(), &ContourOptions::default());

    Ok(HeatmapReport {
        event: named.name.clone(),
        currency: scenario.currency.clone(),
        grid,
        contours,
    })
}

/// Write a heat-map in the requested format
pub fn render<W: Write>(report: &HeatmapReport, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, report),
        OutputFormat::Csv => write_csv(out, report.grid.cells()),
        OutputFormat::Table => render_table(report, out),
    }
}

fn render_table<W: Write>(report: &HeatmapReport, out: &mut W) -> Result<()> {
    let grid = &report.grid;
    let currency = report.currency.as_deref().unwrap_or("");
    let peak = grid.max_density();

    writeln!(out)?;
    writeln!(out, "Event: {}", report.event)?;
    writeln!(
        out,
        "Samples: {} retained, {} discarded",
        grid.retained_samples(),
        grid.discarded_samples()
    )?;
    writeln!(out)?;

    let severity = grid.severity_range();
    let frequency = grid.frequency_range();
    let rows: Vec<_> = grid.rows().collect();
    // Highest severity first so the chart reads bottom-up
    for (row_index, row) in rows.iter().enumerate().rev() {
        let label = if row_index + 1 == grid.resolution() {
            format!("{:>14}", format_amount(severity.upper, ""))
        } else if row_index == 0 {
            format!("{:>14}", format_amount(severity.lower, ""))
        } else {
            " ".repeat(14)
        };
        let shades: String = row.iter().map(|cell| shade(cell.density, peak)).collect();
        writeln!(out, "{} │{}", label, shades)?;
    }
    writeln!(out, "{} └{}", " ".repeat(14), "─".repeat(grid.resolution()))?;
    writeln!(
        out,
        "{}  frequency {:.3} .. {:.3}",
        " ".repeat(14),
        frequency.lower,
        frequency.upper
    )?;

    writeln!(out)?;
    writeln!(out, "Contours:")?;
    for level in &report.contours {
        let reach = if level.intersects_grid() {
            format!("{} points", level.points.len())
        } else {
            "outside grid".to_string()
        };
        writeln!(
            out,
            "  {:<10} {:>20}  {}",
            level.label,
            format_amount(level.value, currency),
            reach
        )?;
    }
    Ok(())
}

fn shade(density: f64, peak: f64) -> char {
    if !(peak > 0.0) || !(density > 0.0) {
        return SHADES[0] as char;
    }
    let last = SHADES.len() - 1;
    let index = ((density / peak) * last as f64).ceil() as usize;
    SHADES[index.clamp(1, last)] as char
}
