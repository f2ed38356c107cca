//! Curve command implementation
//!
//! Evaluates the closed-form density and CDF of a single distribution,
//! the raw arrays behind the line, area and bar charts.

use serde::Serialize;
use std::io::Write;
use tracing::info;

use riskq_core::types::{DistributionKind, DistributionSpec, RawParams};
use riskq_models::analytical::{density_curve, mean, plot_range, std_dev, CurvePoint, PlotRange};

use crate::output::{format_amount, write_csv, write_json, OutputFormat};
use crate::{CliError, Result};

/// Parameter names accepted by `--param`, including aliases.
const KNOWN_PARAMS: &[&str] = &[
    "min", "mode", "max", "mean", "mu", "stdDev", "std_dev", "sigma", "alpha", "beta", "lambda",
    "rate", "shape", "scale", "xMin", "x_min", "k", "r", "n", "p", "gamma",
];

/// Flags of the curve command
#[derive(Debug, Clone)]
pub struct CurveOptions {
    /// Distribution type tag
    pub kind: String,
    /// Raw `key=value` parameters
    pub params: Vec<String>,
    /// Points override
    pub points: Option<usize>,
    /// Report format
    pub format: OutputFormat,
}

/// Serialisable curve payload
#[derive(Debug, Clone, Serialize)]
pub struct CurveReport {
    /// Sanitised distribution
    pub spec: DistributionSpec,
    /// Closed-form mean
    pub mean: f64,
    /// Closed-form standard deviation
    pub std_dev: f64,
    /// Display domain
    pub range: PlotRange,
    /// Curve samples
    pub points: Vec<CurvePoint>,
}

/// Run the curve command
pub fn run(options: &CurveOptions, default_points: usize) -> Result<()> {
    let report = build_report(options, default_points)?;

    let stdout = std::io::stdout();
    render(&report, options.format, &mut stdout.lock())?;

    info!("Curve complete");
    Ok(())
}

/// Sanitise the parameters and evaluate the curve
pub fn build_report(options: &CurveOptions, default_points: usize) -> Result<CurveReport> {
    let kind: DistributionKind = options.kind.parse().map_err(|e| {
        CliError::InvalidArgument(format!(
            "{}. Known types: {}",
            e,
            DistributionKind::ALL
                .iter()
                .map(|k| k.name())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })?;
    let raw = parse_params(&options.params)?;
    let spec = kind.build(&raw);
    if raw != RawParams::default() {
        info!("  Parameters sanitised to {:?}", spec);
    }

    let points = options.points.unwrap_or(default_points);
    if points == 0 {
        return Err(CliError::InvalidArgument(
            "Curve needs at least one point".to_string(),
        ));
    }

    Ok(CurveReport {
        spec,
        mean: mean(&spec),
        std_dev: std_dev(&spec),
        range: plot_range(&spec),
        points: density_curve(&spec, points),
    })
}

/// Parse `key=value` pairs into raw parameters
pub fn parse_params(pairs: &[String]) -> Result<RawParams> {
    let mut map = serde_json::Map::new();
    for pair in pairs {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            CliError::InvalidArgument(format!("Expected key=value, got '{}'", pair))
        })?;
        let key = key.trim();
        if !KNOWN_PARAMS.contains(&key) {
            return Err(CliError::InvalidArgument(format!(
                "Unknown parameter '{}'",
                key
            )));
        }
        let number: f64 = value.trim().parse().map_err(|_| {
            CliError::InvalidArgument(format!("Parameter '{}' is not a number: '{}'", key, value))
        })?;
        map.insert(key.to_string(), serde_json::Value::from(number));
    }
    Ok(serde_json::from_value(serde_json::Value::Object(map))?)
}

/// Write a curve in the requested format
pub fn render<W: Write>(report: &CurveReport, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, report),
        OutputFormat::Csv => write_csv(out, &report.points),
        OutputFormat::Table => render_table(report, out),
    }
}

fn render_table<W: Write>(report: &CurveReport, out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Distribution: {}", report.spec.kind())?;
    writeln!(out, "Mean:         {}", format_amount(report.mean, ""))?;
    writeln!(out, "Std dev:      {}", format_amount(report.std_dev, ""))?;
    writeln!(
        out,
        "Range:        {} .. {}",
        format_amount(report.range.lower, ""),
        format_amount(report.range.upper, "")
    )?;
    writeln!(out)?;
    writeln!(out, "{:>18} {:>14} {:>10}", "x", "density", "cdf")?;
    for point in &report.points {
        writeln!(
            out,
            "{:>18} {:>14.6e} {:>10.4}",
            format_amount(point.x, ""),
            point.density,
            point.cumulative
        )?;
    }
    Ok(())
}
