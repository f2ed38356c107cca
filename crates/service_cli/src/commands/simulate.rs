//! Simulate command implementation
//!
//! Runs the Monte Carlo loss aggregation for a scenario file and reports
//! EAL, VaR and the annual-loss percentile table.
//!
//! Settings resolve as: command flags, then the scenario's `[simulation]`
//! table, then the global configuration.

use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

use riskq_sim::mc::{
    aggregate_parallel, ExceedancePoint, PercentileRow, SimulationConfig, SimulationResult,
};
use riskq_sim::session::{CancellationToken, SimulationSession};

use crate::config::CliConfig;
use crate::output::{format_amount, write_csv, write_json, OutputFormat};
use crate::scenario::{Scenario, SimulationSection};
use crate::Result;

/// Percentiles listed in every report.
pub const REPORT_PERCENTILES: [f64; 6] = [0.50, 0.75, 0.90, 0.95, 0.99, 0.999];

/// Points on the reported loss exceedance curve.
pub const EXCEEDANCE_POINTS: usize = 25;

/// Flags of the simulate command
#[derive(Debug, Clone, Default)]
pub struct SimulateOptions {
    /// Iteration override
    pub iterations: Option<usize>,
    /// Confidence level override
    pub confidence_level: Option<f64>,
    /// Seed override
    pub seed: Option<u64>,
    /// Run on the calling thread instead of the rayon pool
    pub serial: bool,
    /// Report format
    pub format: OutputFormat,
}

/// Serialisable simulation report
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// Display-only currency code
    pub currency: Option<String>,
    /// Event names in scenario order
    pub events: Vec<String>,
    /// Trials run
    pub iterations: usize,
    /// Seed used, when fixed
    pub seed: Option<u64>,
    /// VaR confidence level
    pub confidence_level: f64,
    /// Mean annual loss
    pub expected_annual_loss: f64,
    /// Empirical VaR at `confidence_level`
    pub value_at_risk: f64,
    /// Annual-loss standard deviation
    pub std_dev: f64,
    /// Standard error of the EAL
    pub std_error: f64,
    /// Smallest annual loss
    pub min: f64,
    /// Largest annual loss
    pub max: f64,
    /// Annual-loss percentiles
    pub percentiles: Vec<PercentileRow>,
    /// Loss exceedance curve
    pub exceedance: Vec<ExceedancePoint>,
}

impl SimulationReport {
    /// Summarise a result for a scenario
    pub fn new(scenario: &Scenario, config: &SimulationConfig, result: &SimulationResult) -> Self {
        Self {
            currency: scenario.currency.clone(),
            events: scenario.events.iter().map(|e| e.name.clone()).collect(),
            iterations: result.iterations(),
            seed: config.seed(),
            confidence_level: result.confidence_level(),
            expected_annual_loss: result.expected_annual_loss(),
            value_at_risk: result.value_at_risk(),
            std_dev: result.std_dev(),
            std_error: result.std_error(),
            min: result.min(),
            max: result.max(),
            percentiles: result.percentile_table(&REPORT_PERCENTILES),
            exceedance: result.loss_exceedance_curve(EXCEEDANCE_POINTS),
        }
    }
}

/// Run the simulate command
pub fn run(scenario_path: &Path, options: &SimulateOptions, config: &CliConfig) -> Result<()> {
    let scenario = Scenario::load(scenario_path)?;
    let sim_config = resolve_config(options, &scenario.simulation, config)?;

    info!("Starting simulation...");
    info!("  Scenario: {}", scenario_path.display());
    info!("  Events: {}", scenario.events.len());
    info!("  Iterations: {}", sim_config.iterations());
    info!("  Confidence level: {}", sim_config.confidence_level());

    let events = scenario.risk_events();
    let result = if options.serial {
        let mut session = SimulationSession::new();
        session.run_blocking(&events, &sim_config)?
    } else {
        std::sync::Arc::new(aggregate_parallel(
            &events,
            &sim_config,
            &CancellationToken::new(),
        )?)
    };

    let report = SimulationReport::new(&scenario, &sim_config, &result);
    let stdout = std::io::stdout();
    render(&report, options.format, &mut stdout.lock())?;

    info!("Simulation complete");
    Ok(())
}

/// Resolve the engine configuration from flags, scenario and defaults
pub fn resolve_config(
    options: &SimulateOptions,
    section: &SimulationSection,
    config: &CliConfig,
) -> Result<SimulationConfig> {
    let built = SimulationConfig::builder()
        .iterations(
            options
                .iterations
                .or(section.iterations)
                .unwrap_or(config.iterations),
        )
        .confidence_level(
            options
                .confidence_level
                .or(section.confidence_level)
                .unwrap_or(config.confidence_level),
        )
        .maybe_seed(options.seed.or(section.seed).or(config.seed))
        .build()
        .map_err(riskq_sim::mc::SimulationError::from)?;
    Ok(built)
}

/// Write a report in the requested format
pub fn render<W: Write>(
    report: &SimulationReport,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, report),
        OutputFormat::Csv => write_csv(out, &report.percentiles),
        OutputFormat::Table => render_table(report, out),
    }
}

fn render_table<W: Write>(report: &SimulationReport, out: &mut W) -> Result<()> {
    let currency = report.currency.as_deref().unwrap_or("");
    let amount = |value: f64| format_amount(value, currency);

    writeln!(out)?;
    writeln!(out, "Events:      {}", report.events.join(", "))?;
    writeln!(out, "Iterations:  {}", report.iterations)?;
    if let Some(seed) = report.seed {
        writeln!(out, "Seed:        {}", seed)?;
    }
    writeln!(out)?;
    writeln!(out, "┌──────────────────────────┬──────────────────────────┐")?;
    writeln!(out, "│ Metric                   │ Value                    │")?;
    writeln!(out, "├──────────────────────────┼──────────────────────────┤")?;
    let var_label = format!("VaR ({:.1}%)", report.confidence_level * 100.0);
    for (label, value) in [
        ("Expected annual loss", report.expected_annual_loss),
        (var_label.as_str(), report.value_at_risk),
        ("Standard deviation", report.std_dev),
        ("Standard error (EAL)", report.std_error),
        ("Minimum", report.min),
        ("Maximum", report.max),
    ] {
        writeln!(out, "│ {:<24} │ {:>24} │", label, amount(value))?;
    }
    writeln!(out, "├──────────────────────────┼──────────────────────────┤")?;
    for row in &report.percentiles {
        let label = format!("P{}", (row.percentile * 1_000.0).round() / 10.0);
        writeln!(out, "│ {:<24} │ {:>24} │", label, amount(row.loss))?;
    }
    writeln!(out, "└──────────────────────────┴──────────────────────────┘")?;
    Ok(())
}
