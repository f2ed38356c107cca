//! Check command implementation
//!
//! Prints the resolved configuration and runs a short seeded simulation
//! against a closed-form expectation.

use std::io::Write;
use tracing::{info, warn};

use riskq_core::types::{DistributionSpec, RiskEvent};
use riskq_models::analytical::mean;
use riskq_sim::mc::{aggregate, SimulationConfig, SimulationError};

use crate::config::CliConfig;
use crate::{CliError, Result};

const CHECK_ITERATIONS: usize = 20_000;
const CHECK_SEED: u64 = 42;
/// Relative EAL tolerance of the self-check.
const CHECK_TOLERANCE: f64 = 0.05;

/// Outcome of the engine self-check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelfCheck {
    /// Simulated EAL
    pub expected_annual_loss: f64,
    /// `E[frequency] · E[severity]`
    pub analytic_loss: f64,
    /// Simulated VaR
    pub value_at_risk: f64,
}

impl SelfCheck {
    /// Relative EAL error against the analytic value
    pub fn relative_error(&self) -> f64 {
        ((self.expected_annual_loss - self.analytic_loss) / self.analytic_loss).abs()
    }

    /// Whether VaR dominates EAL and the EAL is within tolerance
    pub fn passed(&self) -> bool {
        self.value_at_risk >= self.expected_annual_loss && self.relative_error() <= CHECK_TOLERANCE
    }
}

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    print_config(config, &mut out)?;

    info!("Running engine self-check...");
    let check = self_check(config.confidence_level)?;
    writeln!(out)?;
    writeln!(out, "Self-check ({} trials, seed {}):", CHECK_ITERATIONS, CHECK_SEED)?;
    writeln!(
        out,
        "  EAL {:.2} vs analytic {:.2} ({:.2}% off)",
        check.expected_annual_loss,
        check.analytic_loss,
        check.relative_error() * 100.0
    )?;
    writeln!(out, "  VaR {:.2}", check.value_at_risk)?;

    if check.passed() {
        writeln!(out, "  OK")?;
        Ok(())
    } else {
        warn!(?check, "engine self-check failed");
        Err(CliError::SelfCheck(format!(
            "EAL {:.2} deviates from {:.2} or exceeds VaR {:.2}",
            check.expected_annual_loss, check.analytic_loss, check.value_at_risk
        )))
    }
}

/// Write the resolved configuration
pub fn print_config<W: Write>(config: &CliConfig, out: &mut W) -> Result<()> {
    writeln!(out, "Configuration:")?;
    writeln!(out, "  Iterations:       {}", config.iterations)?;
    writeln!(out, "  Confidence level: {}", config.confidence_level)?;
    match config.seed {
        Some(seed) => writeln!(out, "  Seed:             {}", seed)?,
        None => writeln!(out, "  Seed:             (random)")?,
    }
    writeln!(out, "  Grid resolution:  {}", config.grid_resolution)?;
    writeln!(out, "  Grid samples:     {}", config.grid_samples)?;
    writeln!(out, "  Curve points:     {}", config.curve_points)?;
    writeln!(out, "  Log level:        {}", config.log_level)?;
    Ok(())
}

/// Simulate a fixed triangular scenario and compare with its closed form
pub fn self_check(confidence_level: f64) -> Result<SelfCheck> {
    let severity = DistributionSpec::Triangular {
        min: 1_000.0,
        mode: 5_000.0,
        max: 20_000.0,
    };
    let frequency = DistributionSpec::Triangular {
        min: 0.1,
        mode: 0.5,
        max: 2.0,
    };
    let config = SimulationConfig::builder()
        .iterations(CHECK_ITERATIONS)
        .confidence_level(confidence_level)
        .seed(CHECK_SEED)
        .build()
        .map_err(SimulationError::from)?;

    let result = aggregate(&[RiskEvent::new(severity, frequency)], &config)?;
    Ok(SelfCheck {
        expected_annual_loss: result.expected_annual_loss(),
        analytic_loss: mean(&frequency) * mean(&severity),
        value_at_risk: result.value_at_risk(),
    })
}
