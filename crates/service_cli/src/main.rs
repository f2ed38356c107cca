//! riskq CLI - Command Line Risk Quantification
//!
//! This is the operational entry point for the riskq engine.
//!
//! # Commands
//!
//! - `riskq simulate --scenario <file>` - Monte Carlo EAL / VaR for a risk register
//! - `riskq heatmap --scenario <file>` - Frequency × severity density grid with iso-loss contours
//! - `riskq curve --type <kind>` - Closed-form density and CDF of one distribution
//! - `riskq check` - Show configuration and run the engine self-check
//!
//! # Architecture
//!
//! As the service layer, this crate orchestrates the engine layers
//! (`riskq_core` → `riskq_models` → `riskq_sim` → `riskq_viz`) behind a
//! single command-line interface. Reports go to stdout, logs to stderr.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;
mod scenario;

pub use error::{CliError, Result};

use commands::{curve::CurveOptions, heatmap::HeatmapOptions, simulate::SimulateOptions};
use config::{build_config, CliArgs, LogLevel};
use output::OutputFormat;

/// riskq risk quantification CLI
#[derive(Parser)]
#[command(name = "riskq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Monte Carlo loss aggregation for a scenario
    Simulate {
        /// Path to the scenario file (TOML)
        #[arg(long, value_name = "FILE")]
        scenario: PathBuf,

        /// Number of Monte Carlo trials
        #[arg(short = 'n', long)]
        iterations: Option<usize>,

        /// VaR confidence level, strictly between 0 and 1
        #[arg(short = 'q', long)]
        confidence: Option<f64>,

        /// Seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,

        /// Run on a single thread through a simulation session
        #[arg(long)]
        serial: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Build the frequency × severity heat-map of one scenario event
    Heatmap {
        /// Path to the scenario file (TOML)
        #[arg(long, value_name = "FILE")]
        scenario: PathBuf,

        /// Zero-based event index within the scenario
        #[arg(short, long, default_value_t = 0)]
        event: usize,

        /// Number of joint samples
        #[arg(long)]
        samples: Option<usize>,

        /// Seed for a reproducible grid
        #[arg(short, long)]
        seed: Option<u64>,

        /// Skip the VaR / EAL contour overlay
        #[arg(long)]
        no_overlay: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Evaluate the closed-form curve of a distribution
    Curve {
        /// Distribution type (e.g., triangular, lognormal, poisson)
        #[arg(short = 't', long = "type")]
        kind: String,

        /// Distribution parameter as key=value (repeatable)
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Number of curve points
        #[arg(long)]
        points: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Check configuration and run the engine self-check
    Check,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_args = CliArgs {
        config_file: cli.config.clone(),
        log_level: if cli.verbose {
            Some(LogLevel::Debug)
        } else {
            cli.log_level
        },
    };
    let config = build_config(&cli_args)?;

    init_tracing(config.log_level.as_filter_str());

    info!("riskq v{}", env!("CARGO_PKG_VERSION"));
    info!(
        iterations = config.iterations,
        confidence_level = config.confidence_level,
        seed = ?config.seed,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Simulate {
            scenario,
            iterations,
            confidence,
            seed,
            serial,
            format,
        } => {
            let options = SimulateOptions {
                iterations,
                confidence_level: confidence,
                seed,
                serial,
                format,
            };
            commands::simulate::run(&scenario, &options, &config)?
        }
        Commands::Heatmap {
            scenario,
            event,
            samples,
            seed,
            no_overlay,
            format,
        } => {
            let options = HeatmapOptions {
                event,
                samples,
                seed,
                no_overlay,
                format,
            };
            commands::heatmap::run(&scenario, &options, &config)?
        }
        Commands::Curve {
            kind,
            params,
            points,
            format,
        } => {
            let options = CurveOptions {
                kind,
                params,
                points,
                format,
            };
            commands::curve::run(&options, config.curve_points)?
        }
        Commands::Check => commands::check::run(&config)?,
    }

    Ok(())
}
