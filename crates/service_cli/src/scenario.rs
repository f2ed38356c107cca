//! Scenario files
//!
//! A scenario is a TOML document describing a risk register:
//!
//! ```toml
//! currency = "EUR"
//!
//! [simulation]
//! iterations = 20000
//! confidence_level = 0.95
//! seed = 42
//!
//! [[events]]
//! name = "Ransomware outage"
//! severity = { type = "triangular", min = 1000, mode = 5000, max = 20000 }
//! frequency = { type = "triangular", min = 0.1, mode = 0.5, max = 2 }
//! ```
//!
//! Distribution tables pass through the sanitising builder, so a scenario
//! always loads into valid specs; unknown `type` tags fall back to the
//! default triangular spec.

use serde::Deserialize;
use std::path::Path;

use riskq_core::types::{build_distribution, DistributionSpec, RawParams, RiskEvent};

use crate::{CliError, Result};

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    currency: Option<String>,
    #[serde(default)]
    simulation: SimulationSection,
    #[serde(default)]
    events: Vec<EventEntry>,
}

/// Optional `[simulation]` table
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct SimulationSection {
    /// Trials per run
    pub iterations: Option<usize>,
    /// VaR confidence level
    pub confidence_level: Option<f64>,
    /// Seed for reproducible runs
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct EventEntry {
    name: Option<String>,
    severity: DistributionEntry,
    frequency: DistributionEntry,
}

#[derive(Debug, Deserialize)]
struct DistributionEntry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(flatten)]
    params: RawParams,
}

impl DistributionEntry {
    fn build(&self) -> DistributionSpec {
        build_distribution(&self.kind, &self.params)
    }
}

/// A named risk event
#[derive(Debug, Clone, PartialEq)]
pub struct NamedEvent {
    /// Display name
    pub name: String,
    /// Sanitised distributions
    pub event: RiskEvent,
}

/// A loaded scenario
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// Display-only currency code
    pub currency: Option<String>,
    /// Simulation settings from the file
    pub simulation: SimulationSection,
    /// Events in file order
    pub events: Vec<NamedEvent>,
}

impl Scenario {
    /// Load a scenario file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|source| CliError::Scenario {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse scenario TOML
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        let file: ScenarioFile = toml::from_str(content)?;

        let events = file
            .events
            .iter()
            .enumerate()
            .map(|(i, entry)| NamedEvent {
                name: entry
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("Event {}", i + 1)),
                event: RiskEvent::new(entry.severity.build(), entry.frequency.build()),
            })
            .collect();

        Ok(Self {
            currency: file.currency,
            simulation: file.simulation,
            events,
        })
    }

    /// Events without names, for the engine
    pub fn risk_events(&self) -> Vec<RiskEvent> {
        self.events.iter().map(|e| e.event).collect()
    }

    /// Event at `index`
    pub fn event(&self, index: usize) -> Result<&NamedEvent> {
        self.events.get(index).ok_or_else(|| {
            CliError::InvalidArgument(format!(
                "Event index {} out of range: scenario has {} event(s)",
                index,
                self.events.len()
            ))
        })
    }
}
