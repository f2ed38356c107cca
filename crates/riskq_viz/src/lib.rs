//! # riskq_viz: Heat-Map and Iso-Loss Data
//!
//! ## Layer 4 (Visualisation Data) Role
//!
//! Produces chart-ready arrays; rendering is left to the caller.
//!
//! - [`grid`]: Monte Carlo estimate of one event's joint frequency ×
//!   severity density on a square grid
//! - [`contour`]: percentile and VaR/EAL iso-loss polylines over a grid
//!
//! Grids draw their own samples and are independent of the aggregator's
//! iteration count and of the result cache.
//!
//! ## Usage Example
//!
//! ```rust
//! use riskq_core::types::{DistributionSpec, RiskEvent};
//! use riskq_sim::mc::{aggregate, SimulationConfig};
//! use riskq_viz::contour::{generate_contours, ContourOptions, RiskOverlay};
//! use riskq_viz::grid::{build_density_grid, GridConfig};
//!
//! let event = RiskEvent::new(
//!     DistributionSpec::Triangular { min: 1_000.0, mode: 5_000.0, max: 20_000.0 },
//!     DistributionSpec::Triangular { min: 0.1, mode: 0.5, max: 2.0 },
//! );
//!
//! let config = SimulationConfig::builder().iterations(5_000).seed(1).build().unwrap();
//! let result = aggregate(std::slice::from_ref(&event), &config).unwrap();
//!
//! let grid = build_density_grid(&event, &GridConfig::builder().seed(1).build().unwrap()).unwrap();
//! let overlay = RiskOverlay::from_result(&result);
//! let contours = generate_contours(&grid, Some(&overlay), &ContourOptions::default());
//!
//! assert!(contours.find("VaR").is_some());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod contour;
pub mod grid;
