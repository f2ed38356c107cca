//! Externally supplied VaR / EAL levels.

use riskq_sim::mc::SimulationResult;
use serde::Serialize;

/// VaR and EAL values to draw on top of the percentile contours.
///
/// Each value is optional; a supplied standard deviation adds a confidence
/// band either side of its level. Non-finite values and non-positive
/// deviations are ignored.
///
/// # Examples
/// ```
/// use riskq_viz::contour::RiskOverlay;
///
/// let overlay = RiskOverlay::new()
///     .with_value_at_risk(25_000.0, Some(3_000.0))
///     .with_expected_annual_loss(7_500.0, None);
/// assert_eq!(overlay.value_at_risk, Some(25_000.0));
/// assert_eq!(overlay.eal_std_dev, None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct RiskOverlay {
    /// Value-at-Risk level
    pub value_at_risk: Option<f64>,
    /// Standard deviation for the VaR bands
    pub var_std_dev: Option<f64>,
    /// Expected annual loss level
    pub expected_annual_loss: Option<f64>,
    /// Standard deviation for the EAL bands
    pub eal_std_dev: Option<f64>,
}

impl RiskOverlay {
    /// Empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the VaR level and optional band deviation.
    pub fn with_value_at_risk(mut self, value: f64, std_dev: Option<f64>) -> Self {
        self.value_at_risk = Some(value);
        self.var_std_dev = std_dev;
        self
    }

    /// Sets the EAL level and optional band deviation.
    pub fn with_expected_annual_loss(mut self, value: f64, std_dev: Option<f64>) -> Self {
        self.expected_annual_loss = Some(value);
        self.eal_std_dev = std_dev;
        self
    }

    /// VaR and EAL of a simulation, both banded by the annual-loss
    /// standard deviation.
    pub fn from_result(result: &SimulationResult) -> Self {
        let std_dev = Some(result.std_dev());
        Self::new()
            .with_value_at_risk(result.value_at_risk(), std_dev)
            .with_expected_annual_loss(result.expected_annual_loss(), std_dev)
    }
}
