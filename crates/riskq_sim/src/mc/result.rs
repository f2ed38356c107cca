//! Simulation results and loss statistics.
//!
//! Every quantile in this module uses the same empirical order-statistic
//! rule as Value-at-Risk: the element at index `⌊p · N⌋` of the ascending
//! losses, clamped into `[0, N − 1]`. No interpolation is performed.

use serde::Serialize;

/// Row of a percentile table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PercentileRow {
    /// Percentile in [0, 1]
    pub percentile: f64,
    /// Annual loss at that percentile
    pub loss: f64,
}

/// Point of a loss exceedance curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ExceedancePoint {
    /// Annual loss threshold
    pub loss: f64,
    /// P(annual loss > threshold)
    pub probability: f64,
}

/// Output of a Monte Carlo loss aggregation.
///
/// Immutable once produced. `annual_losses` is sorted ascending and holds
/// one entry per trial.
///
/// # Examples
///
/// ```rust
/// use riskq_core::types::{DistributionSpec, RiskEvent};
/// use riskq_sim::mc::{aggregate, SimulationConfig};
///
/// let events = [RiskEvent::new(
///     DistributionSpec::Uniform { min: 0.0, max: 100.0 },
///     DistributionSpec::DiscreteUniform { min: 1, max: 1 },
/// )];
/// let config = SimulationConfig::builder().iterations(1_000).seed(1).build().unwrap();
/// let result = aggregate(&events, &config).unwrap();
///
/// assert_eq!(result.iterations(), 1_000);
/// assert!(result.value_at_risk() >= result.percentile(0.5));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationResult {
    expected_annual_loss: f64,
    value_at_risk: f64,
    confidence_level: f64,
    annual_losses: Vec<f64>,
}

/// Index of the empirical quantile `p` in a sorted sample of length `n`.
#[inline]
pub(crate) fn order_statistic_index(p: f64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let raw = (p * n as f64).floor();
    if raw.is_nan() || raw <= 0.0 {
        0
    } else {
        (raw as usize).min(n - 1)
    }
}

impl SimulationResult {
    /// Builds a result from raw (unsorted) annual losses.
    ///
    /// Returns `None` when `losses` is empty.
    pub(crate) fn from_losses(mut losses: Vec<f64>, confidence_level: f64) -> Option<Self> {
        if losses.is_empty() {
            return None;
        }

        losses.sort_unstable_by(f64::total_cmp);
        let n = losses.len();
        let expected_annual_loss = losses.iter().sum::<f64>() / n as f64;
        let value_at_risk = losses[order_statistic_index(confidence_level, n)];

        Some(Self {
            expected_annual_loss,
            value_at_risk,
            confidence_level,
            annual_losses: losses,
        })
    }

    /// Arithmetic mean of all annual losses.
    #[inline]
    pub fn expected_annual_loss(&self) -> f64 {
        self.expected_annual_loss
    }

    /// Empirical loss quantile at the configured confidence level.
    #[inline]
    pub fn value_at_risk(&self) -> f64 {
        self.value_at_risk
    }

    /// Confidence level the VaR was taken at.
    #[inline]
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Annual losses, ascending.
    #[inline]
    pub fn annual_losses(&self) -> &[f64] {
        &self.annual_losses
    }

    /// Number of trials.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.annual_losses.len()
    }

    /// Empirical quantile at `p` (same rule as VaR).
    pub fn percentile(&self, p: f64) -> f64 {
        self.annual_losses[order_statistic_index(p, self.annual_losses.len())]
    }

    /// Smallest simulated annual loss.
    #[inline]
    pub fn min(&self) -> f64 {
        self.annual_losses[0]
    }

    /// Largest simulated annual loss.
    #[inline]
    pub fn max(&self) -> f64 {
        self.annual_losses[self.annual_losses.len() - 1]
    }

    /// Sample standard deviation (N − 1 denominator; 0 for a single trial).
    pub fn std_dev(&self) -> f64 {
        let n = self.annual_losses.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.expected_annual_loss;
        let sum_sq: f64 = self
            .annual_losses
            .iter()
            .map(|x| (x - mean) * (x - mean))
            .sum();
        (sum_sq / (n - 1) as f64).sqrt()
    }

    /// Standard error of the expected annual loss.
    pub fn std_error(&self) -> f64 {
        self.std_dev() / (self.annual_losses.len() as f64).sqrt()
    }

    /// Fraction of trials whose loss strictly exceeds `threshold`.
    pub fn exceedance_probability(&self, threshold: f64) -> f64 {
        let at_or_below = self.annual_losses.partition_point(|&x| x <= threshold);
        (self.annual_losses.len() - at_or_below) as f64 / self.annual_losses.len() as f64
    }

    /// Loss exceedance curve over `points` evenly spaced thresholds between
    /// the smallest and largest loss.
    ///
    /// A constant-loss result yields a single point.
    pub fn loss_exceedance_curve(&self, points: usize) -> Vec<ExceedancePoint> {
        let (lo, hi) = (self.min(), self.max());
        let at = |loss: f64| ExceedancePoint {
            loss,
            probability: self.exceedance_probability(loss),
        };

        if !(hi > lo) {
            return vec![at(lo)];
        }

        let points = points.max(2);
        let step = (hi - lo) / (points - 1) as f64;
        (0..points)
            .map(|i| at(if i == points - 1 { hi } else { lo + step * i as f64 }))
            .collect()
    }

    /// Losses at each requested percentile.
    pub fn percentile_table(&self, percentiles: &[f64]) -> Vec<PercentileRow> {
        percentiles
            .iter()
            .map(|&p| PercentileRow {
                percentile: p,
                loss: self.percentile(p),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn result(losses: &[f64], confidence: f64) -> SimulationResult {
        SimulationResult::from_losses(losses.to_vec(), confidence).unwrap()
    }

    #[test]
    fn test_from_losses_sorts_and_aggregates() {
        let r = result(&[4.0, 1.0, 3.0, 2.0], 0.5);
        assert_eq!(r.annual_losses(), &[1.0, 2.0, 3.0, 4.0]);
        assert_relative_eq!(r.expected_annual_loss(), 2.5);
        // index ⌊0.5 · 4⌋ = 2
        assert_eq!(r.value_at_risk(), 3.0);
        assert_eq!(r.min(), 1.0);
        assert_eq!(r.max(), 4.0);
    }

    #[test]
    fn test_empty_losses_rejected() {
        assert!(SimulationResult::from_losses(Vec::new(), 0.95).is_none());
    }

    #[test]
    fn test_order_statistic_index_clamps() {
        assert_eq!(order_statistic_index(0.999_999, 10), 9);
        assert_eq!(order_statistic_index(1.0, 10), 9);
        assert_eq!(order_statistic_index(1e-9, 10), 0);
        assert_eq!(order_statistic_index(-1.0, 10), 0);
        assert_eq!(order_statistic_index(0.95, 1), 0);
        assert_eq!(order_statistic_index(f64::NAN, 5), 0);
    }

    #[test]
    fn test_single_trial() {
        let r = result(&[7.0], 0.99);
        assert_eq!(r.value_at_risk(), 7.0);
        assert_eq!(r.std_dev(), 0.0);
        assert_eq!(r.loss_exceedance_curve(10).len(), 1);
    }

    #[test]
    fn test_std_dev_and_error() {
        let r = result(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 0.9);
        // sample variance 32 / 7
        assert_relative_eq!(r.std_dev(), (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(r.std_error(), r.std_dev() / 8.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_exceedance() {
        let r = result(&[0.0, 10.0, 20.0, 30.0], 0.95);
        assert_eq!(r.exceedance_probability(-1.0), 1.0);
        assert_eq!(r.exceedance_probability(10.0), 0.5);
        assert_eq!(r.exceedance_probability(30.0), 0.0);

        let curve = r.loss_exceedance_curve(4);
        assert_eq!(curve.len(), 4);
        assert_eq!(curve[0].loss, 0.0);
        assert_eq!(curve[0].probability, 0.75);
        assert_eq!(curve[3].loss, 30.0);
        assert_eq!(curve[3].probability, 0.0);
    }

    #[test]
    fn test_percentile_table() {
        let losses: Vec<f64> = (0..100).map(f64::from).collect();
        let r = result(&losses, 0.95);
        let table = r.percentile_table(&[0.5, 0.9, 0.99]);
        assert_eq!(table.len(), 3);
        assert_eq!(table[0].loss, 50.0);
        assert_eq!(table[1].loss, 90.0);
        assert_eq!(table[2].loss, 99.0);
        assert_eq!(r.value_at_risk(), 95.0);
    }

    // ========================================
    // Order-statistic properties
    // ========================================

    proptest! {
        #[test]
        fn prop_order_statistic_index_in_range(p in -2.0..3.0f64, n in 1usize..10_000) {
            prop_assert!(order_statistic_index(p, n) < n);
        }

        #[test]
        fn prop_var_is_floor_order_statistic(
            losses in prop::collection::vec(0.0..1e9f64, 1..500),
            confidence in 0.001..0.999f64,
        ) {
            let r = result(&losses, confidence);
            let mut sorted = losses.clone();
            sorted.sort_by(f64::total_cmp);
            let index = ((confidence * sorted.len() as f64).floor() as usize).min(sorted.len() - 1);
            prop_assert_eq!(r.value_at_risk(), sorted[index]);
            prop_assert!(r.value_at_risk() >= r.min() && r.value_at_risk() <= r.max());
        }
    }
}
