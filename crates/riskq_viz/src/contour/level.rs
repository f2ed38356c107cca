//! Contour level types.

use serde::Serialize;
use std::fmt;

/// What a contour level represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContourKind {
    /// Empirical percentile of the grid's cell losses
    Percentile,
    /// Value-at-Risk supplied by the caller
    ValueAtRisk,
    /// Expected annual loss supplied by the caller
    ExpectedAnnualLoss,
    /// One standard deviation either side of a VaR or EAL level
    ConfidenceBand,
}

impl fmt::Display for ContourKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContourKind::Percentile => "percentile",
            ContourKind::ValueAtRisk => "VaR",
            ContourKind::ExpectedAnnualLoss => "EAL",
            ContourKind::ConfidenceBand => "confidence band",
        };
        f.write_str(name)
    }
}

/// A point on an iso-loss curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ContourPoint {
    /// Annual occurrence count
    pub frequency: f64,
    /// Per-occurrence loss, `level / frequency`
    pub severity: f64,
}

/// One iso-loss level and its polyline.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContourLevel {
    /// Display label, e.g. `P90` or `VaR +1σ`
    pub label: String,
    /// Total loss held constant along the curve
    pub value: f64,
    /// Level category
    pub kind: ContourKind,
    /// Standard deviation attached to VaR, EAL and band levels
    pub std_dev: Option<f64>,
    /// Points inside the grid rectangle, ordered by frequency; may be empty
    pub points: Vec<ContourPoint>,
}

impl ContourLevel {
    /// Whether the curve crosses the grid rectangle at all.
    #[inline]
    pub fn intersects_grid(&self) -> bool {
        !self.points.is_empty()
    }
}

/// Ordered contour levels for one grid.
///
/// Percentile levels come first in ascending order, followed by the VaR
/// group and then the EAL group, each as `[L − σ, L, L + σ]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ContourSet {
    levels: Vec<ContourLevel>,
}

impl ContourSet {
    pub(crate) fn new(levels: Vec<ContourLevel>) -> Self {
        Self { levels }
    }

    /// All levels in order.
    #[inline]
    pub fn levels(&self) -> &[ContourLevel] {
        &self.levels
    }

    /// Number of levels.
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether the set holds no levels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Levels of one kind, in order.
    pub fn of_kind(&self, kind: ContourKind) -> impl Iterator<Item = &ContourLevel> {
        self.levels.iter().filter(move |level| level.kind == kind)
    }

    /// First level with the given label.
    pub fn find(&self, label: &str) -> Option<&ContourLevel> {
        self.levels.iter().find(|level| level.label == label)
    }
}

impl<'a> IntoIterator for &'a ContourSet {
    type Item = &'a ContourLevel;
    type IntoIter = std::slice::Iter<'a, ContourLevel>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}
