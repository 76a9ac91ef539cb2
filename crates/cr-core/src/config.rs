//! Router configuration.
//!
//! # Design
//!
//! One `RouterConfig` governs how a graph is weighted and queried.  Every
//! field has a default, so an empty JSON object `{}` is a valid config:
//!
//! ```json
//! {
//!   "speeds":       { "walking_kmh": 5, "cycling_kmh": 15, "driving_kmh": 40 },
//!   "weighting":    "time",
//!   "class_speeds": { "footway": { "driving_kmh": 1 } },
//!   "locator":      "linear_scan",
//!   "solver":       "binary_heap"
//! }
//! ```
//!
//! Changing any field that feeds edge weights (speeds, weighting, class
//! speeds) requires a graph rebuild; the locator and solver choices do not.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::mode::check_speed;
use crate::{CoreError, CoreResult, SpeedTable, TravelMode};

// ── Enumerated choices ────────────────────────────────────────────────────────

/// What an edge weight measures.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeWeighting {
    /// `distance_km / speed_kmh`, in hours.  Mode-aware.
    #[default]
    Time,
    /// Raw great-circle kilometres, ignoring mode.  Kept for parity with the
    /// distance-only router; the mode then only affects the displayed time.
    Distance,
}

/// Which nearest-node strategy a graph uses.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocatorKind {
    /// O(N) scan over every node.
    #[default]
    LinearScan,
    /// R-tree over unit-sphere points, built once per graph.
    Rtree,
}

/// Which shortest-path solver the engine uses.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Dijkstra over a binary heap, O((V + E) log V).
    #[default]
    BinaryHeap,
    /// Dijkstra with O(V) minimum selection per step, O(V²) overall.
    LinearScan,
}

// ── Per-class speed overrides ─────────────────────────────────────────────────

/// Speed overrides for one line class (e.g. `footway`).  `None` falls back
/// to the mode's default speed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassSpeeds {
    pub walking_kmh: Option<f64>,
    pub cycling_kmh: Option<f64>,
    pub driving_kmh: Option<f64>,
}

impl ClassSpeeds {
    #[inline]
    pub fn speed_kmh(&self, mode: TravelMode) -> Option<f64> {
        match mode {
            TravelMode::Walking => self.walking_kmh,
            TravelMode::Cycling => self.cycling_kmh,
            TravelMode::Driving => self.driving_kmh,
        }
    }
}

// ── RouterConfig ──────────────────────────────────────────────────────────────

/// Top-level router configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Default speed per mode.
    pub speeds: SpeedTable,

    /// Whether edges are weighted by time or by distance.
    pub weighting: EdgeWeighting,

    /// Speed overrides keyed by line class.
    pub class_speeds: BTreeMap<String, ClassSpeeds>,

    /// Nearest-node strategy.
    pub locator: LocatorKind,

    /// Shortest-path solver.
    pub solver: SolverKind,
}

impl RouterConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json_str(s: &str) -> CoreResult<Self> {
        let config: RouterConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a config from a JSON file.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject any speed that is not a positive finite km/h value.
    pub fn validate(&self) -> CoreResult<()> {
        self.speeds.validate()?;
        for (class, speeds) in &self.class_speeds {
            for mode in TravelMode::ALL {
                if let Some(kmh) = speeds.speed_kmh(mode) {
                    check_speed(mode, kmh).map_err(|e| match e {
                        CoreError::Config(msg) => CoreError::Config(format!("class '{class}': {msg}")),
                        other => other,
                    })?;
                }
            }
        }
        Ok(())
    }

    /// Effective speed for `mode` on a line of the given class.
    #[inline]
    pub fn speed_kmh(&self, mode: TravelMode, class: Option<&str>) -> f64 {
        class
            .and_then(|c| self.class_speeds.get(c))
            .and_then(|s| s.speed_kmh(mode))
            .unwrap_or_else(|| self.speeds.speed_kmh(mode))
    }

    /// Edge weight for a segment of `distance_km` under this config.
    ///
    /// Always non-negative for validated configs and finite distances.
    #[inline]
    pub fn edge_weight(&self, distance_km: f64, mode: TravelMode, class: Option<&str>) -> f64 {
        match self.weighting {
            EdgeWeighting::Time => distance_km / self.speed_kmh(mode, class),
            EdgeWeighting::Distance => distance_km,
        }
    }
}
