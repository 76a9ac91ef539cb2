//! Travel modes and their speed table.
//!
//! The mode set is closed.  A mode is session state: changing it invalidates
//! any graph whose edge weights were derived from the previous mode's speed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// How the user is travelling.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Walking,
    Cycling,
    Driving,
}

impl TravelMode {
    pub const ALL: [TravelMode; 3] = [TravelMode::Walking, TravelMode::Cycling, TravelMode::Driving];

    /// Lower-case label, as used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Cycling => "cycling",
            TravelMode::Driving => "driving",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walking" | "walk" | "foot" => Ok(TravelMode::Walking),
            "cycling" | "cycle" | "bike" => Ok(TravelMode::Cycling),
            "driving" | "drive" | "car" => Ok(TravelMode::Driving),
            other => Err(CoreError::Parse(format!("unknown travel mode '{other}'"))),
        }
    }
}

// ── SpeedTable ────────────────────────────────────────────────────────────────

/// Assumed speed per mode, in km/h.
///
/// | Mode    | Default |
/// |---------|---------|
/// | Walking | 5 km/h  |
/// | Cycling | 15 km/h |
/// | Driving | 40 km/h |
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedTable {
    pub walking_kmh: f64,
    pub cycling_kmh: f64,
    pub driving_kmh: f64,
}

impl SpeedTable {
    #[inline]
    pub fn speed_kmh(&self, mode: TravelMode) -> f64 {
        match mode {
            TravelMode::Walking => self.walking_kmh,
            TravelMode::Cycling => self.cycling_kmh,
            TravelMode::Driving => self.driving_kmh,
        }
    }

    /// Reject speeds that would produce negative, infinite or `NaN` weights.
    pub fn validate(&self) -> Result<(), CoreError> {
        for mode in TravelMode::ALL {
            check_speed(mode, self.speed_kmh(mode))?;
        }
        Ok(())
    }
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self { walking_kmh: 5.0, cycling_kmh: 15.0, driving_kmh: 40.0 }
    }
}

pub(crate) fn check_speed(mode: TravelMode, kmh: f64) -> Result<(), CoreError> {
    if kmh.is_finite() && kmh > 0.0 {
        Ok(())
    } else {
        Err(CoreError::Config(format!("{mode} speed must be a positive number of km/h, got {kmh}")))
    }
}
