//! Route distance and travel-time summary.
//!
//! The displayed distance is always raw great-circle kilometres along the
//! path, whatever the graph's edges were weighted by.  Distance is therefore
//! mode-independent; only the time depends on the mode.

use cr_core::{distance_km, Coordinate, SpeedTable, TravelMode};

/// Distance and estimated time for one route.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RouteSummary {
    pub distance_km: f64,
    /// Travel time rounded to the nearest whole minute.
    pub time_minutes: u64,
}

/// Sum of great-circle distances between consecutive coordinates.
pub fn path_length_km(path: &[Coordinate]) -> f64 {
    path.windows(2)
        .map(|w| distance_km(w[0], w[1]))
        .fold(0.0, |acc, d| acc + d)
}

/// Summarize `path` for `mode` using the mode's default speed.
///
/// Paths of zero or one coordinate summarize to zero distance and time.
pub fn summarize(path: &[Coordinate], mode: TravelMode, speeds: &SpeedTable) -> RouteSummary {
    let distance_km = path_length_km(path);
    let minutes = distance_km / speeds.speed_kmh(mode) * 60.0;
    RouteSummary {
        distance_km,
        // `as` saturates and maps NaN to 0.
        time_minutes: minutes.round() as u64,
    }
}
