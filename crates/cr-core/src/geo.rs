//! Geographic coordinate type and great-circle distance.
//!
//! Coordinates are `(lon, lat)` in degrees, matching GeoJSON position order.
//! Both components are `f64`: node identity is exact-match on the
//! coordinate, so any precision lost on load would merge or split nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres (IUGG value, the one GeoJSON tooling uses).
pub const EARTH_RADIUS_KM: f64 = 6_371.008_8;

/// A WGS-84 position, longitude first.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// `true` if both components are finite numbers.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// The exact-match identity key for this coordinate.
    #[inline]
    pub fn key(self) -> CoordKey {
        CoordKey::from(self)
    }

    /// Great-circle distance to `other` in kilometres.
    #[inline]
    pub fn distance_km(self, other: Coordinate) -> f64 {
        distance_km(self, other)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}

/// Haversine great-circle distance in kilometres on a spherical Earth.
///
/// Exactly symmetric: only absolute component differences enter the formula,
/// and the two latitude cosines are multiplied together before scaling so
/// swapping `a` and `b` never reorders a float product.  Exactly `0.0` when
/// `a == b`.  Non-finite input yields `NaN`.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).abs().to_radians();
    let d_lon = (b.lon - a.lon).abs().to_radians();

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + (d_lon * 0.5).sin().powi(2) * (lat1.cos() * lat2.cos());

    2.0 * h.sqrt().atan2((1.0 - h).sqrt()) * EARTH_RADIUS_KM
}

// ── CoordKey ──────────────────────────────────────────────────────────────────

/// Hashable identity of a coordinate: the IEEE-754 bit patterns of both
/// components.
///
/// Two coordinates share a key iff their components print identically, so
/// `-0.0` folds onto `0.0` and every `NaN` folds onto one canonical `NaN`.
/// No tolerance is applied: `0.1 + 0.2` and `0.3` are different nodes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct CoordKey {
    lon_bits: u64,
    lat_bits: u64,
}

impl From<Coordinate> for CoordKey {
    fn from(c: Coordinate) -> Self {
        Self {
            lon_bits: canonical_bits(c.lon),
            lat_bits: canonical_bits(c.lat),
        }
    }
}

#[inline]
fn canonical_bits(v: f64) -> u64 {
    if v.is_nan() {
        f64::NAN.to_bits()
    } else if v == 0.0 {
        0.0f64.to_bits()
    } else {
        v.to_bits()
    }
}
