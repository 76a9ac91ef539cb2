//! `cr-core` — foundational types for the `campus_route` engine.
//!
//! This crate is a dependency of every other `cr-*` crate.  It has no `cr-*`
//! dependencies and few external ones (`thiserror`, plus `serde` and
//! `serde_json` for the config loader).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `NodeId`                                                  |
//! | [`geo`]     | `Coordinate`, `CoordKey`, haversine `distance_km`         |
//! | [`mode`]    | `TravelMode`, `SpeedTable`                                |
//! | [`config`]  | `RouterConfig`, `EdgeWeighting`, locator/solver choices   |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod mode;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ClassSpeeds, EdgeWeighting, LocatorKind, RouterConfig, SolverKind};
pub use error::{CoreError, CoreResult};
pub use geo::{distance_km, CoordKey, Coordinate, EARTH_RADIUS_KM};
pub use ids::NodeId;
pub use mode::{SpeedTable, TravelMode};
