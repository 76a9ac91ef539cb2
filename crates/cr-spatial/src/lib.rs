//! `cr-spatial` — route graph, nearest-node snapping, and shortest paths.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`graph`]      | `RouteGraph`, `GraphBuilder`, `LineFeature`              |
//! | [`locate`]     | `nearest_node` (linear scan) and the R-tree index        |
//! | [`router`]     | `Router` trait, `DijkstraRouter`, `LinearScanRouter`     |
//! | [`summary`]    | `RouteSummary`, `summarize`                              |
//! | [`engine`]     | `RouteEngine` (owned graph + atomic rebuild), `Route`    |
//! | [`geojson_io`] | GeoJSON line loading and route export                    |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                       |
//!
//! # Control flow
//!
//! ```text
//! lines + mode ──► GraphBuilder ──► RouteGraph
//! start, end   ──► nearest node ──► Router ──► path ──► summarize ──► Route
//! ```

pub mod engine;
pub mod error;
pub mod geojson_io;
pub mod graph;
pub mod locate;
pub mod router;
pub mod summary;


pub use engine::{Route, RouteEngine};
pub use error::{Endpoint, SpatialError, SpatialResult};
pub use geojson_io::{load_lines_from_path, load_lines_from_str, route_to_geojson, routes_to_collection};
pub use graph::{Adjacent, GraphBuilder, LineFeature, RouteGraph};
pub use locate::nearest_node;
pub use router::{router_for, shortest_path, DijkstraRouter, GraphPath, LinearScanRouter, Router};
pub use summary::{path_length_km, summarize, RouteSummary};
