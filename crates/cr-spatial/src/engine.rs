//! Route engine: the owned graph plus the query pipeline.
//!
//! # Rebuild and swap
//!
//! The engine never mutates a graph in place.  [`set_lines`] and
//! [`set_mode`] build a complete new [`RouteGraph`] and then swap the shared
//! `Arc` under a short write lock.  A query clones the `Arc` under a read
//! lock and runs entirely against that snapshot, so it never observes a
//! partially built graph.  Rebuilds are serialised by a separate mutex so
//! at most one is in flight.
//!
//! Each swap bumps a generation counter.  A [`Route`] records the generation
//! it was solved against; [`is_current`] tells a caller whether a result has
//! been superseded by a rebuild and may be discarded.
//!
//! [`set_lines`]: RouteEngine::set_lines
//! [`set_mode`]: RouteEngine::set_mode
//! [`is_current`]: RouteEngine::is_current

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use cr_core::{Coordinate, NodeId, RouterConfig, TravelMode};

use crate::graph::{LineFeature, RouteGraph};
use crate::router::router_for;
use crate::summary::{summarize, RouteSummary};
use crate::{Endpoint, SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// A successful route: the path to draw and the summary to display.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Path coordinates, endpoints included.
    pub coords: Vec<Coordinate>,
    /// Graph nodes along the path.
    pub nodes: Vec<NodeId>,
    pub summary: RouteSummary,
    /// Mode the route was solved and timed for.
    pub mode: TravelMode,
    /// Graph generation the route was solved against.
    pub generation: u64,
}

impl Route {
    /// `true` if both endpoints snapped to the same node.
    pub fn is_zero_length(&self) -> bool {
        self.nodes.len() <= 1
    }
}

// ── RouteEngine ───────────────────────────────────────────────────────────────

struct EngineState {
    lines: Arc<Vec<LineFeature>>,
    mode: TravelMode,
    graph: Arc<RouteGraph>,
    generation: u64,
}

/// Owns the current graph and answers route queries against it.
///
/// `RouteEngine` is `Send + Sync`; share it behind an `Arc` to query from
/// several threads while another rebuilds.
pub struct RouteEngine {
    config: RouterConfig,
    state: RwLock<EngineState>,
    rebuild: Mutex<()>,
}

impl RouteEngine {
    /// Create an engine with no geometry loaded.
    ///
    /// Fails if the config carries an invalid speed.
    pub fn new(config: RouterConfig, mode: TravelMode) -> SpatialResult<Self> {
        config.validate()?;
        let graph = Arc::new(RouteGraph::empty(mode, config.weighting));
        Ok(Self {
            config,
            state: RwLock::new(EngineState {
                lines: Arc::new(Vec::new()),
                mode,
                graph,
                generation: 0,
            }),
            rebuild: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn mode(&self) -> TravelMode {
        self.state.read().mode
    }

    pub fn generation(&self) -> u64 {
        self.state.read().generation
    }

    /// Snapshot of the current graph.
    pub fn graph(&self) -> Arc<RouteGraph> {
        Arc::clone(&self.state.read().graph)
    }

    /// Replace the line geometry and rebuild the graph.
    ///
    /// Returns the new generation.
    pub fn set_lines(&self, lines: Vec<LineFeature>) -> u64 {
        let _guard = self.rebuild.lock();
        let mode = self.state.read().mode;
        let lines = Arc::new(lines);
        let graph = Arc::new(RouteGraph::build(lines.iter(), mode, &self.config));
        self.swap(lines, mode, graph)
    }

    /// Switch travel mode, rebuilding the graph since edge weights depend on
    /// it.  Returns `false` if `mode` is already active.
    pub fn set_mode(&self, mode: TravelMode) -> bool {
        let _guard = self.rebuild.lock();
        let lines = {
            let state = self.state.read();
            if state.mode == mode {
                return false;
            }
            Arc::clone(&state.lines)
        };
        let graph = Arc::new(RouteGraph::build(lines.iter(), mode, &self.config));
        self.swap(lines, mode, graph);
        true
    }

    fn swap(&self, lines: Arc<Vec<LineFeature>>, mode: TravelMode, graph: Arc<RouteGraph>) -> u64 {
        let mut state = self.state.write();
        state.lines = lines;
        state.mode = mode;
        state.graph = graph;
        state.generation += 1;
        info!(
            generation = state.generation,
            %mode,
            nodes = state.graph.node_count(),
            "route graph swapped"
        );
        state.generation
    }

    /// `false` once the graph `route` was solved against has been replaced.
    pub fn is_current(&self, route: &Route) -> bool {
        route.generation == self.generation()
    }

    /// Snap `point` to the nearest node of the current graph.
    pub fn locate(&self, point: Coordinate) -> Option<NodeId> {
        self.graph().nearest(point)
    }

    /// Route between two query points.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    ///
    /// - [`SpatialError::InvalidQuery`]: an endpoint was not supplied.
    /// - [`SpatialError::MissingInput`]: no geometry is loaded.
    /// - [`SpatialError::UnresolvedEndpoint`]: no finite node to snap to.
    /// - [`SpatialError::NoPath`]: the snapped nodes are not connected.
    pub fn route(&self, start: Option<Coordinate>, end: Option<Coordinate>) -> SpatialResult<Route> {
        let (start, end) = match (start, end) {
            (Some(s), Some(e)) => (s, e),
            (None, None) => return Err(SpatialError::InvalidQuery { missing: Endpoint::Both }),
            (None, Some(_)) => return Err(SpatialError::InvalidQuery { missing: Endpoint::Start }),
            (Some(_), None) => return Err(SpatialError::InvalidQuery { missing: Endpoint::End }),
        };

        let (graph, generation) = {
            let state = self.state.read();
            (Arc::clone(&state.graph), state.generation)
        };

        if graph.is_empty() {
            return Err(SpatialError::MissingInput);
        }

        let from = graph
            .nearest(start)
            .ok_or(SpatialError::UnresolvedEndpoint { endpoint: Endpoint::Start })?;
        let to = graph
            .nearest(end)
            .ok_or(SpatialError::UnresolvedEndpoint { endpoint: Endpoint::End })?;

        let path = router_for(self.config.solver).shortest_path(&graph, from, to)?;
        let coords = path.coordinates(&graph);
        let summary = summarize(&coords, graph.mode(), &self.config.speeds);

        debug!(
            %from,
            %to,
            hops = path.nodes.len(),
            distance_km = summary.distance_km,
            minutes = summary.time_minutes,
            generation,
            "route solved"
        );

        Ok(Route {
            coords,
            nodes: path.nodes,
            summary,
            mode: graph.mode(),
            generation,
        })
    }
}
