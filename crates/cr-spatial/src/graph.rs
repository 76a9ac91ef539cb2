//! Route graph representation and builder.
//!
//! # Data layout
//!
//! Nodes are stored densely and indexed by `NodeId`, assigned in first-seen
//! order as segment endpoints are registered.  A hash index keyed by
//! [`CoordKey`] maps each distinct coordinate back to its node, so a
//! coordinate appearing in many lines is registered exactly once.
//!
//! Adjacency is a list per node of `(neighbor, weight)` pairs in insertion
//! order.  Every segment inserts itself into both endpoints' lists with the
//! same weight.  Parallel edges are kept; relaxation simply prefers the
//! lighter one.  Segments touching a non-finite coordinate register their
//! nodes but no edge, so every stored weight is finite and non-negative.
//!
//! # Immutability
//!
//! A `RouteGraph` is never patched.  New geometry or a new travel mode means
//! building a fresh graph and replacing the old one wholesale (see
//! [`RouteEngine`](crate::RouteEngine)).

use std::borrow::Borrow;

use rustc_hash::FxHashMap;
use tracing::{info, warn};

use cr_core::{
    distance_km, CoordKey, Coordinate, EdgeWeighting, LocatorKind, NodeId, RouterConfig, TravelMode,
};

use crate::locate::{self, SpatialIndex};

// ── LineFeature ───────────────────────────────────────────────────────────────

/// One line geometry: a coordinate sequence plus an optional class used to
/// look up per-class speed overrides.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineFeature {
    pub coords: Vec<Coordinate>,
    pub class: Option<String>,
}

impl LineFeature {
    pub fn new(coords: Vec<Coordinate>) -> Self {
        Self { coords, class: None }
    }

    pub fn with_class(coords: Vec<Coordinate>, class: impl Into<String>) -> Self {
        Self { coords, class: Some(class.into()) }
    }

    /// Number of segments (consecutive coordinate pairs).
    pub fn segment_count(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }
}

impl From<Vec<Coordinate>> for LineFeature {
    fn from(coords: Vec<Coordinate>) -> Self {
        Self::new(coords)
    }
}

impl From<Vec<[f64; 2]>> for LineFeature {
    fn from(coords: Vec<[f64; 2]>) -> Self {
        Self::new(coords.into_iter().map(Coordinate::from).collect())
    }
}

// ── RouteGraph ────────────────────────────────────────────────────────────────

/// One adjacency entry: the neighbour reached and the edge weight.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Adjacent {
    pub node: NodeId,
    pub weight: f64,
}

/// Weighted, undirected route graph plus the node-identity index.
///
/// Do not construct directly; use [`RouteGraph::build`] or [`GraphBuilder`].
pub struct RouteGraph {
    /// Originating coordinate of each node.  Indexed by `NodeId`.
    node_pos: Vec<Coordinate>,

    /// Exact-match identity index.
    key_index: FxHashMap<CoordKey, NodeId>,

    /// Neighbours of each node, in insertion order.  Indexed by `NodeId`.
    adjacency: Vec<Vec<Adjacent>>,

    /// Undirected segments registered (each appears twice in `adjacency`).
    edge_count: usize,

    /// Sum of undirected edge weights.
    total_weight: f64,

    mode: TravelMode,
    weighting: EdgeWeighting,

    /// Present only when the config asks for the R-tree locator.
    spatial_idx: Option<SpatialIndex>,
}

impl RouteGraph {
    /// Build a graph from line features for the given mode.
    ///
    /// An empty feature collection produces an empty graph, never an error.
    pub fn build<I>(lines: I, mode: TravelMode, config: &RouterConfig) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<LineFeature>,
    {
        let mut builder = GraphBuilder::new(mode, config);
        for line in lines {
            builder.add_line(line.borrow());
        }
        builder.build()
    }

    /// A graph with no nodes or edges.  Every query against it fails.
    pub fn empty(mode: TravelMode, weighting: EdgeWeighting) -> Self {
        Self {
            node_pos: Vec::new(),
            key_index: FxHashMap::default(),
            adjacency: Vec::new(),
            edge_count: 0,
            total_weight: 0.0,
            mode,
            weighting,
            spatial_idx: None,
        }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// Mode whose speeds were baked into the edge weights.
    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    pub fn weighting(&self) -> EdgeWeighting {
        self.weighting
    }

    // ── Node access ───────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.node_pos.len()
    }

    #[inline]
    pub fn coordinate(&self, id: NodeId) -> Option<Coordinate> {
        self.node_pos.get(id.index()).copied()
    }

    /// Node registered for exactly this coordinate, if any.
    pub fn node_id(&self, coord: Coordinate) -> Option<NodeId> {
        self.key_index.get(&coord.key()).copied()
    }

    /// All node positions, indexed by `NodeId`.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.node_pos
    }

    /// `(NodeId, Coordinate)` pairs in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, Coordinate)> + '_ {
        self.node_pos
            .iter()
            .enumerate()
            .map(|(i, &c)| (NodeId(i as u32), c))
    }

    /// Neighbours of `id` in insertion order; empty for unknown ids.
    #[inline]
    pub fn neighbors(&self, id: NodeId) -> &[Adjacent] {
        self.adjacency
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Nearest node with finite coordinates to `point`, by great-circle
    /// distance.  Ties go to the node inserted first.
    ///
    /// Uses the R-tree when the graph was built with one, otherwise scans.
    pub fn nearest(&self, point: Coordinate) -> Option<NodeId> {
        match &self.spatial_idx {
            Some(idx) => idx.nearest(&self.node_pos, point),
            None => locate::nearest_node(self, point),
        }
    }

    pub fn has_spatial_index(&self) -> bool {
        self.spatial_idx.is_some()
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`RouteGraph`] segment by segment, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use cr_core::{Coordinate, RouterConfig, TravelMode};
/// use cr_spatial::GraphBuilder;
///
/// let config = RouterConfig::default();
/// let mut b = GraphBuilder::new(TravelMode::Walking, &config);
/// b.add_segment(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0), None);
/// let graph = b.build();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
pub struct GraphBuilder<'c> {
    config: &'c RouterConfig,
    mode: TravelMode,
    node_pos: Vec<Coordinate>,
    key_index: FxHashMap<CoordKey, NodeId>,
    adjacency: Vec<Vec<Adjacent>>,
    edge_count: usize,
    total_weight: f64,
    non_finite: usize,
    skipped_segments: usize,
}

impl<'c> GraphBuilder<'c> {
    pub fn new(mode: TravelMode, config: &'c RouterConfig) -> Self {
        Self {
            config,
            mode,
            node_pos: Vec::new(),
            key_index: FxHashMap::default(),
            adjacency: Vec::new(),
            edge_count: 0,
            total_weight: 0.0,
            non_finite: 0,
            skipped_segments: 0,
        }
    }

    /// Register `coord` as a node, reusing the existing node if the exact
    /// coordinate was seen before.
    pub fn add_node(&mut self, coord: Coordinate) -> NodeId {
        let key = coord.key();
        if let Some(&id) = self.key_index.get(&key) {
            return id;
        }
        let id = NodeId(self.node_pos.len() as u32);
        if !coord.is_finite() {
            self.non_finite += 1;
        }
        self.node_pos.push(coord);
        self.adjacency.push(Vec::new());
        self.key_index.insert(key, id);
        id
    }

    /// Register one segment: both endpoints plus a bidirectional edge whose
    /// weight follows the config's weighting for the builder's mode.
    ///
    /// Both endpoints always become nodes.  A segment whose weight is not
    /// finite (a non-finite endpoint) gets no edge.
    pub fn add_segment(&mut self, a: Coordinate, b: Coordinate, class: Option<&str>) {
        let from = self.add_node(a);
        let to = self.add_node(b);
        let weight = self.config.edge_weight(distance_km(a, b), self.mode, class);
        if !weight.is_finite() {
            self.skipped_segments += 1;
            return;
        }
        self.add_edge(from, to, weight);
    }

    /// Register every consecutive pair of `line` as a segment.
    pub fn add_line(&mut self, line: &LineFeature) {
        for pair in line.coords.windows(2) {
            self.add_segment(pair[0], pair[1], line.class.as_deref());
        }
    }

    fn add_edge(&mut self, a: NodeId, b: NodeId, weight: f64) {
        self.adjacency[a.index()].push(Adjacent { node: b, weight });
        self.adjacency[b.index()].push(Adjacent { node: a, weight });
        self.edge_count += 1;
        self.total_weight += weight;
    }

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Consume the builder and produce a [`RouteGraph`].
    pub fn build(self) -> RouteGraph {
        if self.non_finite > 0 {
            warn!(
                count = self.non_finite,
                skipped_segments = self.skipped_segments,
                "route graph has nodes with non-finite coordinates; they get no edges and are never snapped to"
            );
        }

        let spatial_idx = match self.config.locator {
            LocatorKind::Rtree => Some(SpatialIndex::build(&self.node_pos)),
            LocatorKind::LinearScan => None,
        };

        info!(
            nodes = self.node_pos.len(),
            edges = self.edge_count,
            mode = %self.mode,
            weighting = ?self.config.weighting,
            "built route graph"
        );

        RouteGraph {
            node_pos: self.node_pos,
            key_index: self.key_index,
            adjacency: self.adjacency,
            edge_count: self.edge_count,
            total_weight: self.total_weight,
            mode: self.mode,
            weighting: self.config.weighting,
            spatial_idx,
        }
    }
}
