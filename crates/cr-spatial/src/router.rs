//! Routing trait and Dijkstra implementations.
//!
//! # Solvers
//!
//! | Solver               | Minimum selection   | Complexity         |
//! |----------------------|---------------------|--------------------|
//! | [`DijkstraRouter`]   | binary heap         | O((V + E) log V)   |
//! | [`LinearScanRouter`] | scan of all nodes   | O(V²)              |
//!
//! Both pick the unvisited node with the lowest tentative cost, breaking
//! ties by lowest `NodeId` (insertion order), relax neighbours in adjacency
//! order, and replace a predecessor only on a strictly lower cost.  They
//! therefore return the same path, not just the same cost.
//!
//! Edge weights must be non-negative; a negative weight would silently
//! produce wrong paths.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use cr_core::{Coordinate, NodeId, SolverKind};

use crate::graph::RouteGraph;
use crate::{SpatialError, SpatialResult};

// ── GraphPath ─────────────────────────────────────────────────────────────────

/// A resolved path: node ids from source to destination, endpoints
/// included, and the summed edge weight.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphPath {
    pub nodes: Vec<NodeId>,
    /// Sum of edge weights along the path, in the graph's weight unit.
    pub cost: f64,
}

impl GraphPath {
    /// Coordinates of the path's nodes, in order.
    pub fn coordinates(&self, graph: &RouteGraph) -> Vec<Coordinate> {
        self.nodes
            .iter()
            .filter_map(|&n| graph.coordinate(n))
            .collect()
    }

    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path solver.
///
/// Implementations must be `Send + Sync` so one solver can serve concurrent
/// queries against a shared graph.
pub trait Router: Send + Sync {
    /// Compute the minimum-weight path from `from` to `to`.
    ///
    /// `from == to` yields a single-node path.  Unknown ids fail with
    /// [`SpatialError::NodeNotFound`]; disconnected endpoints with
    /// [`SpatialError::NoPath`].
    fn shortest_path(&self, graph: &RouteGraph, from: NodeId, to: NodeId) -> SpatialResult<GraphPath>;
}

/// Dijkstra over a binary heap with lazy deletion.
pub struct DijkstraRouter;

/// Dijkstra with a linear scan for the minimum; the reference behaviour.
pub struct LinearScanRouter;

impl Router for DijkstraRouter {
    fn shortest_path(&self, graph: &RouteGraph, from: NodeId, to: NodeId) -> SpatialResult<GraphPath> {
        dijkstra_heap(graph, from, to)
    }
}

impl Router for LinearScanRouter {
    fn shortest_path(&self, graph: &RouteGraph, from: NodeId, to: NodeId) -> SpatialResult<GraphPath> {
        dijkstra_linear(graph, from, to)
    }
}

/// The solver selected by a config.
pub fn router_for(kind: SolverKind) -> &'static dyn Router {
    match kind {
        SolverKind::BinaryHeap => &DijkstraRouter,
        SolverKind::LinearScan => &LinearScanRouter,
    }
}

/// Coordinates of the shortest path from `from` to `to`.
///
/// Empty when either id is absent or no path exists; use a [`Router`]
/// directly to tell those cases apart.
pub fn shortest_path(graph: &RouteGraph, from: NodeId, to: NodeId) -> Vec<Coordinate> {
    DijkstraRouter
        .shortest_path(graph, from, to)
        .map(|p| p.coordinates(graph))
        .unwrap_or_default()
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn check_endpoints(graph: &RouteGraph, from: NodeId, to: NodeId) -> SpatialResult<()> {
    for id in [from, to] {
        if !graph.contains(id) {
            return Err(SpatialError::NodeNotFound(id));
        }
    }
    Ok(())
}

/// Heap entry ordered so `BinaryHeap` (a max-heap) pops the lowest cost
/// first, then the lowest `NodeId`.
#[derive(Copy, Clone, PartialEq)]
struct HeapEntry {
    cost: f64,
    node: NodeId,
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn dijkstra_heap(graph: &RouteGraph, from: NodeId, to: NodeId) -> SpatialResult<GraphPath> {
    check_endpoints(graph, from, to)?;
    if from == to {
        return Ok(GraphPath { nodes: vec![from], cost: 0.0 });
    }

    let n = graph.node_count();
    // dist[v] = best known cost to reach v.
    let mut dist = vec![f64::INFINITY; n];
    // prev[v] = node that reached v; NodeId::INVALID for unreached nodes.
    let mut prev = vec![NodeId::INVALID; n];
    let mut settled = vec![false; n];

    dist[from.index()] = 0.0;
    let mut heap = BinaryHeap::new();
    heap.push(HeapEntry { cost: 0.0, node: from });

    while let Some(HeapEntry { cost, node }) = heap.pop() {
        // Skip stale heap entries.
        if settled[node.index()] {
            continue;
        }
        settled[node.index()] = true;

        if node == to {
            return Ok(reconstruct(&prev, from, to, cost));
        }

        for adj in graph.neighbors(node) {
            let alt = cost + adj.weight;
            if alt < dist[adj.node.index()] {
                dist[adj.node.index()] = alt;
                prev[adj.node.index()] = node;
                heap.push(HeapEntry { cost: alt, node: adj.node });
            }
        }
    }

    debug!(%from, %to, "no path between nodes");
    Err(SpatialError::NoPath { from, to })
}

fn dijkstra_linear(graph: &RouteGraph, from: NodeId, to: NodeId) -> SpatialResult<GraphPath> {
    check_endpoints(graph, from, to)?;
    if from == to {
        return Ok(GraphPath { nodes: vec![from], cost: 0.0 });
    }

    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev = vec![NodeId::INVALID; n];
    let mut visited = vec![false; n];

    dist[from.index()] = 0.0;

    loop {
        // First unvisited node at the strict minimum; unreached nodes
        // (infinite cost) are never selected.
        let mut current: Option<usize> = None;
        let mut min_cost = f64::INFINITY;
        for (i, &d) in dist.iter().enumerate() {
            if !visited[i] && d < min_cost {
                min_cost = d;
                current = Some(i);
            }
        }
        let Some(cur) = current else { break };
        visited[cur] = true;

        let node = NodeId(cur as u32);
        if node == to {
            return Ok(reconstruct(&prev, from, to, min_cost));
        }

        for adj in graph.neighbors(node) {
            let alt = min_cost + adj.weight;
            if alt < dist[adj.node.index()] {
                dist[adj.node.index()] = alt;
                prev[adj.node.index()] = node;
            }
        }
    }

    debug!(%from, %to, "no path between nodes");
    Err(SpatialError::NoPath { from, to })
}

fn reconstruct(prev: &[NodeId], from: NodeId, to: NodeId, cost: f64) -> GraphPath {
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        cur = prev[cur.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    GraphPath { nodes, cost }
}
