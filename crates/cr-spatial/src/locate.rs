//! Nearest-node snapping.
//!
//! [`nearest_node`] is the reference: a linear scan over every node using
//! [`distance_km`], keeping the first node seen at the minimum distance.
//! Nodes with non-finite coordinates are skipped.  O(N) per query.
//!
//! The optional R-tree returns the same node in O(log N).  It indexes nodes
//! as points on the unit sphere, where straight-line (chord) distance grows
//! monotonically with great-circle distance, so the R-tree's Euclidean
//! nearest neighbour is the great-circle nearest neighbour.  Candidates
//! within rounding tolerance of the best chord are re-ranked with
//! `distance_km` and lowest `NodeId`, which reproduces the scan's tie-break.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tracing::debug;

use cr_core::{distance_km, Coordinate, NodeId};

use crate::graph::RouteGraph;

/// Linear-scan nearest node to `point` with finite coordinates.
///
/// Returns `None` for an empty graph, a graph whose nodes are all
/// non-finite, or a non-finite query point.
pub fn nearest_node(graph: &RouteGraph, point: Coordinate) -> Option<NodeId> {
    if !point.is_finite() {
        debug!(%point, "query point is not finite");
        return None;
    }

    let mut best: Option<NodeId> = None;
    let mut best_km = f64::INFINITY;
    for (id, pos) in graph.nodes() {
        if !pos.is_finite() {
            continue;
        }
        let d = distance_km(pos, point);
        if d < best_km {
            best_km = d;
            best = Some(id);
        }
    }
    best
}

// ── R-tree index ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a unit-sphere `[x, y, z]` point with the
/// associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 3],
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared chord length on the unit sphere.
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

#[inline]
fn unit_vector(c: Coordinate) -> [f64; 3] {
    let (lat, lon) = (c.lat.to_radians(), c.lon.to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

/// Relative slack on the squared chord when collecting tie candidates.
const CHORD2_REL_TOL: f64 = 1e-6;
/// Absolute slack, for queries sitting (almost) exactly on a node.
const CHORD2_ABS_TOL: f64 = 1e-18;

pub(crate) struct SpatialIndex {
    tree: RTree<NodeEntry>,
}

impl SpatialIndex {
    /// Bulk-load every finite node.
    pub(crate) fn build(nodes: &[Coordinate]) -> Self {
        let entries: Vec<NodeEntry> = nodes
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_finite())
            .map(|(i, &c)| NodeEntry { point: unit_vector(c), id: NodeId(i as u32) })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub(crate) fn nearest(&self, nodes: &[Coordinate], point: Coordinate) -> Option<NodeId> {
        if !point.is_finite() {
            debug!(%point, "query point is not finite");
            return None;
        }

        let query = unit_vector(point);
        let mut iter = self.tree.nearest_neighbor_iter_with_distance_2(&query);
        let (first, first_d2) = iter.next()?;
        let limit = first_d2 + first_d2 * CHORD2_REL_TOL + CHORD2_ABS_TOL;

        let mut best = first.id;
        let mut best_km = distance_km(nodes[best.index()], point);
        for (entry, d2) in iter {
            if d2 > limit {
                break;
            }
            let d = distance_km(nodes[entry.id.index()], point);
            if d < best_km || (d == best_km && entry.id < best) {
                best = entry.id;
                best_km = d;
            }
        }
        Some(best)
    }
}
