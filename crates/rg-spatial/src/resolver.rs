//! Endpoint deduplication: map raw points to stable vertex ids.
//!
//! # Contract
//!
//! `resolve(p)` returns the id of the **first-created** vertex whose position
//! lies within `tolerance` of `p` (inclusive, Euclidean).  If none does, a new
//! vertex is created at `p` with id `count + 1`.
//!
//! Matching is point-to-existing-vertex only.  It is not transitive: a chain
//! of points each within tolerance of its neighbour can still split into
//! several vertices, and the outcome depends on call order.  Vertices never
//! move once created.
//!
//! Two strategies implement the contract:
//!
//! | Type               | Lookup           | Use when                        |
//! |--------------------|------------------|---------------------------------|
//! | [`LinearResolver`] | O(V) scan        | up to a few thousand vertices   |
//! | [`IndexedResolver`]| R-tree (`rstar`) | larger regions                  |
//!
//! Both return identical ids for any call sequence.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use rg_core::{Point, VertexId};

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Pluggable vertex resolution strategy used by `GraphBuilder`.
pub trait VertexResolver {
    /// Resolve `point` to a vertex id, creating a vertex if needed.
    fn resolve(&mut self, point: Point) -> VertexId;

    /// Vertex positions in id order (`positions()[id.slot()]`).
    fn positions(&self) -> &[Point];

    /// Merge tolerance in source units.
    fn tolerance(&self) -> f64;

    fn vertex_count(&self) -> usize {
        self.positions().len()
    }

    fn position(&self, id: VertexId) -> Option<Point> {
        if !id.is_valid() {
            return None;
        }
        self.positions().get(id.slot()).copied()
    }
}

// ── LinearResolver ────────────────────────────────────────────────────────────

/// Scans every existing vertex in creation order.
#[derive(Clone, Debug)]
pub struct LinearResolver {
    tolerance: f64,
    positions: Vec<Point>,
}

impl LinearResolver {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance, positions: Vec::new() }
    }
}

impl VertexResolver for LinearResolver {
    fn resolve(&mut self, point: Point) -> VertexId {
        if let Some(slot) = self
            .positions
            .iter()
            .position(|&v| v.is_within(point, self.tolerance))
        {
            return VertexId::from_slot(slot);
        }
        self.positions.push(point);
        VertexId::from_slot(self.positions.len() - 1)
    }

    fn positions(&self) -> &[Point] {
        &self.positions
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

// ── IndexedResolver ───────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a vertex position with its id.
#[derive(Clone)]
struct VertexEntry {
    point: [f64; 2],
    id:    VertexId,
}

impl RTreeObject for VertexEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for VertexEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

/// R-tree backed resolver.
///
/// The tree is only used to gather candidates.  Candidates are re-checked with
/// [`Point::is_within`] and the lowest id wins, which reproduces the linear
/// scan's first-created-wins rule exactly.  Non-finite points get a fresh id
/// each time, as they do under the linear scan.
pub struct IndexedResolver {
    tolerance: f64,
    positions: Vec<Point>,
    index:     RTree<VertexEntry>,
}

impl IndexedResolver {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance, positions: Vec::new(), index: RTree::new() }
    }

    /// Squared search radius, padded so that rounding in the squared
    /// comparison never drops a candidate the exact predicate would accept.
    fn search_radius_2(&self) -> f64 {
        let r = self.tolerance * (1.0 + 1e-9) + f64::EPSILON;
        r * r
    }
}

impl VertexResolver for IndexedResolver {
    fn resolve(&mut self, point: Point) -> VertexId {
        // A NaN or infinite point is never within tolerance of anything, and
        // rstar cannot order NaN distances, so it stays out of the tree.
        if !point.is_finite() {
            self.positions.push(point);
            return VertexId::from_slot(self.positions.len() - 1);
        }

        let query = [point.x, point.y];
        let hit = self
            .index
            .locate_within_distance(query, self.search_radius_2())
            .filter(|e| self.positions[e.id.slot()].is_within(point, self.tolerance))
            .map(|e| e.id)
            .min();
        if let Some(id) = hit {
            return id;
        }

        self.positions.push(point);
        let id = VertexId::from_slot(self.positions.len() - 1);
        self.index.insert(VertexEntry { point: query, id });
        id
    }

    fn positions(&self) -> &[Point] {
        &self.positions
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }
}
