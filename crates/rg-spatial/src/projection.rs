//! Weighted graph projections.
//!
//! # Data layout
//!
//! A projection materializes every undirected edge of a [`RoadGraph`] as two
//! directed arcs and stores them in **Compressed Sparse Row (CSR)** format.
//! Given a vertex `v`, its outgoing arcs occupy the slice:
//!
//! ```text
//! arc_to[ out_start[v.slot()] .. out_start[v.slot() + 1] ]
//! ```
//!
//! Each projection is keyed on one weight [`Metric`]: `roads_length` uses
//! edge length, `roads_time` uses travel time and carries the per-vertex
//! heuristic coordinates a time-weighted A* needs.  Searching the projection
//! is left to the consumer.

use rg_core::{EdgeId, Point, VertexId};

use crate::model::RoadGraph;

/// Which edge attribute a projection uses as arc weight.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Edge length in source units.
    Length,
    /// Travel time in seconds.
    Time,
}

impl Metric {
    /// Conventional projection name in the graph store.
    pub fn projection_name(self) -> &'static str {
        match self {
            Metric::Length => "roads_length",
            Metric::Time   => "roads_time",
        }
    }

    /// Edge property column holding this metric.
    pub fn property(self) -> &'static str {
        match self {
            Metric::Length => "length",
            Metric::Time   => "time",
        }
    }

    /// Whether projections on this metric carry heuristic node coordinates.
    pub fn has_heuristic(self) -> bool {
        matches!(self, Metric::Time)
    }
}

/// Undirected road graph in CSR form for a single weight metric.
pub struct Projection {
    metric:    Metric,
    /// CSR row pointer.  Length = `vertex_count + 1`.
    out_start: Vec<u32>,
    /// Arc destination, sorted by source vertex.
    arc_to:    Vec<VertexId>,
    /// Arc weight under `metric`.
    arc_cost:  Vec<f64>,
    /// Edge the arc was materialized from.
    arc_edge:  Vec<EdgeId>,
    /// Heuristic coordinates per vertex; empty unless `metric.has_heuristic()`.
    heuristic: Vec<Point>,
}

impl Projection {
    /// Materialize `graph` under `metric`.
    ///
    /// Parallel edges stay separate arcs.  A loop edge (both endpoints on the
    /// same vertex) yields two arcs on that vertex, as the both-directions
    /// rule implies.
    ///
    /// Time complexity: O(V + E) (counting sort on source vertex).
    pub fn new(graph: &RoadGraph, metric: Metric) -> Self {
        let vertex_count = graph.vertex_count();
        let arc_count = graph.edge_count() * 2;

        // Count out-degree per vertex, then prefix-sum into the row pointer.
        let mut out_start = vec![0u32; vertex_count + 1];
        for e in graph.edges() {
            out_start[e.from.slot() + 1] += 1;
            out_start[e.to.slot() + 1] += 1;
        }
        for i in 1..=vertex_count {
            out_start[i] += out_start[i - 1];
        }
        debug_assert_eq!(out_start[vertex_count] as usize, arc_count);

        // Scatter arcs into their rows; edges are visited in id order so each
        // row lists its arcs by ascending edge id.
        let mut cursor: Vec<u32> = out_start[..vertex_count].to_vec();
        let mut arc_to   = vec![VertexId::INVALID; arc_count];
        let mut arc_cost = vec![0.0; arc_count];
        let mut arc_edge = vec![EdgeId::INVALID; arc_count];

        for e in graph.edges() {
            let cost = match metric {
                Metric::Length => e.length,
                Metric::Time   => e.time,
            };
            for (src, dst) in [(e.from, e.to), (e.to, e.from)] {
                let at = cursor[src.slot()] as usize;
                cursor[src.slot()] += 1;
                arc_to[at]   = dst;
                arc_cost[at] = cost;
                arc_edge[at] = e.id;
            }
        }

        let heuristic = if metric.has_heuristic() {
            graph.vertices().iter().map(|v| v.heuristic).collect()
        } else {
            Vec::new()
        };

        Self { metric, out_start, arc_to, arc_cost, arc_edge, heuristic }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn name(&self) -> &'static str {
        self.metric.projection_name()
    }

    pub fn vertex_count(&self) -> usize {
        self.out_start.len() - 1
    }

    /// Number of directed arcs (twice the edge count).
    pub fn arc_count(&self) -> usize {
        self.arc_to.len()
    }

    /// Arc range of `v`; empty for `INVALID` or ids past the vertex table.
    #[inline]
    fn row(&self, v: VertexId) -> std::ops::Range<usize> {
        if !v.is_valid() || v.slot() >= self.vertex_count() {
            return 0..0;
        }
        let start = self.out_start[v.slot()] as usize;
        let end   = self.out_start[v.slot() + 1] as usize;
        start..end
    }

    /// Number of arcs leaving `v`; 0 for unknown vertices.
    #[inline]
    pub fn degree(&self, v: VertexId) -> usize {
        self.row(v).len()
    }

    /// `(neighbor, weight)` for every arc leaving `v`.
    ///
    /// This is a contiguous index range, no heap allocation.
    #[inline]
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.row(v).map(|i| (self.arc_to[i], self.arc_cost[i]))
    }

    /// Source edges of the arcs leaving `v`, in the same order as [`neighbors`](Self::neighbors).
    pub fn arc_edges(&self, v: VertexId) -> &[EdgeId] {
        &self.arc_edge[self.row(v)]
    }

    /// Heuristic coordinates of `v`; `None` for projections without a
    /// heuristic or for unknown vertices.
    pub fn heuristic(&self, v: VertexId) -> Option<Point> {
        if !v.is_valid() {
            return None;
        }
        self.heuristic.get(v.slot()).copied()
    }
}
