//! The finished vertex table and edge list.
//!
//! `RoadGraph` is the hand-off structure between graph construction and the
//! export/store collaborators in `rg-output`.  Vertices are stored in id order
//! and edges in input-record order, so `vertices[id.slot()].id == id` and
//! `edges[id.slot()].id == id` hold for every element.

use std::collections::BTreeSet;

use rg_core::{EdgeId, Point, VertexId};

/// A resolved network node.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    pub id:        VertexId,
    /// Position of the first point that created this vertex.
    pub position:  Point,
    /// `position / max_speed_kmh`: the A* heuristic coordinate space for the
    /// time metric.
    pub heuristic: Point,
}

/// An undirected road segment.  `from`/`to` keep input order but either
/// direction is a valid traversal.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub id:     EdgeId,
    pub from:   VertexId,
    pub to:     VertexId,
    /// Polyline length in source units.
    pub length: f64,
    /// Traversal time in seconds at the class's nominal speed.
    pub time:   f64,
    pub class:  String,
}

impl Edge {
    /// The endpoint opposite `v`, or `None` if `v` is not an endpoint.
    pub fn other_end(&self, v: VertexId) -> Option<VertexId> {
        if v == self.from {
            Some(self.to)
        } else if v == self.to {
            Some(self.from)
        } else {
            None
        }
    }

    /// `true` if both endpoints resolved to the same vertex.
    pub fn is_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Complete output of one build run.
///
/// Do not construct directly; use `GraphBuilder` or `merge_graphs`.
#[derive(Clone, Debug, Default)]
pub struct RoadGraph {
    pub(crate) vertices:        Vec<Vertex>,
    pub(crate) edges:           Vec<Edge>,
    pub(crate) unknown_classes: BTreeSet<String>,
}

impl RoadGraph {
    /// Assemble a graph from parts that already satisfy the id invariants.
    pub(crate) fn from_parts(
        vertices:        Vec<Vertex>,
        edges:           Vec<Edge>,
        unknown_classes: BTreeSet<String>,
    ) -> Self {
        let graph = Self { vertices, edges, unknown_classes };
        debug_assert!(graph.is_consistent(), "edge references a missing vertex");
        graph
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices in id order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Edges in input-record order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        if !id.is_valid() {
            return None;
        }
        self.vertices.get(id.slot())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        if !id.is_valid() {
            return None;
        }
        self.edges.get(id.slot())
    }

    /// Road classes seen during the build that fell back to the default speed.
    pub fn unknown_classes(&self) -> &BTreeSet<String> {
        &self.unknown_classes
    }

    /// Total length of all edges in source units.
    pub fn total_length(&self) -> f64 {
        self.edges.iter().map(|e| e.length).sum()
    }

    /// Every edge endpoint names a vertex in the table, and every id matches
    /// its storage slot.
    pub fn is_consistent(&self) -> bool {
        let n = self.vertices.len();
        let in_table = |v: VertexId| v.is_valid() && v.slot() < n;

        self.vertices.iter().enumerate().all(|(i, v)| v.id == VertexId::from_slot(i))
            && self.edges.iter().enumerate().all(|(i, e)| {
                e.id == EdgeId::from_slot(i) && in_table(e.from) && in_table(e.to)
            })
    }
}
