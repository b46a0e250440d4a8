//! Plain data row types written by output backends.
//!
//! Column order and names match the exported table headers.

use rg_spatial::{Edge, Vertex};

/// One row of the vertex table: `id,x,y,x_astar,y_astar`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexRow {
    pub id:      u32,
    pub x:       f64,
    pub y:       f64,
    pub x_astar: f64,
    pub y_astar: f64,
}

impl VertexRow {
    pub const HEADER: [&'static str; 5] = ["id", "x", "y", "x_astar", "y_astar"];
}

impl From<&Vertex> for VertexRow {
    fn from(v: &Vertex) -> Self {
        Self {
            id:      v.id.get(),
            x:       v.position.x,
            y:       v.position.y,
            x_astar: v.heuristic.x,
            y_astar: v.heuristic.y,
        }
    }
}

/// One row of the edge list: `from,to,length,time,class`.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRow {
    pub from:   u32,
    pub to:     u32,
    pub length: f64,
    pub time:   f64,
    pub class:  String,
}

impl EdgeRow {
    pub const HEADER: [&'static str; 5] = ["from", "to", "length", "time", "class"];
}

impl From<&Edge> for EdgeRow {
    fn from(e: &Edge) -> Self {
        Self {
            from:   e.from.get(),
            to:     e.to.get(),
            length: e.length,
            time:   e.time,
            class:  e.class.clone(),
        }
    }
}
