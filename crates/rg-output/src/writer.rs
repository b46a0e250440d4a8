//! The `GraphSink` trait implemented by all backends.

use log::info;

use rg_spatial::RoadGraph;

use crate::{EdgeRow, OutputResult, VertexRow};

/// Trait implemented by the CSV exporter and the SQLite graph store.
///
/// Callers must write every vertex before any edge that references it;
/// [`export_graph`] does this.
pub trait GraphSink {
    /// Write a batch of vertex rows.
    fn write_vertices(&mut self, rows: &[VertexRow]) -> OutputResult<()>;

    /// Write a batch of undirected edge rows.
    fn write_edges(&mut self, rows: &[EdgeRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write `graph` to `sink` (vertices, then edges) and finish it.
pub fn export_graph<S: GraphSink + ?Sized>(sink: &mut S, graph: &RoadGraph) -> OutputResult<()> {
    let vertices: Vec<VertexRow> = graph.vertices().iter().map(VertexRow::from).collect();
    sink.write_vertices(&vertices)?;

    let edges: Vec<EdgeRow> = graph.edges().iter().map(EdgeRow::from).collect();
    sink.write_edges(&edges)?;

    sink.finish()?;
    info!("exported {} vertices and {} edges", vertices.len(), edges.len());
    Ok(())
}
