//! Combining graphs built from independent geometry sources.
//!
//! Each source (e.g. one shapefile tile) is built with its own resolver, so
//! ids are only meaningful within that part.  [`merge_graphs`] re-resolves
//! every part's vertices, part by part and in id order, through one shared
//! resolver.  Endpoints shared across tile boundaries therefore collapse into
//! a single vertex under the same tolerance rule, and ids are renumbered.
//!
//! Merged ids differ from those of a single build over the concatenated
//! records; only the per-source deduplication contract is preserved.

use std::collections::BTreeSet;

use log::info;

use rg_core::{EdgeId, GraphConfig, VertexId};

use crate::builder::build_graph;
use crate::model::{Edge, RoadGraph, Vertex};
use crate::record::GeometryRecord;
use crate::resolver::{IndexedResolver, VertexResolver};
use crate::{SpatialError, SpatialResult};

/// Merge independently built graphs into one.
///
/// Edge weights and classes are carried over unchanged; heuristic coordinates
/// are recomputed from `config`.
///
/// # Errors
///
/// [`SpatialError::Config`] if `config` fails validation.
pub fn merge_graphs(parts: &[RoadGraph], config: &GraphConfig) -> SpatialResult<RoadGraph> {
    config.validate()?;

    let mut resolver = IndexedResolver::new(config.tolerance);
    let mut edges: Vec<Edge> = Vec::with_capacity(parts.iter().map(RoadGraph::edge_count).sum());
    let mut unknown_classes = BTreeSet::new();

    for part in parts {
        // remap[old.slot()] = merged id
        let remap: Vec<VertexId> = part
            .vertices()
            .iter()
            .map(|v| resolver.resolve(v.position))
            .collect();

        for e in part.edges() {
            let id = EdgeId::from_slot(edges.len());
            edges.push(Edge {
                id,
                from:   remap[e.from.slot()],
                to:     remap[e.to.slot()],
                length: e.length,
                time:   e.time,
                class:  e.class.clone(),
            });
        }
        unknown_classes.extend(part.unknown_classes().iter().cloned());
    }

    let vertices: Vec<Vertex> = resolver
        .positions()
        .iter()
        .enumerate()
        .map(|(i, &position)| Vertex {
            id: VertexId::from_slot(i),
            position,
            heuristic: config.heuristic(position),
        })
        .collect();

    info!(
        "merged {} graphs → {} vertices, {} edges",
        parts.len(),
        vertices.len(),
        edges.len()
    );
    Ok(RoadGraph::from_parts(vertices, edges, unknown_classes))
}

/// Build one graph per source, then [`merge_graphs`] them in source order.
///
/// With the `parallel` Cargo feature, sources are built concurrently on
/// Rayon's thread pool.  The result is identical either way.
///
/// # Errors
///
/// [`SpatialError::Source`] naming the first failing source (lowest index).
pub fn build_sources(
    sources: &[Vec<GeometryRecord>],
    config:  &GraphConfig,
) -> SpatialResult<RoadGraph> {
    let build_one = |(index, records): (usize, &Vec<GeometryRecord>)| {
        build_graph(records, config).map_err(|e| SpatialError::Source {
            index,
            source: Box::new(e),
        })
    };

    #[cfg(not(feature = "parallel"))]
    let parts: Vec<RoadGraph> = sources
        .iter()
        .enumerate()
        .map(build_one)
        .collect::<SpatialResult<_>>()?;

    #[cfg(feature = "parallel")]
    let parts: Vec<RoadGraph> = {
        use rayon::prelude::*;

        // Collect every outcome so the reported error is the lowest-indexed
        // one regardless of scheduling.
        let results: Vec<SpatialResult<RoadGraph>> =
            sources.par_iter().enumerate().map(build_one).collect();
        results.into_iter().collect::<SpatialResult<_>>()?
    };

    merge_graphs(&parts, config)
}
