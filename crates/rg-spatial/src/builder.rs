//! Graph construction from geometry records.
//!
//! # Per-record steps
//!
//! ```text
//! validate(record)                      // reject before touching the resolver
//! from  = resolver.resolve(record.start)
//! to    = resolver.resolve(record.end)
//! speed = speeds.speed_kmh(class) / 3.6 // m/s, unknown class → default
//! time  = length / speed                // seconds
//! edges.push(Edge { from, to, length, time, class })
//! ```
//!
//! Records are never merged: two records with the same endpoint pair produce
//! two parallel edges.

use std::collections::BTreeSet;

use log::{debug, info};

use rg_core::{EdgeId, GraphConfig, VertexId};

use crate::model::{Edge, RoadGraph, Vertex};
use crate::record::GeometryRecord;
use crate::resolver::{LinearResolver, VertexResolver};
use crate::{SpatialError, SpatialResult};

/// Accumulates edges record by record, then produces a [`RoadGraph`].
///
/// # Example
///
/// ```
/// use rg_core::{GraphConfig, Point};
/// use rg_spatial::{GeometryRecord, GraphBuilder};
///
/// let mut b = GraphBuilder::new(GraphConfig::default()).unwrap();
/// b.add_record(&GeometryRecord::new(Point::new(0.0, 0.0), Point::new(1000.0, 0.0), 1000.0, "A"))
///     .unwrap();
/// let graph = b.build();
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
pub struct GraphBuilder<R: VertexResolver = LinearResolver> {
    config:          GraphConfig,
    resolver:        R,
    edges:           Vec<Edge>,
    unknown_classes: BTreeSet<String>,
}

impl GraphBuilder<LinearResolver> {
    /// Builder with the default linear-scan resolver.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::Config`] if `config` fails validation.
    pub fn new(config: GraphConfig) -> SpatialResult<Self> {
        let resolver = LinearResolver::new(config.tolerance);
        Self::with_resolver(config, resolver)
    }
}

impl<R: VertexResolver> GraphBuilder<R> {
    /// Builder using a caller-supplied resolver strategy.
    ///
    /// The resolver's own tolerance is used for matching; pass one
    /// constructed with `config.tolerance` unless you mean otherwise.
    pub fn with_resolver(config: GraphConfig, resolver: R) -> SpatialResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            resolver,
            edges: Vec::new(),
            unknown_classes: BTreeSet::new(),
        })
    }

    /// Pre-allocate the edge list for `records` inputs.
    pub fn reserve(&mut self, records: usize) {
        self.edges.reserve(records);
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn vertex_count(&self) -> usize {
        self.resolver.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Add one record as an edge and return its id.
    ///
    /// # Errors
    ///
    /// A rejected record leaves the builder unchanged (no vertex is created).
    ///
    /// - [`SpatialError::InvalidGeometry`]: an endpoint has NaN/infinite coordinates.
    /// - [`SpatialError::InvalidLength`]: length is negative or not finite.
    /// - [`SpatialError::InvalidWeight`]: the computed time is not finite.
    pub fn add_record(&mut self, record: &GeometryRecord) -> SpatialResult<EdgeId> {
        if !(record.start.is_finite() && record.end.is_finite()) {
            return Err(SpatialError::InvalidGeometry { start: record.start, end: record.end });
        }
        if !(record.length.is_finite() && record.length >= 0.0) {
            return Err(SpatialError::InvalidLength(record.length));
        }

        let speeds = &self.config.speeds;
        let speed_kmh = speeds.speed_kmh(&record.class);
        let time = record.length / speeds.speed_mps(&record.class);
        if !(time.is_finite() && time >= 0.0) {
            return Err(SpatialError::InvalidWeight {
                class:  record.class.clone(),
                length: record.length,
                speed_kmh,
            });
        }

        if !speeds.is_known(&record.class) && self.unknown_classes.insert(record.class.clone()) {
            info!(
                "road class {:?} not in speed table; using default {} km/h",
                record.class, speeds.default_kmh
            );
        }

        let from = self.resolver.resolve(record.start);
        let to = self.resolver.resolve(record.end);

        let id = EdgeId::from_slot(self.edges.len());
        self.edges.push(Edge {
            id,
            from,
            to,
            length: record.length,
            time,
            class: record.class.clone(),
        });
        Ok(id)
    }

    /// Add every record in order, stopping at the first rejected one.
    ///
    /// # Errors
    ///
    /// [`SpatialError::Record`] wrapping the cause, with the 0-based position
    /// of the offending record within `records`.
    pub fn extend<'a, I>(&mut self, records: I) -> SpatialResult<()>
    where
        I: IntoIterator<Item = &'a GeometryRecord>,
    {
        for (index, record) in records.into_iter().enumerate() {
            self.add_record(record).map_err(|e| SpatialError::Record {
                index,
                source: Box::new(e),
            })?;
        }
        Ok(())
    }

    /// Consume the builder and produce the vertex table and edge list.
    pub fn build(self) -> RoadGraph {
        let vertices: Vec<Vertex> = self
            .resolver
            .positions()
            .iter()
            .enumerate()
            .map(|(i, &position)| Vertex {
                id: VertexId::from_slot(i),
                position,
                heuristic: self.config.heuristic(position),
            })
            .collect();

        debug!(
            "graph built: {} vertices, {} edges (tolerance {})",
            vertices.len(),
            self.edges.len(),
            self.resolver.tolerance()
        );

        RoadGraph::from_parts(vertices, self.edges, self.unknown_classes)
    }
}

/// Build a graph from `records` with the default resolver.
///
/// # Errors
///
/// [`SpatialError::Config`] for an invalid `config`; [`SpatialError::Record`]
/// for the first rejected record.
pub fn build_graph(records: &[GeometryRecord], config: &GraphConfig) -> SpatialResult<RoadGraph> {
    let mut builder = GraphBuilder::new(config.clone())?;
    builder.reserve(records.len());
    builder.extend(records)?;
    let graph = builder.build();

    info!(
        "built road graph: {} records → {} vertices, {} edges",
        records.len(),
        graph.vertex_count(),
        graph.edge_count()
    );
    Ok(graph)
}
