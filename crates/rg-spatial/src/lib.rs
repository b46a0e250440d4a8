//! `rg-spatial`: vertex resolution, weighted graph construction, and
//! projections.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`resolver`]   | `VertexResolver` trait, `LinearResolver`, `IndexedResolver`  |
//! | [`record`]     | `GeometryRecord`                                             |
//! | [`builder`]    | `GraphBuilder`, `build_graph`                                |
//! | [`model`]      | `RoadGraph`, `Vertex`, `Edge`                                |
//! | [`projection`] | `Projection` (CSR per weight metric), `Metric`               |
//! | [`merge`]      | `merge_graphs`, `build_sources`                              |
//! | [`source`]     | `load_records_csv`, `load_records_reader`                    |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                           |
//!
//! # Data flow
//!
//! ```text
//! GeometryRecord ─┬─► VertexResolver::resolve(start) ─┐
//!                 ├─► VertexResolver::resolve(end)   ─┼─► Edge { from, to, length, time, class }
//!                 └─► SpeedTable::speed_kmh(class)   ─┘
//!
//! GraphBuilder::build() ─► RoadGraph { vertices, edges } ─► rg-output / Projection
//! ```
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                       |
//! |------------|--------------------------------------------------------------|
//! | `parallel` | `build_sources` builds each source on Rayon's thread pool.  |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `rg-core` types.        |

pub mod builder;
pub mod error;
pub mod merge;
pub mod model;
pub mod projection;
pub mod record;
pub mod resolver;
pub mod source;


pub use builder::{GraphBuilder, build_graph};
pub use error::{SpatialError, SpatialResult};
pub use merge::{build_sources, merge_graphs};
pub use model::{Edge, RoadGraph, Vertex};
pub use projection::{Metric, Projection};
pub use record::GeometryRecord;
pub use resolver::{IndexedResolver, LinearResolver, VertexResolver};
pub use source::{load_records_csv, load_records_reader};
