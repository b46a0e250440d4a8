//! `rg-output`: export and graph-store loading for built road graphs.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend          | Files created                      |
//! |-----------|------------------|------------------------------------|
//! | *(none)*  | CSV              | `vertices.csv`, `edges.csv`        |
//! | `sqlite`  | SQLite store     | caller-chosen `.db` file           |
//!
//! Both implement [`GraphSink`] and are driven by [`export_graph`], which
//! writes the vertex table before the edge list.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rg_output::{CsvExporter, export_graph};
//!
//! let mut csv = CsvExporter::new(Path::new("./out"))?;
//! export_graph(&mut csv, &graph)?;
//!
//! let mut store = SqliteGraphStore::open(Path::new("./out/roads.db"))?;
//! store.reset()?;
//! export_graph(&mut store, &graph)?;
//! store.project_defaults()?;
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvExporter;
pub use error::{OutputError, OutputResult};
pub use row::{EdgeRow, VertexRow};
pub use writer::{GraphSink, export_graph};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteGraphStore;
