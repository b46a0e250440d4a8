//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `vertices.csv`: `id,x,y,x_astar,y_astar`
//! - `edges.csv`: `from,to,length,time,class` (one row per undirected edge)

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::Writer;

use crate::writer::GraphSink;
use crate::{EdgeRow, OutputResult, VertexRow};

pub const VERTICES_FILE: &str = "vertices.csv";
pub const EDGES_FILE: &str = "edges.csv";

/// Writes the vertex table and edge list to two CSV files.
pub struct CsvExporter {
    dir:      PathBuf,
    vertices: Writer<File>,
    edges:    Writer<File>,
    finished: bool,
}

impl CsvExporter {
    /// Create `dir` if needed, open the two CSV files, and write the header
    /// rows.  Existing files are truncated.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut vertices = Writer::from_path(dir.join(VERTICES_FILE))?;
        vertices.write_record(VertexRow::HEADER)?;

        let mut edges = Writer::from_path(dir.join(EDGES_FILE))?;
        edges.write_record(EdgeRow::HEADER)?;

        Ok(Self {
            dir: dir.to_path_buf(),
            vertices,
            edges,
            finished: false,
        })
    }

    pub fn vertices_path(&self) -> PathBuf {
        self.dir.join(VERTICES_FILE)
    }

    pub fn edges_path(&self) -> PathBuf {
        self.dir.join(EDGES_FILE)
    }
}

impl GraphSink for CsvExporter {
    fn write_vertices(&mut self, rows: &[VertexRow]) -> OutputResult<()> {
        for row in rows {
            self.vertices.write_record(&[
                row.id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.x_astar.to_string(),
                row.y_astar.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_edges(&mut self, rows: &[EdgeRow]) -> OutputResult<()> {
        for row in rows {
            self.edges.write_record([
                row.from.to_string().as_str(),
                row.to.to_string().as_str(),
                row.length.to_string().as_str(),
                row.time.to_string().as_str(),
                row.class.as_str(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.vertices.flush()?;
        self.edges.flush()?;
        Ok(())
    }
}
