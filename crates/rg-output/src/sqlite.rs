//! SQLite graph store (feature `sqlite`).
//!
//! Loads a road graph into a single database file and builds weighted
//! projections for downstream pathfinding.
//!
//! # Schema
//!
//! | Table          | Contents                                                         |
//! |----------------|------------------------------------------------------------------|
//! | `nodes`        | `id` (primary key, so unique), `x`, `y`, `x_astar`, `y_astar`    |
//! | `road`         | Directed relationships: **two rows per undirected edge**         |
//! | `projections`  | Catalog: projection name, weight property, node properties       |
//! | `proj_<name>`  | One table per projection: `source`, `target`, `weight`           |
//!
//! Foreign keys are enforced, so an edge naming a vertex that was never
//! loaded fails instead of being dropped.

use std::path::Path;

use log::{debug, info};
use rusqlite::{Connection, OptionalExtension};

use rg_spatial::Metric;

use crate::writer::GraphSink;
use crate::{EdgeRow, OutputError, OutputResult, VertexRow};

const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;
    CREATE TABLE IF NOT EXISTS nodes (
        id      INTEGER PRIMARY KEY,
        x       REAL    NOT NULL,
        y       REAL    NOT NULL,
        x_astar REAL    NOT NULL,
        y_astar REAL    NOT NULL
    );
    CREATE TABLE IF NOT EXISTS road (
        source  INTEGER NOT NULL REFERENCES nodes(id),
        target  INTEGER NOT NULL REFERENCES nodes(id),
        length  REAL    NOT NULL,
        time    REAL    NOT NULL,
        class   TEXT    NOT NULL
    );
    CREATE INDEX IF NOT EXISTS road_source ON road(source);
    CREATE TABLE IF NOT EXISTS projections (
        name            TEXT PRIMARY KEY,
        weight          TEXT NOT NULL,
        node_properties TEXT NOT NULL
    );";

/// Road graph persisted in SQLite.
pub struct SqliteGraphStore {
    conn:     Connection,
    finished: bool,
}

impl SqliteGraphStore {
    /// Open (or create) the database at `path` and initialise the schema.
    pub fn open(path: &Path) -> OutputResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;",
        )?;
        Self::init(conn)
    }

    /// A private in-memory store.
    pub fn in_memory() -> OutputResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> OutputResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn, finished: false })
    }

    /// Remove every node, relationship, and projection.
    pub fn reset(&mut self) -> OutputResult<()> {
        for name in self.projection_names()? {
            self.drop_projection(&name)?;
        }
        self.conn.execute_batch(
            "DELETE FROM road;
             DELETE FROM nodes;",
        )?;
        self.finished = false;
        debug!("graph store cleared");
        Ok(())
    }

    /// Build (or rebuild) projection `name` weighted by `metric`.
    ///
    /// The time projection records `x_astar`/`y_astar` as its heuristic node
    /// properties.
    pub fn project(&mut self, name: &str, metric: Metric) -> OutputResult<()> {
        validate_name(name)?;
        self.drop_projection(name)?;

        let node_properties = if metric.has_heuristic() { "x_astar,y_astar" } else { "" };
        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!(
            "CREATE TABLE proj_{name} AS
                 SELECT source, target, {weight} AS weight FROM road ORDER BY rowid;
             CREATE INDEX proj_{name}_source ON proj_{name}(source);",
            weight = metric.property(),
        ))?;
        tx.execute(
            "INSERT INTO projections (name, weight, node_properties) VALUES (?1, ?2, ?3)",
            rusqlite::params![name, metric.property(), node_properties],
        )?;
        tx.commit()?;

        info!("projection {name} built on {}", metric.property());
        Ok(())
    }

    /// Build the two standard projections, `roads_length` and `roads_time`.
    pub fn project_defaults(&mut self) -> OutputResult<()> {
        for metric in [Metric::Length, Metric::Time] {
            self.project(metric.projection_name(), metric)?;
        }
        Ok(())
    }

    /// Drop projection `name`.  A missing projection is not an error.
    pub fn drop_projection(&mut self, name: &str) -> OutputResult<()> {
        validate_name(name)?;
        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!("DROP TABLE IF EXISTS proj_{name};"))?;
        tx.execute("DELETE FROM projections WHERE name = ?1", [name])?;
        tx.commit()?;
        Ok(())
    }

    /// Names of all catalogued projections, sorted.
    pub fn projection_names(&self) -> OutputResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT name FROM projections ORDER BY name")?;
        let names = stmt
            .query_map([], |r| r.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Heuristic node properties recorded for `name`, or `None` if the
    /// projection does not exist.
    pub fn projection_node_properties(&self, name: &str) -> OutputResult<Option<Vec<String>>> {
        let props: Option<String> = self
            .conn
            .query_row(
                "SELECT node_properties FROM projections WHERE name = ?1",
                [name],
                |r| r.get(0),
            )
            .optional()?;
        Ok(props.map(|p| {
            p.split(',')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect()
        }))
    }

    pub fn node_count(&self) -> OutputResult<u64> {
        self.count("SELECT COUNT(*) FROM nodes")
    }

    /// Number of directed relationships (twice the edge count).
    pub fn relationship_count(&self) -> OutputResult<u64> {
        self.count("SELECT COUNT(*) FROM road")
    }

    /// Number of arcs in projection `name`.
    pub fn projection_arc_count(&self, name: &str) -> OutputResult<u64> {
        validate_name(name)?;
        self.count(&format!("SELECT COUNT(*) FROM proj_{name}"))
    }

    /// Underlying connection, for ad-hoc queries.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn count(&self, sql: &str) -> OutputResult<u64> {
        let n: i64 = self.conn.query_row(sql, [], |r| r.get(0))?;
        Ok(n as u64)
    }
}

impl GraphSink for SqliteGraphStore {
    fn write_vertices(&mut self, rows: &[VertexRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO nodes (id, x, y, x_astar, y_astar) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.id, row.x, row.y, row.x_astar, row.y_astar])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_edges(&mut self, rows: &[EdgeRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO road (source, target, length, time, class) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.from, row.to, row.length, row.time, row.class])?;
                stmt.execute(rusqlite::params![row.to, row.from, row.length, row.time, row.class])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

/// Projection names are spliced into table names, so restrict them to
/// identifier characters.
fn validate_name(name: &str) -> OutputResult<()> {
    let ok = !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
    if ok {
        Ok(())
    } else {
        Err(OutputError::InvalidProjectionName(name.to_owned()))
    }
}
