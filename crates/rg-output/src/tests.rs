//! Unit tests for rg-output.

#[cfg(test)]
mod helpers {
    use rg_core::{GraphConfig, Point};
    use rg_spatial::{GeometryRecord, RoadGraph, build_graph};

    /// Three vertices, two edges: `1 ─A─ 2 ─D─ 3`.
    pub fn l_shape() -> RoadGraph {
        let recs = [
            GeometryRecord::new(Point::new(0.0, 0.0), Point::new(1000.0, 0.0), 1000.0, "A"),
            GeometryRecord::new(Point::new(1000.0, 0.0), Point::new(1000.0, 1000.0), 1000.0, "D"),
        ];
        build_graph(&recs, &GraphConfig::default()).expect("valid records")
    }
}

// ── Row conversion ────────────────────────────────────────────────────────────

#[cfg(test)]
mod rows {
    use crate::{EdgeRow, VertexRow};

    #[test]
    fn vertex_row_from_model() {
        let g = super::helpers::l_shape();
        let row = VertexRow::from(&g.vertices()[1]);
        assert_eq!(row.id, 2);
        assert_eq!((row.x, row.y), (1000.0, 0.0));
        assert_eq!(row.x_astar, 1000.0 / 140.0);
        assert_eq!(row.y_astar, 0.0);
    }

    #[test]
    fn edge_row_from_model() {
        let g = super::helpers::l_shape();
        let row = EdgeRow::from(&g.edges()[1]);
        assert_eq!((row.from, row.to), (2, 3));
        assert_eq!(row.length, 1000.0);
        assert!((row.time - 72.0).abs() < 1e-9);
        assert_eq!(row.class, "D");
    }
}

// ── CSV tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvExporter, EDGES_FILE, VERTICES_FILE};
    use crate::writer::{GraphSink, export_graph};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read_all(path: &std::path::Path) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn csv_files_created_in_new_dir() {
        let dir = tmp();
        let out = dir.path().join("nested").join("wyniki");
        let _w = CsvExporter::new(&out).unwrap();
        assert!(out.join(VERTICES_FILE).exists());
        assert!(out.join(EDGES_FILE).exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvExporter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let (vh, vrows) = read_all(&w.vertices_path());
        assert_eq!(vh, ["id", "x", "y", "x_astar", "y_astar"]);
        assert!(vrows.is_empty());

        let (eh, _) = read_all(&w.edges_path());
        assert_eq!(eh, ["from", "to", "length", "time", "class"]);
    }

    #[test]
    fn csv_graph_export() {
        let dir = tmp();
        let mut w = CsvExporter::new(dir.path()).unwrap();
        export_graph(&mut w, &super::helpers::l_shape()).unwrap();

        let (_, vrows) = read_all(&dir.path().join(VERTICES_FILE));
        assert_eq!(vrows.len(), 3);
        assert_eq!(&vrows[0][0], "1");
        assert_eq!(&vrows[2][0], "3");
        assert_eq!(&vrows[2][1], "1000");
        assert_eq!(&vrows[2][2], "1000");
        let x_astar: f64 = vrows[1][3].parse().unwrap();
        assert!((x_astar - 1000.0 / 140.0).abs() < 1e-12);

        let (_, erows) = read_all(&dir.path().join(EDGES_FILE));
        assert_eq!(erows.len(), 2); // one row per undirected edge
        assert_eq!(&erows[0][0], "1");
        assert_eq!(&erows[0][1], "2");
        assert_eq!(&erows[0][4], "A");
        let t: f64 = erows[1][3].parse().unwrap();
        assert!((t - 72.0).abs() < 1e-9);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvExporter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // second call should not panic
    }

    #[test]
    fn csv_empty_batches_ok() {
        let dir = tmp();
        let mut w = CsvExporter::new(dir.path()).unwrap();
        w.write_vertices(&[]).unwrap();
        w.write_edges(&[]).unwrap();
    }

    #[test]
    fn csv_class_with_comma_is_quoted() {
        use crate::EdgeRow;

        let dir = tmp();
        let mut w = CsvExporter::new(dir.path()).unwrap();
        w.write_edges(&[EdgeRow { from: 1, to: 2, length: 1.0, time: 0.1, class: "G,P".into() }])
            .unwrap();
        w.finish().unwrap();

        let (_, erows) = read_all(&w.edges_path());
        assert_eq!(&erows[0][4], "G,P");
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use rg_spatial::Metric;

    use crate::sqlite::SqliteGraphStore;
    use crate::writer::{GraphSink, export_graph};
    use crate::{EdgeRow, OutputError, VertexRow};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn loaded_store() -> SqliteGraphStore {
        let mut store = SqliteGraphStore::in_memory().unwrap();
        export_graph(&mut store, &super::helpers::l_shape()).unwrap();
        store
    }

    #[test]
    fn nodes_and_both_directions_loaded() {
        let store = loaded_store();
        assert_eq!(store.node_count().unwrap(), 3);
        assert_eq!(store.relationship_count().unwrap(), 4);

        let back: i64 = store
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM road WHERE source = 2 AND target = 1 AND class = 'A'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(back, 1);
    }

    #[test]
    fn heuristic_properties_stored() {
        let store = loaded_store();
        let (xa, ya): (f64, f64) = store
            .connection()
            .query_row("SELECT x_astar, y_astar FROM nodes WHERE id = 3", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert!((xa - 1000.0 / 140.0).abs() < 1e-12);
        assert!((ya - 1000.0 / 140.0).abs() < 1e-12);
    }

    #[test]
    fn duplicate_node_id_rejected() {
        let mut store = loaded_store();
        let dup = VertexRow { id: 1, x: 5.0, y: 5.0, x_astar: 0.0, y_astar: 0.0 };
        assert!(matches!(store.write_vertices(&[dup]), Err(OutputError::Sqlite(_))));
        assert_eq!(store.node_count().unwrap(), 3);
    }

    #[test]
    fn edge_to_missing_node_rejected() {
        let mut store = loaded_store();
        let bad = EdgeRow { from: 1, to: 99, length: 1.0, time: 1.0, class: "Z".into() };
        assert!(store.write_edges(&[bad]).is_err());
        assert_eq!(store.relationship_count().unwrap(), 4);
    }

    #[test]
    fn default_projections() {
        let mut store = loaded_store();
        store.project_defaults().unwrap();

        assert_eq!(store.projection_names().unwrap(), ["roads_length", "roads_time"]);
        assert_eq!(store.projection_arc_count("roads_length").unwrap(), 4);
        assert_eq!(store.projection_arc_count("roads_time").unwrap(), 4);

        assert_eq!(
            store.projection_node_properties("roads_time").unwrap(),
            Some(vec!["x_astar".to_owned(), "y_astar".to_owned()])
        );
        assert_eq!(store.projection_node_properties("roads_length").unwrap(), Some(vec![]));
        assert_eq!(store.projection_node_properties("missing").unwrap(), None);

        let w: f64 = store
            .connection()
            .query_row(
                "SELECT weight FROM proj_roads_time WHERE source = 3 AND target = 2",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert!((w - 72.0).abs() < 1e-9);
    }

    #[test]
    fn reproject_replaces() {
        let mut store = loaded_store();
        store.project("roads_length", Metric::Length).unwrap();
        store.project("roads_length", Metric::Length).unwrap();
        assert_eq!(store.projection_names().unwrap(), ["roads_length"]);
    }

    #[test]
    fn drop_missing_projection_is_ok() {
        let mut store = loaded_store();
        store.drop_projection("roads_time").unwrap();
    }

    #[test]
    fn bad_projection_name_rejected() {
        let mut store = loaded_store();
        let err = store.project("x; DROP TABLE nodes", Metric::Time).unwrap_err();
        assert!(matches!(err, OutputError::InvalidProjectionName(_)));
    }

    #[test]
    fn reset_clears_everything() {
        let mut store = loaded_store();
        store.project_defaults().unwrap();
        store.reset().unwrap();
        assert_eq!(store.node_count().unwrap(), 0);
        assert_eq!(store.relationship_count().unwrap(), 0);
        assert!(store.projection_names().unwrap().is_empty());

        // Reload after reset reuses the same ids.
        export_graph(&mut store, &super::helpers::l_shape()).unwrap();
        assert_eq!(store.node_count().unwrap(), 3);
    }

    #[test]
    fn file_store_persists() {
        let dir = tmp();
        let path = dir.path().join("roads.db");
        {
            let mut store = SqliteGraphStore::open(&path).unwrap();
            export_graph(&mut store, &super::helpers::l_shape()).unwrap();
            store.project_defaults().unwrap();
            store.finish().unwrap();
        }

        let conn = rusqlite::Connection::open(&path).unwrap();
        let nodes: i64 = conn.query_row("SELECT COUNT(*) FROM nodes", [], |r| r.get(0)).unwrap();
        let arcs: i64 = conn
            .query_row("SELECT COUNT(*) FROM proj_roads_length", [], |r| r.get(0))
            .unwrap();
        assert_eq!(nodes, 3);
        assert_eq!(arcs, 4);
    }
}
