//! `roadgraph`: build a weighted road graph from endpoint CSVs, export it,
//! and optionally load it into a SQLite graph store.
//!
//! Run with:
//!   cargo run -p roadgraph --release -- build --input roads.csv --out wyniki --sqlite wyniki/roads.db
//!
//! Logging is controlled by `RUST_LOG` (default `info`).

mod config;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rg_core::GraphConfig;
use rg_output::{CsvExporter, SqliteGraphStore, export_graph};
use rg_spatial::{
    GeometryRecord, GraphBuilder, IndexedResolver, RoadGraph, SpatialError, build_sources,
    load_records_csv,
};

#[derive(Parser, Debug)]
#[command(name = "roadgraph")]
#[command(about = "Build a weighted road graph and load it into a graph store")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the graph, write vertices.csv/edges.csv, optionally load SQLite.
    #[command(name = "build")]
    Build(BuildArgs),
}

#[derive(Args, Debug, Clone)]
struct BuildArgs {
    /// Geometry CSV (`start_x,start_y,end_x,end_y,length,class`).  Repeat to
    /// build several sources and merge them.
    #[arg(long, required = true)]
    input: Vec<PathBuf>,
    /// Directory for vertices.csv and edges.csv.
    #[arg(long, default_value = "wyniki")]
    out: PathBuf,
    /// TOML file with tolerance, max_speed_kmh, and speeds.
    #[arg(long)]
    config: Option<PathBuf>,
    /// SQLite graph store to (re)load; existing contents are cleared.
    #[arg(long)]
    sqlite: Option<PathBuf>,
    /// Override the merge tolerance (source units).
    #[arg(long)]
    tolerance: Option<f64>,
    /// Override the heuristic scaling speed (km/h).
    #[arg(long = "max-speed")]
    max_speed: Option<f64>,
    /// Use the R-tree vertex resolver (single input only).
    #[arg(long)]
    indexed: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Build(args) => run_build(&args),
    }
}

fn run_build(args: &BuildArgs) -> Result<()> {
    let t0 = Instant::now();
    let config = config::load(args.config.as_deref(), args.tolerance, args.max_speed)?;
    info!(
        tolerance = config.tolerance,
        max_speed_kmh = config.max_speed_kmh,
        classes = config.speeds.classes.len(),
        "configuration loaded"
    );

    // ── Geometry source ───────────────────────────────────────────────────────
    let sources: Vec<Vec<GeometryRecord>> = args
        .input
        .iter()
        .map(|p| {
            let recs = load_records_csv(p).with_context(|| format!("loading {}", p.display()))?;
            info!(path = %p.display(), records = recs.len(), "geometry loaded");
            Ok(recs)
        })
        .collect::<Result<_>>()?;

    // ── Graph construction ────────────────────────────────────────────────────
    let graph = build(&sources, &config, args.indexed).context("building road graph")?;
    if !graph.unknown_classes().is_empty() {
        info!(classes = ?graph.unknown_classes(), "classes given the default speed");
    }
    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        total_length = graph.total_length(),
        "road graph built"
    );

    // ── Tabular export ────────────────────────────────────────────────────────
    let mut csv = CsvExporter::new(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    export_graph(&mut csv, &graph)?;
    info!(dir = %args.out.display(), "CSV written");

    // ── Graph store ───────────────────────────────────────────────────────────
    if let Some(db) = &args.sqlite {
        load_store(db, &graph).with_context(|| format!("loading graph store {}", db.display()))?;
    }

    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "done");
    Ok(())
}

fn build(
    sources: &[Vec<GeometryRecord>],
    config:  &GraphConfig,
    indexed: bool,
) -> Result<RoadGraph, SpatialError> {
    match sources {
        [single] if indexed => {
            let resolver = IndexedResolver::new(config.tolerance);
            let mut builder = GraphBuilder::with_resolver(config.clone(), resolver)?;
            builder.reserve(single.len());
            builder.extend(single)?;
            Ok(builder.build())
        }
        _ => {
            if indexed && sources.len() > 1 {
                warn!("--indexed ignored: merged builds always use the R-tree resolver for merging");
            }
            build_sources(sources, config)
        }
    }
}

fn load_store(path: &Path, graph: &RoadGraph) -> Result<()> {
    let mut store = SqliteGraphStore::open(path)?;
    store.reset()?;
    export_graph(&mut store, graph)?;
    store.project_defaults()?;

    let nodes = store.node_count()?;
    let relationships = store.relationship_count()?;
    let projections = store.projection_names()?;
    info!(nodes, relationships, ?projections, "graph store loaded");
    Ok(())
}
