//! Spatial-subsystem error type.

use thiserror::Error;

use rg_core::{CoreError, Point};

/// Errors produced by `rg-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("record has non-finite geometry: start {start}, end {end}")]
    InvalidGeometry { start: Point, end: Point },

    #[error("record length must be a finite non-negative number, got {0}")]
    InvalidLength(f64),

    #[error("travel time for class {class:?} is not a finite non-negative number (length {length}, speed {speed_kmh} km/h)")]
    InvalidWeight { class: String, length: f64, speed_kmh: f64 },

    #[error("record {index}: {source}")]
    Record {
        index:  usize,
        #[source]
        source: Box<SpatialError>,
    },

    #[error("source {index}: {source}")]
    Source {
        index:  usize,
        #[source]
        source: Box<SpatialError>,
    },

    #[error("geometry source parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
