//! CSV geometry source.
//!
//! # CSV format
//!
//! One row per road polyline, already reduced to its endpoints:
//!
//! ```csv
//! start_x,start_y,end_x,end_y,length,class
//! 0,0,1000,0,1000,A
//! 1000,0,1000,1000,1000.0,D
//! ```
//!
//! A row with an empty coordinate or length field (a feature without
//! geometry) is rejected with the 1-based data row number rather than
//! skipped, so upstream data-quality problems surface immediately.  An empty
//! `class` is read as `""` and gets the default speed.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use rg_core::Point;

use crate::record::GeometryRecord;
use crate::SpatialError;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RecordRow {
    start_x: Option<f64>,
    start_y: Option<f64>,
    end_x:   Option<f64>,
    end_y:   Option<f64>,
    length:  Option<f64>,
    #[serde(default)]
    class:   String,
}

impl RecordRow {
    fn into_record(self, row: usize) -> Result<GeometryRecord, SpatialError> {
        let missing = |field: &str| {
            SpatialError::Parse(format!("row {row}: missing geometry field {field:?}"))
        };
        let start = Point::new(
            self.start_x.ok_or_else(|| missing("start_x"))?,
            self.start_y.ok_or_else(|| missing("start_y"))?,
        );
        let end = Point::new(
            self.end_x.ok_or_else(|| missing("end_x"))?,
            self.end_y.ok_or_else(|| missing("end_y"))?,
        );
        let length = self.length.ok_or_else(|| missing("length"))?;
        Ok(GeometryRecord { start, end, length, class: self.class })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load geometry records from a CSV file, in file order.
pub fn load_records_csv(path: &Path) -> Result<Vec<GeometryRecord>, SpatialError> {
    let file = std::fs::File::open(path).map_err(SpatialError::Io)?;
    load_records_reader(file)
}

/// Like [`load_records_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor` or a byte slice).
pub fn load_records_reader<R: Read>(reader: R) -> Result<Vec<GeometryRecord>, SpatialError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();

    for (i, result) in csv_reader.deserialize::<RecordRow>().enumerate() {
        let row = i + 1;
        let parsed = result.map_err(|e| SpatialError::Parse(format!("row {row}: {e}")))?;
        records.push(parsed.into_record(row)?);
    }

    Ok(records)
}
