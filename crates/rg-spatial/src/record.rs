//! Input geometry record.

use rg_core::Point;

/// One road polyline, reduced to what graph construction needs: its two
/// endpoints, its geometric length, and its road-class code.
///
/// Interior vertices of the polyline are not represented; the edge connects
/// the first and last point only.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryRecord {
    pub start:  Point,
    pub end:    Point,
    /// Polyline length in source units (not the straight-line distance
    /// between `start` and `end`).
    pub length: f64,
    pub class:  String,
}

impl GeometryRecord {
    pub fn new(start: Point, end: Point, length: f64, class: impl Into<String>) -> Self {
        Self { start, end, length, class: class.into() }
    }
}
