//! Planar coordinate type.
//!
//! `Point` stores `f64` coordinates in the source dataset's projected
//! coordinate system (metres for the usual national grids).  Projected
//! eastings/northings are six- or seven-digit numbers, so single precision
//! would already lose the sub-metre digits the vertex tolerance works with.

/// An immutable `(x, y)` pair in planar source units.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in source units.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// `true` if `other` lies within `tolerance` of `self` (inclusive).
    ///
    /// Every vertex resolver uses this exact predicate, so strategies agree
    /// on boundary cases.
    #[inline]
    pub fn is_within(self, other: Point, tolerance: f64) -> bool {
        self.distance(other) <= tolerance
    }

    /// Both coordinates divided by `divisor`.
    #[inline]
    pub fn scaled(self, divisor: f64) -> Point {
        Point::new(self.x / divisor, self.y / divisor)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
