//! Build configuration: vertex tolerance, heuristic scaling speed, and the
//! road-class speed table.
//!
//! All three are plain data with documented defaults.  Applications load them
//! from a TOML file (feature `serde`) or construct them in code and hand the
//! result to `rg_spatial::GraphBuilder`.

use std::collections::BTreeMap;

use crate::{CoreError, CoreResult, Point};

/// Default merge tolerance in source units.
pub const DEFAULT_TOLERANCE: f64 = 0.5;

/// Default network-wide maximum speed in km/h, used for heuristic scaling.
pub const DEFAULT_MAX_SPEED_KMH: f64 = 140.0;

/// Speed assumed for road classes missing from the table, in km/h.
pub const DEFAULT_CLASS_SPEED_KMH: f64 = 50.0;

/// Conversion factor from km/h to m/s.
pub const KMH_PER_MPS: f64 = 3.6;

// ── SpeedTable ────────────────────────────────────────────────────────────────

/// Road-class code → nominal speed in km/h, with a fallback for unknown codes.
///
/// ```
/// use rg_core::SpeedTable;
///
/// let table = SpeedTable::default();
/// assert_eq!(table.speed_kmh("A"), 140.0);
/// assert_eq!(table.speed_kmh("XYZ"), 50.0); // unknown → default
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpeedTable {
    /// Known classes.  A `BTreeMap` keeps iteration (and serialization) order
    /// stable across runs.
    pub classes: BTreeMap<String, f64>,

    /// Speed for any class not in `classes`.  Default: 50 km/h.
    pub default_kmh: f64,
}

impl SpeedTable {
    /// A table with no classes: every lookup returns `default_kmh`.
    pub fn empty(default_kmh: f64) -> Self {
        Self { classes: BTreeMap::new(), default_kmh }
    }

    /// Builder-style override of a single class.
    pub fn with_class(mut self, class: impl Into<String>, kmh: f64) -> Self {
        self.classes.insert(class.into(), kmh);
        self
    }

    /// Nominal speed for `class` in km/h, falling back to `default_kmh`.
    #[inline]
    pub fn speed_kmh(&self, class: &str) -> f64 {
        self.classes.get(class).copied().unwrap_or(self.default_kmh)
    }

    /// Nominal speed for `class` in m/s.
    #[inline]
    pub fn speed_mps(&self, class: &str) -> f64 {
        self.speed_kmh(class) / KMH_PER_MPS
    }

    pub fn is_known(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    /// Highest speed any record can be assigned, default included.
    pub fn fastest_kmh(&self) -> f64 {
        self.classes
            .values()
            .copied()
            .fold(self.default_kmh, f64::max)
    }

    fn validate(&self) -> CoreResult<()> {
        if !is_positive(self.default_kmh) {
            return Err(CoreError::Config(format!(
                "default speed must be a positive number of km/h, got {}",
                self.default_kmh
            )));
        }
        for (class, &kmh) in &self.classes {
            if !is_positive(kmh) {
                return Err(CoreError::Config(format!(
                    "speed for road class {class:?} must be a positive number of km/h, got {kmh}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for SpeedTable {
    /// The national road-class codes:
    ///
    /// | Class | km/h | | Class | km/h |
    /// |-------|------|-|-------|------|
    /// | `A`   | 140  | | `Z`   | 50   |
    /// | `S`   | 120  | | `L`   | 50   |
    /// | `GP`  | 100  | | `D`   | 50   |
    /// | `G`   | 90   | | `I`   | 50   |
    fn default() -> Self {
        let classes = [
            ("A", 140.0),
            ("S", 120.0),
            ("GP", 100.0),
            ("G", 90.0),
            ("Z", 50.0),
            ("L", 50.0),
            ("D", 50.0),
            ("I", 50.0),
        ]
        .into_iter()
        .map(|(c, kmh)| (c.to_owned(), kmh))
        .collect();

        Self { classes, default_kmh: DEFAULT_CLASS_SPEED_KMH }
    }
}

// ── GraphConfig ───────────────────────────────────────────────────────────────

/// Parameters of one graph build.
///
/// Typically loaded from a TOML file by the application crate; any field
/// left out keeps its default.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphConfig {
    /// Maximum Euclidean distance (source units) at which two endpoints are
    /// the same vertex.  Inclusive.  Default: 0.5.
    pub tolerance: f64,

    /// Divisor applied to vertex coordinates to produce heuristic
    /// coordinates.  Default: 140 (km/h).
    pub max_speed_kmh: f64,

    /// Road-class speed lookup.
    pub speeds: SpeedTable,
}

impl GraphConfig {
    /// Reject configurations that would produce NaN/infinite weights or
    /// heuristic coordinates.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(CoreError::Config(format!(
                "tolerance must be a finite non-negative distance, got {}",
                self.tolerance
            )));
        }
        if !is_positive(self.max_speed_kmh) {
            return Err(CoreError::Config(format!(
                "max_speed_kmh must be a positive number, got {}",
                self.max_speed_kmh
            )));
        }
        self.speeds.validate()
    }

    /// `true` when some road class is faster than `max_speed_kmh`, so the
    /// heuristic coordinates can overestimate travel time.  Valid, but
    /// callers usually want to tell the user.
    pub fn heuristic_may_overestimate(&self) -> bool {
        self.speeds.fastest_kmh() > self.max_speed_kmh
    }

    /// Heuristic coordinates for a vertex at `pos`.
    #[inline]
    pub fn heuristic(&self, pos: Point) -> Point {
        pos.scaled(self.max_speed_kmh)
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            tolerance:     DEFAULT_TOLERANCE,
            max_speed_kmh: DEFAULT_MAX_SPEED_KMH,
            speeds:        SpeedTable::default(),
        }
    }
}

#[inline]
fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
