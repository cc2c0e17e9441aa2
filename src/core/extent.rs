use crate::core::geo::Point;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// An axis-aligned bounding box in map coordinates.
///
/// The empty extent is the sentinel `[+inf, +inf, -inf, -inf]`: it is the
/// identity for [`Extent::extend`], and any extent with an infinite component
/// is treated as empty. A layer whose source produced zero features keeps
/// this sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min: Point,
    pub max: Point,
}

impl Extent {
    /// Creates an extent from individual coordinates
    pub fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        }
    }

    /// Creates the empty extent that can be extended
    pub fn empty() -> Self {
        Self {
            min: Point::new(f64::INFINITY, f64::INFINITY),
            max: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// True iff any of the four components is positive or negative infinity.
    /// A fully-finite degenerate (zero-area) box is not empty.
    pub fn is_empty(&self) -> bool {
        self.min.x.is_infinite()
            || self.min.y.is_infinite()
            || self.max.x.is_infinite()
            || self.max.y.is_infinite()
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Extends the extent to include a point
    pub fn extend_point(&mut self, point: &Point) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Extends the extent to include another extent. Empty operands are
    /// absorbed, so union is commutative, associative and idempotent.
    pub fn extend(&mut self, other: &Extent) {
        if other.is_empty() {
            return;
        }
        self.extend_point(&other.min);
        self.extend_point(&other.max);
    }

    /// Returns the union of this extent with another
    pub fn union(&self, other: &Extent) -> Extent {
        let mut out = *self;
        out.extend(other);
        out
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::empty()
    }
}

/// Accumulates the union bounding box across asynchronously-arriving layer
/// extents. One instance per refresh cycle; feature-load tasks merge their
/// contribution from worker threads, so the inner extent is mutex-protected.
#[derive(Debug, Default)]
pub struct ExtentAccumulator {
    extent: Mutex<Extent>,
}

impl ExtentAccumulator {
    pub fn new() -> Self {
        Self {
            extent: Mutex::new(Extent::empty()),
        }
    }

    /// Merges one layer's extent into the union
    pub fn merge(&self, extent: &Extent) {
        if let Ok(mut union) = self.extent.lock() {
            union.extend(extent);
        }
    }

    /// Current union of everything merged so far
    pub fn snapshot(&self) -> Extent {
        self.extent.lock().map(|e| *e).unwrap_or_else(|_| Extent::empty())
    }
}
