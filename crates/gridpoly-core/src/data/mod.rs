//! Planar data model shared by every Gridpoly crate
//!
//! This module provides:
//! - `Point`: a pair of real coordinates in world (design) space
//! - `Ring`: an implicitly closed sequence of points bounding an area
//! - `PolygonWithHoles`: one exterior ring plus zero or more hole rings,
//!   the unit of storage for saved polygons
//!
//! Rings never store the closing vertex: a ring built from a closed coordinate
//! list (first == last) drops the duplicate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true when both coordinates are finite (not NaN or infinite).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns this point shifted by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An implicitly closed sequence of points.
///
/// A ring used as an exterior or hole should have at least three vertices and
/// must not self-intersect before any set operation is applied; validity is
/// checked by the planar kernel, not here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(Vec<Point>);

impl Ring {
    /// Build a ring from a point list, dropping an explicit closing vertex.
    pub fn new(mut points: Vec<Point>) -> Self {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Self(points)
    }

    /// The vertices of the ring, without the closing vertex.
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Number of stored vertices.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", p)?;
        }
        write!(f, "]")
    }
}

/// An exterior ring with optional interior rings (holes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PolygonWithHoles {
    pub exterior: Ring,
    #[serde(default)]
    pub holes: Vec<Ring>,
}

impl PolygonWithHoles {
    /// Create a polygon with holes.
    pub fn new(exterior: Ring, holes: Vec<Ring>) -> Self {
        Self { exterior, holes }
    }

    /// Create a polygon without holes from an exterior point list.
    pub fn from_exterior(points: Vec<Point>) -> Self {
        Self::new(Ring::new(points), Vec::new())
    }

    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }

}

impl fmt::Display for PolygonWithHoles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.exterior)?;
        for hole in &self.holes {
            write!(f, " hole {}", hole)?;
        }
        Ok(())
    }
}

/// Render the numbered vertex report printed after a merge.
///
/// One line per polygon (`polygon #n: [...]`) followed by one indented line
/// per hole (`  hole: [...]`). Numbering starts at 1.
pub fn polygon_report(polygons: &[PolygonWithHoles]) -> Vec<String> {
    let mut lines = Vec::new();
    for (count, polygon) in polygons.iter().enumerate() {
        lines.push(format!("polygon #{}: {}", count + 1, polygon.exterior));
        for hole in &polygon.holes {
            lines.push(format!("  hole: {}", hole));
        }
    }
    lines
}
