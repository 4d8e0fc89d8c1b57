//! Grid snapping.
//!
//! Maps continuous points onto an axis-aligned lattice with independent X/Y
//! spacing. Each axis rounds half away from zero (`f64::round`), so a point
//! exactly between two grid lines always moves to the one farther from the
//! origin. An axis whose spacing is not a positive finite number is left
//! unsnapped, and grid lines are not produced for it.

use gridpoly_core::Point;
use serde::{Deserialize, Serialize};

use crate::viewport::Bounds;

/// Upper bound on grid lines per axis; denser grids are not drawn.
pub const MAX_GRID_LINES: usize = 4096;

/// Snaps one coordinate to the nearest multiple of `spacing`.
pub fn snap_coordinate(value: f64, spacing: f64) -> f64 {
    if !value.is_finite() || !spacing_enabled(spacing) {
        return value;
    }
    // adding 0.0 turns -0.0 into 0.0
    (value / spacing).round() * spacing + 0.0
}

/// Snaps `point` to the lattice spanned by `spacing_x` and `spacing_y`.
///
/// Non-finite coordinates pass through unchanged.
pub fn snap_point(point: Point, spacing_x: f64, spacing_y: f64) -> Point {
    Point::new(
        snap_coordinate(point.x, spacing_x),
        snap_coordinate(point.y, spacing_y),
    )
}

fn spacing_enabled(spacing: f64) -> bool {
    spacing.is_finite() && spacing > 0.0
}

/// Grid line positions covering a world rectangle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GridLines {
    /// X positions of vertical lines
    pub vertical: Vec<f64>,
    /// Y positions of horizontal lines
    pub horizontal: Vec<f64>,
}

impl GridLines {
    pub fn len(&self) -> usize {
        self.vertical.len() + self.horizontal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }
}

/// Authoritative grid spacing plus the snapping and grid-line logic built on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSnapper {
    spacing_x: f64,
    spacing_y: f64,
}

impl Default for GridSnapper {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl GridSnapper {
    pub fn new(spacing_x: f64, spacing_y: f64) -> Self {
        Self {
            spacing_x,
            spacing_y,
        }
    }

    pub fn spacing_x(&self) -> f64 {
        self.spacing_x
    }

    pub fn spacing_y(&self) -> f64 {
        self.spacing_y
    }

    pub fn spacing(&self) -> (f64, f64) {
        (self.spacing_x, self.spacing_y)
    }

    pub fn set_spacing(&mut self, spacing_x: f64, spacing_y: f64) {
        self.spacing_x = spacing_x;
        self.spacing_y = spacing_y;
    }

    /// True when both axes have a usable spacing.
    pub fn is_enabled(&self) -> bool {
        spacing_enabled(self.spacing_x) && spacing_enabled(self.spacing_y)
    }

    pub fn snap(&self, point: Point) -> Point {
        snap_point(point, self.spacing_x, self.spacing_y)
    }

    /// Grid lines covering `bounds`.
    ///
    /// Lines run from `floor(min / s) * s` to `ceil(max / s) * s` on each
    /// axis. Returns `None` when either spacing is unusable, the bounds are
    /// not finite, or an axis would need more than [`MAX_GRID_LINES`].
    pub fn grid_lines(&self, bounds: &Bounds) -> Option<GridLines> {
        if !self.is_enabled() {
            tracing::debug!(
                "Grid lines disabled for spacing ({}, {})",
                self.spacing_x,
                self.spacing_y
            );
            return None;
        }
        let vertical = axis_lines(bounds.min_x, bounds.max_x, self.spacing_x)?;
        let horizontal = axis_lines(bounds.min_y, bounds.max_y, self.spacing_y)?;
        Some(GridLines {
            vertical,
            horizontal,
        })
    }
}

fn axis_lines(min: f64, max: f64, spacing: f64) -> Option<Vec<f64>> {
    if !min.is_finite() || !max.is_finite() || min > max {
        return None;
    }
    let first = (min / spacing).floor();
    let last = (max / spacing).ceil();
    let count = last - first + 1.0;
    if count > MAX_GRID_LINES as f64 {
        tracing::warn!(
            "Skipping grid: {} lines at spacing {} exceeds limit {}",
            count,
            spacing,
            MAX_GRID_LINES
        );
        return None;
    }
    let first = first as i64;
    let last = last as i64;
    Some((first..=last).map(|i| i as f64 * spacing).collect())
}
