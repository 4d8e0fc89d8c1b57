//! Viewport and coordinate transformation for canvas rendering.
//!
//! Handles conversion between pixel coordinates (screen space) and world coordinates
//! (design space). Manages zoom and pan operations with proper coordinate mapping.
//! The visible world rectangle feeds the grid-line computation.

use serde::{Deserialize, Serialize};
use std::fmt;

use gridpoly_core::Point;

const MIN_ZOOM: f64 = 0.01;
const MAX_ZOOM: f64 = 1000.0;

/// Axis-aligned rectangle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when both extents are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width().is_finite() && self.height().is_finite() && self.width() > 0.0 && self.height() > 0.0
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x: {:.2}..{:.2}, y: {:.2}..{:.2}",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
    home: Option<Bounds>,
}

impl Viewport {
    /// Creates a new viewport with initial dimensions.
    /// World origin sits at the bottom-left pixel at 1:1 zoom.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
            home: None,
        }
    }

    /// Creates a viewport showing exactly `bounds`, remembered as the home view.
    pub fn fitted(canvas_width: f64, canvas_height: f64, bounds: Bounds) -> Self {
        let mut viewport = Self::new(canvas_width, canvas_height);
        viewport.set_home(bounds);
        viewport
    }

    /// Gets the current zoom level in pixels per world unit.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Pans by a delta amount in pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Converts pixel coordinates to world coordinates.
    ///
    /// Pixel coordinates are in screen space (0,0 at top-left).
    /// World coordinates are in design space (+Y up).
    ///
    /// ```text
    /// world_x = (pixel_x - pan_x) / zoom
    /// world_y = (canvas_height - pixel_y - pan_y) / zoom
    /// ```
    pub fn pixel_to_world(&self, pixel_x: f64, pixel_y: f64) -> Point {
        let world_x = (pixel_x - self.pan_x) / self.zoom;
        let world_y = (self.canvas_height - pixel_y - self.pan_y) / self.zoom;
        Point::new(world_x, world_y)
    }

    /// Converts world coordinates to pixel coordinates.
    ///
    /// ```text
    /// pixel_x = world_x * zoom + pan_x
    /// pixel_y = canvas_height - (world_y * zoom + pan_y)
    /// ```
    pub fn world_to_pixel(&self, world_x: f64, world_y: f64) -> (f64, f64) {
        let pixel_x = world_x * self.zoom + self.pan_x;
        let pixel_y = self.canvas_height - (world_y * self.zoom + self.pan_y);
        (pixel_x, pixel_y)
    }

    /// Converts a pixel distance into a world distance at the current zoom.
    pub fn pixels_to_world_distance(&self, pixels: f64) -> f64 {
        pixels / self.zoom
    }

    /// Fits the given bounding box into the viewport with padding.
    ///
    /// `padding` is the fraction of the canvas reserved on each side
    /// (0.0 - 0.5). Centers the content and calculates the zoom level.
    /// Degenerate boxes leave the viewport unchanged.
    pub fn fit_to_bounds(&mut self, bounds: Bounds, padding: f64) {
        if !bounds.is_valid() {
            return;
        }

        let padding_factor = 1.0 - (padding.clamp(0.0, 0.49) * 2.0);
        let zoom_x = (self.canvas_width * padding_factor) / bounds.width();
        let zoom_y = (self.canvas_height * padding_factor) / bounds.height();
        let new_zoom = zoom_x.min(zoom_y).clamp(MIN_ZOOM, MAX_ZOOM);

        let content_pixel_width = bounds.width() * new_zoom;
        let content_pixel_height = bounds.height() * new_zoom;
        let left = self.canvas_width / 2.0 - content_pixel_width / 2.0;
        let bottom = self.canvas_height / 2.0 - content_pixel_height / 2.0;

        // pixel_x = world_x * zoom + pan_x, measured from the bottom edge for y
        self.zoom = new_zoom;
        self.pan_x = left - bounds.min_x * new_zoom;
        self.pan_y = bottom - bounds.min_y * new_zoom;
    }

    /// Remembers `bounds` as the home view and fits it without padding.
    pub fn set_home(&mut self, bounds: Bounds) {
        if bounds.is_valid() {
            self.home = Some(bounds);
            self.fit_to_bounds(bounds, 0.0);
        }
    }

    /// Zooms to a point, maintaining that point's screen position.
    pub fn zoom_to_point(&mut self, world_point: &Point, new_zoom: f64) {
        if new_zoom <= MIN_ZOOM || new_zoom >= MAX_ZOOM {
            return;
        }

        let (pixel_x, pixel_y) = self.world_to_pixel(world_point.x, world_point.y);
        self.zoom = new_zoom;
        self.pan_x = pixel_x - world_point.x * new_zoom;
        self.pan_y = self.canvas_height - pixel_y - world_point.y * new_zoom;
    }

    /// The world rectangle currently covered by the canvas.
    pub fn visible_bounds(&self) -> Bounds {
        let bottom_left = self.pixel_to_world(0.0, self.canvas_height);
        let top_right = self.pixel_to_world(self.canvas_width, 0.0);
        Bounds::new(bottom_left.x, bottom_left.y, top_right.x, top_right.y)
    }

    /// Restores the home view, or 1:1 zoom at the origin when none was set.
    pub fn reset(&mut self) {
        match self.home {
            Some(home) => self.fit_to_bounds(home, 0.0),
            None => {
                self.zoom = 1.0;
                self.pan_x = 0.0;
                self.pan_y = 0.0;
            }
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Viewport(zoom: {:.2}, pan: ({:.2}, {:.2}), visible: {})",
            self.zoom,
            self.pan_x,
            self.pan_y,
            self.visible_bounds()
        )
    }
}
