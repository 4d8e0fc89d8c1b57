//! Interactive vertex capture.
//!
//! [`VertexCapture`] is the contract the editor needs from a pointer-driven
//! polygon selector. [`PolygonCapture`] implements it headlessly: clicks
//! append snapped vertices, clicking the first vertex again closes the
//! polygon, and presses near an existing vertex grab it for dragging.
//!
//! All positions are world coordinates. Snapping is delegated to the
//! [`GridSnapper`] passed into each pointer call, so the live preview and the
//! stored vertex always go through the same rounding.

use gridpoly_core::Point;

use crate::snap::GridSnapper;

/// Capture lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// No vertices.
    #[default]
    Idle,
    /// Vertices are being placed.
    Drawing,
    /// The polygon was closed; vertices remain draggable until cancelled.
    Completed,
}

/// Notable outcomes of a pointer gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureEvent {
    /// A vertex was appended while drawing.
    VertexAdded(Point),
    /// A vertex was dragged to a new position while drawing.
    VertexMoved { index: usize, to: Point },
    /// The polygon is complete, or a completed polygon was edited.
    Completed(Vec<Point>),
}

/// Interactive primitive producing an ordered point sequence.
pub trait VertexCapture {
    fn state(&self) -> CaptureState;

    /// Vertices placed so far, in order.
    fn vertices(&self) -> &[Point];

    /// Drop all vertices and return to [`CaptureState::Idle`].
    fn cancel(&mut self);
}

/// Headless polygon selector with snapping and vertex dragging.
#[derive(Debug, Clone)]
pub struct PolygonCapture {
    vertices: Vec<Point>,
    state: CaptureState,
    grabbed: Option<usize>,
    preview: Option<Point>,
    grab_radius: f64,
}

impl PolygonCapture {
    /// Creates an idle capture; `grab_radius` is in world units.
    pub fn new(grab_radius: f64) -> Self {
        Self {
            vertices: Vec::new(),
            state: CaptureState::Idle,
            grabbed: None,
            preview: None,
            grab_radius,
        }
    }

    pub fn grab_radius(&self) -> f64 {
        self.grab_radius
    }

    /// Updates the grab radius, e.g. after the viewport zoom changed.
    pub fn set_grab_radius(&mut self, grab_radius: f64) {
        self.grab_radius = grab_radius;
    }

    /// The snapped cursor position from the last move, if any.
    pub fn preview(&self) -> Option<Point> {
        self.preview
    }

    /// Index of the vertex currently being dragged.
    pub fn grabbed(&self) -> Option<usize> {
        self.grabbed
    }

    /// Tracks the cursor and returns its snapped position.
    ///
    /// While a vertex is grabbed it follows the snapped cursor.
    pub fn pointer_move(&mut self, raw: Point, snapper: &GridSnapper) -> Point {
        let snapped = snapper.snap(raw);
        if !snapped.is_finite() {
            return snapped;
        }
        if let Some(index) = self.grabbed {
            if let Some(vertex) = self.vertices.get_mut(index) {
                *vertex = snapped;
            }
        }
        self.preview = Some(snapped);
        snapped
    }

    /// Starts a gesture. Returns true when a vertex was grabbed.
    ///
    /// The first vertex is not grabbed while drawing with three or more
    /// vertices, so that releasing on it closes the polygon.
    pub fn pointer_press(&mut self, raw: Point) -> bool {
        let Some(index) = self.nearest_vertex(raw) else {
            return false;
        };
        if self.state == CaptureState::Drawing && index == 0 && self.vertices.len() >= 3 {
            return false;
        }
        self.grabbed = Some(index);
        true
    }

    /// Ends a gesture: finishes a drag, closes the polygon or appends a vertex.
    ///
    /// A release at a non-finite position ends any drag and changes nothing.
    pub fn pointer_release(&mut self, raw: Point, snapper: &GridSnapper) -> Option<CaptureEvent> {
        let snapped = snapper.snap(raw);
        if !snapped.is_finite() {
            self.grabbed = None;
            return None;
        }

        if let Some(index) = self.grabbed.take() {
            let vertex = self.vertices.get_mut(index)?;
            *vertex = snapped;
            return Some(match self.state {
                CaptureState::Completed => CaptureEvent::Completed(self.vertices.clone()),
                _ => CaptureEvent::VertexMoved { index, to: snapped },
            });
        }

        match self.state {
            CaptureState::Completed => None,
            CaptureState::Drawing if self.closes_polygon(raw) => {
                self.state = CaptureState::Completed;
                self.preview = None;
                Some(CaptureEvent::Completed(self.vertices.clone()))
            }
            CaptureState::Idle | CaptureState::Drawing => {
                self.vertices.push(snapped);
                self.state = CaptureState::Drawing;
                Some(CaptureEvent::VertexAdded(snapped))
            }
        }
    }

    /// A press immediately followed by a release at the same position.
    pub fn click(&mut self, raw: Point, snapper: &GridSnapper) -> Option<CaptureEvent> {
        self.pointer_press(raw);
        self.pointer_release(raw, snapper)
    }

    /// Moves every vertex by `(dx, dy)` and re-snaps them.
    ///
    /// Returns the edited polygon when it was already completed.
    pub fn translate_all(&mut self, dx: f64, dy: f64, snapper: &GridSnapper) -> Option<CaptureEvent> {
        if self.vertices.is_empty() || !dx.is_finite() || !dy.is_finite() {
            return None;
        }
        for vertex in &mut self.vertices {
            *vertex = snapper.snap(vertex.offset(dx, dy));
        }
        match self.state {
            CaptureState::Completed => Some(CaptureEvent::Completed(self.vertices.clone())),
            _ => None,
        }
    }

    fn closes_polygon(&self, raw: Point) -> bool {
        self.vertices.len() >= 3
            && self
                .vertices
                .first()
                .is_some_and(|first| first.distance_to(&raw) <= self.grab_radius)
    }

    fn nearest_vertex(&self, raw: Point) -> Option<usize> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(index, vertex)| (index, vertex.distance_to(&raw)))
            .filter(|(_, distance)| *distance <= self.grab_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}

impl VertexCapture for PolygonCapture {
    fn state(&self) -> CaptureState {
        self.state
    }

    fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    fn cancel(&mut self) {
        self.vertices.clear();
        self.grabbed = None;
        self.preview = None;
        self.state = CaptureState::Idle;
    }
}
