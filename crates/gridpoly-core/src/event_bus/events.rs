//! Event type definitions for the event bus.
//!
//! This module defines the notices the polygon editor emits: selection
//! changes, saved polygons, set-operation results, grid changes, redraw
//! requests and user-visible failures. Events are cloneable and serializable
//! for logging/replay.

use serde::{Deserialize, Serialize};

use crate::data::{Point, PolygonWithHoles, Ring};

/// Root event enum for all editor events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorEvent {
    /// A draw gesture finished with these (snapped) vertices
    VerticesSelected(Vec<Point>),
    /// The current sequence was committed as saved polygon `number` (1-based)
    PolygonSaved {
        /// Display number of the new polygon.
        number: usize,
        /// The committed exterior ring.
        exterior: Ring,
    },
    /// The in-progress sequence and transient polygon were discarded
    SelectionCleared,
    /// All saved polygons were discarded
    Reset,
    /// A subtract operation replaced the saved collection
    AreaRemoved {
        /// Saved polygon count before the operation.
        before: usize,
        /// Saved polygon count after the operation.
        after: usize,
    },
    /// A merge operation replaced the saved collection
    PolygonsMerged {
        /// The merged polygons, in display order.
        polygons: Vec<PolygonWithHoles>,
    },
    /// Grid spacing changed
    GridChanged {
        /// Spacing along X.
        spacing_x: f64,
        /// Spacing along Y.
        spacing_y: f64,
    },
    /// The vertex capture was reset to idle
    CaptureReset,
    /// Saved polygons, transient polygon or grid need redrawing
    RedrawRequested,
    /// An operation failed and left the saved collection untouched
    OperationFailed {
        /// Detailed error text for logs.
        message: String,
        /// Short banner text for the user.
        user_message: String,
    },
}

impl EditorEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            EditorEvent::VerticesSelected(_)
            | EditorEvent::SelectionCleared
            | EditorEvent::CaptureReset => EventCategory::Selection,
            EditorEvent::PolygonSaved { .. }
            | EditorEvent::Reset
            | EditorEvent::AreaRemoved { .. }
            | EditorEvent::PolygonsMerged { .. } => EventCategory::Polygons,
            EditorEvent::GridChanged { .. } => EventCategory::Grid,
            EditorEvent::RedrawRequested => EventCategory::View,
            EditorEvent::OperationFailed { .. } => EventCategory::Error,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            EditorEvent::VerticesSelected(points) => {
                format!("Selected vertices: {}", Ring::new(points.clone()))
            }
            EditorEvent::PolygonSaved { number, exterior } => {
                format!("Polygon #{} saved: {}", number, exterior)
            }
            EditorEvent::SelectionCleared => "Selection cleared".to_string(),
            EditorEvent::Reset => "Drawing reset".to_string(),
            EditorEvent::AreaRemoved { before, after } => {
                format!("Area removed: {} polygon(s) -> {} polygon(s)", before, after)
            }
            EditorEvent::PolygonsMerged { polygons } => {
                format!("Merged into {} polygon(s)", polygons.len())
            }
            EditorEvent::GridChanged {
                spacing_x,
                spacing_y,
            } => format!("Grid spacing: {} x {}", spacing_x, spacing_y),
            EditorEvent::CaptureReset => "Capture reset".to_string(),
            EditorEvent::RedrawRequested => "Redraw requested".to_string(),
            EditorEvent::OperationFailed { message, .. } => format!("Error: {}", message),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Vertex selection and capture events.
    Selection,
    /// Saved polygon collection changes.
    Polygons,
    /// Grid spacing changes.
    Grid,
    /// Redraw requests.
    View,
    /// User-visible failures.
    Error,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Selection => write!(f, "Selection"),
            EventCategory::Polygons => write!(f, "Polygons"),
            EventCategory::Grid => write!(f, "Grid"),
            EventCategory::View => write!(f, "View"),
            EventCategory::Error => write!(f, "Error"),
        }
    }
}
