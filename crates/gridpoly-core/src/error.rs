//! Error handling for Gridpoly
//!
//! Provides error types for the editing layers of the application:
//! - Geometry errors (invalid rings, failed boolean operations)
//! - Editor errors (operation-level failures reported to the user)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised by the planar kernel. Both kinds are caught at the editor
/// operation boundary and never reach the event loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A ring is self-intersecting or degenerate
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry {
        /// What made the geometry invalid.
        reason: String,
    },

    /// A boolean operation failed for a reason the caller could not anticipate
    #[error("Geometry operation '{operation}' failed: {reason}")]
    OperationFailed {
        /// Name of the failing operation (difference, union, ...).
        operation: String,
        /// The failure message reported by the geometry library.
        reason: String,
    },
}

impl GeometryError {
    /// Create an invalid-geometry error.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            reason: reason.into(),
        }
    }

    /// Create an operation-failed error.
    pub fn operation_failed(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::OperationFailed {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

/// Editor error type
///
/// Returned by the subtract and merge operations. Each variant maps onto a
/// user-visible message via [`EditorError::user_message`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// The drawn candidate polygon is not a simple valid polygon
    #[error("The selection is not valid: {reason}")]
    InvalidSelection {
        /// Why the candidate was rejected.
        reason: String,
    },

    /// A polygon already in the saved collection is invalid
    #[error("Saved polygon #{number} is not valid")]
    InvalidSavedPolygon {
        /// 1-based display number of the offending polygon.
        number: usize,
    },

    /// The geometry library failed while processing polygons
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl EditorError {
    /// The banner text shown to the user for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            EditorError::InvalidSelection { .. } => {
                "The selection is not valid! Please adjust the shape."
            }
            EditorError::InvalidSavedPolygon { .. } => {
                "A saved polygon is not valid! Please fix it."
            }
            EditorError::Geometry(_) => "An error occurred while processing the polygons.",
        }
    }
}

/// Result type alias for geometry operations.
pub type GeometryResult<T> = std::result::Result<T, GeometryError>;
