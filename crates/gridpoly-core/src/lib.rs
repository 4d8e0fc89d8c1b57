//! # Gridpoly Core
//!
//! Core types and utilities for Gridpoly.
//! Provides the planar data model, the error taxonomy, and the editor
//! event bus shared by the designer and the front ends.

pub mod data;
pub mod error;
pub mod event_bus;
pub mod types;

pub use data::{polygon_report, Point, PolygonWithHoles, Ring};

pub use error::{EditorError, GeometryError, GeometryResult};

// Re-export event bus for convenience
pub use event_bus::{
    EditorEvent, EventBus, EventBusConfig, EventCategory, EventFilter, SubscriptionId,
};

pub use types::{shared, Shared};
