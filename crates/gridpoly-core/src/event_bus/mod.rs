//! # Event Bus Module
//!
//! Decoupled communication between the polygon editor and whatever presents
//! it (renderer, console log, status banner).
//!
//! ## Overview
//!
//! - The editor publishes typed `EditorEvent`s without knowing subscribers
//! - Subscribers filter by `EventCategory` and receive events synchronously
//! - There is no global instance; the bus is owned by the editor
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gridpoly_core::event_bus::{EditorEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Polygons]),
//!     |event| println!("{}", event.description()),
//! );
//!
//! bus.publish(EditorEvent::Reset);
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
