//! # Gridpoly Designer
//!
//! Grid-snapping polygon editor. Vertices captured from pointer input are
//! snapped to a rectangular lattice, committed as polygons, and combined with
//! planar set operations (subtract and merge).
//!
//! ## Core Components
//!
//! - **Snapping**: [`GridSnapper`] rounds points to the grid and computes
//!   visible grid lines
//! - **Capture**: [`PolygonCapture`] turns clicks and drags into a vertex
//!   sequence
//! - **Kernel**: [`PlanarOps`] and its `geo` implementation [`GeoKernel`]
//! - **Editor**: [`PolygonEditor`] owns the saved polygons and runs
//!   commit/clear/reset/subtract/merge
//! - **Context**: [`EditorContext`] wires capture, editor, viewport and a
//!   [`Renderer`] to the control surface
//!
//! ## Architecture
//!
//! ```text
//! EditorContext
//!   ├── Viewport (pixel <-> world)
//!   ├── PolygonCapture (pointer gestures)
//!   ├── PolygonEditor
//!   │     ├── GridSnapper
//!   │     └── PlanarOps (GeoKernel)
//!   └── Renderer (Scene snapshots)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gridpoly_designer::{GridSnapper, PolygonEditor};
//! use gridpoly_core::Point;
//!
//! let mut editor = PolygonEditor::new(GridSnapper::new(1.0, 1.0));
//! editor.select(vec![Point::new(0.3, 0.3), Point::new(4.7, 0.2), Point::new(4.8, 4.9)]);
//! editor.commit();
//! editor.merge()?;
//! ```

pub mod capture;
pub mod context;
pub mod editor;
pub mod kernel;
pub mod render;
pub mod snap;
pub mod viewport;

pub use capture::{CaptureEvent, CaptureState, PolygonCapture, VertexCapture};
pub use context::{Action, EditorContext, Key};
pub use editor::{EditorMode, PolygonEditor, SubtractSummary};
pub use kernel::{from_geo_polygon, to_geo_polygon, GeoKernel, PlanarOps, ShapeSet};
pub use render::{NullRenderer, Renderer, Scene};
pub use snap::{snap_coordinate, snap_point, GridLines, GridSnapper, MAX_GRID_LINES};
pub use viewport::{Bounds, Viewport};
