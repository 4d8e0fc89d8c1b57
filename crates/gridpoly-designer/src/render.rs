//! Render snapshots.
//!
//! A [`Scene`] is an immutable picture of everything a front end draws:
//! saved polygons with their holes, the transient candidate, the
//! in-progress sequence, grid lines and the status banner. Front ends
//! implement [`Renderer`] and never mutate editor state.

use gridpoly_core::{Point, PolygonWithHoles};
use serde::Serialize;

use crate::editor::PolygonEditor;
use crate::kernel::PlanarOps;
use crate::snap::GridLines;
use crate::viewport::Bounds;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    /// Saved polygons whose exterior has at least three vertices.
    pub saved: Vec<PolygonWithHoles>,
    pub transient: Option<PolygonWithHoles>,
    pub current: Vec<Point>,
    /// Snapped cursor position.
    pub preview: Option<Point>,
    /// `None` when the grid is disabled.
    pub grid: Option<GridLines>,
    pub spacing: (f64, f64),
    pub bounds: Bounds,
    pub status: Option<String>,
}

impl Scene {
    /// Snapshot of `editor` as seen through `bounds`.
    pub fn capture<K: PlanarOps>(
        editor: &PolygonEditor<K>,
        bounds: Bounds,
        preview: Option<Point>,
        status: Option<&str>,
    ) -> Self {
        Self {
            saved: editor
                .saved()
                .iter()
                .filter(|polygon| polygon.exterior.len() > 2)
                .cloned()
                .collect(),
            transient: editor.transient().cloned(),
            current: editor.current().to_vec(),
            preview,
            grid: editor.grid_lines(&bounds),
            spacing: editor.snapper().spacing(),
            bounds,
            status: status.map(str::to_string),
        }
    }

    pub fn hole_count(&self) -> usize {
        self.saved.iter().map(|polygon| polygon.holes.len()).sum()
    }
}

/// Draws scenes.
pub trait Renderer {
    fn render(&mut self, scene: &Scene);
}

/// Renderer that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _scene: &Scene) {}
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, scene: &Scene) {
        (**self).render(scene)
    }
}
