//! Application context.
//!
//! [`EditorContext`] bundles everything a front end needs: configuration,
//! viewport, vertex capture, the polygon editor and a renderer. It is
//! created at startup, receives pointer, key, button and slider input, and
//! is torn down with [`EditorContext::shutdown`]. Errors from editor
//! operations never leave the context; they become the status banner.

use gridpoly_core::{EditorEvent, Point};
use gridpoly_settings::Config;

use crate::capture::{CaptureEvent, CaptureState, PolygonCapture, VertexCapture};
use crate::editor::PolygonEditor;
use crate::kernel::{GeoKernel, PlanarOps};
use crate::render::{Renderer, Scene};
use crate::snap::GridSnapper;
use crate::viewport::{Bounds, Viewport};

/// Buttons of the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Discard the current selection and start a new one.
    StartOrClear,
    /// Save the current selection as a polygon.
    AddPolygon,
    /// Subtract the current selection from the saved polygons.
    RemoveSelectedArea,
    /// Discard everything.
    Reset,
    /// Union all saved polygons.
    Merge,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::StartOrClear => "Start (or Clear) Selection",
            Action::AddPolygon => "Add Polygon (+)",
            Action::RemoveSelectedArea => "Remove selected Area (-)",
            Action::Reset => "Reset",
            Action::Merge => "Merge",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Char(char),
}

pub struct EditorContext<R: Renderer, K: PlanarOps = GeoKernel> {
    config: Config,
    viewport: Viewport,
    capture: PolygonCapture,
    editor: PolygonEditor<K>,
    renderer: R,
    status: Option<String>,
}

impl<R: Renderer> EditorContext<R, GeoKernel> {
    pub fn new(config: Config, renderer: R) -> Self {
        Self::with_kernel(config, renderer, GeoKernel)
    }
}

impl<R: Renderer, K: PlanarOps> EditorContext<R, K> {
    pub fn with_kernel(config: Config, renderer: R, kernel: K) -> Self {
        let view = &config.view;
        let viewport = Viewport::fitted(
            view.canvas_width,
            view.canvas_height,
            Bounds::new(view.x_min, view.y_min, view.x_max, view.y_max),
        );
        let grab_radius = viewport.pixels_to_world_distance(config.capture.grab_range);
        let snapper = GridSnapper::new(config.grid.spacing_x, config.grid.spacing_y);

        tracing::info!(
            "Editor context created: grid ({}, {}), view {}",
            config.grid.spacing_x,
            config.grid.spacing_y,
            viewport.visible_bounds()
        );

        let mut context = Self {
            config,
            viewport,
            capture: PolygonCapture::new(grab_radius),
            editor: PolygonEditor::with_kernel(snapper, kernel),
            renderer,
            status: None,
        };
        context.redraw();
        context
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn capture(&self) -> &PolygonCapture {
        &self.capture
    }

    pub fn editor(&self) -> &PolygonEditor<K> {
        &self.editor
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The user-visible banner left by the last failed operation.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Snapshot of what is currently on screen.
    pub fn scene(&self) -> Scene {
        Scene::capture(
            &self.editor,
            self.viewport.visible_bounds(),
            self.capture.preview(),
            self.status.as_deref(),
        )
    }

    /// Handles a button of the control surface.
    pub fn perform(&mut self, action: Action) {
        tracing::debug!("Action: {}", action.label());
        match action {
            Action::StartOrClear => {
                self.editor.clear();
                self.cancel_capture();
                self.status = None;
            }
            Action::AddPolygon => {
                if self.editor.commit().is_some() {
                    self.cancel_capture();
                }
                self.status = None;
            }
            Action::RemoveSelectedArea => match self.editor.subtract() {
                Ok(_) => {
                    self.cancel_capture();
                    self.status = None;
                }
                Err(err) => self.status = Some(err.user_message().to_string()),
            },
            Action::Reset => {
                self.editor.reset();
                self.cancel_capture();
                self.status = None;
            }
            Action::Merge => match self.editor.merge() {
                Ok(_) => self.status = None,
                Err(err) => self.status = Some(err.user_message().to_string()),
            },
        }
        self.redraw();
    }

    pub fn key_press(&mut self, key: Key) {
        match key {
            Key::Escape => {
                self.editor.discard_current();
                self.cancel_capture();
                self.redraw();
            }
            Key::Char(c) => tracing::debug!("Ignoring key '{}'", c),
        }
    }

    /// Tracks the cursor in world coordinates; returns the snapped position.
    pub fn pointer_move(&mut self, world: Point) -> Point {
        let snapped = self.capture.pointer_move(world, self.editor.snapper());
        if self.capture.grabbed().is_some() && self.capture.state() == CaptureState::Drawing {
            self.editor.track(self.capture.vertices());
        }
        self.redraw();
        snapped
    }

    pub fn pointer_press(&mut self, world: Point) {
        self.capture.pointer_press(world);
    }

    pub fn pointer_release(&mut self, world: Point) {
        let event = self.capture.pointer_release(world, self.editor.snapper());
        self.apply_capture_event(event);
    }

    /// Press and release at the same world position.
    pub fn click(&mut self, world: Point) {
        self.pointer_press(world);
        self.pointer_release(world);
    }

    /// Pixel-coordinate variant of [`Self::pointer_move`].
    pub fn pointer_move_px(&mut self, pixel_x: f64, pixel_y: f64) -> Point {
        self.pointer_move(self.viewport.pixel_to_world(pixel_x, pixel_y))
    }

    pub fn pointer_press_px(&mut self, pixel_x: f64, pixel_y: f64) {
        self.pointer_press(self.viewport.pixel_to_world(pixel_x, pixel_y));
    }

    pub fn pointer_release_px(&mut self, pixel_x: f64, pixel_y: f64) {
        self.pointer_release(self.viewport.pixel_to_world(pixel_x, pixel_y));
    }

    /// Moves every captured vertex by a world offset.
    pub fn shift_all(&mut self, dx: f64, dy: f64) {
        let event = self.capture.translate_all(dx, dy, self.editor.snapper());
        if event.is_none() && self.capture.state() == CaptureState::Drawing {
            self.editor.track(self.capture.vertices());
        }
        self.apply_capture_event(event);
    }

    /// X slider handler; the value is quantized to the slider lattice.
    pub fn set_grid_spacing_x(&mut self, value: f64) {
        let spacing_x = self.config.grid.quantize(value);
        let spacing_y = self.editor.snapper().spacing_y();
        self.set_grid_spacing(spacing_x, spacing_y);
    }

    /// Y slider handler; the value is quantized to the slider lattice.
    pub fn set_grid_spacing_y(&mut self, value: f64) {
        let spacing_x = self.editor.snapper().spacing_x();
        let spacing_y = self.config.grid.quantize(value);
        self.set_grid_spacing(spacing_x, spacing_y);
    }

    /// Sets both spacings as given. Non-positive values disable the grid.
    pub fn set_grid_spacing(&mut self, spacing_x: f64, spacing_y: f64) {
        self.editor.set_grid_spacing(spacing_x, spacing_y);
        if !self.editor.snapper().is_enabled() {
            tracing::warn!(
                "Grid spacing ({}, {}) disables the grid",
                spacing_x,
                spacing_y
            );
        }
        self.redraw();
    }

    /// Shows `bounds` and makes it the home view.
    pub fn set_view(&mut self, bounds: Bounds) {
        if !bounds.is_valid() {
            tracing::warn!("Ignoring empty view {}", bounds);
            return;
        }
        self.viewport.set_home(bounds);
        self.view_changed();
    }

    /// Scales the zoom by `factor` around a world point that stays put on screen.
    pub fn zoom_view(&mut self, factor: f64, anchor: Point) {
        if !(factor.is_finite() && factor > 0.0 && anchor.is_finite()) {
            tracing::warn!("Ignoring zoom by {} at {}", factor, anchor);
            return;
        }
        let zoom = self.viewport.zoom() * factor;
        self.viewport.zoom_to_point(&anchor, zoom);
        self.view_changed();
    }

    /// Moves the view content by a world distance.
    pub fn pan_view(&mut self, dx: f64, dy: f64) {
        if !(dx.is_finite() && dy.is_finite()) {
            tracing::warn!("Ignoring pan by ({}, {})", dx, dy);
            return;
        }
        let zoom = self.viewport.zoom();
        self.viewport.pan_by(dx * zoom, dy * zoom);
        self.view_changed();
    }

    /// Returns to the home view.
    pub fn home_view(&mut self) {
        self.viewport.reset();
        self.view_changed();
    }

    /// Ends the context's lifetime and hands back the renderer.
    pub fn shutdown(self) -> R {
        tracing::info!(
            "Editor context closed with {} saved polygon(s)",
            self.editor.saved().len()
        );
        self.renderer
    }

    fn apply_capture_event(&mut self, event: Option<CaptureEvent>) {
        match event {
            Some(CaptureEvent::Completed(points)) => self.editor.select(points),
            Some(CaptureEvent::VertexAdded(_)) | Some(CaptureEvent::VertexMoved { .. }) => {
                self.editor.track(self.capture.vertices());
            }
            None => {}
        }
        self.redraw();
    }

    fn view_changed(&mut self) {
        self.capture.set_grab_radius(
            self.viewport
                .pixels_to_world_distance(self.config.capture.grab_range),
        );
        self.redraw();
    }

    fn cancel_capture(&mut self) {
        self.capture.cancel();
        self.editor.events().publish(EditorEvent::CaptureReset);
    }

    fn redraw(&mut self) {
        let scene = self.scene();
        self.renderer.render(&scene);
    }
}
