//! Polygon editor state machine.
//!
//! [`PolygonEditor`] owns the grid snapper, the in-progress vertex sequence,
//! the saved polygons and the optional transient candidate used as the
//! subtrahend of a subtract. Every mutation publishes [`EditorEvent`]s on the
//! editor's bus and logs the matching notice through `tracing`.
//!
//! Set operations go through a [`PlanarOps`] kernel. Subtract is
//! all-or-nothing: the saved collection is only replaced after every saved
//! polygon was processed successfully. On failure the candidate stays in the
//! current sequence for re-editing.

use gridpoly_core::{
    polygon_report, EditorError, EditorEvent, EventBus, GeometryError, Point, PolygonWithHoles,
};

use crate::kernel::{GeoKernel, PlanarOps};
use crate::snap::{GridLines, GridSnapper};
use crate::viewport::Bounds;

/// Drawing state of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// No in-progress sequence.
    Idle,
    /// The current sequence holds at least one vertex.
    Drawing,
}

/// Saved-collection sizes around a successful subtract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtractSummary {
    pub before: usize,
    pub after: usize,
}

pub struct PolygonEditor<K: PlanarOps = GeoKernel> {
    snapper: GridSnapper,
    current: Vec<Point>,
    saved: Vec<PolygonWithHoles>,
    transient: Option<PolygonWithHoles>,
    kernel: K,
    events: EventBus,
}

impl PolygonEditor<GeoKernel> {
    /// Creates an editor backed by the `geo` kernel.
    pub fn new(snapper: GridSnapper) -> Self {
        Self::with_kernel(snapper, GeoKernel)
    }
}

impl Default for PolygonEditor<GeoKernel> {
    fn default() -> Self {
        Self::new(GridSnapper::default())
    }
}

impl<K: PlanarOps> PolygonEditor<K> {
    pub fn with_kernel(snapper: GridSnapper, kernel: K) -> Self {
        Self {
            snapper,
            current: Vec::new(),
            saved: Vec::new(),
            transient: None,
            kernel,
            events: EventBus::new(),
        }
    }

    /// Replaces the event bus, e.g. with one that records history.
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn snapper(&self) -> &GridSnapper {
        &self.snapper
    }

    pub fn mode(&self) -> EditorMode {
        if self.current.is_empty() {
            EditorMode::Idle
        } else {
            EditorMode::Drawing
        }
    }

    /// The in-progress, uncommitted vertex sequence.
    pub fn current(&self) -> &[Point] {
        &self.current
    }

    pub fn saved(&self) -> &[PolygonWithHoles] {
        &self.saved
    }

    /// The candidate of the last subtract, kept only while it failed.
    pub fn transient(&self) -> Option<&PolygonWithHoles> {
        self.transient.as_ref()
    }

    /// Snaps a raw cursor position for live preview.
    pub fn snap(&self, raw: Point) -> Point {
        self.snapper.snap(raw)
    }

    /// Grid lines for the given visible area.
    pub fn grid_lines(&self, bounds: &Bounds) -> Option<GridLines> {
        self.snapper.grid_lines(bounds)
    }

    pub fn set_grid_spacing(&mut self, spacing_x: f64, spacing_y: f64) {
        self.snapper.set_spacing(spacing_x, spacing_y);
        tracing::debug!("Grid spacing set to ({}, {})", spacing_x, spacing_y);
        self.events.publish(EditorEvent::GridChanged {
            spacing_x,
            spacing_y,
        });
        self.events.publish(EditorEvent::RedrawRequested);
    }

    /// Replaces the current sequence with a finished capture gesture.
    ///
    /// Points are snapped again, which leaves already snapped input unchanged.
    /// Non-finite points are dropped. Rings are stored open, so when the list
    /// repeats its first point at the end that closing point is not kept by
    /// [`commit`](Self::commit).
    pub fn select(&mut self, points: Vec<Point>) {
        self.current = self.snapped_finite(&points);
        tracing::info!("Selected vertices: {}", format_points(&self.current));
        self.events
            .publish(EditorEvent::VerticesSelected(self.current.clone()));
    }

    /// Mirrors an in-progress capture gesture without emitting a notice.
    pub fn track(&mut self, points: &[Point]) {
        self.current = self.snapped_finite(points);
    }

    fn snapped_finite(&self, points: &[Point]) -> Vec<Point> {
        points
            .iter()
            .map(|p| self.snapper.snap(*p))
            .filter(|p| {
                let finite = p.is_finite();
                if !finite {
                    tracing::warn!("Dropping non-finite vertex {}", p);
                }
                finite
            })
            .collect()
    }

    /// Discards the current sequence only; the transient candidate stays.
    pub fn discard_current(&mut self) {
        self.current.clear();
        self.events.publish(EditorEvent::SelectionCleared);
        self.events.publish(EditorEvent::RedrawRequested);
    }

    /// Saves the current sequence as a new polygon without holes.
    ///
    /// Any transient candidate is dropped. Returns the 1-based number of the
    /// saved polygon, or `None` when there was nothing to save.
    pub fn commit(&mut self) -> Option<usize> {
        self.transient = None;
        if self.current.is_empty() {
            tracing::info!("Nothing to save");
            return None;
        }
        let polygon = PolygonWithHoles::from_exterior(std::mem::take(&mut self.current));
        let exterior = polygon.exterior.clone();
        self.saved.push(polygon);
        let number = self.saved.len();

        tracing::info!("Polygon saved: {}", exterior);
        self.events
            .publish(EditorEvent::PolygonSaved { number, exterior });
        self.events.publish(EditorEvent::RedrawRequested);
        Some(number)
    }

    /// Discards the current sequence and the transient candidate.
    pub fn clear(&mut self) {
        self.current.clear();
        self.transient = None;
        self.events.publish(EditorEvent::SelectionCleared);
        self.events.publish(EditorEvent::RedrawRequested);
    }

    /// Discards everything, saved polygons included.
    pub fn reset(&mut self) {
        self.saved.clear();
        self.current.clear();
        self.transient = None;
        tracing::info!("Editor reset");
        self.events.publish(EditorEvent::Reset);
        self.events.publish(EditorEvent::RedrawRequested);
    }

    /// Removes the area of the current sequence from every saved polygon.
    ///
    /// Returns `Ok(None)` when no vertices are selected. Each saved polygon
    /// that overlaps the candidate is replaced by its difference, which may
    /// be zero, one or several polygons. On error nothing is saved and the
    /// candidate is kept both in the current sequence and as the transient
    /// polygon.
    pub fn subtract(&mut self) -> Result<Option<SubtractSummary>, EditorError> {
        if self.current.is_empty() {
            tracing::info!("No area selected");
            return Ok(None);
        }
        let candidate = PolygonWithHoles::from_exterior(self.current.clone());
        self.transient = Some(candidate.clone());

        match self.subtract_from_saved(&candidate) {
            Ok(output) => {
                let summary = SubtractSummary {
                    before: self.saved.len(),
                    after: output.len(),
                };
                self.saved = output;
                self.current.clear();
                self.transient = None;
                tracing::info!(
                    "Removed selected area: {} -> {} polygons",
                    summary.before,
                    summary.after
                );
                self.events.publish(EditorEvent::AreaRemoved {
                    before: summary.before,
                    after: summary.after,
                });
                self.events.publish(EditorEvent::RedrawRequested);
                Ok(Some(summary))
            }
            Err(err) => {
                self.report_failure(&err);
                Err(err)
            }
        }
    }

    fn subtract_from_saved(
        &self,
        candidate: &PolygonWithHoles,
    ) -> Result<Vec<PolygonWithHoles>, EditorError> {
        self.kernel
            .check(candidate)
            .map_err(|err| EditorError::InvalidSelection {
                reason: invalid_reason(err),
            })?;

        let mut output = Vec::with_capacity(self.saved.len());
        for (index, polygon) in self.saved.iter().enumerate() {
            if !self.kernel.is_valid(polygon) {
                return Err(EditorError::InvalidSavedPolygon { number: index + 1 });
            }
            if self.kernel.overlaps(polygon, candidate) {
                output.extend(self.kernel.difference(polygon, candidate)?.decompose());
            } else {
                output.push(polygon.clone());
            }
        }
        Ok(output)
    }

    /// Unions all saved polygons, repairing invalid ones first.
    ///
    /// Returns `Ok(None)` when nothing is saved, otherwise the number of
    /// polygons after the merge. On error the saved collection is unchanged.
    pub fn merge(&mut self) -> Result<Option<usize>, EditorError> {
        if self.saved.is_empty() {
            tracing::info!("No polygons to merge");
            return Ok(None);
        }

        match self.merged() {
            Ok(polygons) => {
                for line in polygon_report(&polygons) {
                    tracing::info!("{}", line);
                }
                self.saved = polygons;
                self.events.publish(EditorEvent::PolygonsMerged {
                    polygons: self.saved.clone(),
                });
                self.events.publish(EditorEvent::RedrawRequested);
                Ok(Some(self.saved.len()))
            }
            Err(err) => {
                self.report_failure(&err);
                Err(err)
            }
        }
    }

    fn merged(&self) -> Result<Vec<PolygonWithHoles>, EditorError> {
        let mut repaired = Vec::with_capacity(self.saved.len());
        for (index, polygon) in self.saved.iter().enumerate() {
            if self.kernel.is_valid(polygon) {
                repaired.push(polygon.clone());
            } else {
                tracing::debug!("Repairing saved polygon #{}", index + 1);
                repaired.extend(self.kernel.make_valid(polygon)?.decompose());
            }
        }
        Ok(self.kernel.union_all(&repaired)?.decompose())
    }

    fn report_failure(&self, err: &EditorError) {
        match err {
            EditorError::Geometry(_) => tracing::error!("{}", err),
            _ => tracing::warn!("{}", err),
        }
        self.events.publish(EditorEvent::OperationFailed {
            message: err.to_string(),
            user_message: err.user_message().to_string(),
        });
    }
}

fn invalid_reason(err: GeometryError) -> String {
    match err {
        GeometryError::InvalidGeometry { reason } => reason,
        other => other.to_string(),
    }
}

fn format_points(points: &[Point]) -> String {
    let parts: Vec<String> = points.iter().map(|p| p.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpoly_core::{shared, EventBusConfig, EventFilter};

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point> {
        vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }

    #[test]
    fn test_mode_follows_current_sequence() {
        let mut editor = PolygonEditor::default();
        assert_eq!(editor.mode(), EditorMode::Idle);
        editor.track(&[Point::new(0.2, 0.2)]);
        assert_eq!(editor.mode(), EditorMode::Drawing);
        editor.clear();
        assert_eq!(editor.mode(), EditorMode::Idle);
    }

    #[test]
    fn test_select_snaps_points() {
        let mut editor = PolygonEditor::new(GridSnapper::new(1.0, 1.0));
        editor.select(vec![Point::new(0.3, 0.3), Point::new(4.7, 0.2)]);
        assert_eq!(editor.current(), &[Point::new(0.0, 0.0), Point::new(5.0, 0.0)]);
    }

    #[test]
    fn test_commit_empty_is_noop() {
        let mut editor = PolygonEditor::default();
        assert_eq!(editor.commit(), None);
        assert!(editor.saved().is_empty());
    }

    #[test]
    fn test_commit_numbers_polygons() {
        let mut editor = PolygonEditor::default();
        editor.select(square(0.0, 0.0, 1.0, 1.0));
        assert_eq!(editor.commit(), Some(1));
        editor.select(square(2.0, 2.0, 3.0, 3.0));
        assert_eq!(editor.commit(), Some(2));
        assert!(editor.current().is_empty());
        assert_eq!(editor.saved().len(), 2);
    }

    #[test]
    fn test_clear_keeps_saved() {
        let mut editor = PolygonEditor::default();
        editor.select(square(0.0, 0.0, 1.0, 1.0));
        editor.commit();
        editor.select(square(2.0, 2.0, 3.0, 3.0));
        editor.clear();
        assert!(editor.current().is_empty());
        assert!(editor.transient().is_none());
        assert_eq!(editor.saved().len(), 1);
    }

    #[test]
    fn test_subtract_without_selection() {
        let mut editor = PolygonEditor::default();
        assert_eq!(editor.subtract(), Ok(None));
    }

    #[test]
    fn test_subtract_invalid_selection_keeps_candidate() {
        let mut editor = PolygonEditor::default();
        editor.select(square(0.0, 0.0, 4.0, 4.0));
        editor.commit();

        let bowtie = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(2.0, 0.0),
            Point::new(0.0, 2.0),
        ];
        editor.select(bowtie.clone());
        let err = editor.subtract().unwrap_err();
        assert!(matches!(err, EditorError::InvalidSelection { .. }));
        assert_eq!(editor.current(), bowtie.as_slice());
        assert!(editor.transient().is_some());
        assert_eq!(editor.saved().len(), 1);
    }

    #[test]
    fn test_merge_empty_is_noop() {
        let mut editor = PolygonEditor::default();
        assert_eq!(editor.merge(), Ok(None));
    }

    #[test]
    fn test_events_published_in_order() {
        let events = EventBus::with_config(EventBusConfig {
            enable_history: true,
            ..Default::default()
        });
        let mut editor = PolygonEditor::default().with_events(events);
        editor.select(square(0.0, 0.0, 1.0, 1.0));
        editor.commit();
        editor.reset();

        let history = editor.events().history();
        assert!(matches!(history[0], EditorEvent::VerticesSelected(_)));
        assert!(matches!(history[1], EditorEvent::PolygonSaved { number: 1, .. }));
        assert_eq!(history[2], EditorEvent::RedrawRequested);
        assert_eq!(history[3], EditorEvent::Reset);
    }

    #[test]
    fn test_failure_is_published() {
        let mut editor = PolygonEditor::default();
        let failures = shared(Vec::new());
        let sink = failures.clone();
        editor
            .events()
            .subscribe(EventFilter::All, move |event| {
                if let EditorEvent::OperationFailed { user_message, .. } = event {
                    sink.borrow_mut().push(user_message.clone());
                }
            });

        editor.select(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
        assert!(editor.subtract().is_err());
        assert_eq!(
            failures.borrow().as_slice(),
            &["The selection is not valid! Please adjust the shape.".to_string()]
        );
    }
}
