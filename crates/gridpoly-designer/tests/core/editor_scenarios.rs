//! Editor lifecycle scenarios: snapping on commit, clear and reset.

use crate::common::{points, same_ring, square};
use gridpoly_core::{EditorEvent, EventBus, EventBusConfig, Point};
use gridpoly_designer::{EditorMode, GridSnapper, PolygonEditor};

#[test]
fn test_snapped_commit_scenario() {
    let mut editor = PolygonEditor::new(GridSnapper::new(1.0, 1.0));
    editor.select(points(&[(0.3, 0.3), (4.7, 0.2), (4.8, 4.9), (0.1, 4.6)]));
    assert_eq!(editor.commit(), Some(1));

    let saved = &editor.saved()[0];
    assert_eq!(
        saved.exterior.points(),
        points(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0), (0.0, 5.0)]).as_slice()
    );
    assert!(saved.holes.is_empty());
    assert_eq!(editor.mode(), EditorMode::Idle);
}

#[test]
fn test_commit_preserves_vertex_count() {
    let mut editor = PolygonEditor::new(GridSnapper::new(0.5, 0.5));
    let drawn = points(&[
        (0.0, 0.0),
        (3.0, 0.0),
        (3.0, 1.0),
        (2.0, 1.0),
        (2.0, 2.0),
        (3.0, 2.0),
        (3.0, 3.0),
        (0.0, 3.0),
    ]);
    editor.select(drawn.clone());
    editor.commit();
    assert_eq!(editor.saved()[0].exterior.len(), drawn.len());
}

#[test]
fn test_tracked_vertices_are_snapped() {
    let mut editor = PolygonEditor::new(GridSnapper::new(2.0, 1.0));
    editor.track(&[Point::new(0.9, 0.4), Point::new(3.1, 0.6)]);
    assert_eq!(
        editor.current(),
        &[Point::new(0.0, 0.0), Point::new(4.0, 1.0)]
    );
    assert_eq!(editor.mode(), EditorMode::Drawing);
}

#[test]
fn test_non_finite_vertices_are_dropped() {
    let mut editor = PolygonEditor::new(GridSnapper::new(1.0, 1.0));
    editor.select(vec![
        Point::new(0.0, 0.0),
        Point::new(f64::NAN, 1.0),
        Point::new(3.0, 0.0),
        Point::new(3.0, f64::INFINITY),
        Point::new(3.0, 3.0),
    ]);
    assert_eq!(editor.current().len(), 3);

    editor.commit();
    let exterior = &editor.saved()[0].exterior;
    assert_eq!(exterior.len(), 3);
    assert!(exterior.points().iter().all(|p| p.is_finite()));

    editor.track(&[Point::new(f64::NAN, f64::NAN)]);
    assert!(editor.current().is_empty());
}

#[test]
fn test_explicitly_closed_selection_is_stored_open() {
    let mut editor = PolygonEditor::new(GridSnapper::new(1.0, 1.0));
    let mut closed = square(0.0, 0.0, 2.0, 2.0);
    closed.push(closed[0]);
    editor.select(closed);
    assert_eq!(editor.current().len(), 5);

    editor.commit();
    assert!(same_ring(&editor.saved()[0].exterior, &square(0.0, 0.0, 2.0, 2.0)));
}

#[test]
fn test_reset_clears_everything() {
    let mut editor = PolygonEditor::default();
    editor.select(square(0.0, 0.0, 4.0, 4.0));
    editor.commit();
    editor.select(square(10.0, 10.0, 12.0, 12.0));
    editor.commit();
    editor.select(square(1.0, 1.0, 2.0, 2.0));

    editor.reset();
    assert!(editor.saved().is_empty());
    assert!(editor.current().is_empty());
    assert!(editor.transient().is_none());
}

#[test]
fn test_spacing_change_applies_to_new_vertices() {
    let events = EventBus::with_config(EventBusConfig {
        enable_history: true,
        ..Default::default()
    });
    let mut editor = PolygonEditor::default().with_events(events);
    editor.set_grid_spacing(2.5, 0.5);
    assert_eq!(editor.snap(Point::new(3.9, 0.3)), Point::new(5.0, 0.5));

    assert!(editor.events().history().contains(&EditorEvent::GridChanged {
        spacing_x: 2.5,
        spacing_y: 0.5
    }));
}

#[test]
fn test_saved_notice_carries_exterior() {
    let events = EventBus::with_config(EventBusConfig {
        enable_history: true,
        ..Default::default()
    });
    let mut editor = PolygonEditor::default().with_events(events);
    editor.select(square(0.0, 0.0, 1.0, 1.0));
    editor.commit();

    let saved = editor
        .events()
        .history()
        .into_iter()
        .find_map(|event| match event {
            EditorEvent::PolygonSaved { number, exterior } => Some((number, exterior)),
            _ => None,
        });
    let (number, exterior) = saved.unwrap();
    assert_eq!(number, 1);
    assert_eq!(exterior.points(), square(0.0, 0.0, 1.0, 1.0).as_slice());
}
