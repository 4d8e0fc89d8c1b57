//! Subtract: hole punching, splitting, and all-or-nothing failure handling.

use crate::common::{bowtie, same_ring, square, total_area, FailingKernel};
use gridpoly_core::{EditorError, GeometryError, PolygonWithHoles};
use gridpoly_designer::{GridSnapper, PolygonEditor, SubtractSummary};

fn editor_with(polygons: &[Vec<gridpoly_core::Point>]) -> PolygonEditor {
    let mut editor = PolygonEditor::new(GridSnapper::new(1.0, 1.0));
    for polygon in polygons {
        editor.select(polygon.clone());
        editor.commit();
    }
    editor
}

#[test]
fn test_subtract_inner_square_leaves_hole() {
    let mut editor = editor_with(&[square(0.0, 0.0, 4.0, 4.0)]);
    editor.select(square(1.0, 1.0, 3.0, 3.0));

    let summary = editor.subtract().unwrap();
    assert_eq!(summary, Some(SubtractSummary { before: 1, after: 1 }));

    let result = &editor.saved()[0];
    assert!(same_ring(&result.exterior, &square(0.0, 0.0, 4.0, 4.0)));
    assert_eq!(result.holes.len(), 1);
    assert!(same_ring(&result.holes[0], &square(1.0, 1.0, 3.0, 3.0)));

    assert!(editor.current().is_empty());
    assert!(editor.transient().is_none());
}

#[test]
fn test_subtract_splits_polygon() {
    let mut editor = editor_with(&[square(0.0, 0.0, 6.0, 2.0)]);
    editor.select(square(2.0, -1.0, 4.0, 3.0));
    editor.subtract().unwrap();

    assert_eq!(editor.saved().len(), 2);
    assert!((total_area(editor.saved()) - 8.0).abs() < 1e-9);
}

#[test]
fn test_subtract_consumes_covered_polygon() {
    let mut editor = editor_with(&[square(1.0, 1.0, 2.0, 2.0), square(5.0, 5.0, 6.0, 6.0)]);
    editor.select(square(0.0, 0.0, 3.0, 3.0));
    let summary = editor.subtract().unwrap();

    assert_eq!(summary, Some(SubtractSummary { before: 2, after: 1 }));
    assert!(same_ring(&editor.saved()[0].exterior, &square(5.0, 5.0, 6.0, 6.0)));
}

#[test]
fn test_subtract_never_increases_area() {
    let mut editor = editor_with(&[square(0.0, 0.0, 4.0, 4.0), square(6.0, 0.0, 8.0, 2.0)]);
    let before = total_area(editor.saved());
    editor.select(square(3.0, 3.0, 7.0, 5.0));
    editor.subtract().unwrap();

    let after = total_area(editor.saved());
    assert!(after <= before + 1e-9);
    assert!((after - (before - 1.0)).abs() < 1e-9);
}

#[test]
fn test_disjoint_candidate_leaves_polygons_unchanged() {
    let mut editor = editor_with(&[square(0.0, 0.0, 2.0, 2.0)]);
    let before: Vec<PolygonWithHoles> = editor.saved().to_vec();
    editor.select(square(5.0, 5.0, 6.0, 6.0));
    editor.subtract().unwrap();
    assert_eq!(editor.saved(), before.as_slice());
}

#[test]
fn test_invalid_saved_polygon_aborts_whole_operation() {
    let mut editor = editor_with(&[square(0.0, 0.0, 4.0, 4.0), bowtie(), square(5.0, 0.0, 7.0, 2.0)]);
    let before: Vec<PolygonWithHoles> = editor.saved().to_vec();

    let candidate = square(1.0, 1.0, 6.0, 3.0);
    editor.select(candidate.clone());
    let err = editor.subtract().unwrap_err();

    assert_eq!(err, EditorError::InvalidSavedPolygon { number: 2 });
    assert_eq!(editor.saved(), before.as_slice());
    assert_eq!(editor.current(), candidate.as_slice());
    assert_eq!(
        editor.transient().map(|p| p.exterior.points().to_vec()),
        Some(candidate)
    );
}

#[test]
fn test_invalid_selection_is_reported() {
    let mut editor = editor_with(&[square(0.0, 0.0, 4.0, 4.0)]);
    editor.select(bowtie());
    let err = editor.subtract().unwrap_err();
    assert!(matches!(err, EditorError::InvalidSelection { .. }));
    assert_eq!(
        err.user_message(),
        "The selection is not valid! Please adjust the shape."
    );
    assert_eq!(editor.saved().len(), 1);
}

#[test]
fn test_geometry_failure_keeps_state() {
    let mut editor = PolygonEditor::with_kernel(GridSnapper::new(1.0, 1.0), FailingKernel);
    editor.select(square(0.0, 0.0, 4.0, 4.0));
    editor.commit();
    let before: Vec<PolygonWithHoles> = editor.saved().to_vec();

    editor.select(square(1.0, 1.0, 3.0, 3.0));
    let err = editor.subtract().unwrap_err();
    assert!(matches!(
        err,
        EditorError::Geometry(GeometryError::OperationFailed { .. })
    ));
    assert_eq!(
        err.user_message(),
        "An error occurred while processing the polygons."
    );
    assert_eq!(editor.saved(), before.as_slice());
    assert_eq!(editor.current().len(), 4);
}

#[test]
fn test_subtract_from_previous_subtract_result() {
    let mut editor = editor_with(&[square(0.0, 0.0, 6.0, 6.0)]);

    editor.select(square(1.0, 1.0, 3.0, 3.0));
    assert!(editor.subtract().is_ok());

    // Second hole touches the first at the corner (3, 3)
    editor.select(square(3.0, 3.0, 5.0, 5.0));
    assert!(editor.subtract().is_ok());

    editor.select(square(10.0, 10.0, 11.0, 11.0));
    assert_eq!(
        editor.subtract(),
        Ok(Some(SubtractSummary { before: 1, after: 1 }))
    );

    assert!((total_area(editor.saved()) - (36.0 - 4.0 - 4.0)).abs() < 1e-9);
}

#[test]
fn test_repeated_cuts_keep_results_usable() {
    let mut editor = editor_with(&[square(0.0, 0.0, 8.0, 4.0)]);

    // Hole, then a cut splitting the polygon, then a cut through one piece
    editor.select(square(1.0, 1.0, 2.0, 2.0));
    editor.subtract().unwrap();
    editor.select(square(4.0, -1.0, 5.0, 5.0));
    editor.subtract().unwrap();
    assert_eq!(editor.saved().len(), 2);

    editor.select(square(6.0, 1.0, 7.0, 2.0));
    editor.subtract().unwrap();
    assert_eq!(editor.saved().len(), 2);
    assert_eq!(
        editor.saved().iter().map(|p| p.holes.len()).sum::<usize>(),
        2
    );
    assert!((total_area(editor.saved()) - (32.0 - 1.0 - 4.0 - 1.0)).abs() < 1e-9);

    assert_eq!(editor.merge(), Ok(Some(2)));
}
