//! Merge: union of saved polygons, hole handling and validity repair.

use crate::common::{bowtie, points, same_ring, square, total_area, FailingKernel};
use gridpoly_core::{polygon_report, EditorError, PolygonWithHoles};
use gridpoly_designer::{GeoKernel, GridSnapper, PlanarOps, PolygonEditor};

fn editor_with(polygons: &[Vec<gridpoly_core::Point>]) -> PolygonEditor {
    let mut editor = PolygonEditor::new(GridSnapper::new(1.0, 1.0));
    for polygon in polygons {
        editor.select(polygon.clone());
        editor.commit();
    }
    editor
}

fn no_pair_overlaps(polygons: &[PolygonWithHoles]) -> bool {
    polygons.iter().enumerate().all(|(i, a)| {
        polygons.iter().skip(i + 1).all(|b| {
            let shared = GeoKernel.area(a) + GeoKernel.area(b)
                - total_area(&GeoKernel.union_all(&[a.clone(), b.clone()]).unwrap().decompose());
            shared.abs() < 1e-9
        })
    })
}

#[test]
fn test_merge_two_overlapping_squares() {
    let mut editor = editor_with(&[square(0.0, 0.0, 2.0, 2.0), square(1.0, 1.0, 3.0, 3.0)]);
    assert_eq!(editor.merge(), Ok(Some(1)));

    let merged = &editor.saved()[0];
    assert!(merged.holes.is_empty());
    assert!((GeoKernel.area(merged) - 7.0).abs() < 1e-9);
}

#[test]
fn test_merge_keeps_disjoint_polygons_apart() {
    let mut editor = editor_with(&[
        square(0.0, 0.0, 2.0, 2.0),
        square(1.0, 1.0, 3.0, 3.0),
        square(6.0, 6.0, 8.0, 8.0),
    ]);
    assert_eq!(editor.merge(), Ok(Some(2)));
    assert!((total_area(editor.saved()) - 11.0).abs() < 1e-9);
    assert!(no_pair_overlaps(editor.saved()));
}

#[test]
fn test_merge_preserves_holes_and_islands() {
    // Frame with a hole, then an island inside the hole
    let mut editor = editor_with(&[square(0.0, 0.0, 6.0, 6.0)]);
    editor.select(square(1.0, 1.0, 5.0, 5.0));
    editor.subtract().unwrap();
    editor.select(square(2.0, 2.0, 4.0, 4.0));
    editor.commit();

    assert_eq!(editor.merge(), Ok(Some(2)));
    let frame = editor
        .saved()
        .iter()
        .find(|p| p.has_holes())
        .cloned()
        .unwrap();
    assert!(same_ring(&frame.exterior, &square(0.0, 0.0, 6.0, 6.0)));
    assert!(same_ring(&frame.holes[0], &square(1.0, 1.0, 5.0, 5.0)));
    assert!((total_area(editor.saved()) - 24.0).abs() < 1e-9);
}

#[test]
fn test_merge_fills_hole_when_covered() {
    let mut editor = editor_with(&[square(0.0, 0.0, 6.0, 6.0)]);
    editor.select(square(2.0, 2.0, 4.0, 4.0));
    editor.subtract().unwrap();
    editor.select(square(1.0, 1.0, 5.0, 5.0));
    editor.commit();

    assert_eq!(editor.merge(), Ok(Some(1)));
    assert!(!editor.saved()[0].has_holes());
    assert!((total_area(editor.saved()) - 36.0).abs() < 1e-9);
}

#[test]
fn test_merge_repairs_invalid_polygon() {
    let mut editor = editor_with(&[bowtie(), square(5.0, 5.0, 6.0, 6.0)]);
    editor.merge().unwrap();

    assert!(!editor.saved().is_empty());
    assert!((total_area(editor.saved()) - 3.0).abs() < 1e-9);
}

#[test]
fn test_merge_report_lists_polygons_and_holes() {
    let mut editor = editor_with(&[square(0.0, 0.0, 4.0, 4.0)]);
    editor.select(square(1.0, 1.0, 3.0, 3.0));
    editor.subtract().unwrap();
    editor.merge().unwrap();

    let report = polygon_report(editor.saved());
    assert_eq!(report.len(), 2);
    assert!(report[0].starts_with("polygon #1: ["));
    assert!(report[1].starts_with("  hole: ["));
}

#[test]
fn test_merge_failure_leaves_saved_untouched() {
    let mut editor = PolygonEditor::with_kernel(GridSnapper::new(1.0, 1.0), FailingKernel);
    editor.select(points(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)]));
    editor.commit();
    let before: Vec<PolygonWithHoles> = editor.saved().to_vec();

    let err = editor.merge().unwrap_err();
    assert!(matches!(err, EditorError::Geometry(_)));
    assert_eq!(editor.saved(), before.as_slice());
}
