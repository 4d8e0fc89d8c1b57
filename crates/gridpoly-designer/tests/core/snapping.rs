use gridpoly_core::Point;
use gridpoly_designer::{snap_point, Bounds, GridSnapper};
use proptest::prelude::*;

fn spacing() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.5), Just(1.0), Just(1.5), Just(2.5), Just(10.0), 0.1f64..10.0]
}

fn is_multiple(value: f64, spacing: f64) -> bool {
    let ratio = value / spacing;
    (ratio - ratio.round()).abs() < 1e-6
}

proptest! {
    #[test]
    fn snap_is_idempotent(
        x in -1.0e6f64..1.0e6,
        y in -1.0e6f64..1.0e6,
        sx in spacing(),
        sy in spacing(),
    ) {
        let once = snap_point(Point::new(x, y), sx, sy);
        let twice = snap_point(once, sx, sy);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn snap_lands_on_lattice(
        x in -1.0e4f64..1.0e4,
        y in -1.0e4f64..1.0e4,
        sx in spacing(),
        sy in spacing(),
    ) {
        let snapped = GridSnapper::new(sx, sy).snap(Point::new(x, y));
        prop_assert!(is_multiple(snapped.x, sx));
        prop_assert!(is_multiple(snapped.y, sy));
        prop_assert!((snapped.x - x).abs() <= sx / 2.0 + 1e-9);
        prop_assert!((snapped.y - y).abs() <= sy / 2.0 + 1e-9);
    }

    #[test]
    fn grid_lines_cover_visible_area(
        min_x in -50.0f64..50.0,
        min_y in -50.0f64..50.0,
        width in 0.5f64..40.0,
        height in 0.5f64..40.0,
        s in spacing(),
    ) {
        let bounds = Bounds::new(min_x, min_y, min_x + width, min_y + height);
        let lines = GridSnapper::new(s, s).grid_lines(&bounds).unwrap();
        let first = lines.vertical.first().copied().unwrap();
        let last = lines.vertical.last().copied().unwrap();
        prop_assert!(first <= bounds.min_x + 1e-9);
        prop_assert!(last >= bounds.max_x - 1e-9);
        prop_assert!(lines.vertical.windows(2).all(|w| ((w[1] - w[0]) - s).abs() < 1e-9));
    }
}

#[test]
fn test_live_preview_matches_stored_vertex() {
    use gridpoly_designer::{PolygonCapture, VertexCapture};

    let snapper = GridSnapper::new(0.5, 0.5);
    let mut capture = PolygonCapture::new(0.1);
    let raw = Point::new(3.26, 1.74);
    let preview = capture.pointer_move(raw, &snapper);
    capture.pointer_release(raw, &snapper);
    assert_eq!(capture.vertices(), &[preview]);
}
