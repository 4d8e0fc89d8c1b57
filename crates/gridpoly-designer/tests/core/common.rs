#![allow(dead_code)]

use gridpoly_core::{GeometryError, GeometryResult, Point, PolygonWithHoles, Ring};
use gridpoly_designer::{GeoKernel, PlanarOps, ShapeSet};

pub fn points(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

pub fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point> {
    points(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1)])
}

pub fn bowtie() -> Vec<Point> {
    points(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)])
}

/// Ring equality up to starting vertex and orientation.
pub fn same_ring(ring: &Ring, expected: &[Point]) -> bool {
    let actual = ring.points();
    if actual.len() != expected.len() {
        return false;
    }
    let n = actual.len();
    let reversed: Vec<Point> = expected.iter().rev().copied().collect();
    (0..n).any(|offset| {
        (0..n).all(|i| close(actual[(i + offset) % n], expected[i]))
            || (0..n).all(|i| close(actual[(i + offset) % n], reversed[i]))
    })
}

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

pub fn total_area(polygons: &[PolygonWithHoles]) -> f64 {
    polygons.iter().map(|p| GeoKernel.area(p)).sum()
}

/// Kernel whose boolean operations always fail.
#[derive(Debug, Default)]
pub struct FailingKernel;

impl PlanarOps for FailingKernel {
    fn check(&self, polygon: &PolygonWithHoles) -> GeometryResult<()> {
        GeoKernel.check(polygon)
    }

    fn overlaps(&self, a: &PolygonWithHoles, b: &PolygonWithHoles) -> bool {
        GeoKernel.overlaps(a, b)
    }

    fn difference(&self, _a: &PolygonWithHoles, _b: &PolygonWithHoles) -> GeometryResult<ShapeSet> {
        Err(GeometryError::operation_failed("difference", "numerical degeneracy"))
    }

    fn union_all(&self, _polygons: &[PolygonWithHoles]) -> GeometryResult<ShapeSet> {
        Err(GeometryError::operation_failed("union", "numerical degeneracy"))
    }

    fn make_valid(&self, polygon: &PolygonWithHoles) -> GeometryResult<ShapeSet> {
        GeoKernel.make_valid(polygon)
    }

    fn area(&self, polygon: &PolygonWithHoles) -> f64 {
        GeoKernel.area(polygon)
    }
}
