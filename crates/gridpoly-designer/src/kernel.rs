//! Planar polygon-set operations.
//!
//! [`PlanarOps`] is the seam between the editor and the geometry library:
//! validity checks, overlap predicates, difference, union and validity
//! repair. [`GeoKernel`] implements it on top of the `geo` crate.
//!
//! Boolean results are returned as a [`ShapeSet`], which is decomposed into
//! individual [`PolygonWithHoles`] before it goes back into the editor.

use std::panic::{catch_unwind, AssertUnwindSafe};

use geo::{
    Area, BooleanOps, Contains, Coord, Intersects, LineString, MultiPolygon, Polygon, Validation,
};
use gridpoly_core::{GeometryError, GeometryResult, Point, PolygonWithHoles, Ring};

/// Result of a boolean operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ShapeSet {
    #[default]
    Empty,
    Single(PolygonWithHoles),
    Multi(Vec<PolygonWithHoles>),
}

impl ShapeSet {
    /// Builds the variant matching the number of polygons.
    pub fn from_polygons(mut polygons: Vec<PolygonWithHoles>) -> Self {
        match polygons.len() {
            0 => ShapeSet::Empty,
            1 => match polygons.pop() {
                Some(polygon) => ShapeSet::Single(polygon),
                None => ShapeSet::Empty,
            },
            _ => ShapeSet::Multi(polygons),
        }
    }

    /// Splits the set into its disjoint member polygons.
    pub fn decompose(self) -> Vec<PolygonWithHoles> {
        match self {
            ShapeSet::Empty => Vec::new(),
            ShapeSet::Single(polygon) => vec![polygon],
            ShapeSet::Multi(polygons) => polygons,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ShapeSet::Empty => 0,
            ShapeSet::Single(_) => 1,
            ShapeSet::Multi(polygons) => polygons.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Polygon-set primitives used by the editor.
pub trait PlanarOps {
    /// Checks that `polygon` is simple and non-degenerate.
    fn check(&self, polygon: &PolygonWithHoles) -> GeometryResult<()>;

    fn is_valid(&self, polygon: &PolygonWithHoles) -> bool {
        self.check(polygon).is_ok()
    }

    /// True when `a` intersects or contains `b`.
    fn overlaps(&self, a: &PolygonWithHoles, b: &PolygonWithHoles) -> bool;

    /// `a` minus `b`.
    fn difference(&self, a: &PolygonWithHoles, b: &PolygonWithHoles) -> GeometryResult<ShapeSet>;

    /// Union of all `polygons`.
    fn union_all(&self, polygons: &[PolygonWithHoles]) -> GeometryResult<ShapeSet>;

    /// Nearest valid geometry covering the same area as `polygon`.
    fn make_valid(&self, polygon: &PolygonWithHoles) -> GeometryResult<ShapeSet>;

    /// Unsigned area, holes excluded.
    fn area(&self, polygon: &PolygonWithHoles) -> f64;
}

/// [`PlanarOps`] backed by the `geo` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoKernel;

impl PlanarOps for GeoKernel {
    fn check(&self, polygon: &PolygonWithHoles) -> GeometryResult<()> {
        for ring in std::iter::once(&polygon.exterior).chain(polygon.holes.iter()) {
            if ring.len() < 3 {
                return Err(GeometryError::invalid(format!(
                    "ring has {} vertices, at least 3 are required",
                    ring.len()
                )));
            }
            if ring.points().iter().any(|p| !p.is_finite()) {
                return Err(GeometryError::invalid("ring has a non-finite coordinate"));
            }
        }

        let geo_polygon = to_geo_polygon(polygon);
        if !geo_polygon.is_valid() {
            return Err(GeometryError::invalid(
                "polygon is self-intersecting or its holes are malformed",
            ));
        }
        if geo_polygon.unsigned_area() <= 0.0 {
            return Err(GeometryError::invalid("polygon has zero area"));
        }
        Ok(())
    }

    fn overlaps(&self, a: &PolygonWithHoles, b: &PolygonWithHoles) -> bool {
        let a = to_geo_polygon(a);
        let b = to_geo_polygon(b);
        a.intersects(&b) || a.contains(&b)
    }

    fn difference(&self, a: &PolygonWithHoles, b: &PolygonWithHoles) -> GeometryResult<ShapeSet> {
        let a = to_geo_polygon(a);
        let b = to_geo_polygon(b);
        guarded("difference", || a.difference(&b)).map(shape_set_from_geo)
    }

    fn union_all(&self, polygons: &[PolygonWithHoles]) -> GeometryResult<ShapeSet> {
        // Folded pairwise: a single multi-polygon with overlapping members
        // would be read with the even-odd rule.
        let members: Vec<Polygon<f64>> = polygons.iter().map(to_geo_polygon).collect();
        guarded("union", || {
            members
                .iter()
                .fold(MultiPolygon::<f64>::new(Vec::new()), |acc, polygon| {
                    acc.union(polygon)
                })
        })
        .map(shape_set_from_geo)
    }

    fn make_valid(&self, polygon: &PolygonWithHoles) -> GeometryResult<ShapeSet> {
        let geo_polygon = to_geo_polygon(polygon);
        let empty = MultiPolygon::<f64>::new(Vec::new());
        guarded("make_valid", || geo_polygon.union(&empty)).map(shape_set_from_geo)
    }

    fn area(&self, polygon: &PolygonWithHoles) -> f64 {
        to_geo_polygon(polygon).unsigned_area()
    }
}

/// Runs a geometry-library call, turning a panic into an error.
fn guarded<T>(operation: &str, f: impl FnOnce() -> T) -> GeometryResult<T> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "geometry library panicked".to_string());
        tracing::error!("Geometry operation '{}' panicked: {}", operation, reason);
        GeometryError::operation_failed(operation, reason)
    })
}

fn to_line_string(ring: &Ring) -> LineString<f64> {
    LineString::new(
        ring.points()
            .iter()
            .map(|p| Coord { x: p.x, y: p.y })
            .collect(),
    )
}

/// Convert a model polygon to a `geo` polygon; rings are closed by `geo`.
pub fn to_geo_polygon(polygon: &PolygonWithHoles) -> Polygon<f64> {
    Polygon::new(
        to_line_string(&polygon.exterior),
        polygon.holes.iter().map(to_line_string).collect(),
    )
}

fn from_line_string(line: &LineString<f64>) -> Ring {
    Ring::new(line.coords().map(|c| Point::new(c.x, c.y)).collect())
}

/// Convert a `geo` polygon back to the model, dropping closing points.
pub fn from_geo_polygon(polygon: &Polygon<f64>) -> PolygonWithHoles {
    PolygonWithHoles::new(
        from_line_string(polygon.exterior()),
        polygon
            .interiors()
            .iter()
            .map(from_line_string)
            .filter(|ring| ring.len() >= 3)
            .collect(),
    )
}

fn shape_set_from_geo(multi: MultiPolygon<f64>) -> ShapeSet {
    ShapeSet::from_polygons(
        multi
            .0
            .iter()
            .map(from_geo_polygon)
            .filter(|polygon| polygon.exterior.len() >= 3)
            .collect(),
    )
}
