use crate::{
    Coord, CoordSeq, CoordShape, Geometry, GeometryCollection, GeometryError, LineString,
    LinearRing, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, PrecisionModel, Result,
};

use std::sync::OnceLock;

/// Creates geometries and validates their structural invariants.
///
/// A factory bundles the [`PrecisionModel`], the spatial reference id, and
/// the coordinate shape its geometries use. It is a flyweight: immutable,
/// cheap to share, and safe to use from any thread.
///
/// External parsers (WKT/WKB) are expected to construct geometries through
/// a factory, which rejects malformed input — open rings, too few vertices
/// — with [`GeometryError::InvalidArgument`].
#[derive(Clone, Debug, PartialEq, Default)]
pub struct GeometryFactory {
    precision_model: PrecisionModel,
    srid: i32,
    shape: CoordShape,
}

static DEFAULT_FACTORY: OnceLock<GeometryFactory> = OnceLock::new();

impl GeometryFactory {
    pub fn new(precision_model: PrecisionModel, srid: i32, shape: CoordShape) -> Self {
        GeometryFactory {
            precision_model,
            srid,
            shape,
        }
    }

    pub fn with_precision_model(precision_model: PrecisionModel) -> Self {
        GeometryFactory {
            precision_model,
            ..Default::default()
        }
    }

    /// The process-wide default factory: floating precision, SRID 0, XY.
    ///
    /// Lazily initialized; initialization is idempotent, so it needs no
    /// locking discipline beyond the one-time cell.
    pub fn default_instance() -> &'static GeometryFactory {
        DEFAULT_FACTORY.get_or_init(GeometryFactory::default)
    }

    #[inline]
    pub fn precision_model(&self) -> &PrecisionModel {
        &self.precision_model
    }

    #[inline]
    pub fn srid(&self) -> i32 {
        self.srid
    }

    #[inline]
    pub fn shape(&self) -> CoordShape {
        self.shape
    }

    pub fn create_point(&self, coord: Option<Coord>) -> Point {
        Point(coord)
    }

    /// A line string takes ownership of its sequence. Valid sequences are
    /// empty, or have at least two distinct vertices.
    pub fn create_line_string(&self, seq: CoordSeq) -> Result<LineString> {
        if !seq.is_empty() {
            if seq.len() < 2 {
                return Err(GeometryError::invalid_argument(
                    "LineString must have 0 or >= 2 points",
                ));
            }
            let first = seq[0];
            if seq.iter().all(|c| *c == first) {
                return Err(GeometryError::invalid_argument(
                    "LineString must have at least 2 distinct points",
                ));
            }
        }
        Ok(LineString::new(seq))
    }

    /// A linear ring must be closed and have at least 4 coordinates, or be
    /// empty. Unlike [`LinearRing::new`], the factory does not close open
    /// input — it rejects it.
    pub fn create_linear_ring(&self, seq: CoordSeq) -> Result<LinearRing> {
        if !seq.is_empty() {
            if !seq.is_closed() {
                return Err(GeometryError::invalid_argument(
                    "LinearRing must be closed (first point = last point)",
                ));
            }
            if seq.len() < 4 {
                return Err(GeometryError::invalid_argument(
                    "LinearRing must have 0 or >= 4 points",
                ));
            }
        }
        Ok(LinearRing::new(seq))
    }

    pub fn create_polygon(&self, shell: LinearRing, holes: Vec<LinearRing>) -> Result<Polygon> {
        if shell.is_empty() && holes.iter().any(|hole| !hole.is_empty()) {
            return Err(GeometryError::invalid_argument(
                "Polygon shell is empty but holes are not",
            ));
        }
        Ok(Polygon::new(shell, holes))
    }

    pub fn create_multi_point(&self, points: Vec<Point>) -> MultiPoint {
        MultiPoint(points)
    }

    pub fn create_multi_line_string(&self, line_strings: Vec<LineString>) -> MultiLineString {
        MultiLineString(line_strings)
    }

    pub fn create_multi_polygon(&self, polygons: Vec<Polygon>) -> MultiPolygon {
        MultiPolygon(polygons)
    }

    pub fn create_geometry_collection(&self, geometries: Vec<Geometry>) -> GeometryCollection {
        GeometryCollection(geometries)
    }

    /// Build the narrowest multi-geometry (or single geometry) holding
    /// `geometries`: an empty collection, the sole element, a homogeneous
    /// Multi, or a general collection.
    pub fn build_geometry(&self, mut geometries: Vec<Geometry>) -> Geometry {
        match geometries.len() {
            0 => GeometryCollection(vec![]).into(),
            1 => geometries.pop().expect("checked length"),
            _ => {
                if geometries.iter().all(|g| matches!(g, Geometry::Point(_))) {
                    MultiPoint(
                        geometries
                            .into_iter()
                            .map(|g| match g {
                                Geometry::Point(p) => p,
                                _ => unreachable!("checked variant"),
                            })
                            .collect(),
                    )
                    .into()
                } else if geometries
                    .iter()
                    .all(|g| matches!(g, Geometry::LineString(_)))
                {
                    MultiLineString(
                        geometries
                            .into_iter()
                            .map(|g| match g {
                                Geometry::LineString(ls) => ls,
                                _ => unreachable!("checked variant"),
                            })
                            .collect(),
                    )
                    .into()
                } else if geometries.iter().all(|g| matches!(g, Geometry::Polygon(_))) {
                    MultiPolygon(
                        geometries
                            .into_iter()
                            .map(|g| match g {
                                Geometry::Polygon(p) => p,
                                _ => unreachable!("checked variant"),
                            })
                            .collect(),
                    )
                    .into()
                } else {
                    GeometryCollection(geometries).into()
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_instance_is_shared() {
        let a = GeometryFactory::default_instance();
        let b = GeometryFactory::default_instance();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.precision_model(), &PrecisionModel::Floating);
        assert_eq!(a.srid(), 0);
    }

    #[test]
    fn line_string_needs_two_distinct_points() {
        let factory = GeometryFactory::default_instance();
        assert!(factory
            .create_line_string(CoordSeq::from_xy([(0., 0.)]))
            .is_err());
        assert!(factory
            .create_line_string(CoordSeq::from_xy([(0., 0.), (0., 0.)]))
            .is_err());
        assert!(factory
            .create_line_string(CoordSeq::from_xy([(0., 0.), (1., 1.)]))
            .is_ok());
        assert!(factory.create_line_string(CoordSeq::default()).is_ok());
    }

    #[test]
    fn linear_ring_must_be_closed() {
        let factory = GeometryFactory::default_instance();
        assert!(factory
            .create_linear_ring(CoordSeq::from_xy([(0., 0.), (1., 0.), (1., 1.)]))
            .is_err());
        assert!(factory
            .create_linear_ring(CoordSeq::from_xy([(0., 0.), (1., 0.), (1., 1.), (0., 0.)]))
            .is_ok());
    }

    #[test]
    fn build_geometry_narrows() {
        let factory = GeometryFactory::default_instance();
        let built = factory.build_geometry(vec![
            Point::new(0., 0.).into(),
            Point::new(1., 1.).into(),
        ]);
        assert!(matches!(built, Geometry::MultiPoint(_)));

        let single = factory.build_geometry(vec![Point::new(0., 0.).into()]);
        assert!(matches!(single, Geometry::Point(_)));

        let empty = factory.build_geometry(vec![]);
        assert!(empty.is_empty());
    }
}
