pub(crate) mod geometry_collection;
pub(crate) mod line_string;
pub(crate) mod linear_ring;
pub(crate) mod multi_line_string;
pub(crate) mod multi_point;
pub(crate) mod multi_polygon;
pub(crate) mod point;
pub(crate) mod polygon;

pub use geometry_collection::GeometryCollection;
pub use line_string::LineString;
pub use linear_ring::LinearRing;
pub use multi_line_string::MultiLineString;
pub use multi_point::MultiPoint;
pub use multi_polygon::MultiPolygon;
pub use point::Point;
pub use polygon::Polygon;

use crate::{Coord, Dimensions, Envelope};

/// An enum representing any possible geometry variant.
///
/// All variants are *linear*: the abstract curved supertypes of the Simple
/// Features model (`Curve`, `Surface`, `CurvePolygon`, `MultiCurve`,
/// `MultiSurface`) admit only their linear realizations in this engine, and
/// are therefore exposed as classification predicates
/// ([`is_curve`](Geometry::is_curve), [`is_surface`](Geometry::is_surface))
/// rather than as variants.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

macro_rules! impl_from_variant {
    ($variant:ident) => {
        impl From<$variant> for Geometry {
            fn from(geometry: $variant) -> Self {
                Geometry::$variant(geometry)
            }
        }
    };
}

impl_from_variant!(Point);
impl_from_variant!(LineString);
impl_from_variant!(LinearRing);
impl_from_variant!(Polygon);
impl_from_variant!(MultiPoint);
impl_from_variant!(MultiLineString);
impl_from_variant!(MultiPolygon);
impl_from_variant!(GeometryCollection);

impl Geometry {
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(g) => g.is_empty(),
            Geometry::LineString(g) => g.is_empty(),
            Geometry::LinearRing(g) => g.is_empty(),
            Geometry::Polygon(g) => g.is_empty(),
            Geometry::MultiPoint(g) => g.is_empty(),
            Geometry::MultiLineString(g) => g.is_empty(),
            Geometry::MultiPolygon(g) => g.is_empty(),
            Geometry::GeometryCollection(g) => g.is_empty(),
        }
    }

    /// Total number of vertices, over all components.
    pub fn num_points(&self) -> usize {
        match self {
            Geometry::Point(g) => usize::from(!g.is_empty()),
            Geometry::LineString(g) => g.num_points(),
            Geometry::LinearRing(g) => g.num_points(),
            Geometry::Polygon(g) => g.num_points(),
            Geometry::MultiPoint(g) => g.0.iter().filter(|p| !p.is_empty()).count(),
            Geometry::MultiLineString(g) => g.0.iter().map(LineString::num_points).sum(),
            Geometry::MultiPolygon(g) => g.0.iter().map(Polygon::num_points).sum(),
            Geometry::GeometryCollection(g) => g.0.iter().map(Geometry::num_points).sum(),
        }
    }

    /// The minimal enclosing envelope; null for empty geometries.
    /// Component envelopes are computed lazily and cached.
    pub fn envelope(&self) -> Envelope {
        match self {
            Geometry::Point(g) => g.envelope(),
            Geometry::LineString(g) => g.envelope(),
            Geometry::LinearRing(g) => g.envelope(),
            Geometry::Polygon(g) => g.envelope(),
            Geometry::MultiPoint(g) => g.envelope(),
            Geometry::MultiLineString(g) => g.envelope(),
            Geometry::MultiPolygon(g) => g.envelope(),
            Geometry::GeometryCollection(g) => g.envelope(),
        }
    }

    /// The dimension of the geometry's interior: 0 for puntal, 1 for
    /// lineal, 2 for areal variants; `Empty` when there are no points.
    /// A collection has the highest dimension among its members.
    pub fn dimensions(&self) -> Dimensions {
        match self {
            Geometry::Point(p) => {
                if p.is_empty() {
                    Dimensions::Empty
                } else {
                    Dimensions::ZeroDimensional
                }
            }
            Geometry::MultiPoint(mp) => {
                if mp.is_empty() {
                    Dimensions::Empty
                } else {
                    Dimensions::ZeroDimensional
                }
            }
            Geometry::LineString(ls) => {
                if ls.is_empty() {
                    Dimensions::Empty
                } else if ls.num_points() == 1 {
                    // a degenerate one-vertex line is a point-set
                    Dimensions::ZeroDimensional
                } else {
                    Dimensions::OneDimensional
                }
            }
            Geometry::LinearRing(ring) => {
                if ring.is_empty() {
                    Dimensions::Empty
                } else {
                    Dimensions::OneDimensional
                }
            }
            Geometry::MultiLineString(mls) => {
                if mls.is_empty() {
                    Dimensions::Empty
                } else {
                    Dimensions::OneDimensional
                }
            }
            Geometry::Polygon(p) => {
                if p.is_empty() {
                    Dimensions::Empty
                } else {
                    Dimensions::TwoDimensional
                }
            }
            Geometry::MultiPolygon(mp) => {
                if mp.is_empty() {
                    Dimensions::Empty
                } else {
                    Dimensions::TwoDimensional
                }
            }
            Geometry::GeometryCollection(gc) => gc
                .0
                .iter()
                .map(Geometry::dimensions)
                .max()
                .unwrap_or(Dimensions::Empty),
        }
    }

    /// The dimension of the geometry's boundary: empty for points and
    /// closed lines, the endpoints' dimension for open lines, the rings'
    /// dimension for areas.
    pub fn boundary_dimensions(&self) -> Dimensions {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) | Geometry::LinearRing(_) => {
                Dimensions::Empty
            }
            Geometry::LineString(ls) => {
                if ls.is_empty() || ls.is_closed() {
                    Dimensions::Empty
                } else {
                    Dimensions::ZeroDimensional
                }
            }
            Geometry::MultiLineString(mls) => {
                if mls.is_empty() || mls.is_closed() {
                    Dimensions::Empty
                } else {
                    Dimensions::ZeroDimensional
                }
            }
            Geometry::Polygon(p) => {
                if p.is_empty() {
                    Dimensions::Empty
                } else {
                    Dimensions::OneDimensional
                }
            }
            Geometry::MultiPolygon(mp) => {
                if mp.is_empty() {
                    Dimensions::Empty
                } else {
                    Dimensions::OneDimensional
                }
            }
            Geometry::GeometryCollection(gc) => gc
                .0
                .iter()
                .map(Geometry::boundary_dimensions)
                .max()
                .unwrap_or(Dimensions::Empty),
        }
    }

    /// The OGC name of the variant, e.g. `"Polygon"`.
    pub fn geometry_type(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::LinearRing(_) => "LinearRing",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::GeometryCollection(_) => "GeometryCollection",
        }
    }

    /// `true` for the 1-dimensional variants (the linear realizations of
    /// the abstract `Curve` supertype).
    pub fn is_curve(&self) -> bool {
        matches!(self, Geometry::LineString(_) | Geometry::LinearRing(_))
    }

    /// `true` for the 2-dimensional variants (the linear realizations of
    /// the abstract `Surface` supertype).
    pub fn is_surface(&self) -> bool {
        matches!(self, Geometry::Polygon(_))
    }

    /// `true` for homogeneous collections of curves / surfaces
    /// (`MultiCurve` / `MultiSurface` supertypes).
    pub fn is_multi_curve(&self) -> bool {
        matches!(self, Geometry::MultiLineString(_))
    }

    pub fn is_multi_surface(&self) -> bool {
        matches!(self, Geometry::MultiPolygon(_))
    }

    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            Geometry::MultiPoint(_)
                | Geometry::MultiLineString(_)
                | Geometry::MultiPolygon(_)
                | Geometry::GeometryCollection(_)
        )
    }

    /// A geometry with every component's vertex order reversed.
    pub fn reversed(&self) -> Geometry {
        match self {
            Geometry::Point(g) => g.clone().into(),
            Geometry::LineString(g) => g.reversed().into(),
            Geometry::LinearRing(g) => g.reversed().into(),
            Geometry::Polygon(g) => g.reversed().into(),
            Geometry::MultiPoint(g) => g.clone().into(),
            Geometry::MultiLineString(g) => {
                MultiLineString(g.0.iter().map(LineString::reversed).collect()).into()
            }
            Geometry::MultiPolygon(g) => {
                MultiPolygon(g.0.iter().map(Polygon::reversed).collect()).into()
            }
            Geometry::GeometryCollection(g) => {
                GeometryCollection(g.0.iter().map(Geometry::reversed).collect()).into()
            }
        }
    }

    /// Structural equality: same variant, same components, identical
    /// coordinate values in identical order.
    pub fn equals_exact(&self, other: &Geometry) -> bool {
        self == other
    }

    /// Visit every vertex of every component.
    pub fn apply_coords(&self, f: &mut impl FnMut(&Coord)) {
        match self {
            Geometry::Point(g) => {
                if let Some(c) = g.coord() {
                    f(&c);
                }
            }
            Geometry::LineString(g) => g.coords().iter().for_each(&mut *f),
            Geometry::LinearRing(g) => g.coords().iter().for_each(&mut *f),
            Geometry::Polygon(g) => {
                g.exterior().coords().iter().for_each(&mut *f);
                for hole in g.interiors() {
                    hole.coords().iter().for_each(&mut *f);
                }
            }
            Geometry::MultiPoint(g) => {
                for p in &g.0 {
                    if let Some(c) = p.coord() {
                        f(&c);
                    }
                }
            }
            Geometry::MultiLineString(g) => {
                for ls in &g.0 {
                    ls.coords().iter().for_each(&mut *f);
                }
            }
            Geometry::MultiPolygon(g) => {
                for p in &g.0 {
                    p.exterior().coords().iter().for_each(&mut *f);
                    for hole in p.interiors() {
                        hole.coords().iter().for_each(&mut *f);
                    }
                }
            }
            Geometry::GeometryCollection(g) => {
                for child in &g.0 {
                    child.apply_coords(f);
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::CoordSeq;

    fn square() -> Polygon {
        Polygon::new(
            LinearRing::new(CoordSeq::from_xy([
                (0., 0.),
                (10., 0.),
                (10., 10.),
                (0., 10.),
                (0., 0.),
            ])),
            vec![],
        )
    }

    #[test]
    fn empty_iff_no_points() {
        let geometries: Vec<Geometry> = vec![
            Point::empty().into(),
            LineString::empty().into(),
            square().into(),
            GeometryCollection(vec![]).into(),
        ];
        for g in &geometries {
            assert_eq!(g.is_empty(), g.num_points() == 0, "for {}", g.geometry_type());
        }
    }

    #[test]
    fn reverse_round_trips() {
        let g: Geometry = square().into();
        assert!(g.reversed().reversed().equals_exact(&g));
    }

    #[test]
    fn clone_is_equal() {
        let g: Geometry = square().into();
        assert!(g.equals_exact(&g.clone()));
    }

    #[test]
    fn supertype_classification_is_dimension_based() {
        let ring: Geometry = LinearRing::new(CoordSeq::from_xy([
            (0., 0.),
            (1., 0.),
            (1., 1.),
            (0., 0.),
        ]))
        .into();
        assert!(ring.is_curve());
        assert!(!ring.is_surface());
        let poly: Geometry = square().into();
        assert!(poly.is_surface());
        assert!(!poly.is_curve());
    }
}
