/// The dimension of a geometry's point-set: 0, 1 or 2 — or `Empty` for a
/// geometry with no points at all, which is distinct from being
/// zero-dimensional like a non-empty point.
///
/// Dimensions order by containment strength, so `max` over a collection's
/// members gives the collection's dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dimensions {
    Empty,
    ZeroDimensional,
    OneDimensional,
    TwoDimensional,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{line_string, polygon, Geometry, Point};

    #[test]
    fn ordering_follows_dimension() {
        assert!(Dimensions::Empty < Dimensions::ZeroDimensional);
        assert!(Dimensions::ZeroDimensional < Dimensions::OneDimensional);
        assert!(Dimensions::OneDimensional < Dimensions::TwoDimensional);
    }

    #[test]
    fn geometry_dimensions() {
        let point: Geometry = Point::new(0., 0.).into();
        assert_eq!(point.dimensions(), Dimensions::ZeroDimensional);
        assert_eq!(point.boundary_dimensions(), Dimensions::Empty);

        let empty: Geometry = Point::empty().into();
        assert_eq!(empty.dimensions(), Dimensions::Empty);

        let open: Geometry = line_string![(x: 0., y: 0.), (x: 1., y: 1.)].into();
        assert_eq!(open.dimensions(), Dimensions::OneDimensional);
        assert_eq!(open.boundary_dimensions(), Dimensions::ZeroDimensional);

        let closed: Geometry =
            line_string![(x: 0., y: 0.), (x: 1., y: 0.), (x: 1., y: 1.), (x: 0., y: 0.)].into();
        assert_eq!(closed.boundary_dimensions(), Dimensions::Empty);

        let area: Geometry = polygon![(x: 0., y: 0.), (x: 1., y: 0.), (x: 1., y: 1.)].into();
        assert_eq!(area.dimensions(), Dimensions::TwoDimensional);
        assert_eq!(area.boundary_dimensions(), Dimensions::OneDimensional);
    }
}
