/// Creates a [`Coord`](crate::Coord) from ordinate values.
///
/// ```
/// use planar_types::coord;
///
/// let c = coord! { x: 1.0, y: 2.0 };
/// let c3 = coord! { x: 1.0, y: 2.0, z: 3.0 };
/// assert_eq!(c, c3);
/// ```
#[macro_export]
macro_rules! coord {
    (x: $x:expr, y: $y:expr $(,)?) => {
        $crate::Coord::new($x, $y)
    };
    (x: $x:expr, y: $y:expr, z: $z:expr $(,)?) => {
        $crate::Coord::xyz($x, $y, $z)
    };
    (x: $x:expr, y: $y:expr, m: $m:expr $(,)?) => {
        $crate::Coord::xym($x, $y, $m)
    };
    (x: $x:expr, y: $y:expr, z: $z:expr, m: $m:expr $(,)?) => {
        $crate::Coord::xyzm($x, $y, $z, $m)
    };
}

/// Creates a [`LineString`](crate::LineString) from coordinate values.
///
/// ```
/// use planar_types::line_string;
///
/// let ls = line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 10.0)];
/// assert_eq!(ls.num_points(), 2);
/// ```
#[macro_export]
macro_rules! line_string {
    () => {
        $crate::LineString::empty()
    };
    ($((x: $x:expr, y: $y:expr $(,)?)),* $(,)?) => {
        $crate::LineString::from_xy([$(($x, $y)),*])
    };
}

/// Creates a [`Polygon`](crate::Polygon) from coordinate values.
///
/// The exterior ring is closed automatically.
///
/// ```
/// use planar_types::polygon;
///
/// let p = polygon![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0)];
/// assert_eq!(p.exterior().num_points(), 4);
///
/// let with_hole = polygon!(
///     exterior: [(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0)],
///     interiors: [[(x: 4.0, y: 4.0), (x: 6.0, y: 4.0), (x: 6.0, y: 6.0), (x: 4.0, y: 6.0)]],
/// );
/// assert_eq!(with_hole.interiors().len(), 1);
/// ```
#[macro_export]
macro_rules! polygon {
    () => {
        $crate::Polygon::empty()
    };
    (
        exterior: [$((x: $ex:expr, y: $ey:expr $(,)?)),* $(,)?],
        interiors: [$([$((x: $ix:expr, y: $iy:expr $(,)?)),* $(,)?]),* $(,)?] $(,)?
    ) => {
        $crate::Polygon::new(
            $crate::LinearRing::from_xy([$(($ex, $ey)),*]),
            ::std::vec![$($crate::LinearRing::from_xy([$(($ix, $iy)),*])),*],
        )
    };
    ($((x: $x:expr, y: $y:expr $(,)?)),* $(,)?) => {
        $crate::Polygon::new($crate::LinearRing::from_xy([$(($x, $y)),*]), ::std::vec![])
    };
}

#[cfg(test)]
mod test {
    #[test]
    fn polygon_macro_forms() {
        let simple = polygon![(x: 0., y: 0.), (x: 1., y: 0.), (x: 1., y: 1.)];
        assert!(simple.interiors().is_empty());
        assert_eq!(simple.exterior().num_points(), 4);

        let holed = polygon!(
            exterior: [(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)],
            interiors: [
                [(x: 1., y: 1.), (x: 2., y: 1.), (x: 2., y: 2.)],
                [(x: 5., y: 5.), (x: 6., y: 5.), (x: 6., y: 6.)],
            ],
        );
        assert_eq!(holed.interiors().len(), 2);
    }
}
