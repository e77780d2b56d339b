use crate::algorithm::orientation::{orient2d, Orientation};
use crate::utils::lex_cmp;
use planar_types::{Coord, CoordSeq, Geometry, LinearRing, MultiPoint, MultiPolygon, Polygon};

/// The smallest convex polygon containing every vertex of the geometry.
///
/// Degenerate inputs collapse: fewer than three distinct non-collinear
/// vertices yield a polygon whose ring is the degenerate hull (a point or
/// a segment out-and-back).
pub trait ConvexHull {
    fn convex_hull(&self) -> Polygon;
}

impl ConvexHull for Geometry {
    fn convex_hull(&self) -> Polygon {
        let mut coords = Vec::with_capacity(self.num_points());
        self.apply_coords(&mut |c| coords.push(*c));
        hull_of_coords(coords)
    }
}

impl ConvexHull for Polygon {
    fn convex_hull(&self) -> Polygon {
        // interior rings cannot contribute hull vertices
        hull_of_coords(self.exterior().coords().to_vec())
    }
}

impl ConvexHull for MultiPolygon {
    fn convex_hull(&self) -> Polygon {
        let coords = self
            .0
            .iter()
            .flat_map(|p| p.exterior().coords().iter().copied())
            .collect();
        hull_of_coords(coords)
    }
}

impl ConvexHull for MultiPoint {
    fn convex_hull(&self) -> Polygon {
        hull_of_coords(self.0.iter().filter_map(|p| p.coord()).collect())
    }
}

/// Andrew's monotone-chain variant of the Graham scan: sort
/// lexicographically, then build lower and upper hulls with an exact
/// orientation test.
fn hull_of_coords(mut coords: Vec<Coord>) -> Polygon {
    coords.sort_by(lex_cmp);
    coords.dedup();

    if coords.is_empty() {
        return Polygon::empty();
    }
    if coords.len() < 3 {
        // degenerate hull: a point or a single segment
        let mut seq = CoordSeq::from_coords(planar_types::CoordShape::XY, coords.clone());
        for coord in coords.iter().rev().skip(1) {
            seq.push(*coord);
        }
        return Polygon::new(LinearRing::new(seq), vec![]);
    }

    let mut hull: Vec<Coord> = Vec::with_capacity(coords.len() + 1);

    // lower hull
    for &coord in &coords {
        while hull.len() >= 2
            && orient2d(hull[hull.len() - 2], hull[hull.len() - 1], coord)
                != Orientation::CounterClockwise
        {
            hull.pop();
        }
        hull.push(coord);
    }

    // upper hull
    let lower_len = hull.len() + 1;
    for &coord in coords.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && orient2d(hull[hull.len() - 2], hull[hull.len() - 1], coord)
                != Orientation::CounterClockwise
        {
            hull.pop();
        }
        hull.push(coord);
    }

    // `hull` now ends where it began
    let seq = CoordSeq::from_coords(planar_types::CoordShape::XY, hull);
    Polygon::new(LinearRing::new(seq), vec![])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::area::Area;
    use planar_types::coord;

    #[test]
    fn hull_of_scattered_points() {
        let mp = MultiPoint::from(vec![
            (0., 0.),
            (4., 0.),
            (4., 4.),
            (0., 4.),
            (2., 2.),
            (1., 3.),
        ]);
        let hull = mp.convex_hull();
        assert_eq!(hull.unsigned_area(), 16.);
        // interior points are dropped: 4 corners + closing coordinate
        assert_eq!(hull.exterior().num_points(), 5);
    }

    #[test]
    fn hull_is_ccw() {
        let mp = MultiPoint::from(vec![(0., 0.), (4., 0.), (4., 4.), (0., 4.)]);
        let hull = mp.convex_hull();
        assert!(crate::algorithm::orientation::is_ccw(hull.exterior().seq()));
    }

    #[test]
    fn collinear_input_degenerates() {
        let mp = MultiPoint::from(vec![(0., 0.), (1., 1.), (2., 2.)]);
        let hull = mp.convex_hull();
        assert_eq!(hull.unsigned_area(), 0.);
        assert!(hull
            .exterior()
            .coords()
            .contains(&coord! { x: 0., y: 0. }));
        assert!(hull
            .exterior()
            .coords()
            .contains(&coord! { x: 2., y: 2. }));
    }

    #[test]
    fn empty_input() {
        let hull = MultiPoint::new(vec![]).convex_hull();
        assert!(hull.is_empty());
    }
}
