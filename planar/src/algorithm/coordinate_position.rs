use crate::algorithm::orientation::{orient2d, Orientation};
use planar_types::{Coord, CoordSeq, Geometry, Line, LineString, Polygon};

/// The position of a coordinate relative to a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordPos {
    Inside,
    OnBoundary,
    Outside,
}

/// Determine whether a [`Coord`] lies inside, outside, or on the boundary
/// of a geometry.
pub trait CoordinatePosition {
    fn coordinate_position(&self, coord: &Coord) -> CoordPos;
}

impl CoordinatePosition for Geometry {
    fn coordinate_position(&self, coord: &Coord) -> CoordPos {
        PointLocator::new().locate(coord, self)
    }
}

/// Locates a coordinate in a geometry of any type.
///
/// Component locations combine under the SFS "mod-2" union rule: a
/// coordinate on an odd number of component boundaries is on the boundary
/// of the whole; otherwise it is inside if any component's interior
/// holds it.
///
/// The locator is reusable across queries; construction is free.
#[derive(Default)]
pub struct PointLocator {
    inside_any: bool,
    boundary_crossings: usize,
}

impl PointLocator {
    pub fn new() -> Self {
        PointLocator::default()
    }

    pub fn locate(&mut self, coord: &Coord, geometry: &Geometry) -> CoordPos {
        self.inside_any = false;
        self.boundary_crossings = 0;
        self.visit(coord, geometry);

        if self.boundary_crossings % 2 == 1 {
            CoordPos::OnBoundary
        } else if self.inside_any || self.boundary_crossings > 0 {
            // an even, non-zero number of boundary incidences cancels to
            // the interior of the union
            CoordPos::Inside
        } else {
            CoordPos::Outside
        }
    }

    fn visit(&mut self, coord: &Coord, geometry: &Geometry) {
        match geometry {
            Geometry::Point(p) => {
                if p.coord() == Some(*coord) {
                    self.inside_any = true;
                }
            }
            Geometry::MultiPoint(mp) => {
                if mp.0.iter().any(|p| p.coord() == Some(*coord)) {
                    self.inside_any = true;
                }
            }
            Geometry::LineString(ls) => self.visit_line_string(coord, ls),
            // a free-standing ring is a closed line: all linework is
            // interior, there is no boundary
            Geometry::LinearRing(ring) => self.visit_line_string(coord, ring.as_line_string()),
            Geometry::Polygon(polygon) => self.visit_polygon(coord, polygon),
            Geometry::MultiLineString(mls) => {
                for ls in &mls.0 {
                    self.visit_line_string(coord, ls);
                }
            }
            Geometry::MultiPolygon(mp) => {
                for polygon in &mp.0 {
                    self.visit_polygon(coord, polygon);
                }
            }
            Geometry::GeometryCollection(gc) => {
                for child in &gc.0 {
                    self.visit(coord, child);
                }
            }
        }
    }

    fn visit_line_string(&mut self, coord: &Coord, line_string: &LineString) {
        if line_string.num_points() < 2 || !line_string.envelope().intersects_coord(*coord) {
            return;
        }

        // a closed line string has no boundary
        if !line_string.is_closed()
            && (Some(coord) == line_string.coords().first()
                || Some(coord) == line_string.coords().last())
        {
            self.boundary_crossings += 1;
            return;
        }

        if line_string.lines().any(|line| is_coord_on_line(*coord, line)) {
            self.inside_any = true;
        }
    }

    fn visit_polygon(&mut self, coord: &Coord, polygon: &Polygon) {
        if polygon.is_empty() || !polygon.envelope().intersects_coord(*coord) {
            return;
        }

        match coord_pos_relative_to_ring(*coord, polygon.exterior().seq()) {
            CoordPos::Outside => {}
            CoordPos::OnBoundary => self.boundary_crossings += 1,
            CoordPos::Inside => {
                for hole in polygon.interiors() {
                    match coord_pos_relative_to_ring(*coord, hole.seq()) {
                        CoordPos::Outside => {}
                        CoordPos::OnBoundary => {
                            self.boundary_crossings += 1;
                            return;
                        }
                        CoordPos::Inside => {
                            // inside a hole is outside the polygon
                            return;
                        }
                    }
                }
                self.inside_any = true;
            }
        }
    }
}

/// `true` if the coordinate lies on the segment (endpoints included).
pub fn is_coord_on_line(coord: Coord, line: Line) -> bool {
    line.envelope().intersects_coord(coord)
        && orient2d(line.start, line.end, coord) == Orientation::Collinear
}

/// Counts crossings of a rightward ray from a query point with a set of
/// segments, tolerating vertex hits and horizontal segments.
///
/// Segments may be fed in any order, so the counter also serves indexed
/// locators which visit candidate segments out of ring order.
pub(crate) struct RayCrossingCounter {
    point: Coord,
    crossing_count: usize,
    on_boundary: bool,
}

impl RayCrossingCounter {
    pub(crate) fn new(point: Coord) -> Self {
        RayCrossingCounter {
            point,
            crossing_count: 0,
            on_boundary: false,
        }
    }

    pub(crate) fn count_segment(&mut self, p1: Coord, p2: Coord) {
        if self.on_boundary {
            return;
        }
        let coord = self.point;
        // entirely left of the ray origin
        if p1.x < coord.x && p2.x < coord.x {
            return;
        }
        if coord == p2 {
            self.on_boundary = true;
            return;
        }
        if p1.y == coord.y && p2.y == coord.y {
            // horizontal segment on the ray line
            let min_x = p1.x.min(p2.x);
            let max_x = p1.x.max(p2.x);
            if coord.x >= min_x && coord.x <= max_x {
                self.on_boundary = true;
            }
            return;
        }
        // a segment crosses the ray line if it straddles it, counting
        // the upper endpoint and excluding the lower to handle vertex
        // crossings exactly once
        if (p1.y > coord.y && p2.y <= coord.y) || (p2.y > coord.y && p1.y <= coord.y) {
            let mut x_int_sign = orient2d(coord, p1, p2).index();
            if x_int_sign == 0 {
                self.on_boundary = true;
                return;
            }
            if p2.y < p1.y {
                x_int_sign = -x_int_sign;
            }
            // crossing strictly right of the point
            if x_int_sign > 0 {
                self.crossing_count += 1;
            }
        }
    }

    pub(crate) fn location(&self) -> CoordPos {
        if self.on_boundary {
            CoordPos::OnBoundary
        } else if self.crossing_count % 2 == 1 {
            CoordPos::Inside
        } else {
            CoordPos::Outside
        }
    }
}

/// Ray-crossing location of a coordinate relative to a closed ring,
/// tolerant of vertex hits and horizontal segments.
///
/// The ring may be self-intersecting; membership is then even-odd.
pub fn coord_pos_relative_to_ring(coord: Coord, ring: &CoordSeq) -> CoordPos {
    let mut counter = RayCrossingCounter::new(coord);
    for line in ring.lines() {
        counter.count_segment(line.start, line.end);
        if counter.location() == CoordPos::OnBoundary {
            return CoordPos::OnBoundary;
        }
    }
    counter.location()
}

#[cfg(test)]
mod test {
    use super::*;
    use planar_types::{coord, line_string, polygon};

    #[test]
    fn square_positions() {
        let square: Geometry =
            polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)].into();
        assert_eq!(
            square.coordinate_position(&coord! { x: 5., y: 5. }),
            CoordPos::Inside
        );
        assert_eq!(
            square.coordinate_position(&coord! { x: 10., y: 0. }),
            CoordPos::OnBoundary
        );
        assert_eq!(
            square.coordinate_position(&coord! { x: 0., y: 5. }),
            CoordPos::OnBoundary
        );
        assert_eq!(
            square.coordinate_position(&coord! { x: 15., y: 5. }),
            CoordPos::Outside
        );
    }

    #[test]
    fn hole_is_outside() {
        let holed: Geometry = polygon!(
            exterior: [(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)],
            interiors: [[(x: 4., y: 4.), (x: 6., y: 4.), (x: 6., y: 6.), (x: 4., y: 6.)]],
        )
        .into();
        assert_eq!(
            holed.coordinate_position(&coord! { x: 5., y: 5. }),
            CoordPos::Outside
        );
        assert_eq!(
            holed.coordinate_position(&coord! { x: 4., y: 5. }),
            CoordPos::OnBoundary
        );
        assert_eq!(
            holed.coordinate_position(&coord! { x: 2., y: 5. }),
            CoordPos::Inside
        );
    }

    #[test]
    fn line_boundary_is_endpoints() {
        let ls: Geometry = line_string![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.)].into();
        assert_eq!(
            ls.coordinate_position(&coord! { x: 0., y: 0. }),
            CoordPos::OnBoundary
        );
        assert_eq!(
            ls.coordinate_position(&coord! { x: 5., y: 0. }),
            CoordPos::Inside
        );
        assert_eq!(
            ls.coordinate_position(&coord! { x: 5., y: 5. }),
            CoordPos::Outside
        );
    }

    #[test]
    fn shared_endpoint_of_two_lines_is_interior() {
        // the mod-2 rule cancels a point on two component boundaries
        let mls: Geometry = planar_types::MultiLineString(vec![
            line_string![(x: 0., y: 0.), (x: 5., y: 0.)],
            line_string![(x: 5., y: 0.), (x: 5., y: 5.)],
        ])
        .into();
        assert_eq!(
            mls.coordinate_position(&coord! { x: 5., y: 0. }),
            CoordPos::Inside
        );
        assert_eq!(
            mls.coordinate_position(&coord! { x: 0., y: 0. }),
            CoordPos::OnBoundary
        );
    }

    #[test]
    fn vertex_ray_crossing_is_counted_once() {
        // diamond whose vertex lies on the query ray
        let diamond: Geometry =
            polygon![(x: 0., y: 0.), (x: 2., y: 2.), (x: 4., y: 0.), (x: 2., y: -2.)].into();
        assert_eq!(
            diamond.coordinate_position(&coord! { x: -1., y: 0. }),
            CoordPos::Outside
        );
        assert_eq!(
            diamond.coordinate_position(&coord! { x: 2., y: 0. }),
            CoordPos::Inside
        );
    }
}
