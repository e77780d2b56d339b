use planar_types::{Coord, CoordSeq, Geometry, LineString, Point, Polygon};

/// Calculation of the centroid.
///
/// The centroid is equal to the centroid of the set of component
/// geometries of highest dimension: the centroids of lower-dimension
/// components are ignored when higher-dimension components are present.
///
/// Degenerate areal geometries (zero area) fall back to their linework;
/// degenerate lines (zero length) fall back to their vertices.
pub trait Centroid {
    fn centroid(&self) -> Option<Point>;
}

impl Centroid for Geometry {
    fn centroid(&self) -> Option<Point> {
        let mut operation = CentroidOperation::new();
        operation.add_geometry(self);
        operation.finish()
    }
}

impl Centroid for Polygon {
    fn centroid(&self) -> Option<Point> {
        let mut operation = CentroidOperation::new();
        operation.add_polygon(self);
        operation.finish()
    }
}

impl Centroid for LineString {
    fn centroid(&self) -> Option<Point> {
        let mut operation = CentroidOperation::new();
        operation.add_line_string(self);
        operation.finish()
    }
}

/// Dimension-stratified weighted accumulation.
struct CentroidOperation {
    // areal accumulation: signed triangle areas about a base point
    area_sum: f64,
    area_weighted: Coord,
    area_base: Option<Coord>,
    // lineal accumulation: segment midpoints weighted by length
    length_sum: f64,
    length_weighted: Coord,
    // puntal accumulation
    point_count: usize,
    point_sum: Coord,
}

impl CentroidOperation {
    fn new() -> Self {
        CentroidOperation {
            area_sum: 0.,
            area_weighted: Coord::zero(),
            area_base: None,
            length_sum: 0.,
            length_weighted: Coord::zero(),
            point_count: 0,
            point_sum: Coord::zero(),
        }
    }

    fn finish(&self) -> Option<Point> {
        // highest dimension with non-degenerate weight wins
        if self.area_sum.abs() > 0. {
            return Some(Point(Some(Coord::new(
                self.area_weighted.x / (3. * self.area_sum),
                self.area_weighted.y / (3. * self.area_sum),
            ))));
        }
        if self.length_sum > 0. {
            return Some(Point(Some(Coord::new(
                self.length_weighted.x / self.length_sum,
                self.length_weighted.y / self.length_sum,
            ))));
        }
        if self.point_count > 0 {
            return Some(Point(Some(Coord::new(
                self.point_sum.x / self.point_count as f64,
                self.point_sum.y / self.point_count as f64,
            ))));
        }
        None
    }

    fn add_geometry(&mut self, geometry: &Geometry) {
        match geometry {
            Geometry::Point(p) => {
                if let Some(coord) = p.coord() {
                    self.add_point(coord);
                }
            }
            Geometry::LineString(ls) => self.add_line_string(ls),
            Geometry::LinearRing(ring) => self.add_line_seq(ring.seq()),
            Geometry::Polygon(polygon) => self.add_polygon(polygon),
            Geometry::MultiPoint(mp) => {
                for p in &mp.0 {
                    if let Some(coord) = p.coord() {
                        self.add_point(coord);
                    }
                }
            }
            Geometry::MultiLineString(mls) => {
                for ls in &mls.0 {
                    self.add_line_string(ls);
                }
            }
            Geometry::MultiPolygon(mp) => {
                for polygon in &mp.0 {
                    self.add_polygon(polygon);
                }
            }
            Geometry::GeometryCollection(gc) => {
                for child in &gc.0 {
                    self.add_geometry(child);
                }
            }
        }
    }

    fn add_point(&mut self, coord: Coord) {
        self.point_count += 1;
        self.point_sum = self.point_sum + coord;
    }

    fn add_line_string(&mut self, line_string: &LineString) {
        self.add_line_seq(line_string.seq());
    }

    fn add_line_seq(&mut self, seq: &CoordSeq) {
        if seq.len() == 1 {
            self.add_point(seq[0]);
            return;
        }
        for line in seq.lines() {
            let length = line.length();
            let mid = line.midpoint();
            self.length_sum += length;
            self.length_weighted = self.length_weighted + mid * length;
        }
    }

    fn add_polygon(&mut self, polygon: &Polygon) {
        if polygon.is_empty() {
            return;
        }
        let base = *self.area_base.get_or_insert(polygon.exterior().seq()[0]);
        self.add_ring_area(polygon.exterior().seq(), base, 1.);
        for hole in polygon.interiors() {
            self.add_ring_area(hole.seq(), base, -1.);
        }
        // fall back to the boundary for zero-area polygons
        self.add_line_seq(polygon.exterior().seq());
        for hole in polygon.interiors() {
            self.add_line_seq(hole.seq());
        }
    }

    fn add_ring_area(&mut self, seq: &CoordSeq, base: Coord, sign: f64) {
        // triangles about the base point; signed areas cancel correctly
        // whatever the ring orientation
        let orientation_sign = ring_sign(seq);
        for line in seq.lines() {
            let twice_area =
                (line.start.x - base.x) * (line.end.y - base.y)
                    - (line.end.x - base.x) * (line.start.y - base.y);
            let weight = sign * orientation_sign * twice_area / 2.;
            self.area_sum += weight;
            let triangle_centroid_times_3 = Coord::new(
                base.x + line.start.x + line.end.x,
                base.y + line.start.y + line.end.y,
            );
            self.area_weighted = self.area_weighted + triangle_centroid_times_3 * weight;
        }
    }
}

fn ring_sign(seq: &CoordSeq) -> f64 {
    if crate::algorithm::area::ring_area_signed(seq) < 0. {
        -1.
    } else {
        1.
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use planar_types::{line_string, polygon};

    #[test]
    fn square_centroid() {
        let square = polygon![(x: 0., y: 0.), (x: 4., y: 0.), (x: 4., y: 4.), (x: 0., y: 4.)];
        assert_eq!(
            Geometry::from(square).centroid(),
            Some(Point::new(2., 2.))
        );
    }

    #[test]
    fn holed_square_centroid_shifts() {
        let holed = polygon!(
            exterior: [(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)],
            interiors: [[(x: 0., y: 0.), (x: 5., y: 0.), (x: 5., y: 5.), (x: 0., y: 5.)]],
        );
        let centroid = holed.centroid().unwrap().coord().unwrap();
        // mass removed from the lower-left quadrant pushes the centroid up-right
        assert_relative_eq!(centroid.x, 35. / 6.);
        assert_relative_eq!(centroid.y, 35. / 6.);
    }

    #[test]
    fn line_centroid_is_length_weighted() {
        let ls = line_string![(x: 0., y: 0.), (x: 10., y: 0.)];
        assert_eq!(ls.centroid(), Some(Point::new(5., 0.)));
    }

    #[test]
    fn empty_has_no_centroid() {
        assert_eq!(Geometry::from(Point::empty()).centroid(), None);
    }

    #[test]
    fn highest_dimension_wins() {
        let gc = Geometry::from(planar_types::GeometryCollection(vec![
            Point::new(100., 100.).into(),
            polygon![(x: 0., y: 0.), (x: 2., y: 0.), (x: 2., y: 2.), (x: 0., y: 2.)].into(),
        ]));
        assert_eq!(gc.centroid(), Some(Point::new(1., 1.)));
    }
}
