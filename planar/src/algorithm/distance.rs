use crate::algorithm::coordinate_position::{CoordPos, CoordinatePosition};

use crate::algorithm::line_intersection::line_intersection;
use crate::index::StrTree;
use planar_types::{Coord, Dimensions, Envelope, Geometry, GeometryError, Line, Result};

/// The minimum Euclidean distance between two geometries.
///
/// Zero when the geometries intersect. Empty inputs are an error.
pub fn distance(a: &Geometry, b: &Geometry) -> Result<f64> {
    Ok(nearest_facets(a, b)?.0)
}

/// The pair of coordinates, one on each geometry, realizing the minimum
/// distance. For intersecting geometries both coordinates are a common
/// point.
pub fn nearest_points(a: &Geometry, b: &Geometry) -> Result<(Coord, Coord)> {
    let (_, pair) = nearest_facets(a, b)?;
    Ok(pair)
}

/// A distance facet: one locus of a geometry's point-set.
#[derive(Clone, Copy, Debug)]
enum Facet {
    Segment(Line),
    Point(Coord),
}

impl Facet {
    fn envelope(&self) -> Envelope {
        match self {
            Facet::Segment(line) => line.envelope(),
            Facet::Point(coord) => Envelope::of(*coord),
        }
    }
}

fn nearest_facets(a: &Geometry, b: &Geometry) -> Result<(f64, (Coord, Coord))> {
    let facets_a = facets_of(a)?;
    let facets_b = facets_of(b)?;

    // one geometry may lie wholly inside the other's area without any
    // boundary contact; a representative-vertex containment test catches
    // that case, since crossing boundaries are caught by facet distance
    if a.dimensions() == Dimensions::TwoDimensional {
        if let Some(coord) = first_coord(b) {
            if a.coordinate_position(&coord) != CoordPos::Outside {
                return Ok((0., (coord, coord)));
            }
        }
    }
    if b.dimensions() == Dimensions::TwoDimensional {
        if let Some(coord) = first_coord(a) {
            if b.coordinate_position(&coord) != CoordPos::Outside {
                return Ok((0., (coord, coord)));
            }
        }
    }

    let mut tree_a = StrTree::new();
    for facet in &facets_a {
        tree_a.insert(facet.envelope(), *facet)?;
    }
    let mut tree_b = StrTree::new();
    for facet in &facets_b {
        tree_b.insert(facet.envelope(), *facet)?;
    }

    let (facet_a, facet_b) = tree_a
        .nearest_neighbour_between(&tree_b, |fa, fb| facet_distance(fa, fb).0)
        .expect("both trees are non-empty");
    Ok(facet_distance(facet_a, facet_b))
}

fn first_coord(geometry: &Geometry) -> Option<Coord> {
    let mut first = None;
    geometry.apply_coords(&mut |coord| {
        if first.is_none() {
            first = Some(*coord);
        }
    });
    first
}

fn facets_of(geometry: &Geometry) -> Result<Vec<Facet>> {
    let mut facets = Vec::new();
    collect_facets(geometry, &mut facets);
    if facets.is_empty() {
        return Err(GeometryError::invalid_argument(
            "distance is undefined for empty geometries",
        ));
    }
    Ok(facets)
}

fn collect_facets(geometry: &Geometry, facets: &mut Vec<Facet>) {
    match geometry {
        Geometry::Point(p) => {
            if let Some(coord) = p.coord() {
                facets.push(Facet::Point(coord));
            }
        }
        Geometry::MultiPoint(mp) => {
            for p in &mp.0 {
                if let Some(coord) = p.coord() {
                    facets.push(Facet::Point(coord));
                }
            }
        }
        Geometry::LineString(ls) => {
            if ls.num_points() == 1 {
                facets.push(Facet::Point(ls.coords()[0]));
            }
            facets.extend(ls.lines().map(Facet::Segment));
        }
        Geometry::LinearRing(ring) => facets.extend(ring.lines().map(Facet::Segment)),
        Geometry::Polygon(polygon) => {
            for ring in polygon.rings() {
                facets.extend(ring.lines().map(Facet::Segment));
            }
        }
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                collect_facets(&Geometry::LineString(ls.clone()), facets);
            }
        }
        Geometry::MultiPolygon(mp) => {
            for polygon in &mp.0 {
                collect_facets(&Geometry::Polygon(polygon.clone()), facets);
            }
        }
        Geometry::GeometryCollection(gc) => {
            for child in &gc.0 {
                collect_facets(child, facets);
            }
        }
    }
}

fn facet_distance(a: &Facet, b: &Facet) -> (f64, (Coord, Coord)) {
    match (a, b) {
        (Facet::Point(pa), Facet::Point(pb)) => (pa.distance(pb), (*pa, *pb)),
        (Facet::Point(p), Facet::Segment(s)) => {
            let nearest = closest_point_on_segment(*p, *s);
            (p.distance(&nearest), (*p, nearest))
        }
        (Facet::Segment(s), Facet::Point(p)) => {
            let nearest = closest_point_on_segment(*p, *s);
            (p.distance(&nearest), (nearest, *p))
        }
        (Facet::Segment(sa), Facet::Segment(sb)) => segment_distance(*sa, *sb),
    }
}

fn segment_distance(a: Line, b: Line) -> (f64, (Coord, Coord)) {
    if let Some(intersection) = line_intersection(a, b) {
        let coord = match intersection {
            crate::algorithm::line_intersection::LineIntersection::SinglePoint {
                intersection,
                ..
            } => intersection,
            crate::algorithm::line_intersection::LineIntersection::Collinear { intersection } => {
                intersection.start
            }
        };
        return (0., (coord, coord));
    }

    // disjoint segments: the minimum is endpoint-to-segment
    let candidates = [
        (a.start, closest_point_on_segment(a.start, b), true),
        (a.end, closest_point_on_segment(a.end, b), true),
        (b.start, closest_point_on_segment(b.start, a), false),
        (b.end, closest_point_on_segment(b.end, a), false),
    ];
    let mut best: Option<(f64, (Coord, Coord))> = None;
    for (point, nearest, point_is_on_a) in candidates {
        let dist = point.distance(&nearest);
        let pair = if point_is_on_a {
            (point, nearest)
        } else {
            (nearest, point)
        };
        if best.map_or(true, |(best_dist, _)| dist < best_dist) {
            best = Some((dist, pair));
        }
    }
    best.expect("candidates are non-empty")
}

fn closest_point_on_segment(point: Coord, line: Line) -> Coord {
    let d_squared = line.dx() * line.dx() + line.dy() * line.dy();
    if d_squared == 0. {
        return line.start;
    }
    let r = ((point.x - line.start.x) * line.dx() + (point.y - line.start.y) * line.dy())
        / d_squared;
    if r <= 0. {
        line.start
    } else if r >= 1. {
        line.end
    } else {
        Coord::new(line.start.x + r * line.dx(), line.start.y + r * line.dy())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use planar_types::{line_string, polygon, Point};

    #[test]
    fn disjoint_squares() {
        let a: Geometry =
            polygon![(x: 0., y: 0.), (x: 1., y: 0.), (x: 1., y: 1.), (x: 0., y: 1.)].into();
        let b: Geometry =
            polygon![(x: 4., y: 0.), (x: 5., y: 0.), (x: 5., y: 1.), (x: 4., y: 1.)].into();
        assert_eq!(distance(&a, &b).unwrap(), 3.);

        let (pa, pb) = nearest_points(&a, &b).unwrap();
        assert_eq!(pa.x, 1.);
        assert_eq!(pb.x, 4.);
    }

    #[test]
    fn point_inside_polygon_is_distance_zero() {
        let square: Geometry =
            polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)].into();
        let point: Geometry = Point::new(5., 5.).into();
        assert_eq!(distance(&square, &point).unwrap(), 0.);
        assert_eq!(distance(&point, &square).unwrap(), 0.);
    }

    #[test]
    fn crossing_lines_are_distance_zero() {
        let a: Geometry = line_string![(x: 0., y: 0.), (x: 10., y: 10.)].into();
        let b: Geometry = line_string![(x: 10., y: 0.), (x: 0., y: 10.)].into();
        assert_eq!(distance(&a, &b).unwrap(), 0.);
    }

    #[test]
    fn point_to_line() {
        let point: Geometry = Point::new(0., 5.).into();
        let line: Geometry = line_string![(x: 3., y: 0.), (x: 3., y: 10.)].into();
        assert_eq!(distance(&point, &line).unwrap(), 3.);
        let (pa, pb) = nearest_points(&point, &line).unwrap();
        assert_eq!(pa, Coord::new(0., 5.));
        assert_eq!(pb, Coord::new(3., 5.));
    }

    #[test]
    fn empty_input_is_an_error() {
        let empty: Geometry = Point::empty().into();
        let other: Geometry = Point::new(0., 0.).into();
        assert!(distance(&empty, &other).is_err());
    }
}
