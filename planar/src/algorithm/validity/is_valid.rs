use crate::algorithm::coordinate_position::{coord_pos_relative_to_ring, CoordPos};
use crate::algorithm::line_intersection::{line_intersection, LineIntersection};
use crate::index::chain::build_chains;
use crate::index::StrTree;
use planar_types::{Coord, Geometry, LineString, LinearRing, Polygon};

use std::fmt;

/// The reason a geometry is invalid, with the coordinate at which the
/// problem was detected where one exists.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    InvalidCoordinate(Coord),
    TooFewPoints,
    RingNotClosed,
    SelfIntersection(Coord),
    HoleOutsideShell(Coord),
    NestedHoles(Coord),
    NestedShells(Coord),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidCoordinate(c) => {
                write!(f, "invalid coordinate at ({} {})", c.x, c.y)
            }
            ValidationError::TooFewPoints => write!(f, "too few points"),
            ValidationError::RingNotClosed => write!(f, "ring not closed"),
            ValidationError::SelfIntersection(c) => {
                write!(f, "self-intersection at ({} {})", c.x, c.y)
            }
            ValidationError::HoleOutsideShell(c) => {
                write!(f, "hole lies outside shell at ({} {})", c.x, c.y)
            }
            ValidationError::NestedHoles(c) => write!(f, "nested holes at ({} {})", c.x, c.y)
            ,
            ValidationError::NestedShells(c) => write!(f, "nested shells at ({} {})", c.x, c.y),
        }
    }
}

/// Whether the geometry satisfies the SFS validity rules.
pub fn is_valid(geometry: &Geometry) -> bool {
    validation_error(geometry).is_none()
}

/// The first validity violation found, or `None` for a valid geometry.
pub fn validation_error(geometry: &Geometry) -> Option<ValidationError> {
    match geometry {
        Geometry::Point(p) => p.coord().and_then(check_coord),
        Geometry::MultiPoint(mp) => mp.0.iter().find_map(|p| p.coord().and_then(check_coord)),
        Geometry::LineString(ls) => check_line_string(ls),
        Geometry::LinearRing(ring) => check_ring(ring),
        Geometry::Polygon(polygon) => check_polygon(polygon),
        Geometry::MultiLineString(mls) => mls.0.iter().find_map(check_line_string),
        Geometry::MultiPolygon(mp) => {
            if let Some(error) = mp.0.iter().find_map(check_polygon) {
                return Some(error);
            }
            check_shells_not_nested(&mp.0)
        }
        Geometry::GeometryCollection(gc) => gc.0.iter().find_map(validation_error),
    }
}

fn check_coord(coord: Coord) -> Option<ValidationError> {
    if coord.is_finite() {
        None
    } else {
        Some(ValidationError::InvalidCoordinate(coord))
    }
}

fn check_coords(coords: &[Coord]) -> Option<ValidationError> {
    coords.iter().find_map(|coord| check_coord(*coord))
}

fn check_line_string(line_string: &LineString) -> Option<ValidationError> {
    if line_string.is_empty() {
        return None;
    }
    if let Some(error) = check_coords(line_string.coords()) {
        return Some(error);
    }
    if line_string.num_points() < 2 {
        return Some(ValidationError::TooFewPoints);
    }
    None
}

fn check_ring(ring: &LinearRing) -> Option<ValidationError> {
    if ring.is_empty() {
        return None;
    }
    if let Some(error) = check_coords(ring.coords()) {
        return Some(error);
    }
    let mut deduped = ring.coords().to_vec();
    deduped.dedup();
    if deduped.len() < 4 {
        return Some(ValidationError::TooFewPoints);
    }
    if ring.coords().first() != ring.coords().last() {
        return Some(ValidationError::RingNotClosed);
    }
    ring_self_intersection(&deduped).map(ValidationError::SelfIntersection)
}

/// Any point at which the ring's boundary meets itself: a proper
/// crossing, a collinear overlap, or a repeated (non-adjacent) vertex.
/// A simple closed ring has none.
fn ring_self_intersection(coords: &[Coord]) -> Option<Coord> {
    let segment_count = coords.len() - 1;
    let mut found: Option<Coord> = None;
    for_each_candidate_pair(coords, coords, &mut |i, j| {
        if found.is_some() || i == j {
            return;
        }
        // each unordered pair once
        if j < i {
            return;
        }
        let adjacent = j - i == 1 || (i == 0 && j == segment_count - 1);
        let line_i = planar_types::Line::new(coords[i], coords[i + 1]);
        let line_j = planar_types::Line::new(coords[j], coords[j + 1]);
        match line_intersection(line_i, line_j) {
            None => {}
            Some(LineIntersection::Collinear { intersection }) => {
                found = Some(intersection.start);
            }
            Some(LineIntersection::SinglePoint { intersection, .. }) => {
                if !adjacent {
                    found = Some(intersection);
                }
            }
        }
    });
    found
}

/// Any intersection point between two distinct rings beyond isolated
/// vertex touches: a proper crossing or a collinear overlap.
fn rings_cross(ring_a: &[Coord], ring_b: &[Coord]) -> Option<Coord> {
    let mut found: Option<Coord> = None;
    for_each_candidate_pair(ring_a, ring_b, &mut |i, j| {
        if found.is_some() {
            return;
        }
        let line_a = planar_types::Line::new(ring_a[i], ring_a[i + 1]);
        let line_b = planar_types::Line::new(ring_b[j], ring_b[j + 1]);
        match line_intersection(line_a, line_b) {
            None => {}
            Some(LineIntersection::Collinear { intersection }) => {
                found = Some(intersection.start);
            }
            Some(LineIntersection::SinglePoint {
                intersection,
                is_proper,
            }) => {
                if is_proper {
                    found = Some(intersection);
                }
            }
        }
    });
    found
}

/// Envelope-pruned candidate segment pairs between two vertex lists.
fn for_each_candidate_pair(
    coords_a: &[Coord],
    coords_b: &[Coord],
    action: &mut impl FnMut(usize, usize),
) {
    let chains_a = build_chains(coords_a, 0);
    let chains_b = build_chains(coords_b, 1);
    let mut tree = StrTree::new();
    for (index, chain) in chains_b.iter().enumerate() {
        tree.insert(*chain.envelope(), index)
            .expect("fresh tree accepts inserts");
    }
    for chain_a in &chains_a {
        for &index in tree.query_items(chain_a.envelope()) {
            chain_a.compute_overlaps(coords_a, &chains_b[index], coords_b, action);
        }
    }
}

fn check_polygon(polygon: &Polygon) -> Option<ValidationError> {
    if polygon.is_empty() {
        return None;
    }
    if let Some(error) = check_ring(polygon.exterior()) {
        return Some(error);
    }
    for hole in polygon.interiors() {
        if let Some(error) = check_ring(hole) {
            return Some(error);
        }
    }

    let shell = polygon.exterior();
    for hole in polygon.interiors() {
        // holes may touch the shell at isolated points but not cross it
        if let Some(coord) = rings_cross(shell.coords(), hole.coords()) {
            return Some(ValidationError::SelfIntersection(coord));
        }
        // every hole vertex stays inside or on the shell
        for coord in hole.coords() {
            if coord_pos_relative_to_ring(*coord, shell.seq()) == CoordPos::Outside {
                return Some(ValidationError::HoleOutsideShell(*coord));
            }
        }
    }

    // holes are mutually disjoint (touching at points is allowed)
    for (index_a, hole_a) in polygon.interiors().iter().enumerate() {
        for hole_b in polygon.interiors().iter().skip(index_a + 1) {
            if let Some(coord) = rings_cross(hole_a.coords(), hole_b.coords()) {
                return Some(ValidationError::SelfIntersection(coord));
            }
            if let Some(coord) = ring_inside_ring(hole_a, hole_b) {
                return Some(ValidationError::NestedHoles(coord));
            }
            if let Some(coord) = ring_inside_ring(hole_b, hole_a) {
                return Some(ValidationError::NestedHoles(coord));
            }
        }
    }
    None
}

/// A vertex of `inner` strictly inside `outer`, when no vertex is
/// strictly outside — the signature of improper nesting.
fn ring_inside_ring(inner: &LinearRing, outer: &LinearRing) -> Option<Coord> {
    let mut strictly_inside = None;
    for coord in inner.coords() {
        match coord_pos_relative_to_ring(*coord, outer.seq()) {
            CoordPos::Outside => return None,
            CoordPos::Inside => strictly_inside = Some(*coord),
            CoordPos::OnBoundary => {}
        }
    }
    strictly_inside
}

fn check_shells_not_nested(polygons: &[Polygon]) -> Option<ValidationError> {
    for (index_a, polygon_a) in polygons.iter().enumerate() {
        for polygon_b in polygons.iter().skip(index_a + 1) {
            if !polygon_a.envelope().intersects(&polygon_b.envelope()) {
                continue;
            }
            if let Some(coord) =
                rings_cross(polygon_a.exterior().coords(), polygon_b.exterior().coords())
            {
                return Some(ValidationError::SelfIntersection(coord));
            }
            if let Some(error) = check_shell_in_polygon(polygon_a, polygon_b) {
                return Some(error);
            }
            if let Some(error) = check_shell_in_polygon(polygon_b, polygon_a) {
                return Some(error);
            }
        }
    }
    None
}

/// A shell inside another polygon's shell is invalid nesting, unless it
/// sits wholly inside one of that polygon's holes.
fn check_shell_in_polygon(inner: &Polygon, outer: &Polygon) -> Option<ValidationError> {
    let coord = ring_inside_ring(inner.exterior(), outer.exterior())?;
    let in_a_hole = outer.interiors().iter().any(|hole| {
        coord_pos_relative_to_ring(coord, hole.seq()) != CoordPos::Outside
    });
    if in_a_hole {
        None
    } else {
        Some(ValidationError::NestedShells(coord))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use planar_types::{polygon, MultiPolygon};

    #[test]
    fn simple_square_is_valid() {
        let square: Geometry =
            polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)].into();
        assert!(is_valid(&square));
    }

    #[test]
    fn bowtie_is_self_intersecting() {
        let bowtie: Geometry =
            polygon![(x: 0., y: 0.), (x: 1., y: 1.), (x: 0., y: 1.), (x: 1., y: 0.)].into();
        match validation_error(&bowtie) {
            Some(ValidationError::SelfIntersection(_)) => {}
            other => panic!("expected self-intersection, got {:?}", other),
        }
    }

    #[test]
    fn hole_outside_shell() {
        let invalid: Geometry = polygon!(
            exterior: [(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)],
            interiors: [[(x: 20., y: 20.), (x: 25., y: 20.), (x: 25., y: 25.)]],
        )
        .into();
        assert!(matches!(
            validation_error(&invalid),
            Some(ValidationError::HoleOutsideShell(_))
        ));
    }

    #[test]
    fn nested_shells() {
        let nested: Geometry = MultiPolygon(vec![
            polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)],
            polygon![(x: 2., y: 2.), (x: 4., y: 2.), (x: 4., y: 4.), (x: 2., y: 4.)],
        ])
        .into();
        assert!(matches!(
            validation_error(&nested),
            Some(ValidationError::NestedShells(_))
        ));
    }

    #[test]
    fn shell_inside_hole_is_valid() {
        let donut_with_island: Geometry = MultiPolygon(vec![
            polygon!(
                exterior: [(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)],
                interiors: [[(x: 2., y: 2.), (x: 8., y: 2.), (x: 8., y: 8.), (x: 2., y: 8.)]],
            ),
            polygon![(x: 4., y: 4.), (x: 6., y: 4.), (x: 6., y: 6.), (x: 4., y: 6.)],
        ])
        .into();
        assert!(is_valid(&donut_with_island));
    }

    #[test]
    fn valid_holed_polygon() {
        let holed: Geometry = polygon!(
            exterior: [(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)],
            interiors: [[(x: 2., y: 2.), (x: 8., y: 2.), (x: 8., y: 8.), (x: 2., y: 8.)]],
        )
        .into();
        assert!(is_valid(&holed));
    }
}
