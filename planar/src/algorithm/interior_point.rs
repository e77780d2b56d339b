use crate::algorithm::centroid::Centroid;

use planar_types::{Coord, Dimensions, Geometry, Polygon};

/// A representative point guaranteed to lie in the geometry:
/// in the interior for areal geometries, on the linework for lines
/// (preferring non-endpoint vertices), a member point for puntal
/// geometries. `None` for empty input.
///
/// Only components of the geometry's highest dimension contribute.
pub fn interior_point(geometry: &Geometry) -> Option<Coord> {
    if geometry.is_empty() {
        return None;
    }
    match geometry.dimensions() {
        Dimensions::Empty => None,
        Dimensions::TwoDimensional => areal_interior_point(geometry),
        Dimensions::OneDimensional => lineal_interior_point(geometry),
        Dimensions::ZeroDimensional => puntal_interior_point(geometry),
    }
}

fn polygons_of(geometry: &Geometry) -> Vec<&Polygon> {
    match geometry {
        Geometry::Polygon(p) => vec![p],
        Geometry::MultiPolygon(mp) => mp.0.iter().collect(),
        Geometry::GeometryCollection(gc) => {
            gc.0.iter().flat_map(polygons_of).collect()
        }
        _ => vec![],
    }
}

/// Interior point of an areal geometry via the horizontal-bisector
/// technique: cast a scanline at a Y chosen to avoid every vertex, and
/// take the midpoint of the widest intersection interval.
fn areal_interior_point(geometry: &Geometry) -> Option<Coord> {
    let mut best: Option<(f64, Coord)> = None;
    for polygon in polygons_of(geometry) {
        if polygon.is_empty() {
            continue;
        }
        if let Some((width, coord)) = polygon_interior_point(polygon) {
            if best.map_or(true, |(best_width, _)| width > best_width) {
                best = Some((width, coord));
            }
        }
    }
    best.map(|(_, coord)| coord)
}

fn polygon_interior_point(polygon: &Polygon) -> Option<(f64, Coord)> {
    let scan_y = scan_line_y(polygon);

    // X ordinates where the scanline crosses the boundary
    let mut crossings: Vec<f64> = Vec::new();
    for ring in polygon.rings() {
        for line in ring.lines() {
            let (p1, p2) = (line.start, line.end);
            if (p1.y > scan_y && p2.y <= scan_y) || (p2.y > scan_y && p1.y <= scan_y) {
                let frac = (scan_y - p1.y) / (p2.y - p1.y);
                crossings.push(p1.x + frac * (p2.x - p1.x));
            }
        }
    }
    crossings.sort_by(f64::total_cmp);

    // interior intervals are the odd-numbered gaps
    let mut best: Option<(f64, Coord)> = None;
    for pair in crossings.chunks_exact(2) {
        let width = pair[1] - pair[0];
        if best.map_or(true, |(best_width, _)| width > best_width) {
            best = Some((width, Coord::new((pair[0] + pair[1]) / 2., scan_y)));
        }
    }
    best
}

/// A Y ordinate near the envelope centre that passes through no vertex,
/// so every scanline crossing is a proper edge crossing.
fn scan_line_y(polygon: &Polygon) -> f64 {
    let env = polygon.envelope();
    let centre_y = (env.min_y() + env.max_y()) / 2.;
    let mut lo = env.min_y();
    let mut hi = env.max_y();
    for ring in polygon.rings() {
        for coord in ring.coords() {
            if coord.y <= centre_y {
                lo = lo.max(coord.y);
            } else {
                hi = hi.min(coord.y);
            }
        }
    }
    (lo + hi) / 2.
}

fn lineal_interior_point(geometry: &Geometry) -> Option<Coord> {
    let centroid = geometry.centroid()?.coord()?;

    let mut interior_best: Option<(f64, Coord)> = None;
    let mut endpoint_best: Option<(f64, Coord)> = None;
    let mut add = |coord: Coord, is_endpoint: bool| {
        let dist = coord.distance(&centroid);
        let best = if is_endpoint {
            &mut endpoint_best
        } else {
            &mut interior_best
        };
        if best.map_or(true, |(best_dist, _)| dist < best_dist) {
            *best = Some((dist, coord));
        }
    };

    collect_line_vertices(geometry, &mut add);
    interior_best
        .or(endpoint_best)
        .map(|(_, coord)| coord)
}

fn collect_line_vertices(geometry: &Geometry, add: &mut impl FnMut(Coord, bool)) {
    match geometry {
        Geometry::LineString(ls) => {
            let n = ls.num_points();
            for (i, coord) in ls.coords().iter().enumerate() {
                add(*coord, !ls.is_closed() && (i == 0 || i + 1 == n));
            }
        }
        Geometry::LinearRing(ring) => {
            for coord in ring.coords() {
                add(*coord, false);
            }
        }
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                collect_line_vertices(&Geometry::LineString(ls.clone()), add);
            }
        }
        Geometry::GeometryCollection(gc) => {
            for child in &gc.0 {
                if child.dimensions() == Dimensions::OneDimensional {
                    collect_line_vertices(child, add);
                }
            }
        }
        _ => {}
    }
}

fn puntal_interior_point(geometry: &Geometry) -> Option<Coord> {
    let centroid = geometry.centroid()?.coord()?;
    let mut best: Option<(f64, Coord)> = None;
    geometry.apply_coords(&mut |coord| {
        let dist = coord.distance(&centroid);
        if best.map_or(true, |(best_dist, _)| dist < best_dist) {
            best = Some((dist, *coord));
        }
    });
    best.map(|(_, coord)| coord)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::coordinate_position::{CoordPos, CoordinatePosition};
    use planar_types::{line_string, polygon, MultiPoint};

    #[test]
    fn interior_point_is_inside_square() {
        let square: Geometry =
            polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)].into();
        let pt = interior_point(&square).unwrap();
        assert_eq!(square.coordinate_position(&pt), CoordPos::Inside);
    }

    #[test]
    fn interior_point_avoids_hole() {
        let holed: Geometry = polygon!(
            exterior: [(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)],
            interiors: [[(x: 2., y: 2.), (x: 8., y: 2.), (x: 8., y: 8.), (x: 2., y: 8.)]],
        )
        .into();
        let pt = interior_point(&holed).unwrap();
        assert_eq!(holed.coordinate_position(&pt), CoordPos::Inside);
    }

    #[test]
    fn line_interior_point_prefers_interior_vertex() {
        let ls: Geometry = line_string![(x: 0., y: 0.), (x: 5., y: 0.), (x: 10., y: 0.)].into();
        assert_eq!(interior_point(&ls), Some(Coord::new(5., 0.)));
    }

    #[test]
    fn point_set_uses_member() {
        let mp: Geometry = MultiPoint::from(vec![(0., 0.), (10., 0.)]).into();
        let pt = interior_point(&mp).unwrap();
        assert!(pt == Coord::new(0., 0.) || pt == Coord::new(10., 0.));
    }

    #[test]
    fn empty_yields_none() {
        assert_eq!(interior_point(&Geometry::from(Polygon::empty())), None);
    }
}
