use crate::algorithm::line_intersection::{line_intersection, LineIntersection};
use crate::index::chain::build_chains;
use crate::index::StrTree;
use crate::utils::CoordKey;
use planar_types::{Coord, Geometry, Line, LineString};

use std::collections::BTreeSet;

/// Whether the geometry is simple: it has no anomalous self-intersection
/// points.
///
/// - points: no repeated members;
/// - lines: self-intersections only at shared endpoints (a closed line's
///   single endpoint included); between members of a multi-line,
///   intersections only at endpoints of both;
/// - areas: the rings are simple closed curves.
pub fn is_simple(geometry: &Geometry) -> bool {
    match geometry {
        Geometry::Point(_) => true,
        Geometry::MultiPoint(mp) => {
            let mut seen: BTreeSet<CoordKey> = BTreeSet::new();
            mp.0.iter()
                .filter_map(|p| p.coord())
                .all(|coord| seen.insert(CoordKey(coord)))
        }
        Geometry::LineString(ls) => lines_are_simple(std::slice::from_ref(ls)),
        Geometry::LinearRing(ring) => {
            lines_are_simple(std::slice::from_ref(ring.as_line_string()))
        }
        Geometry::MultiLineString(mls) => lines_are_simple(&mls.0),
        Geometry::Polygon(polygon) => {
            let rings: Vec<LineString> = polygon
                .rings()
                .map(|ring| ring.as_line_string().clone())
                .collect();
            rings.iter().all(|ring| lines_are_simple(std::slice::from_ref(ring)))
        }
        Geometry::MultiPolygon(mp) => mp.0.iter().all(|polygon| {
            polygon
                .rings()
                .all(|ring| lines_are_simple(std::slice::from_ref(ring.as_line_string())))
        }),
        Geometry::GeometryCollection(gc) => gc.0.iter().all(is_simple),
    }
}

/// The line arrangement is simple iff every intersection between two
/// segments is an endpoint of both owning lines (not merely of the
/// segments), except the vertex shared by adjacent segments of one line.
fn lines_are_simple(lines: &[LineString]) -> bool {
    let coord_lists: Vec<&[Coord]> = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| line.coords())
        .collect();

    let mut chains = Vec::new();
    for (list_index, coords) in coord_lists.iter().enumerate() {
        chains.extend(build_chains(coords, list_index));
    }
    let mut tree = StrTree::new();
    for (chain_index, chain) in chains.iter().enumerate() {
        if tree.insert(*chain.envelope(), chain_index).is_err() {
            return false;
        }
    }

    let endpoint_of_line = |list_index: usize, coord: Coord| {
        let coords = coord_lists[list_index];
        // a closed line has no boundary, so nothing counts as an endpoint
        if coords.first() == coords.last() {
            return false;
        }
        Some(&coord) == coords.first() || Some(&coord) == coords.last()
    };

    for (chain_index, chain) in chains.iter().enumerate() {
        for &other_index in tree.query_items(chain.envelope()) {
            if other_index <= chain_index {
                continue;
            }
            let other = &chains[other_index];
            let coords_a = coord_lists[chain.parent];
            let coords_b = coord_lists[other.parent];
            let mut simple = true;
            chain.compute_overlaps(coords_a, other, coords_b, &mut |i, j| {
                if !simple {
                    return;
                }
                let same_line = chain.parent == other.parent;
                if same_line && i == j {
                    return;
                }
                let line_a = Line::new(coords_a[i], coords_a[i + 1]);
                let line_b = Line::new(coords_b[j], coords_b[j + 1]);
                match line_intersection(line_a, line_b) {
                    None => {}
                    Some(LineIntersection::Collinear { .. }) => simple = false,
                    Some(LineIntersection::SinglePoint { intersection, is_proper }) => {
                        if is_proper {
                            simple = false;
                        } else if same_line {
                            let adjacent = i.abs_diff(j) == 1
                                || (coords_a.first() == coords_a.last()
                                    && i.min(j) == 0
                                    && i.max(j) == coords_a.len() - 2);
                            if !adjacent {
                                simple = false;
                            }
                        } else {
                            // between two lines the touch must be at an
                            // endpoint of both
                            if !(endpoint_of_line(chain.parent, intersection)
                                && endpoint_of_line(other.parent, intersection))
                            {
                                simple = false;
                            }
                        }
                    }
                }
            });
            if !simple {
                return false;
            }
        }
    }
    true
}
