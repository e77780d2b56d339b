use super::SegmentString;
use crate::algorithm::line_intersection::{line_intersection, LineIntersection};
use crate::index::chain::{build_chains, MonotoneChain};
use crate::index::StrTree;
use crate::interrupt::check_interrupt;
use planar_types::{Coord, GeometryError, Line, Result};

/// Checks that a set of segment strings is fully noded: every
/// intersection between two segments is an endpoint of both.
///
/// Interior crossings, T-junctions and partial collinear overlaps all
/// fail with a [`GeometryError::Topology`] carrying the offending
/// coordinate — the signal the overlay driver uses to escalate to snap
/// rounding.
///
/// Coincident duplicate segments are *valid* noding output (they arise
/// whenever two inputs share linework, and are merged downstream), and
/// pass: their overlap ends at endpoints of both.
pub fn validate_noding<D>(strings: &[SegmentString<D>]) -> Result<()> {
    let mut chains: Vec<MonotoneChain> = Vec::new();
    for (index, string) in strings.iter().enumerate() {
        chains.extend(build_chains(string.coords(), index));
    }

    let mut tree = StrTree::new();
    for (chain_index, chain) in chains.iter().enumerate() {
        tree.insert(*chain.envelope(), chain_index)?;
    }

    let mut failure: Option<Coord> = None;
    for (chain_index, chain) in chains.iter().enumerate() {
        check_interrupt()?;
        if failure.is_some() {
            break;
        }
        for &other_index in tree.query_items(chain.envelope()) {
            if other_index <= chain_index || failure.is_some() {
                continue;
            }
            let other = &chains[other_index];
            let coords_0 = strings[chain.parent].coords();
            let coords_1 = strings[other.parent].coords();
            chain.compute_overlaps(coords_0, other, coords_1, &mut |segment_0, segment_1| {
                if failure.is_some() {
                    return;
                }
                if chain.parent == other.parent && segment_0 == segment_1 {
                    return;
                }
                let line_0 = Line::new(coords_0[segment_0], coords_0[segment_0 + 1]);
                let line_1 = Line::new(coords_1[segment_1], coords_1[segment_1 + 1]);
                if let Some(bad) = first_interior_intersection(line_0, line_1) {
                    failure = Some(bad);
                }
            });
        }
    }

    match failure {
        Some(coord) => Err(GeometryError::topology_at(
            "found non-noded intersection",
            coord,
        )),
        None => Ok(()),
    }
}

/// An intersection point that is not an endpoint of both segments, if any.
fn first_interior_intersection(line_0: Line, line_1: Line) -> Option<Coord> {
    let is_endpoint = |coord: Coord, line: Line| coord == line.start || coord == line.end;
    let points: Vec<Coord> = match line_intersection(line_0, line_1)? {
        LineIntersection::SinglePoint { intersection, .. } => vec![intersection],
        LineIntersection::Collinear { intersection } => {
            vec![intersection.start, intersection.end]
        }
    };
    points
        .into_iter()
        .find(|&point| !(is_endpoint(point, line_0) && is_endpoint(point, line_1)))
}

#[cfg(test)]
mod test {
    use super::*;

    fn string(points: &[(f64, f64)]) -> SegmentString<()> {
        SegmentString::new(points.iter().map(|&(x, y)| Coord::new(x, y)).collect(), ())
    }

    #[test]
    fn noded_input_passes() {
        let strings = vec![
            string(&[(0., 0.), (5., 5.)]),
            string(&[(5., 5.), (10., 10.)]),
            string(&[(10., 0.), (5., 5.)]),
            string(&[(5., 5.), (0., 10.)]),
        ];
        assert!(validate_noding(&strings).is_ok());
    }

    #[test]
    fn interior_crossing_fails() {
        let strings = vec![
            string(&[(0., 0.), (10., 10.)]),
            string(&[(10., 0.), (0., 10.)]),
        ];
        let err = validate_noding(&strings).unwrap_err();
        assert!(err.is_topology());
    }

    #[test]
    fn t_junction_fails() {
        let strings = vec![
            string(&[(0., 0.), (10., 0.)]),
            string(&[(5., 0.), (5., 5.)]),
        ];
        assert!(validate_noding(&strings).is_err());
    }

    #[test]
    fn coincident_duplicates_pass() {
        let strings = vec![
            string(&[(0., 0.), (10., 0.)]),
            string(&[(0., 0.), (10., 0.)]),
            string(&[(10., 0.), (0., 0.)]),
        ];
        assert!(validate_noding(&strings).is_ok());
    }

    #[test]
    fn partial_collinear_overlap_fails() {
        let strings = vec![
            string(&[(0., 0.), (10., 0.)]),
            string(&[(5., 0.), (15., 0.)]),
        ];
        assert!(validate_noding(&strings).is_err());
    }
}
