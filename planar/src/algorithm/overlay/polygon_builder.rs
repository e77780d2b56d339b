use super::graph::{sym, OverlayGraph};
use crate::algorithm::area::ring_area_signed;
use crate::algorithm::coordinate_position::{coord_pos_relative_to_ring, CoordPos};
use crate::interrupt::check_interrupt;
use planar_types::{Coord, CoordSeq, Envelope, GeometryError, LinearRing, Polygon, Result};

/// Assembles the areal part of an overlay result.
///
/// Result rings are traced along half-edges whose left face is in the
/// result: at each node the traversal turns to the clockwise-most
/// continuing result edge, which keeps the result interior on the left
/// and yields CCW shells and CW holes. Holes are matched to shells by
/// containment.
pub(crate) fn build_polygons(
    graph: &OverlayGraph,
    in_result: &impl Fn(usize) -> bool,
    drop_orphan_holes: bool,
) -> Result<Vec<Polygon>> {
    let mut shells: Vec<ResultRing> = Vec::new();
    let mut holes: Vec<ResultRing> = Vec::new();

    let mut visited = vec![false; graph.num_half_edges()];
    for start in 0..graph.num_half_edges() {
        if visited[start] || !in_result(start) {
            continue;
        }
        let ring = trace_ring(graph, start, in_result, &mut visited)?;
        let area = ring_area_signed(&ring.seq);
        if area == 0. {
            // a zero-width sliver; drop it
            continue;
        }
        if area > 0. {
            shells.push(ring);
        } else {
            holes.push(ring);
        }
    }

    assign_holes_to_shells(shells, holes, drop_orphan_holes)
}

struct ResultRing {
    seq: CoordSeq,
    envelope: Envelope,
}

fn trace_ring(
    graph: &OverlayGraph,
    start: usize,
    in_result: &impl Fn(usize) -> bool,
    visited: &mut [bool],
) -> Result<ResultRing> {
    let mut coords: Vec<Coord> = Vec::new();
    let mut current = start;

    loop {
        check_interrupt()?;
        if visited[current] {
            return Err(GeometryError::topology_at(
                "result ring revisits an edge",
                graph.origin(current),
            ));
        }
        visited[current] = true;

        let piece = graph.oriented_coords(current);
        if coords.is_empty() {
            coords.extend(piece);
        } else {
            coords.extend(piece.into_iter().skip(1));
        }

        let next = next_result_edge(graph, current, in_result)?;
        if next == start {
            break;
        }
        current = next;
    }

    let mut seq = CoordSeq::from_coords(planar_types::CoordShape::XY, coords);
    seq.close_ring();
    let envelope = Envelope::of_coords(seq.iter());
    Ok(ResultRing { seq, envelope })
}

/// The continuation of a result ring past the head of `current`: scan the
/// destination star clockwise from the reversed edge, and take the first
/// result edge. The clockwise-most turn keeps the result interior on the
/// left.
fn next_result_edge(
    graph: &OverlayGraph,
    current: usize,
    in_result: &impl Fn(usize) -> bool,
) -> Result<usize> {
    let node = graph.dest(current);
    let star = graph.star(node);
    let sym_position = star
        .iter()
        .position(|&half_edge| half_edge == sym(current))
        .ok_or_else(|| GeometryError::topology_at("malformed node star", node))?;

    for step in 1..star.len() {
        let index = (sym_position + star.len() - step) % star.len();
        let candidate = star[index];
        if in_result(candidate) {
            return Ok(candidate);
        }
    }
    // a dead end: the walk may turn back through the twin only when the
    // twin itself bounds the face (spike edges in polygonized input)
    if in_result(sym(current)) {
        return Ok(sym(current));
    }
    Err(GeometryError::topology_at("unclosed result ring", node))
}

fn assign_holes_to_shells(
    shells: Vec<ResultRing>,
    holes: Vec<ResultRing>,
    drop_orphan_holes: bool,
) -> Result<Vec<Polygon>> {
    let mut shell_holes: Vec<Vec<LinearRing>> = (0..shells.len()).map(|_| Vec::new()).collect();

    for hole in holes {
        // the smallest shell that contains the hole is its parent
        let hole_area = ring_area_signed(&hole.seq).abs();
        let mut parent: Option<(usize, f64)> = None;
        for (shell_index, shell) in shells.iter().enumerate() {
            if !shell.envelope.covers(&hole.envelope) {
                continue;
            }
            let shell_area = ring_area_signed(&shell.seq).abs();
            match ring_containment(&shell.seq, &hole.seq) {
                RingContainment::Inside => {}
                // a hole touching the candidate only at nodes must be
                // strictly smaller; its own orientation twin is not a
                // parent
                RingContainment::Touching if hole_area < shell_area => {}
                _ => continue,
            }
            if parent.map_or(true, |(_, parent_area)| shell_area < parent_area) {
                parent = Some((shell_index, shell_area));
            }
        }
        match parent {
            Some((shell_index, _)) => {
                shell_holes[shell_index].push(LinearRing::new(hole.seq));
            }
            // an uncontained CW ring bounds the unbounded face; the
            // polygonizing callers expect and discard it
            None if drop_orphan_holes => {}
            None => {
                return Err(GeometryError::topology(
                    "unable to assign result hole to a shell",
                ));
            }
        }
    }

    Ok(shells
        .into_iter()
        .zip(shell_holes)
        .map(|(shell, holes)| Polygon::new(LinearRing::new(shell.seq), holes))
        .collect())
}

enum RingContainment {
    /// Some vertex of the candidate lies strictly inside the ring.
    Inside,
    /// Every vertex lies on the ring itself.
    Touching,
    Outside,
}

/// Containment test for properly-nested result rings.
fn ring_containment(shell: &CoordSeq, hole: &CoordSeq) -> RingContainment {
    let mut saw_boundary = false;
    for coord in hole.iter() {
        match coord_pos_relative_to_ring(*coord, shell) {
            CoordPos::Inside => return RingContainment::Inside,
            CoordPos::Outside => return RingContainment::Outside,
            CoordPos::OnBoundary => saw_boundary = true,
        }
    }
    if saw_boundary {
        RingContainment::Touching
    } else {
        RingContainment::Outside
    }
}
