use super::graph::{sym, OverlayGraph};
use super::OverlayOp;
use crate::algorithm::coordinate_position::CoordPos;
use planar_types::{CoordSeq, LineString, Point};

/// Whether points in the two given locations belong to the result of the
/// operation. Boundary points count as interior: overlay operates on
/// closed point-sets.
pub(crate) fn is_location_in_result(op: OverlayOp, loc_a: CoordPos, loc_b: CoordPos) -> bool {
    let in_a = loc_a != CoordPos::Outside;
    let in_b = loc_b != CoordPos::Outside;
    match op {
        OverlayOp::Intersection => in_a && in_b,
        OverlayOp::Union => in_a || in_b,
        OverlayOp::Difference => in_a && !in_b,
        OverlayOp::SymDifference => in_a != in_b,
    }
}

/// Collects the 1-dimensional part of the result: edges that belong to
/// the result point-set but are neither result-area boundary nor covered
/// by the result area.
pub(crate) fn build_lines(
    graph: &OverlayGraph,
    op: OverlayOp,
    in_result_area: &impl Fn(usize) -> bool,
    region_in_result: &impl Fn(usize) -> bool,
) -> Vec<LineString> {
    let mut lines = Vec::new();
    for edge_index in 0..graph.edges.len() {
        let forward = edge_index * 2;

        // result-area boundary belongs to the polygons
        if in_result_area(forward) || in_result_area(sym(forward)) {
            continue;
        }
        // an edge with the result area on both sides is absorbed by it
        if region_in_result(forward) && region_in_result(sym(forward)) {
            continue;
        }

        let loc_a = graph.on_location(forward, 0);
        let loc_b = graph.on_location(forward, 1);
        if !is_location_in_result(op, loc_a, loc_b) {
            continue;
        }

        // only edges carrying some input's linework are 1-dimensional
        let label = &graph.edges[edge_index].label;
        let carries_line_work = label.is_linework(0)
            || label.is_linework(1)
            || label.is_area_boundary(0)
            || label.is_area_boundary(1);
        if !carries_line_work {
            continue;
        }

        lines.push(LineString::new(CoordSeq::from_coords(
            planar_types::CoordShape::XY,
            graph.edges[edge_index].coords.clone(),
        )));
    }
    lines
}

/// Collects the 0-dimensional part of the result: nodes in the result
/// point-set with no incident result edge of any dimension.
///
/// Only intersection produces such points from line-and-area inputs;
/// point inputs take a separate path before the graph is ever built.
pub(crate) fn build_points(
    graph: &OverlayGraph,
    op: OverlayOp,
    in_result_area: &impl Fn(usize) -> bool,
    region_in_result: &impl Fn(usize) -> bool,
    result_lines: &[LineString],
) -> Vec<Point> {
    if op != OverlayOp::Intersection {
        return Vec::new();
    }

    // coordinates already consumed by the lineal result
    let line_endpoints: std::collections::BTreeSet<crate::utils::CoordKey> = result_lines
        .iter()
        .flat_map(|line| line.coords().iter().map(|c| crate::utils::CoordKey(*c)))
        .collect();

    let mut points = Vec::new();
    for (coord, star) in graph.stars() {
        let covered = star.iter().any(|&half_edge| {
            in_result_area(half_edge)
                || in_result_area(sym(half_edge))
                || region_in_result(half_edge)
        });
        if covered || line_endpoints.contains(&crate::utils::CoordKey(coord)) {
            continue;
        }

        let touches = |geom_index: usize| {
            star.iter().any(|&half_edge| {
                graph.on_location(half_edge, geom_index) != CoordPos::Outside
            })
        };
        if touches(0) && touches(1) {
            points.push(Point(Some(coord)));
        }
    }
    points
}
