use crate::algorithm::orientation::{orient2d, Orientation};
use planar_types::{interpolate_m, interpolate_z, Coord, Line};

/// The intersection of two line segments.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum LineIntersection {
    /// The segments intersect in a single point.
    SinglePoint {
        intersection: Coord,
        /// A *proper* intersection lies strictly in the interior of both
        /// segments.
        ///
        /// Due to the limited precision of floating point arithmetic the
        /// computed intersection point of two properly crossing segments
        /// may land on one of their endpoints; it is still proper.
        is_proper: bool,
    },

    /// Collinear overlapping segments intersect in a line segment.
    Collinear { intersection: Line },
}

impl LineIntersection {
    pub fn is_proper(&self) -> bool {
        match self {
            Self::Collinear { .. } => false,
            Self::SinglePoint { is_proper, .. } => *is_proper,
        }
    }
}

/// Computes the intersection between two line segments, if any.
///
/// Classification reduces to exact orientation tests; a proper intersection
/// point is then computed by the homogeneous-coordinates formula with the
/// inputs *conditioned* — translated to the midpoint of the overlap
/// envelope — to minimize cancellation. Collinear overlaps are resolved by
/// envelope classification of the four endpoints.
///
/// Z and M attributes of the result are interpolated along both input
/// segments, a defined value winning over a missing one and two defined
/// values averaging.
pub fn line_intersection(p: Line, q: Line) -> Option<LineIntersection> {
    if !p.envelope().intersects(&q.envelope()) {
        return None;
    }

    use Orientation::*;
    let p_q1 = orient2d(p.start, p.end, q.start);
    let p_q2 = orient2d(p.start, p.end, q.end);
    if matches!(
        (p_q1, p_q2),
        (Clockwise, Clockwise) | (CounterClockwise, CounterClockwise)
    ) {
        return None;
    }

    let q_p1 = orient2d(q.start, q.end, p.start);
    let q_p2 = orient2d(q.start, q.end, p.end);
    if matches!(
        (q_p1, q_p2),
        (Clockwise, Clockwise) | (CounterClockwise, CounterClockwise)
    ) {
        return None;
    }

    if matches!(
        (p_q1, p_q2, q_p1, q_p2),
        (Collinear, Collinear, Collinear, Collinear)
    ) {
        return collinear_intersection(p, q);
    }

    // At this point there is exactly one intersection point.
    //
    // If it is an endpoint, copy the endpoint rather than computing it:
    // the exact value matters for robustness. It is sufficient to check
    // for an endpoint lying on the other line, since the segments are
    // known to intersect.
    if p_q1 == Collinear || p_q2 == Collinear || q_p1 == Collinear || q_p2 == Collinear {
        // Two equal endpoints are checked explicitly: for nearly-parallel
        // segments the orientation classification of the remaining
        // endpoints can be inconsistent with the shared point.
        let intersection: Coord;
        #[allow(clippy::suspicious_operation_groupings)]
        if p.start == q.start || p.start == q.end {
            intersection = p.start;
        } else if p.end == q.start || p.end == q.end {
            intersection = p.end;
        } else if p_q1 == Collinear {
            intersection = q.start;
        } else if p_q2 == Collinear {
            intersection = q.end;
        } else if q_p1 == Collinear {
            intersection = p.start;
        } else {
            debug_assert_eq!(q_p2, Collinear);
            intersection = p.end;
        }
        Some(LineIntersection::SinglePoint {
            intersection: with_interpolated_zm(intersection, p, q),
            is_proper: false,
        })
    } else {
        let intersection = proper_intersection(p, q);
        Some(LineIntersection::SinglePoint {
            intersection: with_interpolated_zm(intersection, p, q),
            is_proper: true,
        })
    }
}

fn collinear_intersection(p: Line, q: Line) -> Option<LineIntersection> {
    fn collinear(intersection: Line) -> LineIntersection {
        LineIntersection::Collinear { intersection }
    }

    fn improper(intersection: Coord, p: Line, q: Line) -> LineIntersection {
        LineIntersection::SinglePoint {
            intersection: with_interpolated_zm(intersection, p, q),
            is_proper: false,
        }
    }

    let p_env = p.envelope();
    let q_env = q.envelope();
    Some(
        match (
            p_env.intersects_coord(q.start),
            p_env.intersects_coord(q.end),
            q_env.intersects_coord(p.start),
            q_env.intersects_coord(p.end),
        ) {
            (true, true, _, _) => collinear(q),
            (_, _, true, true) => collinear(p),
            (true, false, true, false) if q.start == p.start => improper(q.start, p, q),
            (true, _, true, _) => collinear(Line::new(q.start, p.start)),
            (true, false, false, true) if q.start == p.end => improper(q.start, p, q),
            (true, _, _, true) => collinear(Line::new(q.start, p.end)),
            (false, true, true, false) if q.end == p.start => improper(q.end, p, q),
            (_, true, true, _) => collinear(Line::new(q.end, p.start)),
            (false, true, false, true) if q.end == p.end => improper(q.end, p, q),
            (_, true, _, true) => collinear(Line::new(q.end, p.end)),
            _ => return None,
        },
    )
}

/// Interpolate Z and M onto an intersection point from both segments.
///
/// When both segments carry a value the results are averaged; a single
/// defined value wins over a missing one.
fn with_interpolated_zm(mut intersection: Coord, p: Line, q: Line) -> Coord {
    intersection.z = combine(
        interpolate_z(intersection, p.start, p.end),
        interpolate_z(intersection, q.start, q.end),
    );
    intersection.m = combine(
        interpolate_m(intersection, p.start, p.end),
        interpolate_m(intersection, q.start, q.end),
    );
    intersection
}

fn combine(a: f64, b: f64) -> f64 {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => f64::NAN,
        (false, true) => a,
        (true, false) => b,
        (false, false) => (a + b) / 2.,
    }
}

/// Distance of a point from the segment `line`, for nearest-endpoint
/// selection.
fn point_line_distance(point: Coord, line: Line) -> f64 {
    let d_squared = line.dx() * line.dx() + line.dy() * line.dy();
    if d_squared == 0. {
        return point.distance(&line.start);
    }
    let r = ((point.x - line.start.x) * line.dx() + (point.y - line.start.y) * line.dy()) / d_squared;
    if r <= 0. {
        return point.distance(&line.start);
    }
    if r >= 1. {
        return point.distance(&line.end);
    }
    let projected = Coord::new(line.start.x + r * line.dx(), line.start.y + r * line.dy());
    point.distance(&projected)
}

/// The endpoint of `p` or `q` closest to the other segment — a reasonable
/// surrogate for the intersection point in ill-conditioned cases where the
/// raw computation fails or escapes both envelopes.
fn nearest_endpoint(p: Line, q: Line) -> Coord {
    let mut nearest_pt = p.start;
    let mut min_dist = point_line_distance(p.start, q);

    let dist = point_line_distance(p.end, q);
    if dist < min_dist {
        min_dist = dist;
        nearest_pt = p.end;
    }
    let dist = point_line_distance(q.start, p);
    if dist < min_dist {
        min_dist = dist;
        nearest_pt = q.start;
    }
    let dist = point_line_distance(q.end, p);
    if dist < min_dist {
        nearest_pt = q.end;
    }
    nearest_pt
}

fn raw_line_intersection(p: Line, q: Line) -> Option<Coord> {
    let overlap = p.envelope().intersection(&q.envelope());

    // condition ordinate values by subtracting the overlap midpoint
    let mid = overlap.centre().unwrap_or_else(|| p.midpoint());

    let p1x = p.start.x - mid.x;
    let p1y = p.start.y - mid.y;
    let p2x = p.end.x - mid.x;
    let p2y = p.end.y - mid.y;
    let q1x = q.start.x - mid.x;
    let q1y = q.start.y - mid.y;
    let q2x = q.end.x - mid.x;
    let q2y = q.end.y - mid.y;

    // unrolled homogeneous-coordinates line equation
    let px = p1y - p2y;
    let py = p2x - p1x;
    let pw = p1x * p2y - p2x * p1y;

    let qx = q1y - q2y;
    let qy = q2x - q1x;
    let qw = q1x * q2y - q2x * q1y;

    let xw = py * qw - qy * pw;
    let yw = qx * pw - px * qw;
    let w = px * qy - qx * py;

    let x_int = xw / w;
    let y_int = yw / w;

    if !x_int.is_finite() || !y_int.is_finite() {
        // approximately parallel
        None
    } else {
        // de-condition the intersection point
        Some(Coord::new(x_int + mid.x, y_int + mid.y))
    }
}

fn proper_intersection(p: Line, q: Line) -> Coord {
    let mut int_pt = raw_line_intersection(p, q).unwrap_or_else(|| nearest_endpoint(p, q));

    // round-off can push the computed point outside the segment envelopes;
    // fall back to the nearest endpoint, which is always in both
    if !(p.envelope().intersects_coord(int_pt) && q.envelope().intersects_coord(int_pt)) {
        int_pt = nearest_endpoint(p, q);
    }
    int_pt
}

/// The "edge distance" of an intersection point along a segment: the
/// absolute ordinate delta along the segment's dominant axis.
///
/// It is not the Euclidean metric, but it is robust and monotone along the
/// segment, which is all the intersection lists need for sorting.
pub(crate) fn edge_distance(intersection: Coord, line: Line) -> f64 {
    let dx = line.dx().abs();
    let dy = line.dy().abs();

    let mut dist: f64;
    if intersection == line.start {
        dist = 0.;
    } else if intersection == line.end {
        dist = if dx > dy { dx } else { dy };
    } else {
        let intersection_dx = (intersection.x - line.start.x).abs();
        let intersection_dy = (intersection.y - line.start.y).abs();
        dist = if dx > dy {
            intersection_dx
        } else {
            intersection_dy
        };
        // ensure non-endpoints always have a non-zero distance
        if dist == 0. && intersection != line.start {
            dist = intersection_dx.max(intersection_dy);
        }
    }
    debug_assert!(
        !(dist == 0. && intersection != line.start),
        "bad edge distance calculation"
    );
    dist
}

#[cfg(test)]
mod test {
    use super::*;
    use planar_types::coord;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
        Line::new(coord! { x: x1, y: y1 }, coord! { x: x2, y: y2 })
    }

    #[test]
    fn proper_crossing() {
        let result = line_intersection(line(0., 0., 10., 10.), line(10., 0., 0., 10.));
        assert_eq!(
            result,
            Some(LineIntersection::SinglePoint {
                intersection: coord! { x: 5., y: 5. },
                is_proper: true,
            })
        );
    }

    #[test]
    fn disjoint_parallel() {
        assert_eq!(
            line_intersection(line(0., 0., 5., 5.), line(0., 1., 5., 6.)),
            None
        );
    }

    #[test]
    fn endpoint_touch_is_improper() {
        let result = line_intersection(line(0., 0., 5., 5.), line(5., 5., 5., 0.));
        assert_eq!(
            result,
            Some(LineIntersection::SinglePoint {
                intersection: coord! { x: 5., y: 5. },
                is_proper: false,
            })
        );
    }

    #[test]
    fn collinear_overlap() {
        let result = line_intersection(line(0., 0., 10., 0.), line(5., 0., 15., 0.));
        match result {
            Some(LineIntersection::Collinear { intersection }) => {
                let mut xs = [intersection.start.x, intersection.end.x];
                xs.sort_by(f64::total_cmp);
                assert_eq!(xs, [5., 10.]);
                assert_eq!(intersection.start.y, 0.);
                assert_eq!(intersection.end.y, 0.);
            }
            other => panic!("expected collinear overlap, got {:?}", other),
        }
    }

    #[test]
    fn t_junction_is_improper() {
        let result = line_intersection(line(0., 0., 10., 0.), line(5., 0., 5., 5.));
        assert_eq!(
            result,
            Some(LineIntersection::SinglePoint {
                intersection: coord! { x: 5., y: 0. },
                is_proper: false,
            })
        );
    }

    #[test]
    fn z_is_interpolated_from_both_segments() {
        let p = Line::new(coord! { x: 0., y: 0., z: 0. }, coord! { x: 10., y: 10., z: 10. });
        let q = Line::new(coord! { x: 10., y: 0., z: 3. }, coord! { x: 0., y: 10., z: 3. });
        match line_intersection(p, q) {
            Some(LineIntersection::SinglePoint { intersection, .. }) => {
                // mean of interpolated 5.0 (on p) and 3.0 (on q)
                assert_eq!(intersection.z, 4.);
            }
            other => panic!("expected point, got {:?}", other),
        }

        // only one segment carries Z: its value wins
        let q_no_z = line(10., 0., 0., 10.);
        match line_intersection(p, q_no_z) {
            Some(LineIntersection::SinglePoint { intersection, .. }) => {
                assert_eq!(intersection.z, 5.);
            }
            other => panic!("expected point, got {:?}", other),
        }
    }

    #[test]
    fn consistent_with_orientation_predicate() {
        // if an endpoint is collinear with a segment, the intersection
        // must not be reported proper
        let p = line(0., 0., 10., 0.);
        let q = line(10., 0., 20., 5.);
        match line_intersection(p, q) {
            Some(intersection) => assert!(!intersection.is_proper()),
            None => panic!("expected intersection"),
        }
    }
}
