use crate::algorithm::coordinate_position::{CoordPos, CoordinatePosition};

use crate::algorithm::line_intersection::line_intersection;
use planar_types::{Coord, Dimensions, Envelope, Geometry, Line, Polygon};

/// The envelope of a polygon that is exactly an axis-aligned rectangle:
/// one ring of four corner vertices matching its own envelope, no holes.
///
/// Rectangle operands admit predicate fast paths that avoid building a
/// topology graph altogether.
pub(crate) fn as_rectangle(polygon: &Polygon) -> Option<Envelope> {
    if !polygon.interiors().is_empty() {
        return None;
    }
    let ring = polygon.exterior();
    if ring.num_points() != 5 {
        return None;
    }
    let envelope = ring.envelope();
    if envelope.is_null() || envelope.width() == 0. || envelope.height() == 0. {
        return None;
    }
    for coord in ring.coords() {
        let x_on_edge = coord.x == envelope.min_x() || coord.x == envelope.max_x();
        let y_on_edge = coord.y == envelope.min_y() || coord.y == envelope.max_y();
        if !(x_on_edge && y_on_edge) {
            return None;
        }
    }
    Some(envelope)
}

fn rectangle_sides(rect: &Envelope) -> [Line; 4] {
    let ll = Coord::new(rect.min_x(), rect.min_y());
    let lr = Coord::new(rect.max_x(), rect.min_y());
    let ur = Coord::new(rect.max_x(), rect.max_y());
    let ul = Coord::new(rect.min_x(), rect.max_y());
    [
        Line::new(ll, lr),
        Line::new(lr, ur),
        Line::new(ur, ul),
        Line::new(ul, ll),
    ]
}

fn collect_segments(geometry: &Geometry, segments: &mut Vec<Line>) {
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => {}
        Geometry::LineString(ls) => segments.extend(ls.lines()),
        Geometry::LinearRing(ring) => segments.extend(ring.lines()),
        Geometry::Polygon(polygon) => {
            for ring in polygon.rings() {
                segments.extend(ring.lines());
            }
        }
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                segments.extend(ls.lines());
            }
        }
        Geometry::MultiPolygon(mp) => {
            for polygon in &mp.0 {
                for ring in polygon.rings() {
                    segments.extend(ring.lines());
                }
            }
        }
        Geometry::GeometryCollection(gc) => {
            for child in &gc.0 {
                collect_segments(child, segments);
            }
        }
    }
}

/// Whether a rectangle intersects a geometry, decomposed into
/// point-in-rectangle and segment-crosses-side tests.
pub(crate) fn rectangle_intersects(rect: &Envelope, other: &Geometry) -> bool {
    if !rect.intersects(&other.envelope()) {
        return false;
    }

    // any vertex of the other geometry in the (closed) rectangle
    let mut any_vertex_inside = false;
    other.apply_coords(&mut |coord| {
        if rect.intersects_coord(*coord) {
            any_vertex_inside = true;
        }
    });
    if any_vertex_inside {
        return true;
    }

    // the rectangle wholly inside an areal operand
    if other.dimensions() == Dimensions::TwoDimensional {
        let corner = Coord::new(rect.min_x(), rect.min_y());
        if other.coordinate_position(&corner) != CoordPos::Outside {
            return true;
        }
    }

    // a segment passing through the rectangle with no vertex inside must
    // cross one of its sides
    let sides = rectangle_sides(rect);
    let mut segments = Vec::new();
    collect_segments(other, &mut segments);
    for segment in segments {
        if !rect.intersects(&segment.envelope()) {
            continue;
        }
        for side in &sides {
            if line_intersection(segment, *side).is_some() {
                return true;
            }
        }
    }

    false
}

/// Whether a rectangle contains a geometry: the geometry lies in the
/// closed rectangle, and not entirely on its boundary.
pub(crate) fn rectangle_contains(rect: &Envelope, other: &Geometry) -> bool {
    if other.is_empty() || !rect.covers(&other.envelope()) {
        return false;
    }
    // a non-degenerate areal geometry always has interior off the
    // rectangle's boundary
    if other.dimensions() == Dimensions::TwoDimensional {
        return true;
    }

    let on_boundary_line = |coord: &Coord| {
        coord.x == rect.min_x()
            || coord.x == rect.max_x()
            || coord.y == rect.min_y()
            || coord.y == rect.max_y()
    };
    let segment_on_boundary = |segment: &Line| {
        (segment.start.x == segment.end.x
            && (segment.start.x == rect.min_x() || segment.start.x == rect.max_x()))
            || (segment.start.y == segment.end.y
                && (segment.start.y == rect.min_y() || segment.start.y == rect.max_y()))
    };

    let mut has_interior_point = false;
    other.apply_coords(&mut |coord| {
        if !on_boundary_line(coord) {
            has_interior_point = true;
        }
    });
    if has_interior_point {
        return true;
    }

    // all vertices on the boundary: a chord segment still dips inside
    let mut segments = Vec::new();
    collect_segments(other, &mut segments);
    if segments.is_empty() {
        // a point geometry wholly on the boundary is not contained
        return false;
    }
    segments.iter().any(|segment| !segment_on_boundary(segment))
}
