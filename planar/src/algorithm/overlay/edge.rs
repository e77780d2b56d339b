use super::overlay_label::{InputTopo, OverlayLabel};
use super::ring_clipper::RingClipper;
use super::line_limiter::LineLimiter;
use crate::algorithm::coordinate_position::CoordPos;
use crate::algorithm::orientation::{winding, Orientation};
use crate::noding::SegmentString;
use crate::utils::CoordKey;
use planar_types::{Coord, Envelope, Geometry, LineString, LinearRing, Polygon};

use std::collections::BTreeMap;

/// Provenance of an extracted edge: which input it came from and what
/// topology it contributes there.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EdgeSourceInfo {
    pub label: OverlayLabel,
}

/// A noded, merged, canonically-oriented overlay edge.
#[derive(Clone, Debug)]
pub(crate) struct MergedEdge {
    pub coords: Vec<Coord>,
    pub label: OverlayLabel,
}

/// Extract labelled segment strings from one overlay input.
///
/// Rings contribute area-boundary edges whose interior side is derived
/// from the ring's winding and shell/hole role; line strings contribute
/// 1-D linework. When a `clip_envelope` is given, rings are clipped and
/// lines limited to it — parts wholly outside cannot affect the result.
pub(crate) fn extract_edges(
    geometry: &Geometry,
    geom_index: usize,
    clip_envelope: Option<&Envelope>,
    strings: &mut Vec<SegmentString<EdgeSourceInfo>>,
) {
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => {}
        Geometry::LineString(ls) => extract_line(ls, geom_index, clip_envelope, strings),
        Geometry::LinearRing(ring) => {
            extract_line(ring.as_line_string(), geom_index, clip_envelope, strings)
        }
        Geometry::Polygon(polygon) => extract_polygon(polygon, geom_index, clip_envelope, strings),
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                extract_line(ls, geom_index, clip_envelope, strings);
            }
        }
        Geometry::MultiPolygon(mp) => {
            for polygon in &mp.0 {
                extract_polygon(polygon, geom_index, clip_envelope, strings);
            }
        }
        Geometry::GeometryCollection(gc) => {
            for child in &gc.0 {
                extract_edges(child, geom_index, clip_envelope, strings);
            }
        }
    }
}

fn extract_polygon(
    polygon: &Polygon,
    geom_index: usize,
    clip_envelope: Option<&Envelope>,
    strings: &mut Vec<SegmentString<EdgeSourceInfo>>,
) {
    if polygon.is_empty() {
        return;
    }
    extract_ring(polygon.exterior(), false, geom_index, clip_envelope, strings);
    for hole in polygon.interiors() {
        extract_ring(hole, true, geom_index, clip_envelope, strings);
    }
}

fn extract_ring(
    ring: &LinearRing,
    is_hole: bool,
    geom_index: usize,
    clip_envelope: Option<&Envelope>,
    strings: &mut Vec<SegmentString<EdgeSourceInfo>>,
) {
    let mut coords: Vec<Coord> = ring.coords().to_vec();
    coords.dedup();
    if coords.len() < 4 {
        return;
    }

    if let Some(clip_env) = clip_envelope {
        if !clip_env.covers(&ring.envelope()) {
            coords = RingClipper::new(*clip_env).clip(&coords);
            if coords.len() < 4 {
                return;
            }
        }
    }

    // the polygon interior lies left of a CCW shell and left of a CW hole
    let interior_on_left = match winding(&coords) {
        Some(Orientation::CounterClockwise) => !is_hole,
        Some(Orientation::Clockwise) => is_hole,
        Some(Orientation::Collinear) | None => {
            // degenerate ring: contributes no area
            return;
        }
    };
    let (left, right) = if interior_on_left {
        (CoordPos::Inside, CoordPos::Outside)
    } else {
        (CoordPos::Outside, CoordPos::Inside)
    };

    let label = OverlayLabel::for_input(geom_index, InputTopo::Area { left, right });
    strings.push(SegmentString::new(coords, EdgeSourceInfo { label }));
}

fn extract_line(
    line_string: &LineString,
    geom_index: usize,
    clip_envelope: Option<&Envelope>,
    strings: &mut Vec<SegmentString<EdgeSourceInfo>>,
) {
    let mut coords: Vec<Coord> = line_string.coords().to_vec();
    coords.dedup();
    if coords.len() < 2 {
        return;
    }

    let label = OverlayLabel::for_input(geom_index, InputTopo::Line);

    if let Some(clip_env) = clip_envelope {
        if !clip_env.covers(&line_string.envelope()) {
            for section in LineLimiter::new(*clip_env).limit(&coords) {
                if section.len() >= 2 {
                    strings.push(SegmentString::new(section, EdgeSourceInfo { label }));
                }
            }
            return;
        }
    }

    strings.push(SegmentString::new(coords, EdgeSourceInfo { label }));
}

/// Canonical orientation: an edge and its reverse must merge, so every
/// noded string is normalized to the lexicographically smaller of its two
/// directions before keying.
fn canonicalize(coords: &mut Vec<Coord>, label: &OverlayLabel) -> OverlayLabel {
    let reversed_is_smaller = coords
        .iter()
        .rev()
        .map(|c| CoordKey(*c))
        .lt(coords.iter().map(|c| CoordKey(*c)));
    if reversed_is_smaller {
        coords.reverse();
        label.flipped()
    } else {
        *label
    }
}

/// Deduplicate noded edges: strings with the same coordinate list
/// (modulo direction) merge by combining labels. The merge is
/// commutative and associative, so the result is independent of input
/// order.
pub(crate) fn merge_edges(noded: Vec<SegmentString<EdgeSourceInfo>>) -> Vec<MergedEdge> {
    let mut merged: BTreeMap<Vec<CoordKey>, MergedEdge> = BTreeMap::new();
    for string in noded {
        let (mut coords, info) = string.into_parts();
        let label = canonicalize(&mut coords, &info.label);
        let key: Vec<CoordKey> = coords.iter().map(|c| CoordKey(*c)).collect();
        merged
            .entry(key)
            .and_modify(|edge| edge.label.merge(&label))
            .or_insert(MergedEdge { coords, label });
    }
    merged.into_values().collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use planar_types::polygon;

    #[test]
    fn reversed_duplicates_merge_to_one_edge() {
        let forward = SegmentString::new(
            vec![Coord::new(0., 0.), Coord::new(5., 0.), Coord::new(10., 0.)],
            EdgeSourceInfo {
                label: OverlayLabel::for_input(0, InputTopo::Line),
            },
        );
        let backward = SegmentString::new(
            vec![Coord::new(10., 0.), Coord::new(5., 0.), Coord::new(0., 0.)],
            EdgeSourceInfo {
                label: OverlayLabel::for_input(1, InputTopo::Line),
            },
        );
        let merged = merge_edges(vec![forward, backward]);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].label.is_linework(0));
        assert!(merged[0].label.is_linework(1));
    }

    #[test]
    fn ring_extraction_sets_interior_side() {
        let square = polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)];
        let mut strings = Vec::new();
        extract_edges(&square.into(), 0, None, &mut strings);
        assert_eq!(strings.len(), 1);
        // the square above is CCW, so its interior is on the left
        assert_eq!(
            strings[0].data().label.input(0),
            InputTopo::Area {
                left: CoordPos::Inside,
                right: CoordPos::Outside
            }
        );
    }
}
