//! Set-theoretic overlay: intersection, union, difference and symmetric
//! difference of two geometries.
//!
//! The pipeline: prepare the inputs (dimensions, envelopes, cached
//! point-in-area locators), clip rings and limit lines to the envelope of
//! interest, extract labelled edges, node them, merge coincident noded
//! edges, build the half-edge graph, complete every label by propagation
//! around nodes, and assemble the areal / lineal / puntal parts the
//! operation selects.
//!
//! Numeric degeneracy surfaces as a topology error; the
//! [robust driver](overlay) retries with snap rounding at progressively
//! coarser precision before giving up.

pub(crate) mod edge;
pub(crate) mod graph;
mod line_builder;
mod line_limiter;
pub(crate) mod overlay_label;
pub(crate) mod polygon_builder;
mod ring_clipper;
mod robust;
mod union;

// `self::` disambiguates from the `robust` arithmetic crate
pub use self::robust::{overlay, overlay_with_precision};
pub use self::union::unary_union;

use crate::algorithm::coordinate_position::{CoordPos, CoordinatePosition};

use crate::algorithm::locate::IndexedPointInAreaLocator;
use crate::noding::{validate_noding, McIndexNoder, Noder, SegmentString};
use crate::noding::snap_round::SnapRoundingNoder;
use crate::utils::CoordKey;
use edge::{extract_edges, merge_edges, EdgeSourceInfo};
use graph::{sym, OverlayGraph};
use line_builder::is_location_in_result;
use planar_types::{
    Coord, Dimensions, Envelope, Geometry, GeometryCollection, GeometryError, GeometryFactory,
    LineString, Point, Polygon, Result,
};

use std::collections::BTreeSet;

/// The four set-theoretic overlay operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayOp {
    Intersection,
    Union,
    Difference,
    SymDifference,
}

/// Binary overlay operations on geometries.
///
/// All operations run the robust overlay driver: floating-point noding
/// first, snap rounding on topology failure. The result is possibly
/// empty, never partial.
pub trait BooleanOps {
    fn intersection(&self, other: &Geometry) -> Result<Geometry>;
    fn union(&self, other: &Geometry) -> Result<Geometry>;
    fn difference(&self, other: &Geometry) -> Result<Geometry>;
    fn sym_difference(&self, other: &Geometry) -> Result<Geometry>;
}

impl BooleanOps for Geometry {
    fn intersection(&self, other: &Geometry) -> Result<Geometry> {
        overlay(self, other, OverlayOp::Intersection)
    }

    fn union(&self, other: &Geometry) -> Result<Geometry> {
        overlay(self, other, OverlayOp::Union)
    }

    fn difference(&self, other: &Geometry) -> Result<Geometry> {
        overlay(self, other, OverlayOp::Difference)
    }

    fn sym_difference(&self, other: &Geometry) -> Result<Geometry> {
        overlay(self, other, OverlayOp::SymDifference)
    }
}

/// One prepared overlay operand: its dimension, envelope, and (for areal
/// inputs) a cached point-in-area locator used to label disconnected
/// edges.
pub(crate) struct InputGeometry<'a> {
    geometry: &'a Geometry,
    dimensions: Dimensions,
    envelope: Envelope,
    locator: Option<IndexedPointInAreaLocator>,
}

impl<'a> InputGeometry<'a> {
    fn new(geometry: &'a Geometry) -> Self {
        let dimensions = geometry.dimensions();
        let locator = if dimensions == Dimensions::TwoDimensional {
            Some(IndexedPointInAreaLocator::new(geometry))
        } else {
            None
        };
        InputGeometry {
            geometry,
            dimensions,
            envelope: geometry.envelope(),
            locator,
        }
    }
}

/// Which noder a single overlay attempt runs.
#[derive(Clone, Copy, Debug)]
pub(crate) enum NoderKind {
    Floating,
    SnapRounding { scale: f64 },
}

impl NoderKind {
    fn node(&self, strings: &[SegmentString<EdgeSourceInfo>]) -> Result<Vec<SegmentString<EdgeSourceInfo>>> {
        match self {
            NoderKind::Floating => McIndexNoder::new().node(strings),
            NoderKind::SnapRounding { scale } => {
                SnapRoundingNoder::with_scale(*scale).node(strings)
            }
        }
    }

    /// The distance coordinates can move while noding: one grid cell.
    fn snap_tolerance(&self) -> f64 {
        match self {
            NoderKind::Floating => 0.,
            NoderKind::SnapRounding { scale } => 1. / scale,
        }
    }
}

/// One overlay attempt with a fixed noding strategy. The robust driver
/// wraps this with the escalation ladder.
pub(crate) fn overlay_single(
    geom_a: &Geometry,
    geom_b: &Geometry,
    op: OverlayOp,
    noder: NoderKind,
) -> Result<Geometry> {
    if matches!(geom_a, Geometry::GeometryCollection(_))
        || matches!(geom_b, Geometry::GeometryCollection(_))
    {
        return Err(GeometryError::unsupported(
            "overlay of GeometryCollection operands",
        ));
    }

    // empty operands short-circuit
    if geom_a.is_empty() || geom_b.is_empty() {
        return Ok(overlay_of_empty(geom_a, geom_b, op));
    }

    let input_a = InputGeometry::new(geom_a);
    let input_b = InputGeometry::new(geom_b);

    // puntal operands never reach the graph
    if input_a.dimensions == Dimensions::ZeroDimensional
        || input_b.dimensions == Dimensions::ZeroDimensional
    {
        return overlay_points(&input_a, &input_b, op);
    }

    // disjoint-envelope short-circuits
    if !input_a.envelope.intersects(&input_b.envelope) {
        match op {
            OverlayOp::Intersection => return Ok(empty_result(geom_a, geom_b, op)),
            OverlayOp::Difference => return Ok(geom_a.clone()),
            _ => {}
        }
    }

    // clipping: operate only where the result can be
    let clip = clipping_envelope(&input_a, &input_b, op, noder);
    let (clip_a, clip_b) = match op {
        OverlayOp::Intersection => (clip.as_ref(), clip.as_ref()),
        OverlayOp::Difference => (None, clip.as_ref()),
        _ => (None, None),
    };

    let mut strings: Vec<SegmentString<EdgeSourceInfo>> = Vec::new();
    extract_edges(geom_a, 0, clip_a, &mut strings);
    extract_edges(geom_b, 1, clip_b, &mut strings);
    if strings.is_empty() {
        return Ok(empty_result(geom_a, geom_b, op));
    }

    let noded = noder.node(&strings)?;
    validate_noding(&noded)?;

    let merged = merge_edges(noded);
    if merged.is_empty() {
        return Ok(empty_result(geom_a, geom_b, op));
    }

    let mut graph = OverlayGraph::build(merged);
    graph.label_edges([input_a.locator.as_ref(), input_b.locator.as_ref()])?;

    let in_region = |half_edge: usize| {
        is_location_in_result(
            op,
            graph.region_left(half_edge, 0),
            graph.region_left(half_edge, 1),
        )
    };
    let in_result_area = |half_edge: usize| in_region(half_edge) && !in_region(sym(half_edge));

    let polygons = polygon_builder::build_polygons(&graph, &in_result_area, false)?;
    let lines = line_builder::build_lines(&graph, op, &in_result_area, &in_region);
    let points = line_builder::build_points(&graph, op, &in_result_area, &in_region, &lines);

    let mut parts: Vec<Geometry> = Vec::new();
    parts.extend(polygons.into_iter().map(Geometry::from));
    parts.extend(lines.into_iter().map(Geometry::from));
    parts.extend(points.into_iter().map(Geometry::from));

    if parts.is_empty() {
        return Ok(empty_result(geom_a, geom_b, op));
    }
    Ok(GeometryFactory::default_instance().build_geometry(parts))
}

/// The envelope the result must lie in, expanded by a safety margin so
/// clipped linework can never carry result boundary, plus a grid cell
/// when snapping can move vertices.
fn clipping_envelope(
    input_a: &InputGeometry,
    input_b: &InputGeometry,
    op: OverlayOp,
    noder: NoderKind,
) -> Option<Envelope> {
    let base = match op {
        OverlayOp::Intersection => input_a.envelope.intersection(&input_b.envelope),
        OverlayOp::Difference => input_a.envelope,
        _ => return None,
    };
    if base.is_null() {
        return None;
    }
    let margin = 0.1 * base.diameter() + noder.snap_tolerance();
    // a degenerate (zero-extent) envelope still needs a positive margin
    let margin = if margin > 0. { margin } else { 1. };
    Some(base.expanded_by(margin))
}

/// Overlay where at least one operand is empty.
fn overlay_of_empty(geom_a: &Geometry, geom_b: &Geometry, op: OverlayOp) -> Geometry {
    match op {
        OverlayOp::Intersection => empty_result(geom_a, geom_b, op),
        OverlayOp::Difference => {
            if geom_a.is_empty() {
                empty_result(geom_a, geom_b, op)
            } else {
                geom_a.clone()
            }
        }
        OverlayOp::Union | OverlayOp::SymDifference => {
            if geom_a.is_empty() && geom_b.is_empty() {
                empty_result(geom_a, geom_b, op)
            } else if geom_a.is_empty() {
                geom_b.clone()
            } else {
                geom_a.clone()
            }
        }
    }
}

/// The empty geometry of the dimension the operation would produce.
fn empty_result(geom_a: &Geometry, geom_b: &Geometry, op: OverlayOp) -> Geometry {
    let dim_a = geom_a.dimensions();
    let dim_b = geom_b.dimensions();
    let result_dim = match op {
        OverlayOp::Intersection => dim_a.min(dim_b),
        OverlayOp::Union | OverlayOp::SymDifference => dim_a.max(dim_b),
        OverlayOp::Difference => dim_a,
    };
    match result_dim {
        Dimensions::TwoDimensional => Polygon::empty().into(),
        Dimensions::OneDimensional => LineString::empty().into(),
        Dimensions::ZeroDimensional => Point::empty().into(),
        Dimensions::Empty => GeometryCollection(vec![]).into(),
    }
}

/// Overlay with a puntal operand: evaluated by point location, no graph.
fn overlay_points(
    input_a: &InputGeometry,
    input_b: &InputGeometry,
    op: OverlayOp,
) -> Result<Geometry> {
    let factory = GeometryFactory::default_instance();

    let coords_of = |geometry: &Geometry| {
        let mut coords: Vec<Coord> = Vec::new();
        let mut seen: BTreeSet<CoordKey> = BTreeSet::new();
        geometry.apply_coords(&mut |coord| {
            if seen.insert(CoordKey(*coord)) {
                coords.push(*coord);
            }
        });
        coords
    };
    let to_puntal = |coords: Vec<Coord>| -> Geometry {
        if coords.is_empty() {
            Point::empty().into()
        } else {
            factory.build_geometry(coords.into_iter().map(|c| Point(Some(c)).into()).collect())
        }
    };

    if input_a.dimensions == Dimensions::ZeroDimensional
        && input_b.dimensions == Dimensions::ZeroDimensional
    {
        let set_a: BTreeSet<CoordKey> = coords_of(input_a.geometry)
            .into_iter()
            .map(CoordKey)
            .collect();
        let set_b: BTreeSet<CoordKey> = coords_of(input_b.geometry)
            .into_iter()
            .map(CoordKey)
            .collect();
        let kept: Vec<Coord> = match op {
            OverlayOp::Intersection => set_a.intersection(&set_b).map(|k| k.0).collect(),
            OverlayOp::Union => set_a.union(&set_b).map(|k| k.0).collect(),
            OverlayOp::Difference => set_a.difference(&set_b).map(|k| k.0).collect(),
            OverlayOp::SymDifference => {
                set_a.symmetric_difference(&set_b).map(|k| k.0).collect()
            }
        };
        return Ok(to_puntal(kept));
    }

    // exactly one puntal operand
    let (points_input, other_input, points_are_a) =
        if input_a.dimensions == Dimensions::ZeroDimensional {
            (input_a, input_b, true)
        } else {
            (input_b, input_a, false)
        };
    let point_coords = coords_of(points_input.geometry);
    let locate = |coord: &Coord| other_input.geometry.coordinate_position(coord);

    match op {
        OverlayOp::Intersection => {
            let kept: Vec<Coord> = point_coords
                .into_iter()
                .filter(|coord| locate(coord) != CoordPos::Outside)
                .collect();
            Ok(to_puntal(kept))
        }
        OverlayOp::Difference => {
            if points_are_a {
                let kept: Vec<Coord> = point_coords
                    .into_iter()
                    .filter(|coord| locate(coord) == CoordPos::Outside)
                    .collect();
                Ok(to_puntal(kept))
            } else {
                // subtracting isolated points leaves a 1- or 2-dimensional
                // geometry unchanged as a closed point-set
                Ok(other_input.geometry.clone())
            }
        }
        OverlayOp::Union | OverlayOp::SymDifference => {
            let uncovered: Vec<Coord> = point_coords
                .into_iter()
                .filter(|coord| locate(coord) == CoordPos::Outside)
                .collect();
            if uncovered.is_empty() {
                return Ok(other_input.geometry.clone());
            }
            let mut parts = vec![other_input.geometry.clone()];
            parts.extend(uncovered.into_iter().map(|c| Geometry::from(Point(Some(c)))));
            Ok(factory.build_geometry(parts))
        }
    }
}
