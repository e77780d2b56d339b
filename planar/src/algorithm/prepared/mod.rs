//! Prepared geometries: a cached, indexed form of one operand that makes
//! repeated predicate evaluation against many test geometries cheap.
//!
//! Preparation computes once: the self-noded topology graph (with its
//! segment index), an indexed point-in-area locator for areal components,
//! and a fast segment-set intersection finder. The caches are read-only
//! and live exactly as long as the prepared operand; a mutated source
//! geometry must be re-prepared.

mod fast_segment_set_intersection_finder;

pub use fast_segment_set_intersection_finder::FastSegmentSetIntersectionFinder;

use crate::algorithm::coordinate_position::{CoordPos, CoordinatePosition};
use crate::algorithm::locate::IndexedPointInAreaLocator;
use crate::algorithm::relate::graph::TopologyGraph;
use crate::algorithm::relate::{IntersectionMatrix, RelateOperation};
use planar_types::{Coord, Dimensions, Geometry, Result};

/// A geometry wrapped with precomputed indexes for repeated use as the
/// fixed operand of predicates.
pub struct PreparedGeometry<'a> {
    geometry: &'a Geometry,
    graph: TopologyGraph<'a>,
    locator: Option<IndexedPointInAreaLocator>,
    segment_finder: FastSegmentSetIntersectionFinder,
}

impl<'a> PreparedGeometry<'a> {
    pub fn prepare(geometry: &'a Geometry) -> Result<Self> {
        let mut graph = TopologyGraph::new(0, geometry);
        graph.compute_self_nodes()?;
        let locator = if geometry.dimensions() == Dimensions::TwoDimensional {
            Some(IndexedPointInAreaLocator::new(geometry))
        } else {
            None
        };
        let segment_finder = FastSegmentSetIntersectionFinder::new(geometry)?;
        Ok(PreparedGeometry {
            geometry,
            graph,
            locator,
            segment_finder,
        })
    }

    pub fn geometry(&self) -> &Geometry {
        self.geometry
    }

    /// Full DE-9IM relate, re-using the cached self-noded graph for the
    /// prepared side.
    pub fn relate(&self, other: &Geometry) -> Result<IntersectionMatrix> {
        let graph_a = self.graph.clone_for_arg(0);
        let graph_b = TopologyGraph::new(1, other);
        RelateOperation::from_graphs(graph_a, graph_b).compute_intersection_matrix()
    }

    /// Fast intersects: (a) envelope reject; (b) indexed segment-set
    /// intersection; (c) with no boundary crossings, one containment
    /// probe per side decides.
    pub fn intersects(&self, other: &Geometry) -> Result<bool> {
        if other.is_empty() || self.geometry.is_empty() {
            return Ok(false);
        }
        if !self.geometry.envelope().intersects(&other.envelope()) {
            return Ok(false);
        }
        if self.segment_finder.intersects(other)? {
            return Ok(true);
        }

        // no crossings: any mutual containment is total
        if self.locator.is_some() {
            let mut any_covered = false;
            other.apply_coords(&mut |coord| {
                if !any_covered && self.locate(coord) != CoordPos::Outside {
                    any_covered = true;
                }
            });
            if any_covered {
                return Ok(true);
            }
        }
        if other.dimensions() == Dimensions::TwoDimensional {
            if let Some(coord) = first_coord(self.geometry) {
                if other.coordinate_position(&coord) != CoordPos::Outside {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Fast contains: envelope reject, then full relate on the cached
    /// graph.
    pub fn contains(&self, other: &Geometry) -> Result<bool> {
        if other.is_empty() || self.geometry.is_empty() {
            return Ok(false);
        }
        if !self.geometry.envelope().covers(&other.envelope()) {
            return Ok(false);
        }
        Ok(self.relate(other)?.is_contains())
    }

    pub fn covers(&self, other: &Geometry) -> Result<bool> {
        if other.is_empty() || self.geometry.is_empty() {
            return Ok(false);
        }
        if !self.geometry.envelope().covers(&other.envelope()) {
            return Ok(false);
        }
        Ok(self.relate(other)?.is_covers())
    }

    pub fn disjoint(&self, other: &Geometry) -> Result<bool> {
        Ok(!self.intersects(other)?)
    }

    /// Point-in-area location against the prepared areal components.
    fn locate(&self, coord: &Coord) -> CoordPos {
        match &self.locator {
            Some(locator) => locator.locate(coord),
            None => CoordPos::Outside,
        }
    }
}

fn first_coord(geometry: &Geometry) -> Option<Coord> {
    let mut first = None;
    geometry.apply_coords(&mut |coord| {
        if first.is_none() {
            first = Some(*coord);
        }
    });
    first
}
