use super::edge::MergedEdge;
use super::overlay_label::InputTopo;
use crate::algorithm::coordinate_position::CoordPos;
use crate::algorithm::locate::IndexedPointInAreaLocator;
use crate::interrupt::check_interrupt;
use crate::utils::{compare_direction, CoordKey};
use planar_types::{Coord, GeometryError, Result};

use std::collections::BTreeMap;

/// The overlay's planar graph: merged edges realized as half-edge pairs,
/// with the outgoing half-edges around every node sorted CCW.
///
/// The arena owns everything; half-edges are integer handles
/// (`edge * 2` forward, `edge * 2 + 1` reverse), and a handle's twin is
/// `handle ^ 1`.
pub(crate) struct OverlayGraph {
    pub(crate) edges: Vec<MergedEdge>,
    stars: BTreeMap<CoordKey, Vec<usize>>,
}

pub(crate) fn sym(half_edge: usize) -> usize {
    half_edge ^ 1
}

impl OverlayGraph {
    pub fn build(edges: Vec<MergedEdge>) -> Self {
        let mut graph = OverlayGraph {
            edges,
            stars: BTreeMap::new(),
        };

        for (edge_index, edge) in graph.edges.iter().enumerate() {
            let first = *edge.coords.first().expect("merged edges are non-empty");
            let last = *edge.coords.last().expect("merged edges are non-empty");
            graph
                .stars
                .entry(CoordKey(first))
                .or_default()
                .push(edge_index * 2);
            graph
                .stars
                .entry(CoordKey(last))
                .or_default()
                .push(edge_index * 2 + 1);
        }

        // sort each star CCW from the positive x-axis
        let edges = &graph.edges;
        for (key, star) in graph.stars.iter_mut() {
            let origin = key.0;
            star.sort_by(|&a, &b| {
                compare_direction(origin, dir_point_of(edges, a), dir_point_of(edges, b))
            });
        }
        graph
    }

    pub fn num_half_edges(&self) -> usize {
        self.edges.len() * 2
    }

    pub fn is_forward(&self, half_edge: usize) -> bool {
        half_edge % 2 == 0
    }

    pub fn origin(&self, half_edge: usize) -> Coord {
        let coords = &self.edges[half_edge / 2].coords;
        if self.is_forward(half_edge) {
            coords[0]
        } else {
            *coords.last().expect("non-empty")
        }
    }

    pub fn dest(&self, half_edge: usize) -> Coord {
        self.origin(sym(half_edge))
    }

    /// The edge's vertices in this half-edge's direction.
    pub fn oriented_coords(&self, half_edge: usize) -> Vec<Coord> {
        let coords = &self.edges[half_edge / 2].coords;
        if self.is_forward(half_edge) {
            coords.clone()
        } else {
            coords.iter().rev().copied().collect()
        }
    }

    /// The outgoing half-edges at `coord`, sorted CCW.
    pub fn star(&self, coord: Coord) -> &[usize] {
        self.stars
            .get(&CoordKey(coord))
            .map(|star| star.as_slice())
            .expect("every half-edge origin has a star")
    }

    pub fn stars(&self) -> impl Iterator<Item = (Coord, &[usize])> {
        self.stars.iter().map(|(key, star)| (key.0, star.as_slice()))
    }

    /// The region location on the left of the half-edge, for one input.
    ///
    /// A boundary edge answers from its side labels; linework and
    /// uninvolved edges lie wholly inside one region, whose resolved
    /// location applies to both sides.
    pub fn region_left(&self, half_edge: usize, geom_index: usize) -> CoordPos {
        let label = &self.edges[half_edge / 2].label;
        match label.input(geom_index) {
            InputTopo::Area { left, right } => {
                if self.is_forward(half_edge) {
                    left
                } else {
                    right
                }
            }
            // a 1-D input bounds no region
            InputTopo::Line => CoordPos::Outside,
            InputTopo::NotPart { loc } | InputTopo::Collapsed { loc } => {
                loc.unwrap_or(CoordPos::Outside)
            }
        }
    }

    /// The location of points on the edge itself, for one input.
    pub fn on_location(&self, half_edge: usize, geom_index: usize) -> CoordPos {
        let label = &self.edges[half_edge / 2].label;
        match label.input(geom_index) {
            InputTopo::Area { .. } => CoordPos::OnBoundary,
            InputTopo::Line => CoordPos::Inside,
            InputTopo::NotPart { loc } | InputTopo::Collapsed { loc } => {
                loc.unwrap_or(CoordPos::Outside)
            }
        }
    }

    /// Complete every edge's label for both inputs: propagate region
    /// locations around each node in angular order, then resolve any
    /// still-disconnected edges by point location against the inputs.
    pub fn label_edges(
        &mut self,
        locators: [Option<&IndexedPointInAreaLocator>; 2],
    ) -> Result<()> {
        for geom_index in 0..2 {
            self.propagate_around_nodes(geom_index)?;
        }

        // edges in components that never touch an input's boundary
        for geom_index in 0..2 {
            let unresolved: Vec<usize> = self
                .edges
                .iter()
                .enumerate()
                .filter(|(_, edge)| edge.label.is_unresolved(geom_index))
                .map(|(edge_index, _)| edge_index)
                .collect();
            for edge_index in unresolved {
                check_interrupt()?;
                let representative = edge_interior_point(&self.edges[edge_index].coords);
                let location = match locators[geom_index] {
                    Some(locator) => locator.locate(&representative),
                    None => CoordPos::Outside,
                };
                self.edges[edge_index].label.resolve(geom_index, location);
            }
        }
        Ok(())
    }

    /// Sweep each star in CCW order carrying the current region location
    /// for `geom_index` across the edges: boundary edges switch the
    /// region from their right side to their left; other edges lie wholly
    /// in the current region.
    fn propagate_around_nodes(&mut self, geom_index: usize) -> Result<()> {
        let stars: Vec<(Coord, Vec<usize>)> = self
            .stars
            .iter()
            .map(|(key, star)| (key.0, star.clone()))
            .collect();

        for (origin, star) in stars {
            check_interrupt()?;

            // the region between the last boundary edge and the first
            // star entry is the last boundary edge's left side
            let mut current = None;
            for &half_edge in &star {
                if self.edges[half_edge / 2].label.is_area_boundary(geom_index) {
                    current = Some(self.area_side_left(half_edge, geom_index));
                }
            }
            let mut current = match current {
                Some(position) => position,
                None => continue,
            };

            for &half_edge in &star {
                let edge_index = half_edge / 2;
                if self.edges[edge_index].label.is_area_boundary(geom_index) {
                    let right = self.area_side_right(half_edge, geom_index);
                    if right != current {
                        return Err(GeometryError::topology_at(
                            "side location conflict",
                            origin,
                        ));
                    }
                    current = self.area_side_left(half_edge, geom_index);
                } else {
                    self.edges[edge_index].label.resolve(geom_index, current);
                }
            }
        }
        Ok(())
    }

    fn area_side_left(&self, half_edge: usize, geom_index: usize) -> CoordPos {
        match self.edges[half_edge / 2].label.input(geom_index) {
            InputTopo::Area { left, right } => {
                if self.is_forward(half_edge) {
                    left
                } else {
                    right
                }
            }
            _ => unreachable!("caller checked the edge is an area boundary"),
        }
    }

    fn area_side_right(&self, half_edge: usize, geom_index: usize) -> CoordPos {
        self.area_side_left(sym(half_edge), geom_index)
    }
}

/// The first step along a half-edge: the point its direction is taken
/// from.
fn dir_point_of(edges: &[MergedEdge], half_edge: usize) -> Coord {
    let coords = &edges[half_edge / 2].coords;
    if half_edge % 2 == 0 {
        coords[1]
    } else {
        coords[coords.len() - 2]
    }
}

/// A representative point in the interior of an edge: the midpoint of
/// its first segment.
fn edge_interior_point(coords: &[Coord]) -> Coord {
    Coord::new(
        (coords[0].x + coords[1].x) / 2.,
        (coords[0].y + coords[1].y) / 2.,
    )
}
