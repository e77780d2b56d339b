use super::label::Label;
use super::node_star::Ray;
use crate::algorithm::coordinate_position::CoordPos;
use crate::algorithm::line_intersection::{line_intersection, LineIntersection};
use crate::algorithm::orientation::{winding, Orientation};
use crate::index::chain::{build_chains, MonotoneChain};
use crate::index::StrTree;
use crate::interrupt::check_interrupt;
use crate::noding::{endpoint_split, is_adjacent_segments, normalized_split, SegmentIntersection};
use crate::utils::CoordKey;
use planar_types::{Coord, Geometry, Line, LineString, LinearRing, Result};

use std::collections::{BTreeMap, BTreeSet};

/// One 1-D component of a relate topology graph, resident in the graph's
/// edge arena and addressed by index.
///
/// An edge keeps its vertex chain immutable; noding accumulates split
/// points beside it, reusing the noder's split-point machinery.
#[derive(Clone, Debug)]
pub(crate) struct TopoEdge {
    coords: Vec<Coord>,
    label: Label,
    splits: BTreeSet<SegmentIntersection>,
    /// whether any edge of the other geometry intersects this one
    touched: bool,
}

impl TopoEdge {
    fn new(coords: Vec<Coord>, label: Label) -> TopoEdge {
        debug_assert!(coords.len() >= 2);
        TopoEdge {
            coords,
            label,
            splits: BTreeSet::new(),
            touched: false,
        }
    }

    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    fn segment(&self, index: usize) -> Line {
        Line::new(self.coords[index], self.coords[index + 1])
    }

    fn is_closed(&self) -> bool {
        self.coords.first() == self.coords.last()
    }

    /// Record the split point(s) of an intersection found on segment
    /// `segment_index`.
    fn record_intersection(&mut self, intersection: &LineIntersection, segment_index: usize) {
        match intersection {
            LineIntersection::SinglePoint { intersection, .. } => {
                self.splits
                    .insert(normalized_split(&self.coords, *intersection, segment_index));
            }
            LineIntersection::Collinear { intersection } => {
                self.splits
                    .insert(normalized_split(&self.coords, intersection.start, segment_index));
                self.splits
                    .insert(normalized_split(&self.coords, intersection.end, segment_index));
            }
        }
    }

    pub fn split_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.splits.iter().map(SegmentIntersection::coord)
    }

    /// The split list with the edge's endpoints pinned, in order along
    /// the edge: the boundaries of the edge's noded pieces.
    fn splits_with_endpoints(&self) -> Vec<SegmentIntersection> {
        let mut splits = self.splits.clone();
        splits.insert(endpoint_split(&self.coords, false));
        splits.insert(endpoint_split(&self.coords, true));
        splits.into_iter().collect()
    }

    /// The two labelled rays of every noded piece of this edge: one out
    /// of each piece end, pointing along the piece. A ray against the
    /// edge direction carries the flipped label.
    pub fn rays(&self) -> Vec<Ray> {
        let splits = self.splits_with_endpoints();
        let mut rays = Vec::with_capacity(2 * (splits.len() - 1));
        for pair in splits.windows(2) {
            let (piece_start, piece_end) = (&pair[0], &pair[1]);

            // first step along the piece: the next split if it shares the
            // segment, else the segment's end vertex
            let after = piece_start.segment_index() + 1;
            let forward_toward = if piece_end.segment_index() < after {
                piece_end.coord()
            } else {
                self.coords[after]
            };
            rays.push(Ray {
                origin: piece_start.coord(),
                toward: forward_toward,
                label: self.label.clone(),
            });

            // last step of the piece, seen from its end
            let before = if piece_end.distance() == 0. {
                piece_end.segment_index() - 1
            } else {
                piece_end.segment_index()
            };
            let backward_toward = if piece_start.segment_index() >= before {
                piece_start.coord()
            } else {
                self.coords[before]
            };
            let mut label = self.label.clone();
            label.flip();
            rays.push(Ray {
                origin: piece_end.coord(),
                toward: backward_toward,
                label,
            });
        }
        rays
    }
}

/// The relate topology graph of one operand: an arena of labelled edges
/// and a coordinate-keyed map of node labels.
///
/// Nodes exist for component endpoints, ring anchors, point components
/// and (after noding) self-intersections; the fan of rays around a node
/// is derived from the edge arena on demand rather than stored.
#[derive(Clone)]
pub(crate) struct TopologyGraph<'a> {
    arg_index: usize,
    geometry: &'a Geometry,
    edges: Vec<TopoEdge>,
    node_labels: BTreeMap<CoordKey, Label>,
    /// collections other than MultiPolygon determine boundaries mod-2
    mod2_boundary_rule: bool,
    self_noded: bool,
}

impl<'a> TopologyGraph<'a> {
    pub fn new(arg_index: usize, geometry: &'a Geometry) -> Self {
        let mut graph = TopologyGraph {
            arg_index,
            geometry,
            edges: Vec::new(),
            node_labels: BTreeMap::new(),
            mod2_boundary_rule: true,
            self_noded: false,
        };
        graph.insert_geometry(geometry);
        graph
    }

    pub fn arg_index(&self) -> usize {
        self.arg_index
    }

    pub fn geometry(&self) -> &'a Geometry {
        self.geometry
    }

    pub fn edges(&self) -> &[TopoEdge] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut [TopoEdge] {
        &mut self.edges
    }

    /// Node labels in lexicographic coordinate order.
    pub fn nodes(&self) -> impl Iterator<Item = (Coord, &Label)> {
        self.node_labels.iter().map(|(key, label)| (key.0, label))
    }

    /// Coordinates of this geometry's boundary nodes.
    pub fn boundary_coords(&self) -> Vec<Coord> {
        self.node_labels
            .iter()
            .filter(|(_, label)| label.on_position(self.arg_index) == Some(CoordPos::OnBoundary))
            .map(|(key, _)| key.0)
            .collect()
    }

    fn is_boundary_node(&self, coord: Coord) -> bool {
        self.node_labels
            .get(&CoordKey(coord))
            .and_then(|label| label.on_position(self.arg_index))
            == Some(CoordPos::OnBoundary)
    }

    fn raise_node(&mut self, coord: Coord) -> &mut Label {
        debug_assert!(!coord.x.is_nan() && !coord.y.is_nan());
        self.node_labels
            .entry(CoordKey(coord))
            .or_insert_with(Label::empty_line_or_point)
    }

    /// Register a line endpoint under the mod-2 rule: an endpoint shared
    /// by an even number of component boundaries is interior.
    fn mark_line_endpoint(&mut self, coord: Coord) {
        let arg_index = self.arg_index;
        self.raise_node(coord).toggle_boundary(arg_index);
    }

    fn insert_geometry(&mut self, geometry: &Geometry) {
        if geometry.is_empty() {
            return;
        }
        match geometry {
            Geometry::Point(point) => {
                if let Some(coord) = point.coord() {
                    let arg_index = self.arg_index;
                    self.raise_node(coord).set_on_position(arg_index, CoordPos::Inside);
                }
            }
            Geometry::LineString(line_string) => self.insert_line(line_string),
            // a free-standing ring is a closed line: interior linework,
            // no boundary points
            Geometry::LinearRing(ring) => self.insert_line(ring.as_line_string()),
            Geometry::Polygon(polygon) => {
                self.insert_ring(polygon.exterior(), false);
                for hole in polygon.interiors() {
                    self.insert_ring(hole, true);
                }
            }
            Geometry::MultiPoint(multi_point) => {
                for point in &multi_point.0 {
                    if let Some(coord) = point.coord() {
                        let arg_index = self.arg_index;
                        self.raise_node(coord).set_on_position(arg_index, CoordPos::Inside);
                    }
                }
            }
            Geometry::MultiLineString(multi_line_string) => {
                for line_string in &multi_line_string.0 {
                    self.insert_line(line_string);
                }
            }
            Geometry::MultiPolygon(multi_polygon) => {
                // of all the collections, only MultiPolygon members do
                // not combine boundaries mod-2
                self.mod2_boundary_rule = false;
                for polygon in &multi_polygon.0 {
                    self.insert_ring(polygon.exterior(), false);
                    for hole in polygon.interiors() {
                        self.insert_ring(hole, true);
                    }
                }
            }
            Geometry::GeometryCollection(collection) => {
                for child in &collection.0 {
                    self.insert_geometry(child);
                }
            }
        }
    }

    fn insert_line(&mut self, line_string: &LineString) {
        let mut coords: Vec<Coord> = line_string.coords().to_vec();
        coords.dedup();
        if coords.is_empty() {
            return;
        }
        if coords.len() < 2 {
            warn!("treating invalid line string as a point, which has undefined results");
            let arg_index = self.arg_index;
            self.raise_node(coords[0]).set_on_position(arg_index, CoordPos::Inside);
            return;
        }

        // a closed line contributes its shared endpoint twice, which the
        // mod-2 rule resolves back to interior
        self.mark_line_endpoint(coords[0]);
        self.mark_line_endpoint(*coords.last().expect("non-empty"));

        let label = Label::line_at(self.arg_index, CoordPos::Inside);
        self.edges.push(TopoEdge::new(coords, label));
    }

    fn insert_ring(&mut self, ring: &LinearRing, is_hole: bool) {
        if ring.is_empty() {
            return;
        }
        let mut coords: Vec<Coord> = ring.coords().to_vec();
        coords.dedup();
        if coords.len() < 2 {
            warn!("treating collapsed ring as a point, which has undefined results");
            let arg_index = self.arg_index;
            self.raise_node(coords[0]).set_on_position(arg_index, CoordPos::OnBoundary);
            return;
        }
        if coords.len() < 4 {
            warn!("encountered invalid ring, which has undefined results");
        }

        // the polygon interior lies left of a CCW shell and left of a CW
        // hole
        let interior_on_left = match winding(&coords) {
            Some(Orientation::CounterClockwise) => !is_hole,
            Some(Orientation::Clockwise) => is_hole,
            Some(Orientation::Collinear) | None => {
                warn!("polygon ring has no winding order, results are undefined");
                is_hole
            }
        };
        let (left, right) = if interior_on_left {
            (CoordPos::Inside, CoordPos::Outside)
        } else {
            (CoordPos::Outside, CoordPos::Inside)
        };

        let anchor = coords[0];
        let label = Label::area_at(self.arg_index, CoordPos::OnBoundary, left, right);
        self.edges.push(TopoEdge::new(coords, label));

        // the ring's anchor vertex is a boundary node
        let arg_index = self.arg_index;
        self.raise_node(anchor).set_on_position(arg_index, CoordPos::OnBoundary);
    }

    /// Find this geometry's self-intersections and raise nodes for them.
    ///
    /// Rings of (assumed valid) polygons are not tested against
    /// themselves; everything else is.
    pub fn compute_self_nodes(&mut self) -> Result<()> {
        if self.self_noded {
            return Ok(());
        }
        self.self_noded = true;

        let is_rings = match self.geometry {
            Geometry::LineString(ls) => ls.is_closed(),
            Geometry::LinearRing(_) => true,
            Geometry::MultiLineString(mls) => mls.is_closed(),
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => true,
            _ => false,
        };

        for (edge_0, segment_0, edge_1, segment_1) in candidate_pairs(&self.edges, !is_rings)? {
            let same_edge = edge_0 == edge_1;
            if same_edge && segment_0 == segment_1 {
                continue;
            }
            let line_0 = self.edges[edge_0].segment(segment_0);
            let line_1 = self.edges[edge_1].segment(segment_1);
            let intersection = match line_intersection(line_0, line_1) {
                Some(intersection) => intersection,
                None => continue,
            };
            let trivial = same_edge
                && !matches!(intersection, LineIntersection::Collinear { .. })
                && is_adjacent_segments(
                    self.edges[edge_0].coords.len(),
                    self.edges[edge_0].is_closed(),
                    segment_0,
                    segment_1,
                );
            if !trivial {
                self.edges[edge_0].record_intersection(&intersection, segment_0);
                self.edges[edge_1].record_intersection(&intersection, segment_1);
            }
        }

        self.raise_self_intersection_nodes();
        Ok(())
    }

    /// A node for every self-intersection split, honouring the boundary
    /// determination rule for splits on boundary edges.
    fn raise_self_intersection_nodes(&mut self) {
        let arg_index = self.arg_index;
        for edge_index in 0..self.edges.len() {
            let on_position = self.edges[edge_index]
                .label
                .on_position(arg_index)
                .expect("edges are labelled for their own geometry");
            let coords: Vec<Coord> = self.edges[edge_index].split_coords().collect();
            for coord in coords {
                // an established boundary node stays one
                if self.is_boundary_node(coord) {
                    continue;
                }
                if on_position == CoordPos::OnBoundary && self.mod2_boundary_rule {
                    self.mark_line_endpoint(coord);
                } else {
                    self.raise_node(coord).set_on_position(arg_index, on_position);
                }
            }
        }
    }

    /// Every labelled ray of every noded edge piece, for star assembly.
    pub fn rays(&self) -> Vec<Ray> {
        self.edges.iter().flat_map(TopoEdge::rays).collect()
    }

    /// Re-use this (self-noded) graph at another argument position,
    /// swapping its labels if the position differs.
    pub fn clone_for_arg(&self, arg_index: usize) -> TopologyGraph<'a> {
        debug_assert!(self.self_noded, "prepare the graph before re-using it");
        let mut clone = self.clone();
        if arg_index != self.arg_index {
            clone.arg_index = arg_index;
            for edge in &mut clone.edges {
                edge.label.swap_geometries();
            }
            for label in clone.node_labels.values_mut() {
                label.swap_geometries();
            }
        }
        clone
    }
}

/// Classification of the crossings found while noding two graphs against
/// each other.
pub(crate) struct CrossingTracker {
    boundary_coords: Vec<Coord>,
    proper: Option<Coord>,
    proper_interior: bool,
}

impl CrossingTracker {
    pub fn has_proper(&self) -> bool {
        self.proper.is_some()
    }

    pub fn has_proper_interior(&self) -> bool {
        self.proper_interior
    }
}

/// Node the edges of two graphs against each other.
///
/// Improper intersections become split points on both edges; proper
/// crossings are only classified — the relate computation derives their
/// matrix contribution directly, so the crossing segments stay whole.
pub(crate) fn node_between(
    graph_a: &mut TopologyGraph,
    graph_b: &mut TopologyGraph,
) -> Result<CrossingTracker> {
    let mut tracker = CrossingTracker {
        boundary_coords: {
            let mut coords = graph_a.boundary_coords();
            coords.extend(graph_b.boundary_coords());
            coords
        },
        proper: None,
        proper_interior: false,
    };

    for (edge_a, segment_a, edge_b, segment_b) in
        candidate_pairs_between(&graph_a.edges, &graph_b.edges)?
    {
        let line_a = graph_a.edges[edge_a].segment(segment_a);
        let line_b = graph_b.edges[edge_b].segment(segment_b);
        let intersection = match line_intersection(line_a, line_b) {
            Some(intersection) => intersection,
            None => continue,
        };

        graph_a.edges[edge_a].touched = true;
        graph_b.edges[edge_b].touched = true;

        if !intersection.is_proper() {
            graph_a.edges[edge_a].record_intersection(&intersection, segment_a);
            graph_b.edges[edge_b].record_intersection(&intersection, segment_b);
        } else if let LineIntersection::SinglePoint {
            intersection: coord,
            ..
        } = intersection
        {
            tracker.proper = Some(coord);
            if !tracker.boundary_coords.contains(&coord) {
                tracker.proper_interior = true;
            }
        }
    }
    Ok(tracker)
}

/// Candidate intersecting segment pairs within one edge arena,
/// chain-pruned. `test_same_edge` admits pairs from a single edge (off
/// for the rings of valid polygons, which cannot self-intersect).
fn candidate_pairs(
    edges: &[TopoEdge],
    test_same_edge: bool,
) -> Result<Vec<(usize, usize, usize, usize)>> {
    let (chains, tree) = chain_index(edges)?;
    let mut candidates = Vec::new();
    for (chain_index, chain) in chains.iter().enumerate() {
        check_interrupt()?;
        for &other_index in tree.query_items(chain.envelope()) {
            if other_index <= chain_index {
                continue;
            }
            let other = &chains[other_index];
            if !test_same_edge && chain.parent == other.parent {
                continue;
            }
            chain.compute_overlaps(
                &edges[chain.parent].coords,
                other,
                &edges[other.parent].coords,
                &mut |segment_0, segment_1| {
                    candidates.push((chain.parent, segment_0, other.parent, segment_1));
                },
            );
        }
    }
    Ok(candidates)
}

/// Candidate intersecting segment pairs between two edge arenas.
fn candidate_pairs_between(
    edges_a: &[TopoEdge],
    edges_b: &[TopoEdge],
) -> Result<Vec<(usize, usize, usize, usize)>> {
    let chains_a: Vec<MonotoneChain> = edges_a
        .iter()
        .enumerate()
        .flat_map(|(edge_index, edge)| build_chains(&edge.coords, edge_index))
        .collect();
    let (chains_b, tree_b) = chain_index(edges_b)?;

    let mut candidates = Vec::new();
    for chain_a in &chains_a {
        check_interrupt()?;
        for &other_index in tree_b.query_items(chain_a.envelope()) {
            let chain_b = &chains_b[other_index];
            chain_a.compute_overlaps(
                &edges_a[chain_a.parent].coords,
                chain_b,
                &edges_b[chain_b.parent].coords,
                &mut |segment_a, segment_b| {
                    candidates.push((chain_a.parent, segment_a, chain_b.parent, segment_b));
                },
            );
        }
    }
    Ok(candidates)
}

fn chain_index(edges: &[TopoEdge]) -> Result<(Vec<MonotoneChain>, StrTree<usize>)> {
    let chains: Vec<MonotoneChain> = edges
        .iter()
        .enumerate()
        .flat_map(|(edge_index, edge)| build_chains(&edge.coords, edge_index))
        .collect();
    let mut tree = StrTree::new();
    for (chain_index, chain) in chains.iter().enumerate() {
        tree.insert(*chain.envelope(), chain_index)?;
    }
    Ok((chains, tree))
}
