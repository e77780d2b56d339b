use super::graph::{node_between, CrossingTracker, TopologyGraph};
use super::label::Label;
use super::node_star::{NodeStar, Ray};
use super::IntersectionMatrix;
use crate::algorithm::coordinate_position::{CoordPos, CoordinatePosition};
use crate::interrupt::check_interrupt;
use crate::utils::CoordKey;
use planar_types::{Dimensions, Geometry, Result};

use std::collections::BTreeMap;

/// Computes the [`IntersectionMatrix`] describing the topological
/// relationship between two geometries.
///
/// The computation nodes the two topology graphs against each other,
/// assembles a labelled node for every endpoint, anchor and intersection,
/// completes the labelling of the ray fans around those nodes, and folds
/// every node, fan and untouched edge into the matrix.
///
/// `GeometryCollection`s with overlapping polygons are not supported and
/// may produce surprising results.
pub(crate) struct RelateOperation<'a> {
    graph_a: TopologyGraph<'a>,
    graph_b: TopologyGraph<'a>,
}

impl<'a> RelateOperation<'a> {
    pub(crate) fn new(geom_a: &'a Geometry, geom_b: &'a Geometry) -> Self {
        Self::from_graphs(TopologyGraph::new(0, geom_a), TopologyGraph::new(1, geom_b))
    }

    /// Build from pre-constructed graphs, so prepared geometries can
    /// re-use a cached self-noded graph.
    pub(crate) fn from_graphs(graph_a: TopologyGraph<'a>, graph_b: TopologyGraph<'a>) -> Self {
        debug_assert_eq!(0, graph_a.arg_index());
        debug_assert_eq!(1, graph_b.arg_index());
        Self { graph_a, graph_b }
    }

    pub(crate) fn compute_intersection_matrix(&mut self) -> Result<IntersectionMatrix> {
        let mut im = IntersectionMatrix::empty();
        // geometries are finite and embedded in 2-D space, so the
        // exterior-exterior entry is always 2-D
        im.set(
            CoordPos::Outside,
            CoordPos::Outside,
            Dimensions::TwoDimensional,
        );

        if !self
            .graph_a
            .geometry()
            .envelope()
            .intersects(&self.graph_b.geometry().envelope())
        {
            // disjoint operands: only the exterior column and row remain
            Self::record_disjoint(&mut im, self.graph_a.geometry(), true);
            Self::record_disjoint(&mut im, self.graph_b.geometry(), false);
            return Ok(im);
        }

        // every intersection must surface as a graph node
        self.graph_a.compute_self_nodes()?;
        self.graph_b.compute_self_nodes()?;
        let tracker = node_between(&mut self.graph_a, &mut self.graph_b)?;

        // a proper crossing pins a floor under the matrix
        self.apply_proper_crossing_floor(&tracker, &mut im)?;

        let mut node_labels = self.assemble_node_labels();
        self.complete_isolated_nodes(&mut node_labels);

        check_interrupt()?;

        // the ray fans around each node carry the 1- and 2-dimensional
        // incidences; the nodes themselves the 0-dimensional ones
        let mut rays_by_node: BTreeMap<CoordKey, Vec<Ray>> = BTreeMap::new();
        for ray in self
            .graph_a
            .rays()
            .into_iter()
            .chain(self.graph_b.rays())
        {
            rays_by_node.entry(CoordKey(ray.origin)).or_default().push(ray);
        }
        for (key, rays) in rays_by_node {
            let mut star = NodeStar::build(key.0, rays);
            star.finish_labels([self.graph_a.geometry(), self.graph_b.geometry()])?;
            star.update_matrix(&mut im);
        }

        for label in node_labels.values() {
            debug_assert!(label.geometry_count() >= 2, "node with partial label");
            im.set_at_least_if_in_both(
                label.on_position(0),
                label.on_position(1),
                Dimensions::ZeroDimensional,
            );
        }

        self.record_untouched_edges(&mut im);

        Ok(im)
    }

    /// Gather a label for every node coordinate: the split points found
    /// by noding, overridden by the graphs' own node labels (whose
    /// boundary determination rule is authoritative).
    fn assemble_node_labels(&self) -> BTreeMap<CoordKey, Label> {
        let mut node_labels: BTreeMap<CoordKey, Label> = BTreeMap::new();

        for (geom_index, graph) in [(0, &self.graph_a), (1, &self.graph_b)] {
            for edge in graph.edges() {
                let edge_position = edge.label().on_position(geom_index);
                for coord in edge.split_coords() {
                    let label = node_labels
                        .entry(CoordKey(coord))
                        .or_insert_with(Label::empty_line_or_point);
                    if edge_position == Some(CoordPos::OnBoundary) {
                        label.toggle_boundary(geom_index);
                    } else if label.is_empty(geom_index) {
                        label.set_on_position(geom_index, CoordPos::Inside);
                    }
                }
            }
        }

        // the parent geometries' own nodes override: a split point may
        // have been classified boundary, while the boundary determination
        // rule places it in the interior
        for (geom_index, graph) in [(0, &self.graph_a), (1, &self.graph_b)] {
            for (coord, graph_label) in graph.nodes() {
                let position = graph_label
                    .on_position(geom_index)
                    .expect("graph nodes are labelled for their own geometry");
                node_labels
                    .entry(CoordKey(coord))
                    .or_insert_with(Label::empty_line_or_point)
                    .set_on_position(geom_index, position);
            }
        }

        node_labels
    }

    /// A node touched by only one geometry gets its other row from point
    /// location.
    fn complete_isolated_nodes(&self, node_labels: &mut BTreeMap<CoordKey, Label>) {
        for (key, label) in node_labels.iter_mut() {
            debug_assert!(label.geometry_count() > 0, "node with empty label");
            for (geom_index, geometry) in
                [(0, self.graph_a.geometry()), (1, self.graph_b.geometry())]
            {
                if label.is_empty(geom_index) {
                    let position = geometry.coordinate_position(&key.0);
                    label.set_all_positions(geom_index, position);
                }
            }
        }
    }

    /// An edge never touched by the other geometry lies wholly in one of
    /// its regions; one point location labels it, and it contributes its
    /// whole label to the matrix.
    fn record_untouched_edges(&mut self, im: &mut IntersectionMatrix) {
        let geometry_b = self.graph_b.geometry();
        for edge in self.graph_a.edges_mut() {
            if !edge.is_touched() {
                Self::label_untouched_edge(edge, 1, geometry_b);
                edge.label().update_matrix(im);
            }
        }
        let geometry_a = self.graph_a.geometry();
        for edge in self.graph_b.edges_mut() {
            if !edge.is_touched() {
                Self::label_untouched_edge(edge, 0, geometry_a);
                edge.label().update_matrix(im);
            }
        }
    }

    fn label_untouched_edge(
        edge: &mut super::graph::TopoEdge,
        other_index: usize,
        other_geometry: &Geometry,
    ) {
        let position = if other_geometry.dimensions() > Dimensions::ZeroDimensional {
            // the edge crosses no boundary, so any of its points places
            // the whole of it
            let coord = edge.coords().first().expect("edges are never empty");
            other_geometry.coordinate_position(coord)
        } else {
            // a point geometry has no interior for an edge to enter
            CoordPos::Outside
        };
        edge.label_mut().set_all_positions(other_index, position);
    }

    /// A proper crossing between edge segments forces matrix cells
    /// before any labelling runs, dimension pair by dimension pair.
    fn apply_proper_crossing_floor(
        &self,
        tracker: &CrossingTracker,
        im: &mut IntersectionMatrix,
    ) -> Result<()> {
        use Dimensions::{OneDimensional, TwoDimensional};
        let dims = (
            self.graph_a.geometry().dimensions(),
            self.graph_b.geometry().dimensions(),
        );

        match dims {
            // area boundaries properly crossing means the areas properly
            // overlap
            (TwoDimensional, TwoDimensional) => {
                if tracker.has_proper() {
                    im.set_at_least_from_string("212101212")?;
                }
            }
            // a line properly crossing an area's edge puts the line's
            // interior on the area's boundary; a proper *interior*
            // crossing adds an interior-interior meeting. Nothing follows
            // for the area's exterior, which another component may fill.
            (TwoDimensional, OneDimensional) => {
                if tracker.has_proper() {
                    im.set_at_least_from_string("FFF0FFFF2")?;
                }
                if tracker.has_proper_interior() {
                    im.set_at_least_from_string("1FFFFF1FF")?;
                }
            }
            (OneDimensional, TwoDimensional) => {
                if tracker.has_proper() {
                    im.set_at_least_from_string("F0FFFFFF2")?;
                }
                if tracker.has_proper_interior() {
                    im.set_at_least_from_string("1F1FFFFFF")?;
                }
            }
            // for two lines only an interior-interior meeting follows:
            // other segments may cover the neighbourhood of the crossing
            (OneDimensional, OneDimensional) => {
                if tracker.has_proper_interior() {
                    im.set_at_least_from_string("0FFFFFFFF")?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Enter a geometry's dimension and boundary dimension against the
    /// other's exterior, for disjoint operands.
    fn record_disjoint(im: &mut IntersectionMatrix, geometry: &Geometry, as_first: bool) {
        let mut set = |position: CoordPos, dimensions: Dimensions| {
            if as_first {
                im.set(position, CoordPos::Outside, dimensions);
            } else {
                im.set(CoordPos::Outside, position, dimensions);
            }
        };
        let dimensions = geometry.dimensions();
        if dimensions == Dimensions::Empty {
            return;
        }
        set(CoordPos::Inside, dimensions);
        let boundary_dimensions = geometry.boundary_dimensions();
        if boundary_dimensions != Dimensions::Empty {
            set(CoordPos::OnBoundary, boundary_dimensions);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use planar_types::polygon;
    use std::str::FromStr;

    #[test]
    fn disjoint_squares() {
        let square_a: Geometry =
            polygon![(x: 0., y: 0.), (x: 0., y: 20.), (x: 20., y: 20.), (x: 20., y: 0.)].into();
        let square_b: Geometry =
            polygon![(x: 55., y: 55.), (x: 50., y: 60.), (x: 60., y: 60.), (x: 60., y: 55.)]
                .into();

        let mut relate_operation = RelateOperation::new(&square_a, &square_b);
        let intersection_matrix = relate_operation.compute_intersection_matrix().unwrap();
        assert_eq!(
            intersection_matrix,
            IntersectionMatrix::from_str("FF2FF1212").unwrap()
        );
    }

    #[test]
    fn a_contains_b() {
        let square_a: Geometry =
            polygon![(x: 0., y: 0.), (x: 0., y: 20.), (x: 20., y: 20.), (x: 20., y: 0.)].into();
        let square_b: Geometry =
            polygon![(x: 5., y: 5.), (x: 5., y: 10.), (x: 10., y: 10.), (x: 10., y: 5.)].into();

        let mut relate_operation = RelateOperation::new(&square_a, &square_b);
        let intersection_matrix = relate_operation.compute_intersection_matrix().unwrap();
        assert_eq!(
            intersection_matrix,
            IntersectionMatrix::from_str("212FF1FF2").unwrap()
        );
    }

    #[test]
    fn a_overlaps_b() {
        let square_a: Geometry =
            polygon![(x: 0., y: 0.), (x: 0., y: 20.), (x: 20., y: 20.), (x: 20., y: 0.)].into();
        let square_b: Geometry =
            polygon![(x: 5., y: 5.), (x: 5., y: 30.), (x: 30., y: 30.), (x: 30., y: 5.)].into();

        let mut relate_operation = RelateOperation::new(&square_a, &square_b);
        let intersection_matrix = relate_operation.compute_intersection_matrix().unwrap();
        assert_eq!(
            intersection_matrix,
            IntersectionMatrix::from_str("212101212").unwrap()
        );
    }
}
