use super::label::{Direction, Label};
use super::IntersectionMatrix;
use crate::algorithm::coordinate_position::{CoordPos, CoordinatePosition};
use crate::utils::compare_direction;
use planar_types::{Coord, Dimensions, Geometry, GeometryError, Result};

use std::cmp::Ordering;

/// A labelled ray out of a node: the first step of one noded edge piece,
/// carrying the piece's label oriented away from the node.
#[derive(Clone, Debug)]
pub(crate) struct Ray {
    pub origin: Coord,
    pub toward: Coord,
    pub label: Label,
}

/// The rays of one direction out of a node, aggregated to a single
/// label.
#[derive(Debug)]
pub(crate) struct RayBundle {
    label: Label,
}

/// The CCW-ordered fan of ray bundles around one node.
///
/// The star is where a node's complete topology is assembled: bundle
/// labels aggregate the rays sharing a direction, side locations
/// propagate between neighbouring bundles, and whatever stays unknown is
/// settled by point location against the inputs.
#[derive(Debug)]
pub(crate) struct NodeStar {
    coord: Coord,
    bundles: Vec<RayBundle>,
}

impl NodeStar {
    /// Sort the rays CCW and aggregate runs of equal direction.
    pub fn build(coord: Coord, mut rays: Vec<Ray>) -> NodeStar {
        rays.sort_by(|a, b| compare_direction(coord, a.toward, b.toward));

        let mut bundles: Vec<RayBundle> = Vec::new();
        let mut run_start = 0;
        while run_start < rays.len() {
            let mut run_end = run_start + 1;
            while run_end < rays.len()
                && compare_direction(coord, rays[run_start].toward, rays[run_end].toward)
                    == Ordering::Equal
            {
                run_end += 1;
            }
            bundles.push(RayBundle {
                label: aggregate_labels(&rays[run_start..run_end]),
            });
            run_start = run_end;
        }
        NodeStar { coord, bundles }
    }

    /// Complete every bundle's label for both geometries:
    /// side locations propagate around the fan, a line geometry
    /// collapsing onto the node leaves its neighbourhood exterior, and
    /// the remaining unknowns resolve by locating the node against the
    /// input.
    pub fn finish_labels(&mut self, geometries: [&Geometry; 2]) -> Result<()> {
        self.propagate_sides(0)?;
        self.propagate_sides(1)?;

        let mut line_collapsed = [false, false];
        for bundle in &self.bundles {
            for (geom_index, collapsed) in line_collapsed.iter_mut().enumerate() {
                *collapsed |= bundle.label.is_line(geom_index)
                    && bundle.label.on_position(geom_index) == Some(CoordPos::OnBoundary);
            }
        }

        for bundle in &mut self.bundles {
            for (geom_index, geometry) in geometries.iter().enumerate() {
                if !bundle.label.is_any_empty(geom_index) {
                    continue;
                }
                let position = if line_collapsed[geom_index] {
                    CoordPos::Outside
                } else if geometry.dimensions() == Dimensions::TwoDimensional {
                    geometry.coordinate_position(&self.coord)
                } else {
                    // a non-area geometry has no interior to be in
                    CoordPos::Outside
                };
                bundle.label.set_all_positions_if_empty(geom_index, position);
            }
        }
        debug!("labelled node star: {:?}", self);
        Ok(())
    }

    /// Sweep the fan CCW carrying the current side location for one
    /// geometry across the bundles: each bundle inherits the location of
    /// its predecessor except where its own label already states one.
    ///
    /// A bundle whose stated right side disagrees with the carried
    /// location is topologically inconsistent: the input cannot be
    /// labelled at this precision.
    fn propagate_sides(&mut self, geom_index: usize) -> Result<()> {
        // the region between the last side-labelled bundle and the start
        // of the fan is that bundle's left side
        let mut current = None;
        for bundle in &self.bundles {
            if bundle.label.is_geom_area(geom_index) {
                if let Some(left) = bundle.label.position(geom_index, Direction::Left) {
                    current = Some(left);
                }
            }
        }
        let mut current = match current {
            Some(position) => position,
            None => return Ok(()),
        };

        for bundle in &mut self.bundles {
            let label = &mut bundle.label;
            if label.position(geom_index, Direction::On).is_none() {
                label.set_position(geom_index, Direction::On, current);
            }
            if !label.is_geom_area(geom_index) {
                continue;
            }
            match label.position(geom_index, Direction::Right) {
                Some(right) => {
                    if right != current {
                        return Err(GeometryError::topology_at(
                            "side location conflict",
                            self.coord,
                        ));
                    }
                    current = label
                        .position(geom_index, Direction::Left)
                        .ok_or_else(|| {
                            GeometryError::topology_at("found single null side", self.coord)
                        })?;
                }
                None => {
                    label.set_position(geom_index, Direction::Right, current);
                    label.set_position(geom_index, Direction::Left, current);
                }
            }
        }
        Ok(())
    }

    pub fn update_matrix(&self, intersection_matrix: &mut IntersectionMatrix) {
        for bundle in &self.bundles {
            bundle.label.update_matrix(intersection_matrix);
        }
    }
}

/// The aggregate label of the rays sharing one direction — essentially
/// the self-overlay of each geometry along that direction:
///
/// - on-position: an odd number of boundary rays is boundary (the mod-2
///   rule); an even number, or any interior ray, is interior;
/// - sides: interior wins over exterior. Two polygons of a collection
///   touching along an edge thereby report interior on both sides, which
///   is not a contradiction.
fn aggregate_labels(rays: &[Ray]) -> Label {
    let is_area = rays.iter().any(|ray| ray.label.is_area());
    let mut label = if is_area {
        Label::empty_area()
    } else {
        Label::empty_line_or_point()
    };

    for geom_index in 0..2 {
        let mut boundary_count = 0_usize;
        let mut any_interior = false;
        for ray in rays {
            match ray.label.on_position(geom_index) {
                Some(CoordPos::OnBoundary) => boundary_count += 1,
                Some(CoordPos::Inside) => any_interior = true,
                None | Some(CoordPos::Outside) => {}
            }
        }
        if boundary_count > 0 {
            let position = if boundary_count % 2 == 1 {
                CoordPos::OnBoundary
            } else {
                CoordPos::Inside
            };
            label.set_on_position(geom_index, position);
        } else if any_interior {
            label.set_on_position(geom_index, CoordPos::Inside);
        }

        if is_area {
            for side in [Direction::Left, Direction::Right] {
                let mut side_position = None;
                for ray in rays {
                    match ray.label.position(geom_index, side) {
                        Some(CoordPos::Inside) => {
                            side_position = Some(CoordPos::Inside);
                            break;
                        }
                        Some(CoordPos::Outside) => side_position = Some(CoordPos::Outside),
                        None | Some(CoordPos::OnBoundary) => {}
                    }
                }
                if let Some(position) = side_position {
                    label.set_position(geom_index, side, position);
                }
            }
        }
    }
    label
}

#[cfg(test)]
mod test {
    use super::*;

    fn line_ray(toward: Coord, geom_index: usize, on: CoordPos) -> Ray {
        Ray {
            origin: Coord::zero(),
            toward,
            label: Label::line_at(geom_index, on),
        }
    }

    #[test]
    fn equal_directions_bundle_together() {
        let star = NodeStar::build(
            Coord::zero(),
            vec![
                line_ray(Coord::new(1., 0.), 0, CoordPos::OnBoundary),
                line_ray(Coord::new(2., 0.), 1, CoordPos::Inside),
                line_ray(Coord::new(0., 1.), 0, CoordPos::Inside),
            ],
        );
        assert_eq!(star.bundles.len(), 2);
        // the east bundle merged both geometries
        let east = &star.bundles[0];
        assert_eq!(east.label.on_position(0), Some(CoordPos::OnBoundary));
        assert_eq!(east.label.on_position(1), Some(CoordPos::Inside));
    }

    #[test]
    fn even_boundary_rays_cancel_to_interior() {
        let rays = vec![
            line_ray(Coord::new(1., 0.), 0, CoordPos::OnBoundary),
            line_ray(Coord::new(1., 0.), 0, CoordPos::OnBoundary),
        ];
        let label = aggregate_labels(&rays);
        assert_eq!(label.on_position(0), Some(CoordPos::Inside));
    }

    #[test]
    fn side_propagation_fills_unknown_bundles() {
        // a CCW square corner at the origin: boundary rays east and
        // north, with a stray line ray in between (interior side)
        let area_label = |left, right| {
            let mut label = Label::area_at(0, CoordPos::OnBoundary, left, right);
            label.set_on_position(1, CoordPos::Outside);
            label
        };
        let mut star = NodeStar::build(
            Coord::zero(),
            vec![
                Ray {
                    origin: Coord::zero(),
                    toward: Coord::new(1., 0.),
                    label: area_label(CoordPos::Inside, CoordPos::Outside),
                },
                Ray {
                    origin: Coord::zero(),
                    toward: Coord::new(1., 1.),
                    label: Label::line_at(1, CoordPos::Inside),
                },
                Ray {
                    origin: Coord::zero(),
                    toward: Coord::new(0., 1.),
                    label: area_label(CoordPos::Outside, CoordPos::Inside),
                },
            ],
        );
        star.propagate_sides(0).unwrap();
        // the stray ray sits in the interior wedge between the two
        // boundary rays
        assert_eq!(star.bundles[1].label.on_position(0), Some(CoordPos::Inside));
    }

    #[test]
    fn conflicting_sides_fail() {
        let area = |left, right| Label::area_at(0, CoordPos::OnBoundary, left, right);
        let mut star = NodeStar::build(
            Coord::zero(),
            vec![
                Ray {
                    origin: Coord::zero(),
                    toward: Coord::new(1., 0.),
                    label: area(CoordPos::Inside, CoordPos::Outside),
                },
                Ray {
                    origin: Coord::zero(),
                    toward: Coord::new(0., 1.),
                    label: area(CoordPos::Inside, CoordPos::Outside),
                },
            ],
        );
        let error = star.propagate_sides(0).unwrap_err();
        assert!(error.is_topology());
    }
}
