//! Topologically relate two geometries under DE-9IM semantics.
//!
//! The matrix is computed by noding each input's topology graph against
//! the other's, aggregating the labels of the ray fans around every
//! node, and settling components with no shared linework by point
//! location. Boolean predicates are patterns over the matrix, with
//! rectangle operands short-circuiting past graph construction entirely.

pub(crate) mod graph;
mod intersection_matrix;
pub(crate) mod label;
pub(crate) mod node_star;
pub(crate) mod rectangle;
mod relate_operation;

pub use intersection_matrix::IntersectionMatrix;
pub(crate) use relate_operation::RelateOperation;

use planar_types::{Geometry, Result};

/// Topologically relate a geometry to another.
pub trait Relate {
    /// The DE-9IM matrix of `self` versus `other`.
    ///
    /// Fails with a topology error if the inputs cannot be labelled at
    /// floating precision.
    fn relate(&self, other: &Geometry) -> Result<IntersectionMatrix>;
}

impl Relate for Geometry {
    fn relate(&self, other: &Geometry) -> Result<IntersectionMatrix> {
        RelateOperation::new(self, other).compute_intersection_matrix()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use planar_types::{line_string, polygon, Point};
    use std::str::FromStr;

    #[test]
    fn crossing_lines_matrix() {
        let a: Geometry = line_string![(x: 0., y: 0.), (x: 10., y: 10.)].into();
        let b: Geometry = line_string![(x: 10., y: 0.), (x: 0., y: 10.)].into();
        let im = a.relate(&b).unwrap();
        assert_eq!(im, IntersectionMatrix::from_str("0F1FF0102").unwrap());
    }

    #[test]
    fn point_on_polygon_boundary() {
        let square: Geometry =
            polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)].into();
        let point: Geometry = Point::new(10., 0.).into();
        let im = square.relate(&point).unwrap();
        assert!(im.is_intersects());
        assert!(!im.is_contains());
        assert_eq!(im.to_string(), "FF20F1FF2");
    }

    #[test]
    fn collinear_overlapping_lines() {
        let a: Geometry = line_string![(x: 0., y: 0.), (x: 10., y: 0.)].into();
        let b: Geometry = line_string![(x: 5., y: 0.), (x: 15., y: 0.)].into();
        let im = a.relate(&b).unwrap();
        use planar_types::Dimensions;
        assert!(im.is_overlaps(Dimensions::OneDimensional, Dimensions::OneDimensional));
    }

    #[test]
    fn line_within_polygon() {
        let square: Geometry =
            polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)].into();
        let line: Geometry = line_string![(x: 2., y: 2.), (x: 8., y: 8.)].into();
        let im = square.relate(&line).unwrap();
        assert!(im.is_contains());
        let im = line.relate(&square).unwrap();
        assert!(im.is_within());
    }
}
