//! The caller-facing predicate surface, defined by DE-9IM patterns with
//! rectangle fast paths.
//!
//! Constructive operations live on [`BooleanOps`](crate::algorithm::overlay::BooleanOps)
//! and the free functions [`unary_union`](crate::algorithm::overlay::unary_union),
//! [`distance`](crate::algorithm::distance::distance),
//! [`nearest_points`](crate::algorithm::distance::nearest_points),
//! [`boundary`](crate::algorithm::boundary::boundary),
//! [`interior_point`](crate::algorithm::interior_point::interior_point),
//! [`make_valid`](crate::algorithm::validity::make_valid).


use crate::algorithm::relate::rectangle::{as_rectangle, rectangle_contains, rectangle_intersects};
use crate::algorithm::relate::Relate;
use planar_types::{Geometry, GeometryError, Polygon, Result};

/// The boolean spatial predicates.
///
/// Every predicate either returns an answer or fails — never "unknown".
/// A failure means the robust machinery could not label the inputs at any
/// precision.
pub trait SpatialPredicates {
    fn intersects(&self, other: &Geometry) -> Result<bool>;
    fn disjoint(&self, other: &Geometry) -> Result<bool>;
    fn contains(&self, other: &Geometry) -> Result<bool>;
    fn within(&self, other: &Geometry) -> Result<bool>;
    fn covers(&self, other: &Geometry) -> Result<bool>;
    fn covered_by(&self, other: &Geometry) -> Result<bool>;
    fn crosses(&self, other: &Geometry) -> Result<bool>;
    fn overlaps(&self, other: &Geometry) -> Result<bool>;
    fn touches(&self, other: &Geometry) -> Result<bool>;
    fn equals_topo(&self, other: &Geometry) -> Result<bool>;
}

fn rectangle_of(geometry: &Geometry) -> Option<planar_types::Envelope> {
    match geometry {
        Geometry::Polygon(polygon) => as_rectangle(polygon),
        _ => None,
    }
}

impl SpatialPredicates for Geometry {
    fn intersects(&self, other: &Geometry) -> Result<bool> {
        if let Some(rect) = rectangle_of(self) {
            return Ok(rectangle_intersects(&rect, other));
        }
        if let Some(rect) = rectangle_of(other) {
            return Ok(rectangle_intersects(&rect, self));
        }
        Ok(self.relate(other)?.is_intersects())
    }

    fn disjoint(&self, other: &Geometry) -> Result<bool> {
        Ok(!self.intersects(other)?)
    }

    fn contains(&self, other: &Geometry) -> Result<bool> {
        if other.is_empty() {
            return Ok(false);
        }
        if let Some(rect) = rectangle_of(self) {
            return Ok(rectangle_contains(&rect, other));
        }
        Ok(self.relate(other)?.is_contains())
    }

    fn within(&self, other: &Geometry) -> Result<bool> {
        if self.is_empty() {
            return Ok(false);
        }
        if let Some(rect) = rectangle_of(other) {
            return Ok(rectangle_contains(&rect, self));
        }
        Ok(self.relate(other)?.is_within())
    }

    fn covers(&self, other: &Geometry) -> Result<bool> {
        if other.is_empty() {
            return Ok(false);
        }
        if let Some(rect) = rectangle_of(self) {
            return Ok(rect.covers(&other.envelope()));
        }
        Ok(self.relate(other)?.is_covers())
    }

    fn covered_by(&self, other: &Geometry) -> Result<bool> {
        if self.is_empty() {
            return Ok(false);
        }
        if let Some(rect) = rectangle_of(other) {
            return Ok(rect.covers(&self.envelope()));
        }
        Ok(self.relate(other)?.is_covered_by())
    }

    fn crosses(&self, other: &Geometry) -> Result<bool> {
        Ok(self
            .relate(other)?
            .is_crosses(self.dimensions(), other.dimensions()))
    }

    fn overlaps(&self, other: &Geometry) -> Result<bool> {
        Ok(self
            .relate(other)?
            .is_overlaps(self.dimensions(), other.dimensions()))
    }

    fn touches(&self, other: &Geometry) -> Result<bool> {
        Ok(self
            .relate(other)?
            .is_touches(self.dimensions(), other.dimensions()))
    }

    fn equals_topo(&self, other: &Geometry) -> Result<bool> {
        Ok(self
            .relate(other)?
            .is_equal_topo(self.dimensions(), other.dimensions()))
    }
}

/// Buffer construction is not part of this engine: the offset-curve
/// machinery lives in an external collaborator that consumes the noding
/// and overlay primitives exposed here.
pub fn buffer(_geometry: &Geometry, _distance: f64) -> Result<Geometry> {
    Err(GeometryError::unsupported(
        "buffer construction is delegated to the offset-curve collaborator",
    ))
}

/// A degenerate-free rectangle check used by callers that want to know
/// whether the fast paths apply.
pub fn is_rectangle(polygon: &Polygon) -> bool {
    as_rectangle(polygon).is_some()
}

#[cfg(test)]
mod test {
    use super::*;
    use planar_types::{line_string, polygon, Point};

    #[test]
    fn predicate_symmetry() {
        let a: Geometry =
            polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)].into();
        let b: Geometry =
            polygon![(x: 5., y: 5.), (x: 15., y: 5.), (x: 15., y: 15.), (x: 5., y: 15.)].into();
        assert_eq!(a.intersects(&b).unwrap(), b.intersects(&a).unwrap());
        assert_eq!(a.disjoint(&b).unwrap(), !a.intersects(&b).unwrap());
        assert!(a.overlaps(&b).unwrap());
    }

    #[test]
    fn contains_within_duality() {
        let outer: Geometry =
            polygon![(x: 0., y: 0.), (x: 20., y: 0.), (x: 20., y: 20.), (x: 0., y: 20.)].into();
        // the diamond defeats the rectangle fast path on one side
        let inner: Geometry =
            polygon![(x: 10., y: 5.), (x: 15., y: 10.), (x: 10., y: 15.), (x: 5., y: 10.)].into();
        assert!(outer.contains(&inner).unwrap());
        assert!(inner.within(&outer).unwrap());
        assert!(outer.covers(&inner).unwrap());
        assert!(inner.covered_by(&outer).unwrap());
    }

    #[test]
    fn boundary_point_is_covered_not_contained() {
        let square: Geometry =
            polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)].into();
        let point: Geometry = Point::new(10., 0.).into();
        assert!(square.intersects(&point).unwrap());
        assert!(!square.contains(&point).unwrap());
        assert!(square.covers(&point).unwrap());
        assert!(square.touches(&point).unwrap());
    }

    #[test]
    fn crossing_lines() {
        let a: Geometry = line_string![(x: 0., y: 0.), (x: 10., y: 10.)].into();
        let b: Geometry = line_string![(x: 10., y: 0.), (x: 0., y: 10.)].into();
        assert!(a.crosses(&b).unwrap());
        assert!(!a.touches(&b).unwrap());
    }

    #[test]
    fn equals_topo_ignores_representation() {
        let square: Geometry =
            polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)].into();
        let reversed = square.reversed();
        assert!(square.equals_topo(&reversed).unwrap());
    }

    #[test]
    fn buffer_is_unsupported_here() {
        let point: Geometry = Point::new(0., 0.).into();
        assert!(matches!(
            buffer(&point, 1.0),
            Err(GeometryError::UnsupportedOperation(_))
        ));
    }
}
