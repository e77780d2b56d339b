/// Signed area and CCW-positive ring area.
pub mod area;
pub use area::Area;

/// SFS boundary of a geometry.
pub mod boundary;
pub use boundary::boundary;

/// Dimension-weighted centroid.
pub mod centroid;
pub use centroid::Centroid;

/// Position of a coordinate relative to a geometry.
pub mod coordinate_position;
pub use coordinate_position::{
    coord_pos_relative_to_ring, CoordPos, CoordinatePosition, PointLocator,
};

/// Convex hull of a geometry's vertex set.
pub mod convex_hull;
pub use convex_hull::ConvexHull;

/// Minimum distance and nearest points between geometries.
pub mod distance;
pub use distance::{distance, nearest_points};

/// The full caller-facing operation surface on [`Geometry`](planar_types::Geometry).
pub mod geometry_ops;
pub use geometry_ops::{buffer, SpatialPredicates};

/// A representative point guaranteed to lie in the interior.
pub mod interior_point;
pub use interior_point::interior_point;

/// Euclidean length.
pub mod length;
pub use length::Length;

/// Robust segment-segment intersection.
pub mod line_intersection;
pub use line_intersection::{line_intersection, LineIntersection};

/// Indexed point-in-area location.
pub mod locate;
pub use locate::IndexedPointInAreaLocator;

/// Exact orientation predicate and ring winding.
pub mod orientation;
pub use orientation::{is_ccw, orient2d, Orientation};

/// Set-theoretic overlay of two geometries.
pub mod overlay;
pub use overlay::{overlay_with_precision, unary_union, BooleanOps, OverlayOp};

/// Prepared (indexed, cached) form of a geometry for repeated predicates.
pub mod prepared;
pub use prepared::PreparedGeometry;

/// DE-9IM relate machinery and boolean predicates.
pub mod relate;
pub use relate::{IntersectionMatrix, Relate};

/// Validity checking and repair.
pub mod validity;
pub use validity::{is_simple, is_valid, make_valid, validation_error, ValidationError};
