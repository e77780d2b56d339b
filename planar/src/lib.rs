//! The `planar` crate is a 2D planar computational-geometry engine
//! implementing the OGC Simple Features model: topological predicates,
//! set-theoretic overlay, validation and repair, and the spatial indexes
//! that make them scale.
//!
//! # Layers
//!
//! - **Primitives**: robust [`orientation`](algorithm::orientation),
//!   [`line_intersection`](algorithm::line_intersection), point location.
//! - **Spatial indexes**: [`StrTree`](index::StrTree), monotone
//!   [chains](index::chain), a 1-D [interval tree](index::IntervalRTree)
//!   and a [`Quadtree`](index::Quadtree).
//! - **Noding**: splitting arbitrary line arrangements at every
//!   intersection ([`noding`]), with a snap-rounding variant for fixed
//!   precision.
//! - **Topology graph**: the labelled planar graph behind
//!   [`relate`](algorithm::relate) and [`overlay`](algorithm::overlay).
//! - **Relate**: DE-9IM computation and the boolean predicates derived
//!   from it.
//! - **Overlay**: intersection / union / difference / symmetric difference,
//!   with snap-rounding escalation on numeric degeneracy.
//! - **Prepared geometries**: cached indexed form of one operand for
//!   repeated predicate evaluation.
//!
//! # Concurrency
//!
//! All operations are synchronous and single-threaded; the engine is
//! re-entrant, and immutable geometries may be shared across threads.
//! Long-running operations honour a cooperative [interrupt](interrupt)
//! flag. Every result is a deterministic function of the inputs and the
//! precision model: all graph traversals are ordered by explicit
//! coordinate or angular sorts.

pub use planar_types::{
    coord, line_string, polygon, Coord, CoordSeq, CoordShape, Dimensions, Envelope, Geometry,
    GeometryCollection, GeometryError, GeometryFactory, Line, LineString, LinearRing,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, PrecisionModel, Result,
};

pub mod algorithm;
pub use crate::algorithm::*;

pub mod index;
pub mod interrupt;
pub mod noding;

pub(crate) mod utils;

#[cfg(test)]
#[macro_use]
extern crate approx;

#[macro_use]
extern crate log;
