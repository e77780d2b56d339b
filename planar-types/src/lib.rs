//! The `planar-types` crate provides the primitive types of the planar
//! geometry engine.
//!
//! # Types
//!
//! - **[`Coord`]**: a 2D coordinate with optional Z and M attributes. All
//!   geometry types are composed of [`Coord`]s, though [`Coord`] itself is
//!   not a [`Geometry`] type.
//! - **[`CoordSeq`]**: an ordered, shape-tagged sequence of [`Coord`]s —
//!   the canonical vertex container.
//! - **[`Envelope`]**: a nullable axis-aligned bounding rectangle.
//! - **[`PrecisionModel`]**: the numeric precision at which coordinates are
//!   interpreted — floating, floating-single, or fixed grid.
//! - **[`Point`]**, **[`LineString`]**, **[`LinearRing`]**, **[`Polygon`]**,
//!   **[`MultiPoint`]**, **[`MultiLineString`]**, **[`MultiPolygon`]**,
//!   **[`GeometryCollection`]**: the concrete geometry variants.
//! - **[`Geometry`]**: an enumeration of all geometry variants.
//! - **[`GeometryFactory`]**: bundles a [`PrecisionModel`], an SRID, and a
//!   coordinate shape, and validates structural invariants at construction.
//!
//! # Semantics
//!
//! The types aim to adhere to the [OpenGIS Simple Feature Access][OGC-SFA]
//! standards, and are therefore inter-operable with other implementations
//! of the standards.
//!
//! Geometries are immutable once constructed: mutation APIs on [`CoordSeq`]
//! apply only while a geometry is being built. Lazily computed envelopes
//! are published through a memory barrier, so immutable geometries may be
//! shared across threads.
//!
//! [OGC-SFA]: https://www.ogc.org/standards/sfa

mod coord;
mod coord_seq;
mod dimensions;
mod envelope;
mod error;
mod factory;
mod geometry;
mod line;
mod precision;

#[macro_use]
mod macros;

pub use crate::coord::{interpolate_m, interpolate_z, Coord};
pub use crate::coord_seq::{CoordSeq, CoordShape};
pub use crate::dimensions::Dimensions;
pub use crate::envelope::Envelope;
pub use crate::error::{GeometryError, Result};
pub use crate::factory::GeometryFactory;
pub use crate::geometry::{
    Geometry, GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};
pub use crate::line::Line;
pub use crate::precision::PrecisionModel;
