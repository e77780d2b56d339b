use crate::{Coord, CoordSeq, Envelope, Line};

use std::sync::OnceLock;

/// An ordered, not necessarily closed, sequence of two or more vertices.
///
/// # Validity
///
/// A valid `LineString` has at least two distinct vertices, or none at all.
/// The structure itself does not enforce validity; strict validation is the
/// job of [`GeometryFactory`](crate::GeometryFactory) construction and of
/// the validation operations.
///
/// The envelope is computed lazily on first access and cached; the cache is
/// published through a memory barrier, so a constructed `LineString` may be
/// shared across threads.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineString {
    seq: CoordSeq,
    #[cfg_attr(feature = "serde", serde(skip))]
    envelope: OnceLock<Envelope>,
}

impl LineString {
    pub fn new(seq: CoordSeq) -> Self {
        LineString {
            seq,
            envelope: OnceLock::new(),
        }
    }

    pub fn empty() -> Self {
        LineString::new(CoordSeq::default())
    }

    /// An XY line string from `(x, y)` pairs.
    pub fn from_xy(coords: impl IntoIterator<Item = (f64, f64)>) -> Self {
        LineString::new(CoordSeq::from_xy(coords))
    }

    #[inline]
    pub fn seq(&self) -> &CoordSeq {
        &self.seq
    }

    #[inline]
    pub fn coords(&self) -> &[Coord] {
        self.seq.coords()
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.seq.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.seq.is_closed()
    }

    /// Iterate over the line's segments.
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.seq.lines()
    }

    pub fn envelope(&self) -> Envelope {
        *self
            .envelope
            .get_or_init(|| Envelope::of_coords(self.seq.iter()))
    }

    pub fn reversed(&self) -> LineString {
        LineString::new(self.seq.reversed())
    }

    pub fn into_seq(self) -> CoordSeq {
        self.seq
    }
}

impl PartialEq for LineString {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl From<CoordSeq> for LineString {
    fn from(seq: CoordSeq) -> Self {
        LineString::new(seq)
    }
}

impl From<Vec<Coord>> for LineString {
    fn from(coords: Vec<Coord>) -> Self {
        LineString::new(coords.into_iter().collect())
    }
}
