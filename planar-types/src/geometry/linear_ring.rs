use crate::{Coord, CoordSeq, Envelope, Line, LineString};

/// A closed [`LineString`].
///
/// Construction performs the ring-closing operation: if the sequence's
/// first and last coordinates differ, the first is appended. A valid ring
/// has at least four coordinates (three distinct vertices) and no interior
/// self-intersection; as with the other variants, full validity is checked
/// by the validation operations, not enforced structurally.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearRing(LineString);

impl LinearRing {
    pub fn new(mut seq: CoordSeq) -> Self {
        seq.close_ring();
        LinearRing(LineString::new(seq))
    }

    pub fn empty() -> Self {
        LinearRing(LineString::empty())
    }

    pub fn from_xy(coords: impl IntoIterator<Item = (f64, f64)>) -> Self {
        LinearRing::new(CoordSeq::from_xy(coords))
    }

    #[inline]
    pub fn seq(&self) -> &CoordSeq {
        self.0.seq()
    }

    #[inline]
    pub fn coords(&self) -> &[Coord] {
        self.0.coords()
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.0.num_points()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.0.lines()
    }

    pub fn envelope(&self) -> Envelope {
        self.0.envelope()
    }

    pub fn reversed(&self) -> LinearRing {
        LinearRing(self.0.reversed())
    }

    /// View the ring as a (closed) line string.
    #[inline]
    pub fn as_line_string(&self) -> &LineString {
        &self.0
    }

    pub fn into_line_string(self) -> LineString {
        self.0
    }
}

impl From<LinearRing> for LineString {
    fn from(ring: LinearRing) -> Self {
        ring.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn construction_closes_the_ring() {
        let ring = LinearRing::from_xy([(0., 0.), (1., 0.), (1., 1.)]);
        assert_eq!(ring.num_points(), 4);
        assert_eq!(ring.coords().first(), ring.coords().last());
    }

    #[test]
    fn closed_input_is_untouched() {
        let ring = LinearRing::from_xy([(0., 0.), (1., 0.), (1., 1.), (0., 0.)]);
        assert_eq!(ring.num_points(), 4);
    }
}
