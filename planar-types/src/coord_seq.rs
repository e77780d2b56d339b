use crate::{Coord, Line};

/// The dimensional shape shared by every coordinate in a [`CoordSeq`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordShape {
    XY,
    XYZ,
    XYM,
    XYZM,
}

impl CoordShape {
    #[inline]
    pub fn has_z(&self) -> bool {
        matches!(self, CoordShape::XYZ | CoordShape::XYZM)
    }

    #[inline]
    pub fn has_m(&self) -> bool {
        matches!(self, CoordShape::XYM | CoordShape::XYZM)
    }
}

impl Default for CoordShape {
    fn default() -> Self {
        CoordShape::XY
    }
}

/// An ordered sequence of [`Coord`]s sharing a common shape.
///
/// This is the canonical container for a line's vertices and the backing
/// store for ring boundaries. Coordinates pushed into the sequence are
/// normalized to the sequence shape: attributes the shape does not carry
/// are replaced by NaN.
///
/// Mutation is permitted only while the containing geometry is being
/// built; geometries are immutable after construction.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordSeq {
    shape: CoordShape,
    coords: Vec<Coord>,
}

impl CoordSeq {
    pub fn new(shape: CoordShape) -> Self {
        CoordSeq {
            shape,
            coords: Vec::new(),
        }
    }

    pub fn with_capacity(shape: CoordShape, capacity: usize) -> Self {
        CoordSeq {
            shape,
            coords: Vec::with_capacity(capacity),
        }
    }

    /// Build a sequence from raw coordinates, normalizing each to `shape`.
    pub fn from_coords(shape: CoordShape, coords: impl IntoIterator<Item = Coord>) -> Self {
        let iter = coords.into_iter();
        let mut seq = CoordSeq::with_capacity(shape, iter.size_hint().0);
        for coord in iter {
            seq.push(coord);
        }
        seq
    }

    /// An XY sequence from `(x, y)` pairs.
    pub fn from_xy(coords: impl IntoIterator<Item = (f64, f64)>) -> Self {
        CoordSeq::from_coords(
            CoordShape::XY,
            coords.into_iter().map(|(x, y)| Coord::new(x, y)),
        )
    }

    #[inline]
    pub fn shape(&self) -> CoordShape {
        self.shape
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Coord> {
        self.coords.get(index)
    }

    #[inline]
    pub fn first(&self) -> Option<&Coord> {
        self.coords.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&Coord> {
        self.coords.last()
    }

    #[inline]
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coord> {
        self.coords.iter()
    }

    /// Iterate over the sequence's segments.
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.coords.windows(2).map(|w| Line::new(w[0], w[1]))
    }

    /// Append a coordinate, normalized to the sequence shape.
    pub fn push(&mut self, mut coord: Coord) {
        if !self.shape.has_z() {
            coord.z = f64::NAN;
        }
        if !self.shape.has_m() {
            coord.m = f64::NAN;
        }
        self.coords.push(coord);
    }

    /// Reverse the order of the coordinates in place.
    pub fn reverse(&mut self) {
        self.coords.reverse();
    }

    pub fn reversed(&self) -> CoordSeq {
        let mut seq = self.clone();
        seq.reverse();
        seq
    }

    /// Copy the subrange `[start, end)` into a new sequence of the same
    /// shape.
    pub fn copy_range(&self, start: usize, end: usize) -> CoordSeq {
        CoordSeq {
            shape: self.shape,
            coords: self.coords[start..end].to_vec(),
        }
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        match (self.coords.first(), self.coords.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    /// Append the first coordinate if the sequence is not already a closed
    /// ring. Empty sequences are left alone.
    pub fn close_ring(&mut self) {
        if !self.is_empty() && !self.is_closed() {
            let first = self.coords[0];
            self.coords.push(first);
        }
    }

    /// Drop exactly-repeated consecutive coordinates.
    pub fn remove_repeated_points(&mut self) {
        self.coords.dedup();
    }

    pub fn into_coords(self) -> Vec<Coord> {
        self.coords
    }
}

impl std::ops::Index<usize> for CoordSeq {
    type Output = Coord;

    #[inline]
    fn index(&self, index: usize) -> &Coord {
        &self.coords[index]
    }
}

impl<'a> IntoIterator for &'a CoordSeq {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.coords.iter()
    }
}

impl FromIterator<Coord> for CoordSeq {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        CoordSeq::from_coords(CoordShape::XY, iter)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn push_normalizes_to_shape() {
        let mut seq = CoordSeq::new(CoordShape::XY);
        seq.push(Coord::xyzm(1., 2., 3., 4.));
        assert!(!seq[0].has_z());
        assert!(!seq[0].has_m());

        let mut seq = CoordSeq::new(CoordShape::XYZ);
        seq.push(Coord::xyzm(1., 2., 3., 4.));
        assert_eq!(seq[0].z, 3.);
        assert!(!seq[0].has_m());
    }

    #[test]
    fn close_ring_appends_first() {
        let mut seq = CoordSeq::from_xy([(0., 0.), (1., 0.), (1., 1.)]);
        assert!(!seq.is_closed());
        seq.close_ring();
        assert!(seq.is_closed());
        assert_eq!(seq.len(), 4);

        // closing a closed ring is a no-op
        seq.close_ring();
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn copy_range_preserves_shape() {
        let seq = CoordSeq::from_coords(
            CoordShape::XYZ,
            [Coord::xyz(0., 0., 1.), Coord::xyz(1., 1., 2.), Coord::xyz(2., 2., 3.)],
        );
        let sub = seq.copy_range(1, 3);
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.shape(), CoordShape::XYZ);
        assert_eq!(sub[0].z, 2.);
    }

    #[test]
    fn reverse_round_trips() {
        let seq = CoordSeq::from_xy([(0., 0.), (1., 0.), (2., 5.)]);
        assert_eq!(seq.reversed().reversed(), seq);
    }
}
