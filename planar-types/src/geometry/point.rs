use crate::{Coord, Envelope};

/// A single point, or the empty point (`POINT EMPTY`).
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point(pub Option<Coord>);

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Point(Some(Coord::new(x, y)))
    }

    #[inline]
    pub fn empty() -> Self {
        Point(None)
    }

    #[inline]
    pub fn coord(&self) -> Option<Coord> {
        self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    #[inline]
    pub fn x(&self) -> Option<f64> {
        self.0.map(|c| c.x)
    }

    #[inline]
    pub fn y(&self) -> Option<f64> {
        self.0.map(|c| c.y)
    }

    pub fn envelope(&self) -> Envelope {
        match self.0 {
            Some(coord) => Envelope::of(coord),
            None => Envelope::null(),
        }
    }
}

impl From<Coord> for Point {
    fn from(coord: Coord) -> Self {
        Point(Some(coord))
    }
}

impl From<(f64, f64)> for Point {
    fn from(coords: (f64, f64)) -> Self {
        Point(Some(coords.into()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_point() {
        let p = Point::empty();
        assert!(p.is_empty());
        assert!(p.envelope().is_null());
        assert_eq!(p.x(), None);
    }

    #[test]
    fn point_envelope_is_degenerate() {
        let p = Point::new(3., 4.);
        assert_eq!(p.envelope(), Envelope::from_bounds(3., 4., 3., 4.));
    }
}
