use crate::{Coord, Envelope};

/// A single line segment between two coordinates.
///
/// `Line` is a working primitive for segment-level algorithms (intersection
/// tests, chain refinement, distance), not a member of the geometry
/// hierarchy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub start: Coord,
    pub end: Coord,
}

impl Line {
    #[inline]
    pub fn new(start: Coord, end: Coord) -> Self {
        Line { start, end }
    }

    #[inline]
    pub fn delta(&self) -> Coord {
        self.end - self.start
    }

    #[inline]
    pub fn dx(&self) -> f64 {
        self.end.x - self.start.x
    }

    #[inline]
    pub fn dy(&self) -> f64 {
        self.end.y - self.start.y
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    #[inline]
    pub fn envelope(&self) -> Envelope {
        Envelope::from_corners(self.start, self.end)
    }

    #[inline]
    pub fn reversed(&self) -> Line {
        Line::new(self.end, self.start)
    }

    /// Midpoint of the segment in the XY plane.
    #[inline]
    pub fn midpoint(&self) -> Coord {
        Coord::new(
            (self.start.x + self.end.x) / 2.,
            (self.start.y + self.end.y) / 2.,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn basics() {
        let line = Line::new(Coord::new(0., 0.), Coord::new(3., 4.));
        assert_eq!(line.length(), 5.);
        assert_eq!(line.midpoint(), Coord::new(1.5, 2.));
        assert_eq!(line.reversed().start, line.end);
    }
}
