use crate::algorithm::orientation::{orient2d, Orientation};
use float_next_after::NextAfter;
use planar_types::{Coord, Envelope};

/// Half-width of a hot pixel, in scaled (grid) units.
const PIXEL_HALF: f64 = 0.5;

/// A unit square centred on a grid point in scaled space.
///
/// Any segment passing through a hot pixel must be snapped to its centre.
/// The pixel is half-open (`[c - 0.5, c + 0.5)` on each axis), so a point
/// on a shared pixel edge belongs to exactly one pixel; the crossing test
/// for segments is closed and may over-report, which only ever adds a
/// redundant collinear snap vertex.
#[derive(Clone, Copy, Debug)]
pub struct HotPixel {
    centre: Coord,
}

impl HotPixel {
    pub fn new(centre: Coord) -> Self {
        HotPixel { centre }
    }

    #[inline]
    pub fn centre(&self) -> Coord {
        self.centre
    }

    /// The envelope a segment index must be queried with so that no
    /// snappable segment is missed: the pixel expanded to `√2/2`
    /// (the pixel's circumradius), nudged up one ulp.
    pub fn safe_envelope(&self) -> Envelope {
        let safe_half = (PIXEL_HALF * std::f64::consts::SQRT_2).next_after(f64::INFINITY);
        Envelope::of(self.centre).expanded_by(safe_half)
    }

    fn contains_point(&self, coord: Coord) -> bool {
        coord.x >= self.centre.x - PIXEL_HALF
            && coord.x < self.centre.x + PIXEL_HALF
            && coord.y >= self.centre.y - PIXEL_HALF
            && coord.y < self.centre.y + PIXEL_HALF
    }

    /// Whether the segment `p0 -> p1` passes through this pixel.
    pub fn intersects_segment(&self, p0: Coord, p1: Coord) -> bool {
        let pixel_env = Envelope::of(self.centre).expanded_by(PIXEL_HALF);
        if !pixel_env.intersects(&Envelope::from_corners(p0, p1)) {
            return false;
        }
        if self.contains_point(p0) || self.contains_point(p1) {
            return true;
        }
        if p0 == p1 {
            return false;
        }

        // all four pixel corners strictly on one side means no crossing
        let corners = [
            Coord::new(self.centre.x - PIXEL_HALF, self.centre.y - PIXEL_HALF),
            Coord::new(self.centre.x + PIXEL_HALF, self.centre.y - PIXEL_HALF),
            Coord::new(self.centre.x + PIXEL_HALF, self.centre.y + PIXEL_HALF),
            Coord::new(self.centre.x - PIXEL_HALF, self.centre.y + PIXEL_HALF),
        ];
        let mut has_cw = false;
        let mut has_ccw = false;
        for corner in corners {
            match orient2d(p0, p1, corner) {
                Orientation::Clockwise => has_cw = true,
                Orientation::CounterClockwise => has_ccw = true,
                Orientation::Collinear => return true,
            }
        }
        has_cw && has_ccw
    }
}
