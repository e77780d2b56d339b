use planar_types::{Coord, Envelope};

/// Clips rings to an axis-parallel rectangle, one box edge at a time
/// (Sutherland–Hodgman).
///
/// The clip rectangle must lie outside the result region: clipping
/// inserts vertices only where the box boundary crosses an edge, so the
/// clipped ring encloses exactly the part of the original region within
/// the box, and the synthetic box-edge segments can never carry result
/// boundary.
pub(crate) struct RingClipper {
    envelope: Envelope,
}

/// Box edges in clip order.
const BOX_BOTTOM: usize = 0;
const BOX_RIGHT: usize = 1;
const BOX_TOP: usize = 2;
const BOX_LEFT: usize = 3;

impl RingClipper {
    pub fn new(envelope: Envelope) -> Self {
        debug_assert!(!envelope.is_null());
        RingClipper { envelope }
    }

    /// Clip a closed ring; the output is closed (or empty).
    pub fn clip(&self, ring: &[Coord]) -> Vec<Coord> {
        let mut points = ring.to_vec();
        for box_edge in 0..4 {
            let close_ring = box_edge == 3;
            if points.is_empty() {
                break;
            }
            points = self.clip_to_box_edge(&points, box_edge, close_ring);
        }
        points.dedup();
        points
    }

    fn clip_to_box_edge(&self, points: &[Coord], box_edge: usize, close_ring: bool) -> Vec<Coord> {
        let mut clipped: Vec<Coord> = Vec::with_capacity(points.len());

        let mut p0 = *points.last().expect("non-empty by caller");
        for &p1 in points {
            if self.is_inside_edge(p1, box_edge) {
                if !self.is_inside_edge(p0, box_edge) {
                    clipped.push(self.intersection(p0, p1, box_edge));
                }
                clipped.push(p1);
            } else if self.is_inside_edge(p0, box_edge) {
                clipped.push(self.intersection(p0, p1, box_edge));
            }
            // a segment wholly outside the box edge is dropped
            p0 = p1;
        }

        if close_ring && !clipped.is_empty() && clipped.first() != clipped.last() {
            let first = clipped[0];
            clipped.push(first);
        }
        clipped
    }

    fn is_inside_edge(&self, p: Coord, box_edge: usize) -> bool {
        match box_edge {
            BOX_BOTTOM => p.y > self.envelope.min_y(),
            BOX_RIGHT => p.x < self.envelope.max_x(),
            BOX_TOP => p.y < self.envelope.max_y(),
            BOX_LEFT => p.x > self.envelope.min_x(),
            _ => unreachable!("invalid box edge index"),
        }
    }

    /// The intersection of segment `a -> b` with the (axis-parallel) box
    /// edge, computed by direct interpolation along the segment.
    fn intersection(&self, a: Coord, b: Coord, box_edge: usize) -> Coord {
        match box_edge {
            BOX_BOTTOM => {
                let clip_y = self.envelope.min_y();
                Coord::new(intercept_x(a, b, clip_y), clip_y)
            }
            BOX_TOP => {
                let clip_y = self.envelope.max_y();
                Coord::new(intercept_x(a, b, clip_y), clip_y)
            }
            BOX_LEFT => {
                let clip_x = self.envelope.min_x();
                Coord::new(clip_x, intercept_y(a, b, clip_x))
            }
            BOX_RIGHT => {
                let clip_x = self.envelope.max_x();
                Coord::new(clip_x, intercept_y(a, b, clip_x))
            }
            _ => unreachable!("invalid box edge index"),
        }
    }
}

fn intercept_x(a: Coord, b: Coord, clip_y: f64) -> f64 {
    a.x + (b.x - a.x) * (clip_y - a.y) / (b.y - a.y)
}

fn intercept_y(a: Coord, b: Coord, clip_x: f64) -> f64 {
    a.y + (b.y - a.y) * (clip_x - a.x) / (b.x - a.x)
}

#[cfg(test)]
mod test {
    use super::*;

    fn coords(points: &[(f64, f64)]) -> Vec<Coord> {
        points.iter().map(|&(x, y)| Coord::new(x, y)).collect()
    }

    #[test]
    fn ring_inside_box_is_unchanged() {
        let clipper = RingClipper::new(Envelope::from_bounds(0., 0., 100., 100.));
        let ring = coords(&[(10., 10.), (20., 10.), (20., 20.), (10., 20.), (10., 10.)]);
        assert_eq!(clipper.clip(&ring), ring);
    }

    #[test]
    fn ring_straddling_box_is_clipped() {
        let clipper = RingClipper::new(Envelope::from_bounds(0., 0., 10., 10.));
        // square extending past the right side of the box
        let ring = coords(&[(5., 2.), (15., 2.), (15., 8.), (5., 8.), (5., 2.)]);
        let clipped = clipper.clip(&ring);
        assert!(clipped.len() >= 5);
        for coord in &clipped {
            assert!(coord.x <= 10.);
        }
        assert_eq!(clipped.first(), clipped.last());
    }

    #[test]
    fn ring_outside_box_vanishes() {
        let clipper = RingClipper::new(Envelope::from_bounds(0., 0., 10., 10.));
        let ring = coords(&[(20., 20.), (30., 20.), (30., 30.), (20., 30.), (20., 20.)]);
        assert!(clipper.clip(&ring).is_empty());
    }

    #[test]
    fn ring_surrounding_box_becomes_the_box() {
        let clipper = RingClipper::new(Envelope::from_bounds(0., 0., 10., 10.));
        let ring = coords(&[(-10., -10.), (20., -10.), (20., 20.), (-10., 20.), (-10., -10.)]);
        let clipped = clipper.clip(&ring);
        let mut env = Envelope::null();
        for coord in &clipped {
            env.expand_to_include(*coord);
        }
        assert_eq!(env, Envelope::from_bounds(0., 0., 10., 10.));
    }
}
