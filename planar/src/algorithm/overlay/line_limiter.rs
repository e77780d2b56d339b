use planar_types::{Coord, Envelope, Line};

/// Limits the extent of line inputs to a rectangle, breaking them into
/// sections.
///
/// Unlike ring clipping this never inserts new vertices: a section keeps
/// every segment whose envelope reaches the limit rectangle, including
/// the vertices just outside it, and drops only runs of segments that
/// cannot interact with the result.
pub(crate) struct LineLimiter {
    envelope: Envelope,
}

impl LineLimiter {
    pub fn new(envelope: Envelope) -> Self {
        debug_assert!(!envelope.is_null());
        LineLimiter { envelope }
    }

    pub fn limit(&self, coords: &[Coord]) -> Vec<Vec<Coord>> {
        let mut sections: Vec<Vec<Coord>> = Vec::new();
        let mut current: Vec<Coord> = Vec::new();

        for window in coords.windows(2) {
            let segment = Line::new(window[0], window[1]);
            if self.envelope.intersects(&segment.envelope()) {
                if current.is_empty() {
                    current.push(segment.start);
                }
                current.push(segment.end);
            } else if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            sections.push(current);
        }
        sections
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn coords(points: &[(f64, f64)]) -> Vec<Coord> {
        points.iter().map(|&(x, y)| Coord::new(x, y)).collect()
    }

    #[test]
    fn line_inside_is_one_section() {
        let limiter = LineLimiter::new(Envelope::from_bounds(0., 0., 10., 10.));
        let line = coords(&[(1., 1.), (5., 5.), (9., 1.)]);
        let sections = limiter.limit(&line);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0], line);
    }

    #[test]
    fn excursion_splits_sections() {
        let limiter = LineLimiter::new(Envelope::from_bounds(0., 0., 10., 10.));
        // the middle segments leave the box entirely
        let line = coords(&[
            (1., 1.),
            (5., 5.),
            (50., 50.),
            (60., 50.),
            (50., 40.),
            (5., 1.),
        ]);
        let sections = limiter.limit(&line);
        assert_eq!(sections.len(), 2);
        // crossing segments keep their outside endpoint
        assert_eq!(sections[0].last(), Some(&Coord::new(50., 50.)));
        assert_eq!(sections[1].first(), Some(&Coord::new(50., 40.)));
    }

    #[test]
    fn line_entirely_outside_is_dropped() {
        let limiter = LineLimiter::new(Envelope::from_bounds(0., 0., 10., 10.));
        let line = coords(&[(50., 50.), (60., 60.)]);
        assert!(limiter.limit(&line).is_empty());
    }
}
