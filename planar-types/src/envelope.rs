use crate::Coord;

/// An axis-aligned rectangle `[min_x, max_x] × [min_y, max_y]`, with a
/// *null* state representing the envelope of an empty geometry.
///
/// All predicates treat the null envelope as disjoint from everything,
/// including itself.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Envelope {
    bounds: Option<Bounds>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Envelope {
    /// The null envelope.
    #[inline]
    pub fn null() -> Self {
        Envelope { bounds: None }
    }

    /// The degenerate envelope of a single coordinate.
    #[inline]
    pub fn of(coord: Coord) -> Self {
        Envelope::from_bounds(coord.x, coord.y, coord.x, coord.y)
    }

    /// The envelope spanned by two corner coordinates, in any order.
    pub fn from_corners(a: Coord, b: Coord) -> Self {
        Envelope::from_bounds(
            a.x.min(b.x),
            a.y.min(b.y),
            a.x.max(b.x),
            a.y.max(b.y),
        )
    }

    pub fn from_bounds(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        debug_assert!(min_x <= max_x && min_y <= max_y);
        Envelope {
            bounds: Some(Bounds {
                min_x,
                min_y,
                max_x,
                max_y,
            }),
        }
    }

    /// The envelope of a set of coordinates; null if the set is empty.
    pub fn of_coords<'a>(coords: impl IntoIterator<Item = &'a Coord>) -> Self {
        let mut env = Envelope::null();
        for coord in coords {
            env.expand_to_include(*coord);
        }
        env
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.bounds.is_none()
    }

    /// Accessors return NaN on the null envelope.
    #[inline]
    pub fn min_x(&self) -> f64 {
        self.bounds.map_or(f64::NAN, |b| b.min_x)
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.bounds.map_or(f64::NAN, |b| b.min_y)
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.bounds.map_or(f64::NAN, |b| b.max_x)
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.bounds.map_or(f64::NAN, |b| b.max_y)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.bounds.map_or(0., |b| b.max_x - b.min_x)
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bounds.map_or(0., |b| b.max_y - b.min_y)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// The largest of width and height.
    #[inline]
    pub fn diameter(&self) -> f64 {
        self.width().max(self.height())
    }

    pub fn centre(&self) -> Option<Coord> {
        self.bounds.map(|b| {
            Coord::new((b.min_x + b.max_x) / 2., (b.min_y + b.max_y) / 2.)
        })
    }

    pub fn expand_to_include(&mut self, coord: Coord) {
        match &mut self.bounds {
            None => {
                self.bounds = Some(Bounds {
                    min_x: coord.x,
                    min_y: coord.y,
                    max_x: coord.x,
                    max_y: coord.y,
                });
            }
            Some(b) => {
                b.min_x = b.min_x.min(coord.x);
                b.min_y = b.min_y.min(coord.y);
                b.max_x = b.max_x.max(coord.x);
                b.max_y = b.max_y.max(coord.y);
            }
        }
    }

    pub fn expand_to_include_envelope(&mut self, other: &Envelope) {
        if let Some(o) = other.bounds {
            self.expand_to_include(Coord::new(o.min_x, o.min_y));
            self.expand_to_include(Coord::new(o.max_x, o.max_y));
        }
    }

    /// Grow (or shrink, for negative `distance`) the envelope on all sides.
    ///
    /// Shrinking past a degenerate extent nulls the envelope.
    pub fn expand_by(&mut self, distance: f64) {
        if let Some(b) = &mut self.bounds {
            b.min_x -= distance;
            b.min_y -= distance;
            b.max_x += distance;
            b.max_y += distance;
            if b.min_x > b.max_x || b.min_y > b.max_y {
                self.bounds = None;
            }
        }
    }

    pub fn expanded_by(&self, distance: f64) -> Envelope {
        let mut env = *self;
        env.expand_by(distance);
        env
    }

    pub fn intersects(&self, other: &Envelope) -> bool {
        match (self.bounds, other.bounds) {
            (Some(a), Some(b)) => {
                a.min_x <= b.max_x && a.max_x >= b.min_x && a.min_y <= b.max_y && a.max_y >= b.min_y
            }
            _ => false,
        }
    }

    pub fn intersects_coord(&self, coord: Coord) -> bool {
        match self.bounds {
            Some(b) => {
                coord.x >= b.min_x && coord.x <= b.max_x && coord.y >= b.min_y && coord.y <= b.max_y
            }
            None => false,
        }
    }

    /// Every point of `other` is a point of `self`. Identical to
    /// [`covers`](Envelope::covers) for envelopes.
    pub fn contains(&self, other: &Envelope) -> bool {
        self.covers(other)
    }

    pub fn contains_coord(&self, coord: Coord) -> bool {
        self.intersects_coord(coord)
    }

    pub fn covers(&self, other: &Envelope) -> bool {
        match (self.bounds, other.bounds) {
            (Some(a), Some(b)) => {
                b.min_x >= a.min_x && b.max_x <= a.max_x && b.min_y >= a.min_y && b.max_y <= a.max_y
            }
            _ => false,
        }
    }

    /// The overlap of two envelopes; null when they are disjoint.
    pub fn intersection(&self, other: &Envelope) -> Envelope {
        match (self.bounds, other.bounds) {
            (Some(a), Some(b)) if self.intersects(other) => Envelope::from_bounds(
                a.min_x.max(b.min_x),
                a.min_y.max(b.min_y),
                a.max_x.min(b.max_x),
                a.max_y.min(b.max_y),
            ),
            _ => Envelope::null(),
        }
    }

    /// Minimum distance between the two rectangles; 0 if they intersect,
    /// NaN if either is null.
    pub fn distance(&self, other: &Envelope) -> f64 {
        let (a, b) = match (self.bounds, other.bounds) {
            (Some(a), Some(b)) => (a, b),
            _ => return f64::NAN,
        };
        let dx = if a.max_x < b.min_x {
            b.min_x - a.max_x
        } else if b.max_x < a.min_x {
            a.min_x - b.max_x
        } else {
            0.
        };
        let dy = if a.max_y < b.min_y {
            b.min_y - a.max_y
        } else if b.max_y < a.min_y {
            a.min_y - b.max_y
        } else {
            0.
        };
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn null_envelope_is_disjoint_from_everything() {
        let null = Envelope::null();
        let unit = Envelope::from_bounds(0., 0., 1., 1.);
        assert!(!null.intersects(&unit));
        assert!(!unit.intersects(&null));
        assert!(!null.intersects(&null));
        assert!(!null.covers(&unit));
        assert!(!unit.covers(&null));
    }

    #[test]
    fn expand_to_include() {
        let mut env = Envelope::null();
        env.expand_to_include(Coord::new(1., 2.));
        assert_eq!(env, Envelope::from_bounds(1., 2., 1., 2.));
        env.expand_to_include(Coord::new(-1., 5.));
        assert_eq!(env, Envelope::from_bounds(-1., 2., 1., 5.));
    }

    #[test]
    fn intersects_boundary_touch() {
        let a = Envelope::from_bounds(0., 0., 1., 1.);
        let b = Envelope::from_bounds(1., 1., 2., 2.);
        assert!(a.intersects(&b));
        assert!(a.intersects_coord(Coord::new(1., 0.5)));
        assert!(!a.intersects_coord(Coord::new(1.01, 0.5)));
    }

    #[test]
    fn distance_between_envelopes() {
        let a = Envelope::from_bounds(0., 0., 1., 1.);
        let b = Envelope::from_bounds(4., 5., 6., 7.);
        assert_eq!(a.distance(&b), 5.);
        assert_eq!(a.distance(&a), 0.);
    }

    #[test]
    fn shrink_to_null() {
        let mut env = Envelope::from_bounds(0., 0., 1., 1.);
        env.expand_by(-2.);
        assert!(env.is_null());
    }
}
