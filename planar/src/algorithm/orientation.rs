use planar_types::{Coord, CoordSeq};

/// The orientation of a triple of points in the plane.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

impl Orientation {
    /// The conventional index form: +1 for CCW, -1 for CW, 0 for collinear.
    #[inline]
    pub fn index(&self) -> i32 {
        match self {
            Orientation::CounterClockwise => 1,
            Orientation::Clockwise => -1,
            Orientation::Collinear => 0,
        }
    }
}

/// The orientation of `r` relative to the directed line `p -> q`.
///
/// Exact for all finite double inputs: the filtered determinant is
/// recomputed in adaptive extended precision whenever the fast path is
/// within rounding error of zero, so `Collinear` is returned only when the
/// signed area is exactly zero.
pub fn orient2d(p: Coord, q: Coord, r: Coord) -> Orientation {
    let orientation = robust::orient2d(
        robust::Coord { x: p.x, y: p.y },
        robust::Coord { x: q.x, y: q.y },
        robust::Coord { x: r.x, y: r.y },
    );

    if orientation > 0. {
        Orientation::CounterClockwise
    } else if orientation < 0. {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Whether a closed ring is wound counter-clockwise, in Cartesian
/// convention (CCW is the positive orientation).
///
/// Determined robustly from the orientation at the lowest-then-rightmost
/// vertex, never from inexact area sums. Returns `None` for degenerate
/// rings (fewer than 3 distinct vertices, or all collinear).
pub fn is_ccw(ring: &CoordSeq) -> bool {
    winding(ring.coords()) == Some(Orientation::CounterClockwise)
}

pub(crate) fn winding(coords: &[Coord]) -> Option<Orientation> {
    // ignore the closing coordinate
    let coords = match coords.split_last() {
        Some((last, rest)) if !rest.is_empty() && *last == rest[0] => rest,
        _ => coords,
    };
    if coords.len() < 3 {
        return None;
    }

    // index of the lowest vertex; rightmost on a tie
    let mut hip = 0;
    for (i, coord) in coords.iter().enumerate() {
        let best = &coords[hip];
        if coord.y < best.y || (coord.y == best.y && coord.x > best.x) {
            hip = i;
        }
    }

    // sweep outward from the extremal vertex past any duplicates
    let n = coords.len();
    let mut prev = (hip + n - 1) % n;
    while coords[prev] == coords[hip] {
        if prev == hip {
            // all vertices identical
            return None;
        }
        prev = (prev + n - 1) % n;
    }
    let mut next = (hip + 1) % n;
    while coords[next] == coords[hip] {
        next = (next + 1) % n;
    }

    match orient2d(coords[prev], coords[hip], coords[next]) {
        Orientation::Collinear => None,
        orientation => Some(orientation),
    }
}
