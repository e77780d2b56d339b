use planar_types::{Coord, Envelope};

/// A monotone chain: a maximal contiguous run of a vertex sequence in
/// which both X and Y are monotonic.
///
/// Monotonicity buys two properties the overlap search exploits:
///
/// 1. the envelope of any sub-run is exactly the envelope of its end
///    points, so no interior scan is ever needed;
/// 2. a chain cannot intersect itself.
///
/// Chains refer to their parent sequence by index range, and carry the
/// parent's identity as client data, so intersections found between
/// chains can be reported against the right source.
#[derive(Debug, Clone)]
pub struct MonotoneChain {
    /// Identifier of the parent sequence, assigned by the caller.
    pub parent: usize,
    /// First vertex index of the run.
    pub start: usize,
    /// Last vertex index of the run (inclusive; the run covers segments
    /// `start..end`).
    pub end: usize,
    envelope: Envelope,
}

impl MonotoneChain {
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Pairwise segment overlap search between two chains:
    /// envelope filter-then-refine by recursive halving. `action` receives
    /// candidate segment index pairs `(this_segment, other_segment)`.
    pub fn compute_overlaps(
        &self,
        coords: &[Coord],
        other: &MonotoneChain,
        other_coords: &[Coord],
        action: &mut impl FnMut(usize, usize),
    ) {
        overlap_ranges(
            coords,
            self.start,
            self.end,
            other_coords,
            other.start,
            other.end,
            action,
        );
    }
}

fn sub_envelope(coords: &[Coord], start: usize, end: usize) -> Envelope {
    // monotone: the extrema are at the run's end points
    Envelope::from_corners(coords[start], coords[end])
}

#[allow(clippy::too_many_arguments)]
fn overlap_ranges(
    coords0: &[Coord],
    start0: usize,
    end0: usize,
    coords1: &[Coord],
    start1: usize,
    end1: usize,
    action: &mut impl FnMut(usize, usize),
) {
    // single segment on each side: report the candidate pair
    if end0 - start0 == 1 && end1 - start1 == 1 {
        action(start0, start1);
        return;
    }
    if !sub_envelope(coords0, start0, end0).intersects(&sub_envelope(coords1, start1, end1)) {
        return;
    }

    // split the longer-range chain at its midpoint
    let mid0 = (start0 + end0) / 2;
    let mid1 = (start1 + end1) / 2;
    if end0 - start0 > 1 {
        if end1 - start1 > 1 {
            overlap_ranges(coords0, start0, mid0, coords1, start1, mid1, action);
            overlap_ranges(coords0, start0, mid0, coords1, mid1, end1, action);
            overlap_ranges(coords0, mid0, end0, coords1, start1, mid1, action);
            overlap_ranges(coords0, mid0, end0, coords1, mid1, end1, action);
        } else {
            overlap_ranges(coords0, start0, mid0, coords1, start1, end1, action);
            overlap_ranges(coords0, mid0, end0, coords1, start1, end1, action);
        }
    } else {
        overlap_ranges(coords0, start0, end0, coords1, start1, mid1, action);
        overlap_ranges(coords0, start0, end0, coords1, mid1, end1, action);
    }
}

/// Decompose a vertex sequence into its maximal monotone chains.
pub fn build_chains(coords: &[Coord], parent: usize) -> Vec<MonotoneChain> {
    let mut chains = Vec::new();
    if coords.len() < 2 {
        return chains;
    }
    let mut start = 0;
    while start < coords.len() - 1 {
        let end = find_chain_end(coords, start);
        chains.push(MonotoneChain {
            parent,
            start,
            end,
            envelope: sub_envelope(coords, start, end),
        });
        start = end;
    }
    chains
}

/// Index of the last vertex of the monotone run beginning at `start`.
fn find_chain_end(coords: &[Coord], start: usize) -> usize {
    // skip any leading repeated points to establish the sector
    let mut safe_start = start;
    while safe_start < coords.len() - 1 && coords[safe_start] == coords[safe_start + 1] {
        safe_start += 1;
    }
    if safe_start >= coords.len() - 1 {
        return coords.len() - 1;
    }

    let chain_sector = segment_sector(coords[safe_start], coords[safe_start + 1]);
    let mut last = start + 1;
    while last < coords.len() {
        let prev = coords[last - 1];
        let curr = coords[last];
        if prev != curr && segment_sector(prev, curr) != chain_sector {
            break;
        }
        last += 1;
    }
    last - 1
}

fn segment_sector(from: Coord, to: Coord) -> u8 {
    crate::utils::sector(to.x - from.x, to.y - from.y)
}
