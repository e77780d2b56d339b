use super::{IntersectionAdder, NodedSegmentString, Noder, SegmentString};
use crate::index::chain::{build_chains, MonotoneChain};
use crate::index::StrTree;
use crate::interrupt::check_interrupt;
use planar_types::Result;

/// The default noder: monotone chains in an STR-tree prune the candidate
/// pairs, and every surviving pair goes through the robust intersector.
///
/// The output is split at every recorded intersection; it is *not*
/// revalidated here — drivers that need a guarantee run
/// [`validate_noding`](super::validate_noding) and escalate to snap
/// rounding on failure.
pub struct McIndexNoder;

impl Default for McIndexNoder {
    fn default() -> Self {
        McIndexNoder
    }
}

impl McIndexNoder {
    pub fn new() -> Self {
        McIndexNoder
    }

    /// Run the chain/index sweep, feeding every candidate pair to
    /// `adder`. Exposed for the snap-rounding noder, which reuses the
    /// sweep to seed hot pixels.
    pub(crate) fn compute_intersections<D>(
        strings: &mut [NodedSegmentString<D>],
        adder: &mut IntersectionAdder,
    ) -> Result<()> {
        let mut chains: Vec<MonotoneChain> = Vec::new();
        for (index, string) in strings.iter().enumerate() {
            chains.extend(build_chains(string.coords(), index));
        }

        let mut tree = StrTree::new();
        for (chain_index, chain) in chains.iter().enumerate() {
            tree.insert(*chain.envelope(), chain_index)?;
        }

        // candidate pairs are collected first: the chain overlap search
        // borrows the vertex data the adder will mutate
        let mut candidates: Vec<(usize, usize, usize, usize)> = Vec::new();
        for (chain_index, chain) in chains.iter().enumerate() {
            check_interrupt()?;
            for &other_index in tree.query_items(chain.envelope()) {
                // each unordered pair once; a chain never crosses itself
                if other_index <= chain_index {
                    continue;
                }
                let other = &chains[other_index];
                chain.compute_overlaps(
                    strings[chain.parent].coords(),
                    other,
                    strings[other.parent].coords(),
                    &mut |segment_0, segment_1| {
                        candidates.push((chain.parent, segment_0, other.parent, segment_1));
                    },
                );
            }
        }

        for (string_0, segment_0, string_1, segment_1) in candidates {
            adder.process_candidate(strings, string_0, segment_0, string_1, segment_1);
        }
        Ok(())
    }
}

impl<D: Clone> Noder<D> for McIndexNoder {
    fn node(&self, input: &[SegmentString<D>]) -> Result<Vec<SegmentString<D>>> {
        let mut strings: Vec<NodedSegmentString<D>> = input
            .iter()
            .filter(|string| string.coords().len() >= 2)
            .cloned()
            .map(NodedSegmentString::new)
            .collect();

        let mut adder = IntersectionAdder::new();
        Self::compute_intersections(&mut strings, &mut adder)?;

        Ok(strings
            .into_iter()
            .flat_map(NodedSegmentString::split)
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use planar_types::Coord;

    fn string(points: &[(f64, f64)], data: u32) -> SegmentString<u32> {
        SegmentString::new(
            points.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
            data,
        )
    }

    #[test]
    fn crossing_lines_are_split_at_the_crossing() {
        let input = vec![
            string(&[(0., 0.), (10., 10.)], 1),
            string(&[(10., 0.), (0., 10.)], 2),
        ];
        let noded = McIndexNoder::new().node(&input).unwrap();
        assert_eq!(noded.len(), 4);
        // every piece ends or starts at the crossing point
        let crossing = Coord::new(5., 5.);
        for piece in &noded {
            assert!(
                *piece.coords().first().unwrap() == crossing
                    || *piece.coords().last().unwrap() == crossing
            );
        }
        // provenance is preserved
        assert_eq!(noded.iter().filter(|s| *s.data() == 1).count(), 2);
        assert_eq!(noded.iter().filter(|s| *s.data() == 2).count(), 2);
    }

    #[test]
    fn t_junction_splits_the_stem() {
        let input = vec![
            string(&[(0., 0.), (10., 0.)], 1),
            string(&[(5., 0.), (5., 5.)], 2),
        ];
        let noded = McIndexNoder::new().node(&input).unwrap();
        // the horizontal is split; the vertical is not
        assert_eq!(noded.len(), 3);
    }

    #[test]
    fn collinear_overlap_is_noded_at_overlap_ends() {
        let input = vec![
            string(&[(0., 0.), (10., 0.)], 1),
            string(&[(5., 0.), (15., 0.)], 2),
        ];
        let noded = McIndexNoder::new().node(&input).unwrap();
        // first: [0,5],[5,10]; second: [5,10],[10,15]
        assert_eq!(noded.len(), 4);
    }

    #[test]
    fn self_intersecting_string_is_split() {
        let input = vec![string(&[(0., 0.), (10., 10.), (10., 0.), (0., 10.)], 1)];
        let noded = McIndexNoder::new().node(&input).unwrap();
        assert_eq!(noded.len(), 4);
        assert!(super::super::validate_noding(&noded).is_ok());
    }

    #[test]
    fn disjoint_input_passes_through() {
        let input = vec![
            string(&[(0., 0.), (1., 1.)], 1),
            string(&[(5., 5.), (6., 6.)], 2),
        ];
        let noded = McIndexNoder::new().node(&input).unwrap();
        assert_eq!(noded.len(), 2);
    }

    #[test]
    fn random_arrangement_nodes_cleanly() {
        use rand::{Rng, SeedableRng};
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let input: Vec<SegmentString<usize>> = (0..30)
            .map(|i| {
                SegmentString::new(
                    vec![
                        Coord::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)),
                        Coord::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)),
                    ],
                    i,
                )
            })
            .collect();
        let noded = McIndexNoder::new().node(&input).unwrap();
        assert!(super::super::validate_noding(&noded).is_ok());
    }
}
