use crate::utils::OrderedFloat;
use planar_types::{Envelope, GeometryError, Result};

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::OnceLock;

const DEFAULT_NODE_CAPACITY: usize = 10;

/// A packed, bulk-loaded R-tree built with the Sort-Tile-Recursive
/// algorithm.
///
/// Items are inserted up-front; the tree builds itself on the first query
/// and is read-only afterwards — inserting into a built tree is an error.
/// Built trees may be shared freely across threads (the lazy build is
/// published through a memory barrier).
///
/// Degenerate inputs are fine: zero-area envelopes, duplicate items, and
/// the empty tree (queries return nothing) are all supported.
pub struct StrTree<T> {
    node_capacity: usize,
    entries: Vec<Entry<T>>,
    built: OnceLock<BuiltTree>,
}

struct Entry<T> {
    envelope: Envelope,
    item: T,
}

struct BuiltTree {
    nodes: Vec<StrNode>,
    root: Option<usize>,
}

struct StrNode {
    envelope: Envelope,
    children: Children,
}

enum Children {
    Items(Vec<usize>),
    Nodes(Vec<usize>),
}

impl<T> Default for StrTree<T> {
    fn default() -> Self {
        StrTree::new()
    }
}

impl<T> StrTree<T> {
    pub fn new() -> Self {
        StrTree::with_node_capacity(DEFAULT_NODE_CAPACITY)
    }

    pub fn with_node_capacity(node_capacity: usize) -> Self {
        assert!(node_capacity > 1, "node capacity must be > 1");
        StrTree {
            node_capacity,
            entries: Vec::new(),
            built: OnceLock::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert an item. Only allowed before the first query.
    pub fn insert(&mut self, envelope: Envelope, item: T) -> Result<()> {
        if self.built.get().is_some() {
            return Err(GeometryError::invalid_argument(
                "cannot insert into an STR-tree after it has been built",
            ));
        }
        if envelope.is_null() {
            return Ok(());
        }
        self.entries.push(Entry { envelope, item });
        Ok(())
    }

    /// Visit every item whose envelope intersects `search`, in the
    /// deterministic packed order.
    pub fn query<'t>(&'t self, search: &Envelope, visitor: &mut impl FnMut(&'t T)) {
        let built = self.build();
        let root = match built.root {
            Some(root) => root,
            None => return,
        };
        let mut stack = vec![root];
        while let Some(node_index) = stack.pop() {
            let node = &built.nodes[node_index];
            if !node.envelope.intersects(search) {
                continue;
            }
            match &node.children {
                Children::Items(items) => {
                    for &item_index in items {
                        if self.entries[item_index].envelope.intersects(search) {
                            visitor(&self.entries[item_index].item);
                        }
                    }
                }
                Children::Nodes(children) => {
                    // reversed so children pop in packed order
                    stack.extend(children.iter().rev());
                }
            }
        }
    }

    pub fn query_items(&self, search: &Envelope) -> Vec<&T> {
        let mut found = Vec::new();
        self.query(search, &mut |item| found.push(item));
        found
    }

    /// The item nearest to `search` under `item_distance`, found by
    /// best-first descent with envelope distance as the lower bound.
    pub fn nearest_neighbour(
        &self,
        search: &Envelope,
        item_distance: impl Fn(&T) -> f64,
    ) -> Option<&T> {
        let built = self.build();
        let root = built.root?;

        #[derive(PartialEq, Eq, PartialOrd, Ord)]
        enum Candidate {
            Node(usize),
            Item(usize),
        }

        let mut queue: BinaryHeap<Reverse<(OrderedFloat, usize, Candidate)>> = BinaryHeap::new();
        let mut tiebreak = 0_usize;
        let mut push = |queue: &mut BinaryHeap<_>, dist: f64, candidate: Candidate| {
            tiebreak += 1;
            queue.push(Reverse((OrderedFloat(dist), tiebreak, candidate)));
        };
        push(
            &mut queue,
            search.distance(&built.nodes[root].envelope),
            Candidate::Node(root),
        );

        while let Some(Reverse((_, _, candidate))) = queue.pop() {
            match candidate {
                Candidate::Item(item_index) => {
                    // items are keyed by exact distance, nodes by a lower
                    // bound, so the first item popped is the nearest
                    return Some(&self.entries[item_index].item);
                }
                Candidate::Node(node_index) => match &built.nodes[node_index].children {
                    Children::Items(items) => {
                        for &item_index in items {
                            let dist = item_distance(&self.entries[item_index].item);
                            push(&mut queue, dist, Candidate::Item(item_index));
                        }
                    }
                    Children::Nodes(children) => {
                        for &child in children {
                            let dist = search.distance(&built.nodes[child].envelope);
                            push(&mut queue, dist, Candidate::Node(child));
                        }
                    }
                },
            }
        }
        None
    }

    /// The closest pair of items between two trees, by simultaneous
    /// best-first descent of both.
    pub fn nearest_neighbour_between<'a, U>(
        &'a self,
        other: &'a StrTree<U>,
        item_distance: impl Fn(&T, &U) -> f64,
    ) -> Option<(&'a T, &'a U)> {
        let built_a = self.build();
        let built_b = other.build();
        let (root_a, root_b) = (built_a.root?, built_b.root?);

        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
        enum Side {
            Node(usize),
            Item(usize),
        }

        fn envelope_of<T>(
            side: Side,
            built: &BuiltTree,
            entries: &[Entry<T>],
        ) -> Envelope {
            match side {
                Side::Node(index) => built.nodes[index].envelope,
                Side::Item(index) => entries[index].envelope,
            }
        }

        let mut queue: BinaryHeap<Reverse<(OrderedFloat, usize, (Side, Side))>> =
            BinaryHeap::new();
        let mut tiebreak = 0_usize;

        macro_rules! push_pair {
            ($queue:expr, $a:expr, $b:expr) => {{
                let (a, b): (Side, Side) = ($a, $b);
                let dist = match (a, b) {
                    (Side::Item(ia), Side::Item(ib)) => {
                        item_distance(&self.entries[ia].item, &other.entries[ib].item)
                    }
                    _ => envelope_of(a, built_a, &self.entries)
                        .distance(&envelope_of(b, built_b, &other.entries)),
                };
                tiebreak += 1;
                $queue.push(Reverse((OrderedFloat(dist), tiebreak, (a, b))));
            }};
        }

        push_pair!(queue, Side::Node(root_a), Side::Node(root_b));

        while let Some(Reverse((_, _, (a, b)))) = queue.pop() {
            match (a, b) {
                (Side::Item(ia), Side::Item(ib)) => {
                    return Some((&self.entries[ia].item, &other.entries[ib].item));
                }
                // expand the composite side with the larger envelope
                (Side::Node(na), Side::Node(nb)) => {
                    if built_a.nodes[na].envelope.area() >= built_b.nodes[nb].envelope.area() {
                        for child in expand(built_a, na) {
                            push_pair!(queue, child, b);
                        }
                    } else {
                        for child in expand(built_b, nb) {
                            push_pair!(queue, a, child);
                        }
                    }
                }
                (Side::Node(na), Side::Item(_)) => {
                    for child in expand(built_a, na) {
                        push_pair!(queue, child, b);
                    }
                }
                (Side::Item(_), Side::Node(nb)) => {
                    for child in expand(built_b, nb) {
                        push_pair!(queue, a, child);
                    }
                }
            }
        }

        fn expand(built: &BuiltTree, node_index: usize) -> Vec<Side> {
            match &built.nodes[node_index].children {
                Children::Items(items) => items.iter().map(|&i| Side::Item(i)).collect(),
                Children::Nodes(nodes) => nodes.iter().map(|&n| Side::Node(n)).collect(),
            }
        }

        None
    }

    fn build(&self) -> &BuiltTree {
        self.built.get_or_init(|| self.build_tree())
    }

    fn build_tree(&self) -> BuiltTree {
        if self.entries.is_empty() {
            return BuiltTree {
                nodes: vec![],
                root: None,
            };
        }

        let mut nodes: Vec<StrNode> = Vec::new();

        // leaf level: pack the items themselves
        let item_indices: Vec<usize> = (0..self.entries.len()).collect();
        let mut level: Vec<usize> = self
            .pack_level(&item_indices, |index| self.entries[*index].envelope)
            .into_iter()
            .map(|(envelope, member_indices)| {
                nodes.push(StrNode {
                    envelope,
                    children: Children::Items(member_indices),
                });
                nodes.len() - 1
            })
            .collect();

        // interior levels
        while level.len() > 1 {
            level = self
                .pack_level(&level, |index| nodes[*index].envelope)
                .into_iter()
                .map(|(envelope, member_indices)| {
                    nodes.push(StrNode {
                        envelope,
                        children: Children::Nodes(member_indices),
                    });
                    nodes.len() - 1
                })
                .collect();
        }

        let root = level.first().copied();
        BuiltTree { nodes, root }
    }

    /// One round of Sort-Tile-Recursive packing: sort by centre X, cut
    /// into vertical slices, sort each slice by centre Y, and chunk into
    /// groups of `node_capacity`.
    fn pack_level(
        &self,
        members: &[usize],
        envelope_of: impl Fn(&usize) -> Envelope,
    ) -> Vec<(Envelope, Vec<usize>)> {
        let mut sorted: Vec<usize> = members.to_vec();
        sorted.sort_by(|a, b| {
            let (ea, eb) = (envelope_of(a), envelope_of(b));
            let ax = ea.min_x() + ea.max_x();
            let bx = eb.min_x() + eb.max_x();
            ax.total_cmp(&bx)
        });

        let node_count = members.len().div_ceil(self.node_capacity);
        let slice_count = (node_count as f64).sqrt().ceil() as usize;
        let slice_capacity = sorted.len().div_ceil(slice_count);

        let mut groups = Vec::with_capacity(node_count);
        for slice in sorted.chunks(slice_capacity) {
            let mut slice: Vec<usize> = slice.to_vec();
            slice.sort_by(|a, b| {
                let (ea, eb) = (envelope_of(a), envelope_of(b));
                let ay = ea.min_y() + ea.max_y();
                let by = eb.min_y() + eb.max_y();
                ay.total_cmp(&by)
            });
            for group in slice.chunks(self.node_capacity) {
                let mut envelope = Envelope::null();
                for member in group {
                    envelope.expand_to_include_envelope(&envelope_of(member));
                }
                groups.push((envelope, group.to_vec()));
            }
        }
        groups
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use planar_types::Coord;

    fn envelope(x1: f64, y1: f64, x2: f64, y2: f64) -> Envelope {
        Envelope::from_bounds(x1, y1, x2, y2)
    }

    #[test]
    fn empty_tree_queries_are_empty() {
        let tree: StrTree<usize> = StrTree::new();
        assert!(tree.query_items(&envelope(0., 0., 100., 100.)).is_empty());
        assert_eq!(tree.nearest_neighbour(&envelope(0., 0., 1., 1.), |_| 0.), None);
    }

    #[test]
    fn query_matches_brute_force() {
        let mut tree = StrTree::new();
        let mut envelopes = Vec::new();
        // deterministic pseudo-random grid of small envelopes
        let mut seed = 1_u64;
        let mut next = || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((seed >> 33) % 1000) as f64 / 10.
        };
        for i in 0..300 {
            let x = next();
            let y = next();
            let env = envelope(x, y, x + next() / 20., y + next() / 20.);
            envelopes.push(env);
            tree.insert(env, i).unwrap();
        }

        let search = envelope(20., 20., 60., 60.);
        let mut found: Vec<usize> = tree.query_items(&search).into_iter().copied().collect();
        found.sort_unstable();

        let expected: Vec<usize> = envelopes
            .iter()
            .enumerate()
            .filter(|(_, env)| env.intersects(&search))
            .map(|(i, _)| i)
            .collect();

        assert_eq!(found, expected);
        assert!(!expected.is_empty());
    }

    #[test]
    fn insert_after_build_is_rejected() {
        let mut tree = StrTree::new();
        tree.insert(envelope(0., 0., 1., 1.), 1).unwrap();
        let _ = tree.query_items(&envelope(0., 0., 2., 2.));
        assert!(tree.insert(envelope(0., 0., 1., 1.), 2).is_err());
    }

    #[test]
    fn identical_items_are_all_returned() {
        let mut tree = StrTree::new();
        for i in 0..25 {
            tree.insert(envelope(5., 5., 5., 5.), i).unwrap();
        }
        assert_eq!(tree.query_items(&envelope(0., 0., 10., 10.)).len(), 25);
        assert!(tree.query_items(&envelope(6., 6., 10., 10.)).is_empty());
    }

    #[test]
    fn nearest_neighbour_finds_closest() {
        let mut tree = StrTree::new();
        let coords: Vec<Coord> = (0..50)
            .map(|i| Coord::new((i * 7 % 50) as f64, (i * 13 % 50) as f64))
            .collect();
        for (i, c) in coords.iter().enumerate() {
            tree.insert(Envelope::of(*c), i).unwrap();
        }
        let query = Coord::new(21., 30.);
        let nearest = *tree
            .nearest_neighbour(&Envelope::of(query), |&i| coords[i].distance(&query))
            .unwrap();
        let expected = (0..coords.len())
            .min_by(|&a, &b| {
                coords[a]
                    .distance(&query)
                    .total_cmp(&coords[b].distance(&query))
            })
            .unwrap();
        assert_eq!(coords[nearest].distance(&query), coords[expected].distance(&query));
    }

    #[test]
    fn pairwise_nearest_between_trees() {
        let mut tree_a = StrTree::new();
        let mut tree_b = StrTree::new();
        let a_coords = [Coord::new(0., 0.), Coord::new(10., 10.)];
        let b_coords = [Coord::new(4., 3.), Coord::new(100., 100.)];
        for (i, c) in a_coords.iter().enumerate() {
            tree_a.insert(Envelope::of(*c), i).unwrap();
        }
        for (i, c) in b_coords.iter().enumerate() {
            tree_b.insert(Envelope::of(*c), i).unwrap();
        }
        let (&ia, &ib) = tree_a
            .nearest_neighbour_between(&tree_b, |&a, &b| a_coords[a].distance(&b_coords[b]))
            .unwrap();
        assert_eq!((ia, ib), (0, 0));
    }
}
