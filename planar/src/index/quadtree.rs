use planar_types::{Coord, Envelope};

const MAX_DEPTH: usize = 24;
const NODE_SPLIT_THRESHOLD: usize = 8;

/// A dynamic quadtree index over items with extents.
///
/// Unlike the packed [`StrTree`](crate::index::StrTree), the quadtree
/// accepts interleaved inserts and queries, at the price of weaker
/// packing. Items are stored in the smallest quad that fully contains
/// their envelope; items straddling a split line stay at the parent.
pub struct Quadtree<T> {
    root: QuadNode<T>,
}

struct QuadNode<T> {
    extent: Envelope,
    depth: usize,
    items: Vec<(Envelope, T)>,
    quads: Option<Box<[QuadNode<T>; 4]>>,
}

impl<T> Quadtree<T> {
    /// Create a tree covering `extent`. Items outside the extent are
    /// kept at the root.
    pub fn new(extent: Envelope) -> Self {
        Quadtree {
            root: QuadNode {
                extent,
                depth: 0,
                items: Vec::new(),
                quads: None,
            },
        }
    }

    pub fn insert(&mut self, envelope: Envelope, item: T) {
        if envelope.is_null() {
            return;
        }
        self.root.insert(envelope, item);
    }

    /// Visit every item whose envelope intersects `search`.
    ///
    /// As with all envelope indexes this is conservative on the item
    /// level only in the sense of never missing a candidate; items are
    /// filtered exactly before being visited.
    pub fn query<'t>(&'t self, search: &Envelope, visitor: &mut impl FnMut(&'t T)) {
        self.root.query(search, visitor);
    }

    pub fn query_items(&self, search: &Envelope) -> Vec<&T> {
        let mut found = Vec::new();
        self.query(search, &mut |item| found.push(item));
        found
    }
}

impl<T> QuadNode<T> {
    fn centre(&self) -> Coord {
        self.extent.centre().expect("quad extents are never null")
    }

    fn insert(&mut self, envelope: Envelope, item: T) {
        if self.quads.is_none()
            && self.items.len() >= NODE_SPLIT_THRESHOLD
            && self.depth < MAX_DEPTH
        {
            self.split();
        }

        if let Some(quads) = &mut self.quads {
            for quad in quads.iter_mut() {
                if quad.extent.covers(&envelope) {
                    quad.insert(envelope, item);
                    return;
                }
            }
        }
        // straddles a split line, or lies outside the extent
        self.items.push((envelope, item));
    }

    fn split(&mut self) {
        let centre = self.centre();
        let make = |min_x: f64, min_y: f64, max_x: f64, max_y: f64, depth: usize| QuadNode {
            extent: Envelope::from_bounds(min_x, min_y, max_x, max_y),
            depth,
            items: Vec::new(),
            quads: None,
        };
        let e = &self.extent;
        let depth = self.depth + 1;
        self.quads = Some(Box::new([
            make(e.min_x(), e.min_y(), centre.x, centre.y, depth),
            make(centre.x, e.min_y(), e.max_x(), centre.y, depth),
            make(e.min_x(), centre.y, centre.x, e.max_y(), depth),
            make(centre.x, centre.y, e.max_x(), e.max_y(), depth),
        ]));

        // push down any resident item that now fits a single quad
        let items = std::mem::take(&mut self.items);
        for (envelope, item) in items {
            self.insert(envelope, item);
        }
    }

    fn query<'t>(&'t self, search: &Envelope, visitor: &mut impl FnMut(&'t T)) {
        for (envelope, item) in &self.items {
            if envelope.intersects(search) {
                visitor(item);
            }
        }
        if let Some(quads) = &self.quads {
            for quad in quads.iter() {
                if quad.extent.intersects(search) {
                    quad.query(search, visitor);
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn query_matches_brute_force() {
        let mut tree = Quadtree::new(Envelope::from_bounds(0., 0., 100., 100.));
        let mut envelopes = Vec::new();
        for i in 0..200_usize {
            let x = (i * 41 % 97) as f64;
            let y = (i * 59 % 89) as f64;
            let envelope = Envelope::from_bounds(x, y, x + (i % 5) as f64, y + (i % 3) as f64);
            envelopes.push(envelope);
            tree.insert(envelope, i);
        }

        let search = Envelope::from_bounds(25., 25., 50., 50.);
        let mut found: Vec<usize> = tree.query_items(&search).into_iter().copied().collect();
        found.sort_unstable();

        let expected: Vec<usize> = envelopes
            .iter()
            .enumerate()
            .filter(|(_, env)| env.intersects(&search))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn items_outside_extent_are_still_found() {
        let mut tree = Quadtree::new(Envelope::from_bounds(0., 0., 10., 10.));
        tree.insert(Envelope::from_bounds(50., 50., 60., 60.), "far");
        let found = tree.query_items(&Envelope::from_bounds(55., 55., 56., 56.));
        assert_eq!(found, vec![&"far"]);
    }
}
