use crate::utils::OrderedFloat;

/// A static, sorted-packed R-tree over 1-dimensional intervals.
///
/// Items are loaded up front and packed bottom-up into a binary tree
/// ordered by interval midpoint. Used by the indexed point-in-area
/// locator, which indexes polygon segments by their Y-extent so a ray
/// cast only visits segments whose span brackets the query ordinate.
pub struct IntervalRTree<T> {
    leaves: Vec<Leaf<T>>,
    nodes: Vec<Node>,
    root: Option<NodeRef>,
}

struct Leaf<T> {
    min: f64,
    max: f64,
    item: T,
}

struct Node {
    min: f64,
    max: f64,
    left: NodeRef,
    right: Option<NodeRef>,
}

#[derive(Clone, Copy)]
enum NodeRef {
    Interior(usize),
    Leaf(usize),
}

impl<T> IntervalRTree<T> {
    /// Build the packed tree from `(min, max, item)` triples.
    pub fn new(items: impl IntoIterator<Item = (f64, f64, T)>) -> Self {
        let mut leaves: Vec<Leaf<T>> = items
            .into_iter()
            .map(|(min, max, item)| Leaf {
                min: min.min(max),
                max: min.max(max),
                item,
            })
            .collect();
        leaves.sort_by_key(|leaf| OrderedFloat(leaf.min + leaf.max));

        let mut tree = IntervalRTree {
            leaves,
            nodes: Vec::new(),
            root: None,
        };
        tree.root = tree.pack();
        tree
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    fn pack(&mut self) -> Option<NodeRef> {
        if self.leaves.is_empty() {
            return None;
        }
        let mut level: Vec<NodeRef> = (0..self.leaves.len()).map(NodeRef::Leaf).collect();
        while level.len() > 1 {
            let mut parents = Vec::with_capacity(level.len().div_ceil(2));
            for pair in level.chunks(2) {
                let left = pair[0];
                let right = pair.get(1).copied();
                let (mut min, mut max) = self.bounds(left);
                if let Some(right) = right {
                    let (right_min, right_max) = self.bounds(right);
                    min = min.min(right_min);
                    max = max.max(right_max);
                }
                self.nodes.push(Node {
                    min,
                    max,
                    left,
                    right,
                });
                parents.push(NodeRef::Interior(self.nodes.len() - 1));
            }
            level = parents;
        }
        level.first().copied()
    }

    fn bounds(&self, node: NodeRef) -> (f64, f64) {
        match node {
            NodeRef::Leaf(index) => (self.leaves[index].min, self.leaves[index].max),
            NodeRef::Interior(index) => (self.nodes[index].min, self.nodes[index].max),
        }
    }

    /// Visit every item whose interval intersects `[min, max]`.
    pub fn query<'t>(&'t self, min: f64, max: f64, visitor: &mut impl FnMut(&'t T)) {
        let root = match self.root {
            Some(root) => root,
            None => return,
        };
        let mut stack = vec![root];
        while let Some(node_ref) = stack.pop() {
            let (node_min, node_max) = self.bounds(node_ref);
            if node_min > max || node_max < min {
                continue;
            }
            match node_ref {
                NodeRef::Leaf(index) => visitor(&self.leaves[index].item),
                NodeRef::Interior(index) => {
                    let node = &self.nodes[index];
                    stack.push(node.left);
                    if let Some(right) = node.right {
                        stack.push(right);
                    }
                }
            }
        }
    }
}
