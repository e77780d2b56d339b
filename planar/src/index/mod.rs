/// Maximal X- and Y-monotone runs of a line, with filter-then-refine
/// overlap search.
pub mod chain;
pub use chain::MonotoneChain;

/// Sorted-packed 1-D interval index.
pub mod interval_r_tree;
pub use interval_r_tree::IntervalRTree;

/// General-purpose dynamic envelope index.
pub mod quadtree;
pub use quadtree::Quadtree;

/// Packed Sort-Tile-Recursive R-tree.
pub mod strtree;
pub use strtree::StrTree;
