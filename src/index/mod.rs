pub mod quadtree;

pub use quadtree::{QuadTree, TreeStats, DEFAULT_MAX_DEPTH};
