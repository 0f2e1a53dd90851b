//! Point quadtree: a planar spatial index answering rectangular range queries,
//! plus the survey driver that fills it with random points and counts overlaps.

pub mod error;
pub mod geometry;
pub mod index;
pub mod survey;

pub use error::QuadTreeError;
pub use geometry::{Point, Rectangle};
pub use index::{QuadTree, TreeStats, DEFAULT_MAX_DEPTH};
