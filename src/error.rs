use thiserror::Error;

use crate::geometry::Rectangle;


#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuadTreeError {
    #[error("node capacity must be at least 1")]
    ZeroCapacity,

    #[error("boundary {0} needs a finite center and finite, non-negative half-extents")]
    InvalidBoundary(Rectangle),

    #[error("invalid survey configuration: {0}")]
    InvalidConfig(String),
}
