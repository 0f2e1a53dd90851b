pub mod point;
pub mod rectangle;

pub use point::Point;
pub use rectangle::Rectangle;

pub(crate) use rectangle::Bounds;
