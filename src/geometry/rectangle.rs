use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;


/// Axis-aligned rectangle given by its center and half-extents.
/// Covers the closed region [cx - hw, cx + hw] x [cy - hh, cy + hh],
/// so points on the edges are inside. A zero half-extent is allowed and
/// describes a segment or a single point.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Rectangle {
    pub center: Point,
    pub half_width: f64,
    pub half_height: f64,
}

impl Rectangle {
    #[inline]
    pub fn new(cx: f64, cy: f64, half_width: f64, half_height: f64) -> Self {
        Self {
            center: Point::new(cx, cy),
            half_width,
            half_height,
        }
    }

    #[inline]
    pub fn around(center: Point, half_width: f64, half_height: f64) -> Self {
        Self { center, half_width, half_height }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.center.x - self.half_width
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.center.x + self.half_width
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.center.y - self.half_height
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.center.y + self.half_height
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.half_width * 2.0
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.half_height * 2.0
    }

    /// true if the center and every edge are finite and the half-extents are not negative
    pub fn is_valid(&self) -> bool {
        self.center.is_finite()
            && self.half_width >= 0.0
            && self.half_height >= 0.0
            && self.left().is_finite()
            && self.right().is_finite()
            && self.top().is_finite()
            && self.bottom().is_finite()
    }

    /// Boundary-inclusive point test. NaN coordinates are never contained.
    #[inline]
    pub fn contains(&self, point: &Point) -> bool {
        self.left() <= point.x && point.x <= self.right()
            && self.top() <= point.y && point.y <= self.bottom()
    }

    /// Closed overlap test, rectangles that only touch along an edge or a corner intersect.
    #[inline]
    pub fn intersects(&self, other: &Rectangle) -> bool {
        (self.center.x - other.center.x).abs() <= self.half_width + other.half_width
            && (self.center.y - other.center.y).abs() <= self.half_height + other.half_height
    }

    #[inline]
    pub(crate) fn bounds(&self) -> Bounds {
        Bounds {
            left: self.left(),
            top: self.top(),
            right: self.right(),
            bottom: self.bottom(),
        }
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] x [{}, {}]", self.left(), self.right(), self.top(), self.bottom())
    }
}


/// Edge form of a region as the tree stores it.
/// Quadrants are cut at one shared midpoint, so neighbouring nodes share
/// their edge values bit for bit and tile the parent without gaps.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Bounds {
    pub left: f64,      // left <= x
    pub top: f64,       // top <= y
    pub right: f64,     // x <= right
    pub bottom: f64,    // y <= bottom
}

/*
    quadrants, y grows downward
 nw 0 | 1  ne
    -----
 sw 2 | 3  se
 */

impl Bounds {
    #[inline]
    pub fn contains(&self, point: &Point) -> bool {
        self.left <= point.x && point.x <= self.right
            && self.top <= point.y && point.y <= self.bottom
    }

    #[inline]
    pub fn intersects(&self, other: &Bounds) -> bool {
        !(other.left > self.right
            || other.right < self.left
            || other.top > self.bottom
            || other.bottom < self.top)
    }

    // halves are taken separately so that wide finite regions do not overflow
    #[inline]
    fn mid(&self) -> (f64, f64) {
        (self.left / 2.0 + self.right / 2.0, self.top / 2.0 + self.bottom / 2.0)
    }

    /// false once neither axis can be cut into two narrower halves
    pub fn can_split(&self) -> bool {
        let (mid_x, mid_y) = self.mid();
        (self.left < mid_x && mid_x < self.right) || (self.top < mid_y && mid_y < self.bottom)
    }

    /// children regions in the order nw, ne, sw, se
    pub fn quadrants(&self) -> [Bounds; 4] {
        let (mid_x, mid_y) = self.mid();
        [
            Bounds { left: self.left, top: self.top, right: mid_x, bottom: mid_y },         // nw
            Bounds { left: mid_x, top: self.top, right: self.right, bottom: mid_y },        // ne
            Bounds { left: self.left, top: mid_y, right: mid_x, bottom: self.bottom },      // sw
            Bounds { left: mid_x, top: mid_y, right: self.right, bottom: self.bottom },     // se
        ]
    }

    pub fn to_rectangle(&self) -> Rectangle {
        let (cx, cy) = self.mid();
        Rectangle::new(
            cx,
            cy,
            self.right / 2.0 - self.left / 2.0,
            self.bottom / 2.0 - self.top / 2.0,
        )
    }
}
