use log::{debug, trace};
use serde::Serialize;

use crate::error::QuadTreeError;
use crate::geometry::{Bounds, Point, Rectangle};


/// Depth at which a full leaf stops splitting and keeps growing instead.
/// Coincident points can never be separated by a split, so without a
/// limit they would push the tree down forever.
pub const DEFAULT_MAX_DEPTH: u32 = 32;


/// Point quadtree over a fixed rectangular domain.
///
/// Every node is either a leaf holding up to `capacity` points or an
/// internal node with exactly four children (nw, ne, sw, se) that tile its
/// region. A leaf that overflows is split once and for all, its points move
/// down into the children. Points outside the domain are refused.
#[derive(Debug)]
pub struct QuadTree {
    boundary: Rectangle,
    limits: Limits,
    len: usize,
    root: QuadNode,
}

#[derive(Debug, Copy, Clone)]
struct Limits {
    capacity: usize,
    max_depth: u32,
}

#[derive(Debug)]
struct QuadNode {
    bounds: Bounds,
    depth: u32,
    content: TreeData,   // points or quads
}

#[derive(Debug)]
enum TreeData {
    Points(Vec<Point>),
    Quads(Box<[QuadNode; 4]>),
}

/// Shape of a tree at one moment.
#[derive(Serialize, Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub nodes: usize,
    pub leaves: usize,
    pub points: usize,
    /// deepest node, the root is at depth 0
    pub depth: u32,
}


impl QuadTree {
    /// Creates an empty tree covering `boundary` with [`DEFAULT_MAX_DEPTH`].
    pub fn new(boundary: Rectangle, capacity: usize) -> Result<Self, QuadTreeError> {
        Self::with_max_depth(boundary, capacity, DEFAULT_MAX_DEPTH)
    }

    /// Creates an empty tree whose leaves stop splitting at `max_depth`.
    /// Fails when the capacity is zero or the boundary is not a finite,
    /// non-negative rectangle.
    pub fn with_max_depth(boundary: Rectangle, capacity: usize, max_depth: u32) -> Result<Self, QuadTreeError> {
        if capacity == 0 {
            return Err(QuadTreeError::ZeroCapacity);
        }
        if !boundary.is_valid() {
            return Err(QuadTreeError::InvalidBoundary(boundary));
        }

        Ok(QuadTree {
            boundary,
            limits: Limits { capacity, max_depth },
            len: 0,
            root: QuadNode::new(boundary.bounds(), 0),
        })
    }

    #[inline]
    pub fn boundary(&self) -> Rectangle {
        self.boundary
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.limits.capacity
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.limits.max_depth
    }

    /// number of stored points, duplicates included
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// true if the point lies inside the domain and would be accepted by `insert`
    #[inline]
    pub fn contains(&self, point: &Point) -> bool {
        self.root.bounds.contains(point)
    }

    /// Stores the point and returns true, or returns false without touching
    /// the tree when the point lies outside the domain.
    pub fn insert(&mut self, point: Point) -> bool {
        if self.root.insert(point, self.limits) {
            self.len += 1;
            true
        } else {
            debug!("rejected {point}: outside of {}", self.boundary);
            false
        }
    }

    /// inserts every point of the batch, returns how many of them were accepted
    pub fn insert_all<I: IntoIterator<Item = Point>>(&mut self, points: I) -> usize {
        points.into_iter()
            .filter(|point| self.insert(*point))
            .count()
    }

    /// Returns every stored point inside `range`.
    /// The order is stable: quadrants are walked nw, ne, sw, se and each
    /// leaf yields its points in insertion order.
    pub fn query(&self, range: &Rectangle) -> Vec<Point> {
        let mut result = Vec::new();
        self.query_into(range, &mut result);
        result
    }

    /// Appends the points inside `range` to `result` and returns the number
    /// of nodes examined, pruned ones included.
    pub fn query_into(&self, range: &Rectangle, result: &mut Vec<Point>) -> usize {
        self.root.query_area(&range.bounds(), range, result)
    }

    /// all stored points in traversal order
    pub fn points(&self) -> Vec<Point> {
        let mut result = Vec::with_capacity(self.len);
        self.root.collect(&mut result);
        result
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        self.root.stats(&mut stats);
        stats
    }
}


impl QuadNode {
    fn new(bounds: Bounds, depth: u32) -> Self {
        QuadNode {
            bounds,
            depth,
            content: TreeData::Points(vec![]),
        }
    }

    fn can_subdivide(&self, limits: Limits) -> bool {
        self.depth < limits.max_depth && self.bounds.can_split()
    }

    fn subdivide(&mut self, limits: Limits) {
        match &mut self.content {
            TreeData::Points(points) => {
                let points = std::mem::take(points);
                let depth = self.depth + 1;
                let mut quads = Box::new(self.bounds.quadrants().map(|bounds| QuadNode::new(bounds, depth)));

                for point in points {
                    if !quads.iter_mut().any(|quad| quad.insert(point, limits)) {
                        unreachable!("no quadrant of {} accepts {point}", self.bounds.to_rectangle());
                    }
                }

                trace!("split {} at depth {}", self.bounds.to_rectangle(), self.depth);
                self.content = TreeData::Quads(quads);
            }

            TreeData::Quads(_) => {

            }
        }
    }

    fn insert(&mut self, point: Point, limits: Limits) -> bool {
        if !self.bounds.contains(&point) {
            return false
        }
        let splittable = self.can_subdivide(limits);

        match &mut self.content {
            TreeData::Points(points) => {
                // a full leaf that may not split any further keeps the point anyway
                if points.len() < limits.capacity || !splittable {
                    if points.len() >= limits.capacity {
                        trace!("leaf {} at depth {} over capacity: {} points", self.bounds.to_rectangle(), self.depth, points.len() + 1);
                    }
                    points.push(point);
                } else {
                    self.subdivide(limits);
                    self.insert_into_quads(point, limits);
                }
            },

            TreeData::Quads(_) => {
                self.insert_into_quads(point, limits);
            }
        }

        true
    }

    // the point is known to be inside this node, so one of the quadrants must take it
    fn insert_into_quads(&mut self, point: Point, limits: Limits) {
        let accepted = match &mut self.content {
            TreeData::Quads(quads) => quads.iter_mut().any(|quad| quad.insert(point, limits)),
            TreeData::Points(_) => false,
        };

        if !accepted {
            unreachable!("no quadrant of {} accepts {point}", self.bounds.to_rectangle());
        }
    }

    fn query_area(&self, area: &Bounds, range: &Rectangle, result: &mut Vec<Point>) -> usize {
        if !self.bounds.intersects(area) {
            return 1
        }

        match &self.content {
            TreeData::Points(points) => {
                result.extend(points.iter().filter(|point| range.contains(point)));
                1
            }

            TreeData::Quads(quads) => {
                let mut visited = 1;
                for quad in quads.iter() {
                    visited += quad.query_area(area, range, result);
                }
                visited
            }
        }
    }

    fn collect(&self, result: &mut Vec<Point>) {
        match &self.content {
            TreeData::Points(points) => result.extend_from_slice(points),
            TreeData::Quads(quads) => {
                for quad in quads.iter() {
                    quad.collect(result);
                }
            }
        }
    }

    fn stats(&self, stats: &mut TreeStats) {
        stats.nodes += 1;
        stats.depth = stats.depth.max(self.depth);

        match &self.content {
            TreeData::Points(points) => {
                stats.leaves += 1;
                stats.points += points.len();
            }
            TreeData::Quads(quads) => {
                for quad in quads.iter() {
                    quad.stats(stats);
                }
            }
        }
    }
}
