use crate::geometry::{Point, Rectangle};
use crate::index::QuadTree;


/// Counts ordered pairs of stored points closer than `radius`.
///
/// Every point issues one query over a square window of half-extent `window`
/// around itself, candidates with the same coordinates are skipped. A close
/// pair is therefore counted once from each side. Only pairs within the
/// window can be found, so `window` should not be smaller than `radius`.
pub fn count_overlaps(points: &[Point], tree: &QuadTree, window: f64, radius: f64) -> usize {
    let mut found = Vec::with_capacity(16);
    let mut count = 0;

    for point in points {
        found.clear();
        tree.query_into(&Rectangle::around(*point, window, window), &mut found);
        count += found.iter()
            .filter(|other| *other != point && point.distance(other) < radius)
            .count();
    }

    count
}


#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(points: &[Point]) -> QuadTree {
        let mut tree = QuadTree::new(Rectangle::new(50.0, 50.0, 50.0, 50.0), 2).unwrap();
        tree.insert_all(points.iter().copied());
        tree
    }

    #[test]
    fn test_close_pair_counts_from_both_sides() {
        let points = [Point::new(10.0, 10.0), Point::new(11.0, 10.0), Point::new(60.0, 60.0)];
        let tree = tree_of(&points);

        assert_eq!(count_overlaps(&points, &tree, 5.0, 3.0), 2);
    }

    #[test]
    fn test_equal_coordinates_are_not_overlaps() {
        let points = [Point::new(20.0, 20.0), Point::new(20.0, 20.0)];
        let tree = tree_of(&points);

        assert_eq!(count_overlaps(&points, &tree, 5.0, 3.0), 0);
    }

    #[test]
    fn test_radius_is_exclusive() {
        let points = [Point::new(30.0, 30.0), Point::new(33.0, 30.0), Point::new(30.0, 32.0)];
        let tree = tree_of(&points);

        // only the pair at distance 2 is closer than 3
        assert_eq!(count_overlaps(&points, &tree, 10.0, 3.0), 2);
    }

    #[test]
    fn test_window_limits_search() {
        let points = [Point::new(40.0, 40.0), Point::new(42.0, 40.0)];
        let tree = tree_of(&points);

        assert_eq!(count_overlaps(&points, &tree, 1.0, 3.0), 0);
        assert_eq!(count_overlaps(&points, &tree, 2.0, 3.0), 2);
    }

    #[test]
    fn test_matches_linear_scan() {
        let points: Vec<Point> = (0..200)
            .map(|i| Point::new((i * 37 % 100) as f64 + 0.5, (i * 53 % 100) as f64 * 0.97))
            .collect();
        let tree = tree_of(&points);

        let mut expected = 0;
        for p in &points {
            for q in &points {
                if p != q && p.distance(q) < 4.0 {
                    expected += 1;
                }
            }
        }

        assert_eq!(count_overlaps(&points, &tree, 4.0, 4.0), expected);
    }
}
