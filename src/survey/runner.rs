use std::fmt;
use std::time::Instant;

use log::info;
use serde::Serialize;

use crate::error::QuadTreeError;
use crate::geometry::Point;
use crate::index::{QuadTree, TreeStats};
use crate::survey::{count_overlaps, PointSource, SurveyConfig};


#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RoundReport {
    pub round: usize,
    pub inserted: usize,
    pub rejected: usize,
    pub overlaps: usize,
    pub tree: TreeStats,
    // result of the configured range query, empty when none is set
    pub found: Vec<Point>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SurveyReport {
    pub config: SurveyConfig,
    pub rounds: Vec<RoundReport>,
}


/// Runs `config.rounds` independent rounds. Each round builds a fresh tree
/// over the configured domain, fills it from `source`, counts overlapping
/// points and runs the configured range query, if any.
pub fn run_survey<S: PointSource>(config: &SurveyConfig, source: &mut S) -> Result<SurveyReport, QuadTreeError> {
    config.validate()?;
    let domain = config.domain();
    let mut rounds = Vec::with_capacity(config.rounds);

    for round in 0..config.rounds {
        let start = Instant::now();
        let mut tree = QuadTree::with_max_depth(domain, config.capacity, config.max_depth)?;
        let mut points = Vec::with_capacity(config.points);

        for _ in 0..config.points {
            let point = source.next_point();
            if tree.insert(point) {
                points.push(point);
            }
        }

        let overlaps = count_overlaps(&points, &tree, config.window, config.radius);
        let found = match &config.query {
            Some(range) => tree.query(range),
            None => vec![],
        };

        let report = RoundReport {
            round,
            inserted: points.len(),
            rejected: config.points - points.len(),
            overlaps,
            tree: tree.stats(),
            found,
        };
        info!("{report} in {:?}", start.elapsed());
        rounds.push(report);
    }

    Ok(SurveyReport {
        config: config.clone(),
        rounds,
    })
}


impl fmt::Display for RoundReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "round {}: found {} overlapping points among {} ({} nodes, depth {})",
            self.round, self.overlaps, self.inserted, self.tree.nodes, self.tree.depth,
        )
    }
}
