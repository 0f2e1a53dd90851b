pub mod config;
pub mod overlap;
pub mod runner;
pub mod source;

pub use config::SurveyConfig;
pub use overlap::count_overlaps;
pub use runner::{run_survey, RoundReport, SurveyReport};
pub use source::{PointSource, UniformSource};
