use serde::{Deserialize, Serialize};

use crate::error::QuadTreeError;
use crate::geometry::Rectangle;
use crate::index::DEFAULT_MAX_DEPTH;


/// Parameters of a survey run. Missing fields in a config file keep their defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SurveyConfig {
    // domain, spans [0, width] x [0, height]
    pub width: f64,
    pub height: f64,
    // tree
    pub capacity: usize,
    pub max_depth: u32,
    // sampling
    pub points: usize,
    pub rounds: usize,
    pub seed: Option<u64>,
    // overlap search
    pub window: f64,
    pub radius: f64,
    // optional range query reported each round
    pub query: Option<Rectangle>,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 200.0,
            capacity: 4,
            max_depth: DEFAULT_MAX_DEPTH,
            points: 20000,
            rounds: 5,
            seed: None,
            window: 10.0,
            radius: 3.0,
            query: None,
        }
    }
}

impl SurveyConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// the rectangle covering [0, width] x [0, height]
    pub fn domain(&self) -> Rectangle {
        Rectangle::new(self.width / 2.0, self.height / 2.0, self.width / 2.0, self.height / 2.0)
    }

    pub fn validate(&self) -> Result<(), QuadTreeError> {
        if !(self.width.is_finite() && self.width > 0.0 && self.height.is_finite() && self.height > 0.0) {
            return Err(QuadTreeError::InvalidConfig(format!("domain {}x{} must be positive and finite", self.width, self.height)));
        }
        if self.capacity == 0 {
            return Err(QuadTreeError::ZeroCapacity);
        }
        if !(self.window.is_finite() && self.window >= 0.0) {
            return Err(QuadTreeError::InvalidConfig(format!("window {} must be finite and not negative", self.window)));
        }
        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(QuadTreeError::InvalidConfig(format!("radius {} must be finite and not negative", self.radius)));
        }
        if let Some(query) = &self.query {
            if !query.is_valid() {
                return Err(QuadTreeError::InvalidConfig(format!("query {query:?} is not a valid rectangle")));
            }
        }

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SurveyConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.domain(), Rectangle::new(100.0, 100.0, 100.0, 100.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SurveyConfig::from_json(r#"{
            "points": 500,
            "seed": 9,
            "query": { "center": { "x": 61.0, "y": 95.5 }, "half_width": 30.0, "half_height": 15.25 }
        }"#).unwrap();

        assert_eq!(config.points, 500);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.query, Some(Rectangle::new(61.0, 95.5, 30.0, 15.25)));
        assert_eq!(config.capacity, 4);
        assert_eq!(config.rounds, 5);
    }

    #[test]
    fn test_unusable_values() {
        let zero_capacity = SurveyConfig { capacity: 0, ..Default::default() };
        assert_eq!(zero_capacity.validate(), Err(QuadTreeError::ZeroCapacity));

        let flat = SurveyConfig { height: 0.0, ..Default::default() };
        assert!(matches!(flat.validate(), Err(QuadTreeError::InvalidConfig(_))));

        let negative_radius = SurveyConfig { radius: -1.0, ..Default::default() };
        assert!(matches!(negative_radius.validate(), Err(QuadTreeError::InvalidConfig(_))));

        let bad_query = SurveyConfig { query: Some(Rectangle::new(0.0, 0.0, -2.0, 1.0)), ..Default::default() };
        assert!(matches!(bad_query.validate(), Err(QuadTreeError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(SurveyConfig::from_json("{ \"points\": \"many\" }").is_err());
    }
}
