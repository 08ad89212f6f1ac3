use crate::constants::{DEFAULT_WEIGHT_COUNT, DEFAULT_WEIGHT_RATING, DEFAULT_WINDOW_SIZE};
use crate::pos::Pos;

/// Tunable engine parameters. `Default` matches the spec's documented
/// defaults; everything else is explicit construction.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub window_size: u32,
    pub weight_count: f64,
    pub weight_rating: f64,
    pub subject_pos_priority: Vec<Pos>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            window_size: DEFAULT_WINDOW_SIZE,
            weight_count: DEFAULT_WEIGHT_COUNT,
            weight_rating: DEFAULT_WEIGHT_RATING,
            subject_pos_priority: vec![Pos::Propn, Pos::Noun, Pos::Pron],
        }
    }
}
