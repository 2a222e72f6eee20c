//! Floor recommendation scoring
//!
//! Turns a finished quiz and the product catalog into a short ranked list
//! using additive/subtractive heuristic rules.

mod engine;
mod scoring;
mod types;

pub use engine::{recommend, RecommendationEngine};
pub use scoring::{ScoreCalculator, ScoringWeights};
pub use types::*;

/// Default rule weights
pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    preference_penalty: 50,
    humidity_penalty: 50,
    humidity_bonus: 5,
    acoustic_bonus: 3,
    thermal_bonus: 3,
    easy_cleaning_bonus: 2,
    water_resistance_bonus: 3,
    apartment_bonus: 2,
};

/// Number of products the floor picker shows
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 3;
