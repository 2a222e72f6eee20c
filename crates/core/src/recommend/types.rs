//! Types for the recommendation scorer

use serde::Serialize;

use crate::domain::product::Product;
use crate::quiz::Feature;

/// Which rule moved a product's score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRule {
    /// Category differs from the stated preference
    PreferenceVeto,
    /// Moisture-sensitive category in a wet location
    HumidityVeto,
    /// Moisture-resistant category in a wet location
    HumidityBonus,
    /// Requested feature satisfied by text or category
    FeatureMatch(Feature),
    /// Acoustic-friendly product for an apartment
    ApartmentBonus,
}

impl ScoreRule {
    pub fn description(&self) -> &'static str {
        match self {
            ScoreRule::PreferenceVeto => "Does not match your preferred floor type",
            ScoreRule::HumidityVeto => "Not suited to wet areas",
            ScoreRule::HumidityBonus => "Handles water and humidity well",
            ScoreRule::FeatureMatch(Feature::AcousticComfort) => "Acoustic comfort",
            ScoreRule::FeatureMatch(Feature::ThermalComfort) => "Thermal comfort",
            ScoreRule::FeatureMatch(Feature::EasyCleaning) => "Easy to clean",
            ScoreRule::FeatureMatch(Feature::WaterResistance) => "Water resistant",
            ScoreRule::FeatureMatch(_) => "Requested feature",
            ScoreRule::ApartmentBonus => "Quiet underfoot for apartments",
        }
    }
}

/// One applied rule and its contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreReason {
    pub rule: ScoreRule,
    pub delta: i32,
}

/// A catalog product with the score it earned in one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredProduct<'a> {
    pub product: &'a Product,
    pub score: i32,
    pub reasons: Vec<ScoreReason>,
}

impl ScoredProduct<'_> {
    pub fn reasoning(&self) -> Vec<String> {
        self.reasons
            .iter()
            .map(|reason| format!("{} ({:+})", reason.rule.description(), reason.delta))
            .collect()
    }
}
