//! Scoring rules for floor recommendations

use crate::domain::product::{FloorCategory, Product};
use crate::quiz::{Environment, Feature, QuizProfile};

use super::types::{ScoreReason, ScoreRule};

/// Points added or removed by each rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    /// Removed when the category differs from the preference (default: 50)
    pub preference_penalty: i32,
    /// Removed for laminate in a wet location (default: 50)
    pub humidity_penalty: i32,
    /// Added for vinyl in a wet location (default: 5)
    pub humidity_bonus: i32,
    /// Acoustic comfort match (default: 3)
    pub acoustic_bonus: i32,
    /// Thermal comfort match (default: 3)
    pub thermal_bonus: i32,
    /// Easy cleaning match (default: 2)
    pub easy_cleaning_bonus: i32,
    /// Water resistance match (default: 3)
    pub water_resistance_bonus: i32,
    /// Acoustic-friendly product in an apartment (default: 2)
    pub apartment_bonus: i32,
}

impl ScoringWeights {
    /// Bonus for a requested feature; features without a rule score nothing.
    pub fn feature_bonus(&self, feature: Feature) -> Option<i32> {
        match feature {
            Feature::AcousticComfort => Some(self.acoustic_bonus),
            Feature::ThermalComfort => Some(self.thermal_bonus),
            Feature::EasyCleaning => Some(self.easy_cleaning_bonus),
            Feature::WaterResistance => Some(self.water_resistance_bonus),
            Feature::Antibacterial | Feature::NonSlip => None,
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        super::DEFAULT_WEIGHTS
    }
}

/// Features a category provides regardless of its description.
pub fn inherent_features(category: &FloorCategory) -> &'static [Feature] {
    match category {
        FloorCategory::Vinyl => &[Feature::AcousticComfort, Feature::WaterResistance],
        FloorCategory::Laminate => &[Feature::ThermalComfort],
        FloorCategory::Other(_) => &[],
    }
}

/// Lower-case keywords that mark a feature in product text.
pub fn feature_keywords(feature: Feature) -> &'static [&'static str] {
    match feature {
        Feature::AcousticComfort => &["acústico"],
        Feature::ThermalComfort => &["térmico"],
        Feature::EasyCleaning => &["fácil de limpar", "limpeza"],
        Feature::WaterResistance => &["resistente à água", "umidade"],
        Feature::Antibacterial | Feature::NonSlip => &[],
    }
}

/// Moisture-sensitive categories lose points in wet locations.
fn is_moisture_sensitive(category: &FloorCategory) -> bool {
    matches!(category, FloorCategory::Laminate)
}

fn is_moisture_resistant(category: &FloorCategory) -> bool {
    inherent_features(category).contains(&Feature::WaterResistance)
}

/// Score calculator for floor recommendations
#[derive(Debug, Clone, Default)]
pub struct ScoreCalculator {
    weights: ScoringWeights,
}

impl ScoreCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Whether the product's text or category satisfies `feature`.
    pub fn satisfies(&self, product: &Product, text: &str, feature: Feature) -> bool {
        inherent_features(&product.category).contains(&feature)
            || feature_keywords(feature).iter().any(|keyword| text.contains(keyword))
    }

    /// Applies every rule to one product. Returns the total and the rules that fired.
    pub fn score(&self, profile: &QuizProfile, product: &Product) -> (i32, Vec<ScoreReason>) {
        let text = product.search_text();
        let mut reasons = Vec::new();

        if let Some(preference) = &profile.preference {
            if product.category != *preference {
                reasons.push(ScoreReason {
                    rule: ScoreRule::PreferenceVeto,
                    delta: -self.weights.preference_penalty,
                });
            }
        }

        if profile.is_wet() {
            if is_moisture_sensitive(&product.category) {
                reasons.push(ScoreReason {
                    rule: ScoreRule::HumidityVeto,
                    delta: -self.weights.humidity_penalty,
                });
            }
            if is_moisture_resistant(&product.category) {
                reasons.push(ScoreReason {
                    rule: ScoreRule::HumidityBonus,
                    delta: self.weights.humidity_bonus,
                });
            }
        }

        for feature in &profile.features {
            let Some(bonus) = self.weights.feature_bonus(*feature) else {
                continue;
            };
            if self.satisfies(product, &text, *feature) {
                reasons.push(ScoreReason { rule: ScoreRule::FeatureMatch(*feature), delta: bonus });
            }
        }

        if profile.environment == Some(Environment::Apartment)
            && self.satisfies(product, &text, Feature::AcousticComfort)
        {
            reasons.push(ScoreReason {
                rule: ScoreRule::ApartmentBonus,
                delta: self.weights.apartment_bonus,
            });
        }

        let total = reasons.iter().map(|reason| reason.delta).sum();
        (total, reasons)
    }
}
