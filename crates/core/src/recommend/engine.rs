//! Ranks a catalog against a finished quiz

use tracing::debug;

use crate::domain::product::Product;
use crate::domain::quiz::AnswerSet;
use crate::quiz::QuizProfile;

use super::scoring::{ScoreCalculator, ScoringWeights};
use super::types::ScoredProduct;
use super::DEFAULT_MAX_RECOMMENDATIONS;

/// Scores every product and keeps the best few.
///
/// The result is never filtered by score: as long as the catalog has
/// products, the engine returns `min(max_results, catalog size)` of them.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    calculator: ScoreCalculator,
    max_results: usize,
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self { calculator: ScoreCalculator::new(), max_results: DEFAULT_MAX_RECOMMENDATIONS }
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.calculator = ScoreCalculator::with_weights(weights);
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Scores all products, sorted by descending score. Equal scores keep
    /// catalog order.
    pub fn rank<'a>(&self, answers: &AnswerSet, products: &'a [Product]) -> Vec<ScoredProduct<'a>> {
        let profile = QuizProfile::from_answers(answers);

        let mut scored: Vec<ScoredProduct<'a>> = products
            .iter()
            .map(|product| {
                let (score, reasons) = self.calculator.score(&profile, product);
                ScoredProduct { product, score, reasons }
            })
            .collect();

        // stable: ties stay in catalog order
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored
    }

    /// Top-ranked products with their scores.
    pub fn recommend_scored<'a>(
        &self,
        answers: &AnswerSet,
        products: &'a [Product],
    ) -> Vec<ScoredProduct<'a>> {
        let mut ranked = self.rank(answers, products);
        ranked.truncate(self.max_results);

        debug!(
            event_name = "recommend.ranked",
            catalog_size = products.len(),
            answered = answers.len(),
            returned = ranked.len(),
            top_score = ranked.first().map(|entry| entry.score),
            "recommendations computed"
        );
        ranked
    }

    /// Top-ranked products, best first.
    pub fn recommend(&self, answers: &AnswerSet, products: &[Product]) -> Vec<Product> {
        self.recommend_scored(answers, products)
            .into_iter()
            .map(|entry| entry.product.clone())
            .collect()
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Top three products for `answers` with the default rule weights.
pub fn recommend(answers: &AnswerSet, products: &[Product]) -> Vec<Product> {
    RecommendationEngine::default().recommend(answers, products)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::product::{FloorCategory, ProductId};

    fn product(id: u64, category: &str, description: &str) -> Product {
        Product {
            id: ProductId(id),
            name: format!("Piso {id}"),
            description: Some(description.to_owned()),
            price: Some(Decimal::new(5_990, 2)),
            category: FloorCategory::from(category),
            image_url: None,
            video_url: None,
        }
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|product| product.id.0).collect()
    }

    #[test]
    fn test_empty_catalog_yields_empty_result() {
        let answers = AnswerSet::new().with_single(6, "Piso Vinílico");

        assert!(recommend(&answers, &[]).is_empty());
    }

    #[test]
    fn test_small_catalog_returns_every_product_by_score() {
        let catalog = vec![
            product(1, "laminado", ""),
            product(2, "vinilico", ""),
        ];
        let answers = AnswerSet::new().with_single(3, "Cozinha");

        assert_eq!(ids(&recommend(&answers, &catalog)), vec![2, 1]);
    }

    #[test]
    fn test_large_catalog_returns_exactly_three_even_when_all_negative() {
        let catalog: Vec<_> = (1..=6).map(|id| product(id, "laminado", "")).collect();
        let answers = AnswerSet::new().with_single(3, "Banheiro").with_single(6, "Piso Vinílico");
        let engine = RecommendationEngine::default();

        let scored = engine.recommend_scored(&answers, &catalog);

        assert_eq!(scored.len(), 3);
        assert!(scored.iter().all(|entry| entry.score == -100));
        assert_eq!(scored.iter().map(|entry| entry.product.id.0).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = vec![
            product(10, "laminado", ""),
            product(4, "porcelanato", "fácil de limpar"),
            product(7, "laminado", ""),
            product(2, "laminado", "limpeza rápida"),
        ];
        let answers = AnswerSet::new().with_multiple(5, ["Fácil de limpar"]);

        assert_eq!(ids(&recommend(&answers, &catalog)), vec![4, 2, 10]);
    }

    #[test]
    fn test_vinyl_preference_with_water_resistance_ranks_vinyl_first() {
        let catalog = vec![product(1, "laminado", ""), product(2, "vinilico", "resistente à água")];
        let answers = AnswerSet::new()
            .with_single(6, "Piso Vinílico")
            .with_multiple(5, ["Resistente à água"]);

        assert_eq!(ids(&recommend(&answers, &catalog)), vec![2, 1]);
    }

    #[test]
    fn test_recommend_is_idempotent_and_leaves_inputs_untouched() {
        let catalog: Vec<_> = (1..=5)
            .map(|id| product(id, if id % 2 == 0 { "vinilico" } else { "laminado" }, "térmico"))
            .collect();
        let snapshot = catalog.clone();
        let answers = AnswerSet::new()
            .with_single(2, "Apartamento")
            .with_multiple(5, ["Conforto térmico", "Conforto acústico"]);
        let answers_snapshot = answers.clone();

        let first = recommend(&answers, &catalog);
        let second = recommend(&answers, &catalog);

        assert_eq!(first, second);
        assert_eq!(catalog, snapshot);
        assert_eq!(answers, answers_snapshot);
    }

    #[test]
    fn test_max_results_is_configurable() {
        let catalog: Vec<_> = (1..=6).map(|id| product(id, "vinilico", "")).collect();
        let engine = RecommendationEngine::new().with_max_results(5);

        assert_eq!(engine.recommend(&AnswerSet::new(), &catalog).len(), 5);
        assert_eq!(engine.rank(&AnswerSet::new(), &catalog).len(), 6);
    }
}
