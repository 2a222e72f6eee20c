use std::fs;
use std::path::PathBuf;

use pifloor_core::config::AppConfig;
use pifloor_core::{ApplicationError, AnswerSet, Questionnaire, RecommendationEngine};
use tracing::info;

use super::{load_catalog, recommendations_json, render_recommendations, CommandResult};

#[derive(Debug, Clone, Default)]
pub struct RecommendArgs {
    pub answers: PathBuf,
    pub catalog: Option<PathBuf>,
    pub json: bool,
}

pub fn engine_for(config: &AppConfig) -> RecommendationEngine {
    RecommendationEngine::new()
        .with_weights(config.recommendation.weights)
        .with_max_results(config.recommendation.max_results)
}

pub fn run(config: &AppConfig, args: &RecommendArgs) -> CommandResult {
    match execute(config, args) {
        Ok(result) => result,
        Err(error) => CommandResult::from_error("recommend", error),
    }
}

fn execute(config: &AppConfig, args: &RecommendArgs) -> Result<CommandResult, ApplicationError> {
    let answers = read_answers(args)?;
    Questionnaire::floor_picker().validate(&answers)?;
    let catalog = load_catalog(args.catalog.as_deref(), config)?;

    let engine = engine_for(config);
    let scored = engine.recommend_scored(&answers, catalog.products());
    info!(
        event_name = "cli.recommend.completed",
        catalog_size = catalog.len(),
        returned = scored.len(),
        "recommendations ready"
    );

    if args.json {
        return Ok(CommandResult::success_with(
            "recommend",
            format!("{} recommendations", scored.len()),
            Some(recommendations_json(&scored)),
        ));
    }
    Ok(CommandResult::text(render_recommendations(&scored)))
}

fn read_answers(args: &RecommendArgs) -> Result<AnswerSet, ApplicationError> {
    let raw = fs::read_to_string(&args.answers).map_err(|error| {
        ApplicationError::InvalidRequest(format!(
            "could not read answers file `{}`: {error}",
            args.answers.display()
        ))
    })?;
    serde_json::from_str(&raw).map_err(|error| {
        ApplicationError::InvalidRequest(format!(
            "answers file `{}` is not a valid answer set: {error}",
            args.answers.display()
        ))
    })
}
