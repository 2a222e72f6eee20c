use std::env;
use std::fs;
use std::path::Path;

use pifloor_core::config::{resolve_config_path, AppConfig, ConfigOverrides};
use toml::Value;

pub fn run(config: &AppConfig, explicit_path: Option<&Path>, overrides: &ConfigOverrides) -> String {
    let config_file_path = resolve_config_path(explicit_path);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let overridden = |key_path: &str| match key_path {
        "catalog.path" => overrides.catalog_path.is_some(),
        "catalog.page_size" => overrides.page_size.is_some(),
        "recommendation.max_results" => overrides.max_results.is_some(),
        "logging.level" => overrides.log_level.is_some(),
        "logging.format" => overrides.log_format.is_some(),
        _ => false,
    };
    let source = |key_path: &str, env_keys: &[&str]| {
        if overridden(key_path) {
            return "cli flag".to_string();
        }
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let mut lines =
        vec!["effective config (source precedence: cli flag > env > file > default):".to_string()];

    lines.push(render_line(
        "catalog.path",
        &config
            .catalog
            .path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<unset>".to_string()),
        source("catalog.path", &["PIFLOOR_CATALOG_PATH"]),
    ));
    lines.push(render_line(
        "catalog.page_size",
        &config.catalog.page_size.to_string(),
        source("catalog.page_size", &["PIFLOOR_CATALOG_PAGE_SIZE"]),
    ));
    lines.push(render_line(
        "recommendation.max_results",
        &config.recommendation.max_results.to_string(),
        source("recommendation.max_results", &["PIFLOOR_RECOMMENDATION_MAX_RESULTS"]),
    ));

    let weights = &config.recommendation.weights;
    for (key, value) in [
        ("preference_penalty", weights.preference_penalty),
        ("humidity_penalty", weights.humidity_penalty),
        ("humidity_bonus", weights.humidity_bonus),
        ("acoustic_bonus", weights.acoustic_bonus),
        ("thermal_bonus", weights.thermal_bonus),
        ("easy_cleaning_bonus", weights.easy_cleaning_bonus),
        ("water_resistance_bonus", weights.water_resistance_bonus),
        ("apartment_bonus", weights.apartment_bonus),
    ] {
        let key_path = format!("recommendation.{key}");
        lines.push(render_line(&key_path, &value.to_string(), source(&key_path, &[])));
    }

    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        source("logging.level", &["PIFLOOR_LOGGING_LEVEL", "PIFLOOR_LOG_LEVEL"]),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        source("logging.format", &["PIFLOOR_LOGGING_FORMAT", "PIFLOOR_LOG_FORMAT"]),
    ));

    lines.join("\n")
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    // blank values are ignored by the loader, so they are not a source either
    if let Some(env_key) = env_keys
        .iter()
        .find(|key| env::var(key).is_ok_and(|value| !value.trim().is_empty()))
    {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
