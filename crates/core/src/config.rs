use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::recommend::{ScoringWeights, DEFAULT_MAX_RECOMMENDATIONS, DEFAULT_WEIGHTS};

pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["pifloor.toml", "config/pifloor.toml"];

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub recommendation: RecommendationConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
    pub page_size: usize,
}

#[derive(Clone, Debug)]
pub struct RecommendationConfig {
    pub max_results: usize,
    pub weights: ScoringWeights,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub catalog_path: Option<PathBuf>,
    pub page_size: Option<usize>,
    pub max_results: Option<usize>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig { path: None, page_size: DEFAULT_PAGE_SIZE },
            recommendation: RecommendationConfig {
                max_results: DEFAULT_MAX_RECOMMENDATIONS,
                weights: DEFAULT_WEIGHTS,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_CANDIDATES[0]));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(catalog) = patch.catalog {
            if let Some(path) = catalog.path {
                self.catalog.path = Some(path);
            }
            if let Some(page_size) = catalog.page_size {
                self.catalog.page_size = page_size;
            }
        }

        if let Some(recommendation) = patch.recommendation {
            if let Some(max_results) = recommendation.max_results {
                self.recommendation.max_results = max_results;
            }
            let weights = &mut self.recommendation.weights;
            if let Some(value) = recommendation.preference_penalty {
                weights.preference_penalty = value;
            }
            if let Some(value) = recommendation.humidity_penalty {
                weights.humidity_penalty = value;
            }
            if let Some(value) = recommendation.humidity_bonus {
                weights.humidity_bonus = value;
            }
            if let Some(value) = recommendation.acoustic_bonus {
                weights.acoustic_bonus = value;
            }
            if let Some(value) = recommendation.thermal_bonus {
                weights.thermal_bonus = value;
            }
            if let Some(value) = recommendation.easy_cleaning_bonus {
                weights.easy_cleaning_bonus = value;
            }
            if let Some(value) = recommendation.water_resistance_bonus {
                weights.water_resistance_bonus = value;
            }
            if let Some(value) = recommendation.apartment_bonus {
                weights.apartment_bonus = value;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("PIFLOOR_CATALOG_PATH") {
            self.catalog.path = Some(PathBuf::from(value));
        }
        if let Some(value) = read_env("PIFLOOR_CATALOG_PAGE_SIZE") {
            self.catalog.page_size = parse_usize("PIFLOOR_CATALOG_PAGE_SIZE", &value)?;
        }
        if let Some(value) = read_env("PIFLOOR_RECOMMENDATION_MAX_RESULTS") {
            self.recommendation.max_results =
                parse_usize("PIFLOOR_RECOMMENDATION_MAX_RESULTS", &value)?;
        }

        let log_level = read_env("PIFLOOR_LOGGING_LEVEL").or_else(|| read_env("PIFLOOR_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("PIFLOOR_LOGGING_FORMAT").or_else(|| read_env("PIFLOOR_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(catalog_path) = overrides.catalog_path {
            self.catalog.path = Some(catalog_path);
        }
        if let Some(page_size) = overrides.page_size {
            self.catalog.page_size = page_size;
        }
        if let Some(max_results) = overrides.max_results {
            self.recommendation.max_results = max_results;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_catalog(&self.catalog)?;
        validate_recommendation(&self.recommendation)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

/// First config file that exists, honouring an explicit path when given.
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    CONFIG_FILE_CANDIDATES.into_iter().map(PathBuf::from).find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    if catalog.page_size == 0 || catalog.page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::Validation(format!(
            "catalog.page_size must be in range 1..={MAX_PAGE_SIZE}"
        )));
    }

    if let Some(path) = &catalog.path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("catalog.path must not be empty".to_string()));
        }
    }

    Ok(())
}

fn validate_recommendation(recommendation: &RecommendationConfig) -> Result<(), ConfigError> {
    if recommendation.max_results == 0 || recommendation.max_results > 10 {
        return Err(ConfigError::Validation(
            "recommendation.max_results must be in range 1..=10".to_string(),
        ));
    }

    let weights = &recommendation.weights;
    let named = [
        ("preference_penalty", weights.preference_penalty),
        ("humidity_penalty", weights.humidity_penalty),
        ("humidity_bonus", weights.humidity_bonus),
        ("acoustic_bonus", weights.acoustic_bonus),
        ("thermal_bonus", weights.thermal_bonus),
        ("easy_cleaning_bonus", weights.easy_cleaning_bonus),
        ("water_resistance_bonus", weights.water_resistance_bonus),
        ("apartment_bonus", weights.apartment_bonus),
    ];
    if let Some((name, _)) = named.iter().find(|(_, value)| *value < 0) {
        return Err(ConfigError::Validation(format!(
            "recommendation.{name} must not be negative (penalties are subtracted)"
        )));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    catalog: Option<CatalogPatch>,
    recommendation: Option<RecommendationPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    path: Option<PathBuf>,
    page_size: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct RecommendationPatch {
    max_results: Option<usize>,
    preference_penalty: Option<i32>,
    humidity_penalty: Option<i32>,
    humidity_bonus: Option<i32>,
    acoustic_bonus: Option<i32>,
    thermal_bonus: Option<i32>,
    easy_cleaning_bonus: Option<i32>,
    water_resistance_bonus: Option<i32>,
    apartment_bonus: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
