pub mod catalog;
pub mod config;
pub mod questions;
pub mod quiz;
pub mod recommend;

use std::path::{Path, PathBuf};

use pifloor_core::config::AppConfig;
use pifloor_core::{ApplicationError, Catalog, InterfaceError, ScoredProduct};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success_with(command: &str, message: impl Into<String>, data: Option<Value>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            detail: None,
            correlation_id: None,
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn text(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            detail: None,
            correlation_id: None,
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Maps an application error through the interface taxonomy. Bad input
    /// and configuration problems exit with 2, an unavailable catalog with 1.
    /// The full error only goes to the log; the envelope carries the
    /// user-facing message plus validation detail for bad requests.
    pub fn from_error(command: &str, error: ApplicationError) -> Self {
        let correlation_id = Uuid::new_v4().to_string();
        let interface = error.into_interface(correlation_id.clone());
        let exit_code = match interface {
            InterfaceError::ServiceUnavailable { .. } => 1,
            InterfaceError::BadRequest { .. } | InterfaceError::Internal { .. } => 2,
        };
        warn!(
            event_name = "cli.command_failed",
            command,
            correlation_id = %correlation_id,
            error_class = interface.error_class(),
            error = %interface,
            "command failed"
        );

        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(interface.error_class().to_string()),
            message: interface.user_message().to_string(),
            detail: interface.detail().map(str::to_string),
            correlation_id: Some(correlation_id),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

/// Loads the catalog named on the command line, falling back to config.
pub fn load_catalog(explicit: Option<&Path>, config: &AppConfig) -> Result<Catalog, ApplicationError> {
    let path: PathBuf = explicit
        .map(Path::to_path_buf)
        .or_else(|| config.catalog.path.clone())
        .ok_or_else(|| {
            ApplicationError::InvalidRequest(
                "no catalog given: pass --catalog or set catalog.path / PIFLOOR_CATALOG_PATH"
                    .to_string(),
            )
        })?;
    Ok(Catalog::load(&path)?)
}

pub fn recommendations_json(scored: &[ScoredProduct<'_>]) -> Value {
    Value::Array(
        scored
            .iter()
            .enumerate()
            .map(|(position, entry)| {
                json!({
                    "rank": position + 1,
                    "id": entry.product.id,
                    "name": entry.product.name,
                    "category": entry.product.category,
                    "price": entry.product.price,
                    "image_url": entry.product.image_url,
                    "score": entry.score,
                    "reasons": entry.reasoning(),
                })
            })
            .collect(),
    )
}

pub fn render_recommendations(scored: &[ScoredProduct<'_>]) -> String {
    if scored.is_empty() {
        return "Nenhum produto encontrado no catálogo.".to_string();
    }

    let mut lines = vec!["Pronto! Estas são as melhores opções para você:".to_string()];
    for (position, entry) in scored.iter().enumerate() {
        let product = entry.product;
        lines.push(format!(
            "{}. {} [{}] {} (score {})",
            position + 1,
            product.name,
            product.category.display_name(),
            product.price.map_or_else(|| "preço sob consulta".to_string(), |price| format!("R$ {price}")),
            entry.score
        ));
        let description: String =
            product.description.as_deref().unwrap_or_default().chars().take(100).collect();
        if !description.is_empty() {
            lines.push(format!("   {description}"));
        }
    }
    lines.join("\n")
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
