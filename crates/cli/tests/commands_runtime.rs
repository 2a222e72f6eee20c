use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use pifloor_cli::commands::catalog::{self, CatalogArgs};
use pifloor_cli::commands::recommend::{self, RecommendArgs};
use pifloor_cli::commands::{questions, quiz};
use pifloor_core::config::AppConfig;
use serde_json::Value;
use tempfile::TempDir;

const CATALOG: &str = r#"{
  "products": [
    {"id": 1, "name": "Laminado Carvalho Natural", "description": "Conforto térmico para quartos", "price": 79.9, "type": "laminado"},
    {"id": 2, "name": "Vinílico Click Cinza", "description": "Resistente à água e fácil de limpar", "price": 119.9, "type": "vinilico"},
    {"id": 3, "name": "Laminado Nogueira", "description": "Acabamento acetinado", "price": 69.9, "type": "laminado"},
    {"id": 4, "name": "Vinílico Colado Madeira", "description": "Isolamento acústico", "price": 99.9, "type": "vinilico", "image_url": "https://cdn.example/4.png"},
    {"id": 5, "name": "Vinílico Régua Bege", "description": "", "price": 89.9, "type": "vinilico"}
  ],
  "page": 1,
  "total": 5
}"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("fixture should be writable");
    path
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be JSON")
}

fn recommended_ids(payload: &Value) -> Vec<u64> {
    payload["data"]
        .as_array()
        .expect("recommendations array")
        .iter()
        .map(|entry| entry["id"].as_u64().expect("numeric id"))
        .collect()
}

fn recommend_with(catalog: &Path, answers: &Path) -> Value {
    let result = recommend::run(
        &AppConfig::default(),
        &RecommendArgs {
            answers: answers.to_path_buf(),
            catalog: Some(catalog.to_path_buf()),
            json: true,
        },
    );
    assert_eq!(result.exit_code, 0, "unexpected failure: {}", result.output);
    parse_payload(&result.output)
}

#[test]
fn recommend_ranks_vinyl_for_wet_rooms() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = write(&dir, "catalog.json", CATALOG);
    let answers = write(
        &dir,
        "answers.json",
        r#"{"2": "Apartamento", "3": "Banheiro", "5": ["Resistente à água"], "6": "Piso Vinílico"}"#,
    );

    let payload = recommend_with(&catalog, &answers);

    assert_eq!(payload["command"], "recommend");
    assert_eq!(payload["status"], "ok");
    // vinyl: 5 wet + 3 water + 2 apartment = 10 each, catalog order breaks the tie
    assert_eq!(recommended_ids(&payload), vec![2, 4, 5]);
    assert_eq!(payload["data"][0]["score"], 10);
    assert_eq!(payload["data"][0]["rank"], 1);
}

#[test]
fn recommend_returns_three_even_when_everything_is_vetoed() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = write(
        &dir,
        "catalog.json",
        r#"[
          {"id": 8, "name": "Laminado A", "price": 50, "type": "laminado"},
          {"id": 9, "name": "Laminado B", "price": 51, "type": "laminado"},
          {"id": 10, "name": "Laminado C", "price": 52, "type": "laminado"},
          {"id": 11, "name": "Laminado D", "price": 53, "type": "laminado"}
        ]"#,
    );
    let answers = write(&dir, "answers.json", r#"{"4": "Sim", "6": "Piso Vinílico"}"#);

    let payload = recommend_with(&catalog, &answers);

    assert_eq!(recommended_ids(&payload), vec![8, 9, 10]);
    assert_eq!(payload["data"][2]["score"], -100);
}

#[test]
fn recommend_rejects_unknown_options() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = write(&dir, "catalog.json", CATALOG);
    let answers = write(&dir, "answers.json", r#"{"3": "Garagem"}"#);

    let result = recommend::run(
        &AppConfig::default(),
        &RecommendArgs { answers, catalog: Some(catalog), json: true },
    );

    assert_eq!(result.exit_code, 2);
    let payload = parse_payload(&result.output);
    assert_eq!(payload["status"], "error");
    assert_eq!(payload["error_class"], "invalid_input");
    assert!(payload["correlation_id"].is_string());
}

#[test]
fn recommend_reports_missing_catalog_file_as_unavailable() {
    let dir = TempDir::new().expect("temp dir");
    let answers = write(&dir, "answers.json", "{}");

    let result = recommend::run(
        &AppConfig::default(),
        &RecommendArgs {
            answers,
            catalog: Some(dir.path().join("missing.json")),
            json: true,
        },
    );

    assert_eq!(result.exit_code, 1);
    let payload = parse_payload(&result.output);
    assert_eq!(payload["error_class"], "catalog_unavailable");
    assert!(payload.get("detail").is_none());
    assert!(!result.output.contains("missing.json"), "file paths stay in the log");
}

#[test]
fn recommend_without_any_catalog_is_invalid_input() {
    let dir = TempDir::new().expect("temp dir");
    let answers = write(&dir, "answers.json", "{}");

    let result = recommend::run(
        &AppConfig::default(),
        &RecommendArgs { answers, catalog: None, json: false },
    );

    assert_eq!(result.exit_code, 2);
    assert!(parse_payload(&result.output)["detail"]
        .as_str()
        .is_some_and(|detail| detail.contains("--catalog")));
}

#[test]
fn recommend_accepts_backend_records_with_null_columns() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = write(
        &dir,
        "catalog.json",
        r#"{"products": [
          {"id": 1, "name": "Rodapé Branco", "description": null, "price": 10.0, "type": null},
          {"id": 2, "name": "Vinílico Sem Preço", "description": null, "price": null, "type": "vinilico"}
        ]}"#,
    );
    let answers = write(&dir, "answers.json", r#"{"3": "Cozinha"}"#);

    let payload = recommend_with(&catalog, &answers);

    assert_eq!(recommended_ids(&payload), vec![2, 1]);
    assert!(payload["data"][0]["price"].is_null());
    assert_eq!(payload["data"][1]["score"], 0);

    let result = recommend::run(
        &AppConfig::default(),
        &RecommendArgs { answers, catalog: Some(catalog), json: false },
    );
    assert!(result.output.contains("1. Vinílico Sem Preço [Vinílico] preço sob consulta"));
    assert!(result.output.contains("2. Rodapé Branco [Sem categoria] R$ 10"));
}

#[test]
fn catalog_command_tolerates_huge_page_numbers() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "catalog.json", CATALOG);

    let result = catalog::run(
        &AppConfig::default(),
        &CatalogArgs {
            catalog: Some(path),
            page: Some(usize::MAX),
            per_page: Some(2),
            ..CatalogArgs::default()
        },
    );

    assert_eq!(result.exit_code, 0, "unexpected failure: {}", result.output);
    let payload = parse_payload(&result.output);
    assert_eq!(payload["data"]["products"].as_array().map(Vec::len), Some(0));
    assert_eq!(payload["data"]["total"], 5);
}

#[test]
fn recommend_human_output_lists_products() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = write(&dir, "catalog.json", CATALOG);
    let answers = write(&dir, "answers.json", r#"{"6": "Piso Laminado"}"#);

    let result = recommend::run(
        &AppConfig::default(),
        &RecommendArgs { answers, catalog: Some(catalog), json: false },
    );

    assert_eq!(result.exit_code, 0);
    assert!(result.output.starts_with("Pronto!"));
    assert!(result.output.contains("1. Laminado Carvalho Natural [Laminado]"));
    assert!(result.output.contains("2. Laminado Nogueira"));
}

#[test]
fn catalog_command_paginates_and_filters() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "catalog.json", CATALOG);

    let result = catalog::run(
        &AppConfig::default(),
        &CatalogArgs {
            catalog: Some(path.clone()),
            category: Some("vinilico".to_string()),
            page: Some(2),
            per_page: Some(2),
            ..CatalogArgs::default()
        },
    );
    assert_eq!(result.exit_code, 0, "unexpected failure: {}", result.output);
    let payload = parse_payload(&result.output);
    assert_eq!(payload["data"]["total"], 3);
    assert_eq!(payload["data"]["pages"], 2);
    assert_eq!(payload["data"]["products"][0]["id"], 5);

    let result = catalog::run(
        &AppConfig::default(),
        &CatalogArgs {
            catalog: Some(path),
            search: Some("nogueira".to_string()),
            ..CatalogArgs::default()
        },
    );
    let payload = parse_payload(&result.output);
    assert_eq!(payload["data"]["total"], 1);
    assert_eq!(payload["data"]["products"][0]["type"], "laminado");
}

#[test]
fn catalog_command_rejects_conflicting_filters() {
    let result = catalog::run(
        &AppConfig::default(),
        &CatalogArgs {
            category: Some("laminado".to_string()),
            favorites: vec![1, 2],
            ..CatalogArgs::default()
        },
    );

    assert_eq!(result.exit_code, 2);
    assert_eq!(parse_payload(&result.output)["error_class"], "invalid_input");
}

#[test]
fn questions_json_lists_six_questions() {
    let result = questions::run(true);
    let payload = parse_payload(&result.output);

    let list = payload["data"].as_array().expect("questions array");
    assert_eq!(list.len(), 6);
    assert_eq!(list[4]["multiple"], true);
    assert_eq!(list[2]["options"][2], "Banheiro");
}

#[test]
fn interactive_quiz_walks_to_recommendations() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "catalog.json", CATALOG);
    // area, environment, room (bathroom), humidity, features, preference
    let script = "1\nn\n2\nn\n3\nn\nv\nn\n1\nn\n1\n6\nn\n1\nn\n";
    let mut transcript = Vec::new();

    let result = quiz::run(&AppConfig::default(), Some(path.as_path()), Cursor::new(script), &mut transcript);

    assert_eq!(result.exit_code, 0, "unexpected failure: {}", result.output);
    assert!(result.output.starts_with("Pronto!"));
    assert!(result.output.contains("1. Vinílico Click Cinza"));

    let transcript = String::from_utf8(transcript).expect("utf-8 transcript");
    assert!(transcript.contains("Pergunta 1 de 6"));
    assert!(transcript.contains("[x] 3. Banheiro"), "going back shows the saved answer");
}

#[test]
fn interactive_quiz_requires_answers_and_can_be_abandoned() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "catalog.json", CATALOG);
    let mut transcript = Vec::new();

    let result =
        quiz::run(&AppConfig::default(), Some(path.as_path()), Cursor::new("n\n9\nq\n"), &mut transcript);

    assert_eq!(result.exit_code, 1);
    assert_eq!(parse_payload(&result.output)["error_class"], "quiz_aborted");
    let transcript = String::from_utf8(transcript).expect("utf-8 transcript");
    assert!(transcript.contains("must be answered"));
    assert!(transcript.contains("Opção inválida"));
}
