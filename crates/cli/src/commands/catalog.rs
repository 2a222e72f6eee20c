use std::collections::BTreeSet;
use std::path::PathBuf;

use pifloor_core::config::AppConfig;
use pifloor_core::{
    ApplicationError, CatalogFilter, CatalogQuery, FloorCategory, PageRequest, ProductId,
};
use serde_json::json;

use super::{load_catalog, CommandResult};

#[derive(Debug, Clone, Default)]
pub struct CatalogArgs {
    pub catalog: Option<PathBuf>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub favorites: Vec<u64>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

pub fn run(config: &AppConfig, args: &CatalogArgs) -> CommandResult {
    match execute(config, args) {
        Ok(result) => result,
        Err(error) => CommandResult::from_error("catalog", error),
    }
}

fn execute(config: &AppConfig, args: &CatalogArgs) -> Result<CommandResult, ApplicationError> {
    let filter = match (&args.category, args.favorites.is_empty()) {
        (Some(_), false) => {
            return Err(ApplicationError::InvalidRequest(
                "--category and --favorites cannot be combined".to_string(),
            ));
        }
        (Some(category), true) => CatalogFilter::Category(FloorCategory::from(category.as_str())),
        (None, false) => {
            CatalogFilter::Favorites(args.favorites.iter().copied().map(ProductId).collect::<BTreeSet<_>>())
        }
        (None, true) => CatalogFilter::All,
    };

    let paging = match (args.page, args.per_page) {
        (None, None) => None,
        (page, per_page) => Some(PageRequest::new(
            page.unwrap_or(1),
            per_page.unwrap_or(config.catalog.page_size),
        )),
    };

    let catalog = load_catalog(args.catalog.as_deref(), config)?;
    let page = catalog.list(&CatalogQuery { filter, search: args.search.clone(), paging })?;

    Ok(CommandResult::success_with(
        "catalog",
        format!("page {} of {} ({} products)", page.page, page.pages, page.total),
        Some(json!(page)),
    ))
}
