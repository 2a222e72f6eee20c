//! In-memory product catalog with the storefront's listing operations.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::domain::product::{FloorCategory, Product, ProductId};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog must be a product array or an object with a `products` array")]
    UnexpectedShape,
    #[error("invalid page request: page={page} per_page={per_page} (pages start at 1, per_page in 1..=100)")]
    InvalidPage { page: usize, per_page: usize },
}

/// Which products a listing starts from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CatalogFilter {
    #[default]
    All,
    Category(FloorCategory),
    Favorites(BTreeSet<ProductId>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl PageRequest {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.page == 0 || self.per_page == 0 || self.per_page > MAX_PAGE_SIZE {
            return Err(CatalogError::InvalidPage { page: self.page, per_page: self.per_page });
        }
        Ok(())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, per_page: DEFAULT_PAGE_SIZE }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub filter: CatalogFilter,
    pub search: Option<String>,
    /// `None` lists every match on a single page.
    pub paging: Option<PageRequest>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Page<'a> {
    pub products: Vec<&'a Product>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub pages: usize,
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Reads either a bare product array or a `{"products": [...]}` listing.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let products = match serde_json::from_str::<Value>(raw)? {
            Value::Object(mut listing) => match listing.remove("products") {
                Some(products @ Value::Array(_)) => products,
                _ => return Err(CatalogError::UnexpectedShape),
            },
            bare @ Value::Array(_) => bare,
            _ => return Err(CatalogError::UnexpectedShape),
        };
        Ok(Self::new(serde_json::from_value(products)?))
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        let catalog = Self::from_json(&raw)?;
        info!(
            event_name = "catalog.loaded",
            path = %path.display(),
            products = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, product_id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == product_id)
    }

    /// Filters, searches by name or category label, and paginates in id order.
    pub fn list(&self, query: &CatalogQuery) -> Result<Page<'_>, CatalogError> {
        if let Some(paging) = &query.paging {
            paging.validate()?;
        }

        let needle = query
            .search
            .as_deref()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty());

        let mut matches: Vec<&Product> = self
            .products
            .iter()
            .filter(|product| match &query.filter {
                CatalogFilter::All => true,
                CatalogFilter::Category(category) => product.category == *category,
                CatalogFilter::Favorites(ids) => ids.contains(&product.id),
            })
            .filter(|product| {
                needle.as_deref().map_or(true, |needle| {
                    product.name.to_lowercase().contains(needle)
                        || product.category.label().to_lowercase().contains(needle)
                })
            })
            .collect();
        matches.sort_by_key(|product| product.id);

        let total = matches.len();
        let page = match query.paging {
            Some(PageRequest { page, per_page }) => {
                let pages = total.div_ceil(per_page);
                let offset = (page - 1).saturating_mul(per_page);
                let products = matches.into_iter().skip(offset).take(per_page).collect();
                Page { products, page, per_page, total, pages }
            }
            None => Page { products: matches, page: 1, per_page: total.max(1), total, pages: 1 },
        };

        info!(
            event_name = "catalog.listed",
            search = needle.as_deref().unwrap_or(""),
            page = page.page,
            per_page = page.per_page,
            total = page.total,
            "catalog listing computed"
        );
        Ok(page)
    }
}
