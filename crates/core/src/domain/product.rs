use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Floor-covering category as labelled by the catalog (`type` on the wire).
///
/// Labels are matched case-insensitively; anything outside the known set is
/// kept verbatim so listings can still show it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FloorCategory {
    Laminate,
    Vinyl,
    Other(String),
}

impl FloorCategory {
    pub fn label(&self) -> &str {
        match self {
            Self::Laminate => "laminado",
            Self::Vinyl => "vinilico",
            Self::Other(label) => label,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Laminate => "Laminado",
            Self::Vinyl => "Vinílico",
            Self::Other(label) if label.is_empty() => "Sem categoria",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for FloorCategory {
    /// Lenient on purpose: surrounding whitespace, case and the accented
    /// `vinílico` spelling all still select the known categories.
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "laminado" => Self::Laminate,
            "vinilico" | "vinílico" => Self::Vinyl,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for FloorCategory {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<FloorCategory> for String {
    fn from(value: FloorCategory) -> Self {
        match value {
            FloorCategory::Other(label) => label,
            known => known.label().to_owned(),
        }
    }
}

impl fmt::Display for FloorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// The backend stores price as a nullable column.
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(rename = "type", default = "unlabelled", deserialize_with = "category_or_unlabelled")]
    pub category: FloorCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

fn unlabelled() -> FloorCategory {
    FloorCategory::Other(String::new())
}

// A null `type` is an unlabelled product: it gets no category treatment.
fn category_or_unlabelled<'de, D>(deserializer: D) -> Result<FloorCategory, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map_or_else(unlabelled, FloorCategory::from))
}

impl Product {
    /// Lower-cased description followed by the name, the text that keyword
    /// rules search in.
    pub fn search_text(&self) -> String {
        let mut text = self.description.clone().unwrap_or_default();
        text.push_str(&self.name);
        text.to_lowercase()
    }
}
