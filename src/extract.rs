//! Response extraction
//!
//! Turns a raw collection log document into a `SummaryRecord`.
//!
//! Navigation is split into named steps:
//!     collection_log -> tabs -> tab -> category -> items -> item -> field
//!
//! Each step fails with its own `ExtractError` variant so a skipped
//! member can be told apart as "no such section" or "service changed
//! shape". The caller still treats every variant the same way (skip).

use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::{Config, PlusConfig, SectionConfig};
use crate::schema::{CollectionItem, SummaryRecord, obtained_names};

const SECTION_KEY: &str = "collection_log";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("missing section '{0}'")]
    MissingSection(&'static str),

    #[error("missing tab '{0}'")]
    MissingTab(String),

    #[error("missing category '{category}' in tab '{tab}'")]
    MissingCategory { tab: String, category: String },

    #[error("no item named '{name}' in '{category}'")]
    MissingItem { category: String, name: String },

    #[error("missing field '{field}' in {context}")]
    MissingField { context: String, field: &'static str },

    #[error("field '{field}' is not {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },
}

impl ExtractError {
    /// Stable short label, used for skip counters.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::InvalidJson(_) => "invalid-json",
            ExtractError::MissingSection(_) => "missing-section",
            ExtractError::MissingTab(_) => "missing-tab",
            ExtractError::MissingCategory { .. } => "missing-category",
            ExtractError::MissingItem { .. } => "missing-item",
            ExtractError::MissingField { .. } => "missing-field",
            ExtractError::TypeMismatch { .. } => "type-mismatch",
        }
    }

    /// True when the document is structurally off (wrong types,
    /// absent mandatory fields) rather than merely lacking a
    /// tab/category/item for this player.
    pub fn is_shape_change(&self) -> bool {
        matches!(
            self,
            ExtractError::InvalidJson(_)
                | ExtractError::MissingField { .. }
                | ExtractError::TypeMismatch { .. }
        )
    }
}

/// Extraction plan derived from configuration.
#[derive(Debug, Clone)]
pub struct Extractor {
    pets: SectionConfig,
    pluses: Vec<PlusConfig>,
}

impl Extractor {
    pub fn new(cfg: &Config) -> Self {
        Self {
            pets: cfg.pets.clone(),
            pluses: cfg.pluses.clone(),
        }
    }

    /// Parses the raw body and extracts one summary record.
    pub fn extract(&self, raw: &str) -> Result<SummaryRecord, ExtractError> {
        let doc: Value = serde_json::from_str(raw)?;
        self.extract_value(&doc)
    }

    pub fn extract_value(&self, doc: &Value) -> Result<SummaryRecord, ExtractError> {
        let section = doc
            .get(SECTION_KEY)
            .ok_or(ExtractError::MissingSection(SECTION_KEY))?;
        let section = as_object(section, SECTION_KEY)?;

        let tabs = section.get("tabs").ok_or_else(|| ExtractError::MissingField {
            context: SECTION_KEY.to_string(),
            field: "tabs",
        })?;
        let tabs = as_object(tabs, "tabs")?;

        let pet_items = category_items(tabs, &self.pets.tab, &self.pets.category)?;
        let pets = pet_items
            .iter()
            .map(|v| to_item(v, &self.pets.category))
            .collect::<Result<Vec<_>, _>>()?;

        let pluses = self
            .pluses
            .iter()
            .map(|plus| find_plus(tabs, plus))
            .collect::<Result<Vec<_>, _>>()?;

        let username = section
            .get("username")
            .ok_or_else(|| ExtractError::MissingField {
                context: SECTION_KEY.to_string(),
                field: "username",
            })?
            .as_str()
            .ok_or(ExtractError::TypeMismatch {
                field: "username",
                expected: "a string",
            })?;

        Ok(SummaryRecord {
            username: username.to_string(),
            pets: obtained_names(&pets),
            pluses: obtained_names(&pluses),
        })
    }
}

fn as_object<'a>(v: &'a Value, field: &'static str) -> Result<&'a Map<String, Value>, ExtractError> {
    v.as_object().ok_or(ExtractError::TypeMismatch {
        field,
        expected: "an object",
    })
}

fn category_items<'a>(
    tabs: &'a Map<String, Value>,
    tab: &str,
    category: &str,
) -> Result<&'a Vec<Value>, ExtractError> {
    let tab_value = tabs
        .get(tab)
        .ok_or_else(|| ExtractError::MissingTab(tab.to_string()))?;

    let category_value = as_object(tab_value, "tab")?
        .get(category)
        .ok_or_else(|| ExtractError::MissingCategory {
            tab: tab.to_string(),
            category: category.to_string(),
        })?;

    as_object(category_value, "category")?
        .get("items")
        .ok_or_else(|| ExtractError::MissingField {
            context: format!("category '{category}'"),
            field: "items",
        })?
        .as_array()
        .ok_or(ExtractError::TypeMismatch {
            field: "items",
            expected: "an array",
        })
}

fn find_plus(tabs: &Map<String, Value>, plus: &PlusConfig) -> Result<CollectionItem, ExtractError> {
    let items = category_items(tabs, &plus.tab, &plus.category)?;

    let found = items
        .iter()
        .find(|v| v.get("name").and_then(Value::as_str) == Some(plus.name.as_str()))
        .ok_or_else(|| ExtractError::MissingItem {
            category: plus.category.clone(),
            name: plus.name.clone(),
        })?;

    to_item(found, &plus.category)
}

fn to_item(v: &Value, category: &str) -> Result<CollectionItem, ExtractError> {
    let field = |name: &'static str| {
        v.get(name).ok_or_else(|| ExtractError::MissingField {
            context: format!("an item of '{category}'"),
            field: name,
        })
    };

    let obtained = field("obtained")?.as_bool().ok_or(ExtractError::TypeMismatch {
        field: "obtained",
        expected: "a boolean",
    })?;

    // Names of unobtained items are never written, so they may be absent
    let name = if obtained {
        field("name")?.as_str().ok_or(ExtractError::TypeMismatch {
            field: "name",
            expected: "a string",
        })?
    } else {
        v.get("name").and_then(Value::as_str).unwrap_or_default()
    };

    Ok(CollectionItem {
        name: name.to_string(),
        obtained,
    })
}
