use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::DEFAULT_CURRENCY;

/// A building-code section as stored in the static code corpus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeSection {
    pub code_ref: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common_questions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_codes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A product listing offered by a supplier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_available: Option<u32>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub specifications: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
}

impl Product {
    /// Returns a specification value rendered as plain text, if present.
    #[must_use]
    pub fn spec_text(&self, key: &str) -> Option<String> {
        self.specifications.get(key).map(value_text)
    }
}

/// A record annotated with its per-query relevance score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scored<T> {
    #[serde(flatten)]
    pub record: T,
    pub relevance_score: u32,
}

impl<T> Scored<T> {
    #[must_use]
    pub const fn new(record: T, relevance_score: u32) -> Self {
        Self {
            record,
            relevance_score,
        }
    }

    #[must_use]
    pub fn into_record(self) -> T {
        self.record
    }
}

/// Renders a JSON value the way it should read inside prose.
#[must_use]
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

const fn default_in_stock() -> bool {
    true
}
