//! Product sources and the multi-supplier catalog.
//!
//! Each supplier implements [`ProductSource`]; [`ProductCatalog`] fans a
//! query out to every source concurrently and merges the answers.

use async_trait::async_trait;
use diy_store::models::{Product, Scored};
use serde::{Deserialize, Serialize};

use crate::error::CatalogResult;
use crate::search::{RecordFilter, attr_matches};

pub mod catalog;
pub mod source;

pub use catalog::{ProductCatalog, ShoppingItem, ShoppingLine, ShoppingList};
pub use source::{StaticProductSource, SupplierFixture};

pub const DEFAULT_LIMIT_PER_SUPPLIER: usize = 5;
pub const ALTERNATIVES_LIMIT_PER_SUPPLIER: usize = 10;

/// Query against product listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub query: String,
    pub category: Option<String>,
    pub zip_code: Option<String>,
    pub max_price: Option<f64>,
}

impl ProductQuery {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_zip_code(mut self, zip_code: Option<String>) -> Self {
        self.zip_code = zip_code;
        self
    }

    #[must_use]
    pub const fn with_max_price(mut self, max_price: Option<f64>) -> Self {
        self.max_price = max_price;
        self
    }
}

impl RecordFilter<Product> for ProductQuery {
    fn matches(&self, record: &Product) -> bool {
        if let Some(category) = self.category.as_deref()
            && !attr_matches(Some(record.category.as_str()), category)
        {
            return false;
        }
        self.max_price.is_none_or(|max_price| record.price <= max_price)
    }
}

/// Inclusive price band used when looking for alternatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

/// A physical store belonging to a supplier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreLocation {
    pub name: String,
    pub locality: String,
    pub address: String,
    pub distance_miles: f64,
    pub phone: String,
    /// Units subtracted from the listed stock to model a smaller store.
    #[serde(default)]
    pub stock_offset: u32,
}

/// Stock held by one store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreStock {
    pub name: String,
    pub address: String,
    pub distance_miles: f64,
    pub quantity: u32,
    pub phone: String,
}

/// Availability of a product near a ZIP code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Availability {
    pub product_id: String,
    pub zip_code: String,
    pub available: bool,
    pub stores: Vec<StoreStock>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Outcome of a pairwise product compatibility check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Compatibility {
    pub compatible: bool,
    pub confidence: Confidence,
    pub notes: Vec<String>,
}

/// A supplier whose listings can be searched.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Stable machine key, e.g. `home_depot`.
    fn key(&self) -> &str;

    /// Human-readable supplier name.
    fn name(&self) -> &str;

    /// Stores the supplier operates, nearest first.
    fn stores(&self) -> &[StoreLocation];

    async fn search_products(
        &self,
        query: &ProductQuery,
        limit: usize,
    ) -> CatalogResult<Vec<Scored<Product>>>;

    async fn get_product(&self, product_id: &str) -> CatalogResult<Option<Product>>;

    async fn check_availability(
        &self,
        product_id: &str,
        zip_code: &str,
    ) -> CatalogResult<Option<Availability>>;
}
