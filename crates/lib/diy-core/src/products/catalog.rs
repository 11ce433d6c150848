use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use diy_store::models::{Product, Scored};
use diy_store::schema::{PRODUCT_CATEGORY_ELECTRICAL, SPEC_AMPERAGE, SPEC_VOLTAGE};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CatalogError, CatalogResult};

use super::{
    ALTERNATIVES_LIMIT_PER_SUPPLIER,
    Availability,
    Compatibility,
    Confidence,
    PriceRange,
    ProductQuery,
    ProductSource,
    StoreLocation,
};

/// A requested shopping-list entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShoppingItem {
    pub product_id: String,
    pub quantity: u32,
}

/// A resolved shopping-list entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ShoppingLine {
    Found {
        product: Product,
        quantity: u32,
        subtotal: f64,
    },
    Missing {
        product_id: String,
    },
}

/// Priced shopping list with the suppliers' nearest stores.
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingList {
    pub lines: Vec<ShoppingLine>,
    pub total_cost: f64,
    pub nearby_stores: Vec<StoreLocation>,
}

/// Read-only aggregate over every configured supplier.
#[derive(Clone, Default)]
pub struct ProductCatalog {
    sources: Vec<Arc<dyn ProductSource>>,
}

impl ProductCatalog {
    #[must_use]
    pub fn new(sources: Vec<Arc<dyn ProductSource>>) -> Self {
        Self { sources }
    }

    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn ProductSource>) -> Self {
        self.sources.push(source);
        self
    }

    #[must_use]
    pub fn supplier_keys(&self) -> Vec<&str> {
        self.sources.iter().map(|source| source.key()).collect()
    }

    /// Searches every supplier concurrently and merges the results.
    ///
    /// Suppliers that fail are logged and skipped. Products with the same
    /// name are collapsed to the first one seen, then the list is ordered by
    /// price (cheapest first) and rating (best first).
    pub async fn search_all(
        &self,
        query: &ProductQuery,
        limit_per_supplier: usize,
    ) -> Vec<Scored<Product>> {
        let searches = self
            .sources
            .iter()
            .map(|source| source.search_products(query, limit_per_supplier));
        let outcomes = join_all(searches).await;

        let mut merged = Vec::new();
        for (source, outcome) in self.sources.iter().zip(outcomes) {
            match outcome {
                Ok(results) => merged.extend(results),
                Err(err) => warn!(supplier = source.key(), error = %err, "supplier search failed"),
            }
        }

        let mut products = dedupe_by_name(merged);
        products.sort_by(|left, right| price_then_rating(&left.record, &right.record));
        debug!(query = %query.query, hits = products.len(), "catalog search");
        products
    }

    /// Fetches a product from the named supplier, or from the first supplier that has it.
    ///
    /// An unknown supplier key falls back to searching every supplier.
    ///
    /// # Errors
    /// Returns `CatalogError` when the named supplier fails.
    pub async fn get_product(
        &self,
        product_id: &str,
        supplier: Option<&str>,
    ) -> CatalogResult<Option<Product>> {
        if let Some(key) = supplier
            && let Some(source) = self.sources.iter().find(|source| source.key() == key)
        {
            return source.get_product(product_id).await;
        }

        for source in &self.sources {
            match source.get_product(product_id).await {
                Ok(Some(product)) => return Ok(Some(product)),
                Ok(None) => {}
                Err(err) => warn!(supplier = source.key(), error = %err, "supplier lookup failed"),
            }
        }
        Ok(None)
    }

    /// Finds cheaper or pricier products in the same category and subcategory.
    pub async fn find_alternatives(
        &self,
        product: &Product,
        budget: Option<PriceRange>,
    ) -> Vec<Product> {
        let query = ProductQuery::new(format!("{} {}", product.category, product.subcategory))
            .with_category(Some(product.category.clone()));
        let mut alternatives: Vec<Product> = self
            .search_all(&query, ALTERNATIVES_LIMIT_PER_SUPPLIER)
            .await
            .into_iter()
            .map(Scored::into_record)
            .filter(|candidate| budget.is_none_or(|range| range.contains(candidate.price)))
            .filter(|candidate| candidate.id != product.id)
            .collect();
        alternatives.sort_by(|left, right| left.price.total_cmp(&right.price));
        alternatives
    }

    /// Applies the basic pairwise compatibility rules.
    ///
    /// # Errors
    /// Returns `CatalogError::NotFound` when either product is unknown.
    pub async fn check_compatibility(
        &self,
        first_id: &str,
        second_id: &str,
    ) -> CatalogResult<Compatibility> {
        let first = self
            .get_product(first_id, None)
            .await?
            .ok_or_else(|| CatalogError::NotFound(first_id.to_string()))?;
        let second = self
            .get_product(second_id, None)
            .await?
            .ok_or_else(|| CatalogError::NotFound(second_id.to_string()))?;
        Ok(compatibility(&first, &second))
    }

    /// Checks stock near a ZIP code at the first supplier that lists the product.
    ///
    /// Failing suppliers are logged and skipped.
    pub async fn check_availability(
        &self,
        product_id: &str,
        zip_code: &str,
    ) -> Option<Availability> {
        for source in &self.sources {
            match source.check_availability(product_id, zip_code).await {
                Ok(Some(availability)) => return Some(availability),
                Ok(None) => {}
                Err(err) => {
                    warn!(supplier = source.key(), error = %err, "supplier availability failed");
                }
            }
        }
        None
    }

    /// Prices a shopping list. Unknown products are kept as missing lines.
    pub async fn shopping_list(&self, items: &[ShoppingItem]) -> ShoppingList {
        let mut lines = Vec::with_capacity(items.len());
        let mut total_cost = 0.0;

        for item in items {
            match self.get_product(&item.product_id, None).await {
                Ok(Some(product)) => {
                    let subtotal = product.price * f64::from(item.quantity);
                    total_cost += subtotal;
                    lines.push(ShoppingLine::Found {
                        product,
                        quantity: item.quantity,
                        subtotal,
                    });
                }
                Ok(None) => lines.push(ShoppingLine::Missing {
                    product_id: item.product_id.clone(),
                }),
                Err(err) => {
                    warn!(
                        product_id = %item.product_id,
                        error = %err,
                        "shopping list lookup failed"
                    );
                    lines.push(ShoppingLine::Missing {
                        product_id: item.product_id.clone(),
                    });
                }
            }
        }

        ShoppingList {
            lines,
            total_cost,
            nearby_stores: self.nearby_stores(),
        }
    }

    /// Nearest store of every supplier, closest first.
    #[must_use]
    pub fn nearby_stores(&self) -> Vec<StoreLocation> {
        let mut stores: Vec<StoreLocation> = self
            .sources
            .iter()
            .filter_map(|source| source.stores().first().cloned())
            .collect();
        stores.sort_by(|left, right| left.distance_miles.total_cmp(&right.distance_miles));
        stores
    }
}

fn dedupe_by_name(products: Vec<Scored<Product>>) -> Vec<Scored<Product>> {
    let mut seen = HashSet::new();
    products
        .into_iter()
        .filter(|product| seen.insert(product.record.name.trim().to_lowercase()))
        .collect()
}

fn price_then_rating(left: &Product, right: &Product) -> Ordering {
    let rating_key = |product: &Product| product.rating.map_or(0.0, |rating| -rating);
    left.price
        .total_cmp(&right.price)
        .then_with(|| rating_key(left).total_cmp(&rating_key(right)))
}

fn compatibility(first: &Product, second: &Product) -> Compatibility {
    let mut result = Compatibility {
        compatible: false,
        confidence: Confidence::Low,
        notes: Vec::new(),
    };

    let first_name = first.name.to_lowercase();
    let second_name = second.name.to_lowercase();
    if (first_name.contains("pex") || second_name.contains("pex"))
        && format!("{first_name}{second_name}").contains("sharkbite")
    {
        result.compatible = true;
        result.confidence = Confidence::High;
        result.notes.push(
            "SharkBite fittings work with PEX-A, PEX-B, PEX-C, copper, and CPVC".to_string(),
        );
    }

    if first.category == PRODUCT_CATEGORY_ELECTRICAL && second.category == PRODUCT_CATEGORY_ELECTRICAL {
        let voltage = first.spec_text(SPEC_VOLTAGE);
        let amperage = first.spec_text(SPEC_AMPERAGE);
        if let (Some(voltage), Some(amperage)) = (voltage, amperage)
            && second.spec_text(SPEC_VOLTAGE).as_deref() == Some(voltage.as_str())
            && second.spec_text(SPEC_AMPERAGE).as_deref() == Some(amperage.as_str())
        {
            result.compatible = true;
            result.confidence = Confidence::Medium;
            result
                .notes
                .push(format!("Both rated for {voltage} and {amperage}"));
        }
    }

    result
}
