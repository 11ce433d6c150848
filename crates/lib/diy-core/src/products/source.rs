use async_trait::async_trait;
use diy_store::models::{Product, Scored};
use serde::Deserialize;

use crate::error::{CatalogResult, LoadError};
use crate::search::{self, NoFilter};

use super::{Availability, ProductQuery, ProductSource, StoreLocation, StoreStock};

const HOME_DEPOT_FIXTURE: &str = include_str!("fixtures/home_depot.json");

/// Serialized shape of a supplier's static listings.
#[derive(Debug, Clone, Deserialize)]
pub struct SupplierFixture {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub stores: Vec<StoreLocation>,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Supplier backed by a fixed in-memory product list.
#[derive(Debug, Clone)]
pub struct StaticProductSource {
    key: String,
    name: String,
    stores: Vec<StoreLocation>,
    products: Vec<Product>,
}

impl StaticProductSource {
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        stores: Vec<StoreLocation>,
        products: Vec<Product>,
    ) -> Self {
        let name = name.into();
        let mut stores = stores;
        stores.sort_by(|left, right| left.distance_miles.total_cmp(&right.distance_miles));
        let products = products
            .into_iter()
            .map(|mut product| {
                if product.supplier.is_empty() {
                    product.supplier.clone_from(&name);
                }
                product
            })
            .collect();
        Self {
            key: key.into(),
            name,
            stores,
            products,
        }
    }

    #[must_use]
    pub fn from_fixture(fixture: SupplierFixture) -> Self {
        Self::new(fixture.key, fixture.name, fixture.stores, fixture.products)
    }

    /// Parses a supplier fixture from JSON text.
    ///
    /// # Errors
    /// Returns `LoadError::Parse` when the text is not a valid fixture.
    pub fn from_json(raw: &str) -> Result<Self, LoadError> {
        let fixture: SupplierFixture =
            serde_json::from_str(raw).map_err(|err| LoadError::Parse {
                path: "<supplier fixture>".to_string(),
                source: err,
            })?;
        Ok(Self::from_fixture(fixture))
    }

    /// Mock Home Depot listings.
    ///
    /// # Errors
    /// Returns `LoadError::Parse` if the embedded fixture is malformed.
    pub fn home_depot() -> Result<Self, LoadError> {
        Self::from_json(HOME_DEPOT_FIXTURE)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    fn annotate_for_zip(&self, product: &mut Product) {
        if let Some(nearest) = self.stores.first() {
            product.store_location = Some(nearest.locality.clone());
            product.distance_miles = Some(nearest.distance_miles);
        }
    }
}

#[async_trait]
impl ProductSource for StaticProductSource {
    fn key(&self) -> &str {
        &self.key
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn stores(&self) -> &[StoreLocation] {
        &self.stores
    }

    async fn search_products(
        &self,
        query: &ProductQuery,
        limit: usize,
    ) -> CatalogResult<Vec<Scored<Product>>> {
        let mut results = search::search(&self.products, query, &query.query, limit);
        if query.zip_code.is_some() {
            for result in &mut results {
                self.annotate_for_zip(&mut result.record);
            }
        }
        Ok(results)
    }

    async fn get_product(&self, product_id: &str) -> CatalogResult<Option<Product>> {
        Ok(search::find_exact(&self.products, &NoFilter, product_id).cloned())
    }

    async fn check_availability(
        &self,
        product_id: &str,
        zip_code: &str,
    ) -> CatalogResult<Option<Availability>> {
        let Some(product) = search::find_exact(&self.products, &NoFilter, product_id) else {
            return Ok(None);
        };
        let listed = product.quantity_available.unwrap_or(0);
        let stores = self
            .stores
            .iter()
            .map(|store| StoreStock {
                name: store.name.clone(),
                address: store.address.clone(),
                distance_miles: store.distance_miles,
                quantity: listed.saturating_sub(store.stock_offset),
                phone: store.phone.clone(),
            })
            .collect();
        Ok(Some(Availability {
            product_id: product.id.clone(),
            zip_code: zip_code.to_string(),
            available: product.in_stock,
            stores,
        }))
    }
}
