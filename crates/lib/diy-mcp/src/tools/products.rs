use diy_core::error::CatalogError;
use diy_core::products::{DEFAULT_LIMIT_PER_SUPPLIER, PriceRange, ProductQuery, ShoppingItem};
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::MaterialsMcp;
use crate::format;
use crate::helpers;

/// Parameters for searching supplier listings.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchMaterialsParams {
    /// What to look for, e.g. "12/2 romex wire" or "GFCI outlet".
    pub query: String,
    /// One of electrical, plumbing, lumber, flooring, hardware.
    pub category: Option<String>,
    /// ZIP code used to attach the nearest store to each result.
    pub zip_code: Option<String>,
    /// Highest acceptable unit price in USD.
    pub max_price: Option<f64>,
}

/// Parameters for fetching a single product.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ProductDetailsParams {
    pub product_id: String,
}

/// Parameters for finding alternatives to a product.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AlternativesParams {
    pub product_id: String,
    /// Lower bound of the budget. Only applied together with `max_price`.
    pub min_price: Option<f64>,
    /// Upper bound of the budget. Only applied together with `min_price`.
    pub max_price: Option<f64>,
}

/// Parameters for a pairwise compatibility check.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CompatibilityParams {
    pub product1_id: String,
    pub product2_id: String,
}

/// Parameters for checking stock near a ZIP code.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AvailabilityParams {
    pub product_id: String,
    pub zip_code: String,
}

/// One shopping-list entry.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ShoppingItemParams {
    pub product_id: String,
    /// Defaults to 1.
    pub quantity: Option<u32>,
}

/// Parameters for building a shopping list.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ShoppingListParams {
    pub items: Vec<ShoppingItemParams>,
    /// ZIP code used to list the nearest stores.
    pub zip_code: Option<String>,
}

fn budget(min_price: Option<f64>, max_price: Option<f64>) -> Result<Option<PriceRange>, ErrorData> {
    let min_price = helpers::optional_non_negative("min_price", min_price)?;
    let max_price = helpers::optional_non_negative("max_price", max_price)?;
    match (min_price, max_price) {
        (Some(min), Some(max)) if min > max => Err(helpers::invalid_params(format!(
            "min_price ({min}) must not exceed max_price ({max})"
        ))),
        (Some(min), Some(max)) => Ok(Some(PriceRange::new(min, max))),
        _ => Ok(None),
    }
}

#[tool_router(router = tool_router_products, vis = "pub")]
impl MaterialsMcp {
    #[tool(
        description = "Search building materials across suppliers. Returns products with prices, availability, and specifications."
    )]
    async fn search_materials(
        &self,
        Parameters(params): Parameters<SearchMaterialsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let max_price = helpers::optional_non_negative("max_price", params.max_price)?;
        let query = ProductQuery::new(params.query)
            .with_category(params.category)
            .with_zip_code(params.zip_code)
            .with_max_price(max_price);
        let results = self
            .catalog()
            .search_all(&query, DEFAULT_LIMIT_PER_SUPPLIER)
            .await;
        Ok(CallToolResult::success(vec![Content::text(
            format::product_results(&results),
        )]))
    }

    #[tool(description = "Get full details for a product by id, including all specifications.")]
    async fn get_product_details(
        &self,
        Parameters(params): Parameters<ProductDetailsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let product = self
            .catalog()
            .get_product(&params.product_id, None)
            .await
            .map_err(helpers::map_catalog_err)?;
        let text = product.map_or_else(
            || format::product_not_found(&params.product_id),
            |product| format::product_details(&product),
        );
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        description = "Find cheaper or better-rated alternatives to a product, optionally within a budget."
    )]
    async fn find_alternatives(
        &self,
        Parameters(params): Parameters<AlternativesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let budget = budget(params.min_price, params.max_price)?;
        let Some(product) = self
            .catalog()
            .get_product(&params.product_id, None)
            .await
            .map_err(helpers::map_catalog_err)?
        else {
            return Ok(CallToolResult::success(vec![Content::text(
                format::product_not_found(&params.product_id),
            )]));
        };

        let alternatives = self.catalog().find_alternatives(&product, budget).await;
        Ok(CallToolResult::success(vec![Content::text(
            format::alternatives(&product, &alternatives),
        )]))
    }

    #[tool(description = "Check whether two products work together (e.g. PEX pipe and fittings).")]
    async fn check_compatibility(
        &self,
        Parameters(params): Parameters<CompatibilityParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let text = match self
            .catalog()
            .check_compatibility(&params.product1_id, &params.product2_id)
            .await
        {
            Ok(result) => format::compatibility(&result),
            Err(CatalogError::NotFound(id)) => format::product_not_found(&id),
            Err(err) => return Err(helpers::map_catalog_err(err)),
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Check in-store stock for a product near a ZIP code.")]
    async fn check_availability(
        &self,
        Parameters(params): Parameters<AvailabilityParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let availability = self
            .catalog()
            .check_availability(&params.product_id, &params.zip_code)
            .await;
        let text = availability.map_or_else(
            || format::product_not_found(&params.product_id),
            |availability| format::availability(&availability),
        );
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Create a priced shopping list from product ids and quantities.")]
    async fn create_shopping_list(
        &self,
        Parameters(params): Parameters<ShoppingListParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let items: Vec<ShoppingItem> = params
            .items
            .into_iter()
            .map(|item| ShoppingItem {
                product_id: item.product_id,
                quantity: item.quantity.unwrap_or(1),
            })
            .collect();
        let list = self.catalog().shopping_list(&items).await;
        Ok(CallToolResult::success(vec![Content::text(
            format::shopping_list(&list, params.zip_code.as_deref()),
        )]))
    }
}
