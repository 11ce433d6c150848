//! MCP servers for DIY consultations.
//!
//! [`CodesMcp`] answers building-code questions from the static code corpus.
//! [`MaterialsMcp`] searches supplier listings and runs the material
//! calculators. Both are thin rmcp wrappers over shared `diy-core` handles.

mod format;
mod helpers;
mod tools;
pub mod server;

use std::sync::Arc;

use diy_core::codes::CodeDatabase;
use diy_core::products::ProductCatalog;
use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};

pub use tools::calculators::{
    DeckParams,
    OutletsParams,
    PaintParams,
    PexParams,
    TileParams,
    WireParams,
};
pub use tools::codes::{CodeComplianceParams, GetCodeSectionParams, SearchCodesParams};
pub use tools::products::{
    AlternativesParams,
    AvailabilityParams,
    CompatibilityParams,
    ProductDetailsParams,
    SearchMaterialsParams,
    ShoppingItemParams,
    ShoppingListParams,
};

const CODES_INSTRUCTIONS: &str = r"Building-codes server for DIY consultations.

Tools:
- `search_building_codes` ranks code sections for a plain-language question. Filter with
  `jurisdiction` (default National) and `code_type` (electrical, plumbing, structural,
  mechanical, general).
- `get_code_section` fetches one section by exact reference, e.g. `NEC 210.52(C)(1)`.
- `check_code_compliance` lists the codes that apply to a described scenario.
- `list_code_categories` returns categories with section counts and sample questions.

Notes:
- Results are guidance only. Local jurisdictions may amend the model codes.
- `health` returns `ok`.";

const MATERIALS_INSTRUCTIONS: &str = r"Material-specs server for DIY consultations.

Products:
- `search_materials` searches every supplier and returns the cheapest matches first.
  Pass `zip_code` to include the nearest store, `max_price` to cap the unit price.
- `get_product_details`, `find_alternatives`, `check_compatibility`, and
  `check_availability` take the product ids shown in search results.
- `create_shopping_list` prices a list of `{product_id, quantity}` items.

Calculators:
- `calculate_wire_needed`, `calculate_outlets_needed`, `calculate_tile_needed`,
  `calculate_paint_needed`, `calculate_deck_lumber`, and `calculate_pex_pipe` turn
  measurements into purchase quantities. Lengths are feet, areas square feet, tile and
  board sizes inches.

Notes:
- Listings are sample data. Prices and stock must be verified with the store.
- `health` returns `ok`.";

/// MCP server over the building-code corpus.
#[derive(Clone)]
pub struct CodesMcp {
    tool_router: ToolRouter<Self>,
    codes: Arc<CodeDatabase>,
}

impl CodesMcp {
    /// Creates a new server owning the code database.
    #[must_use]
    pub fn new(codes: CodeDatabase) -> Self {
        Self::with_database(Arc::new(codes))
    }

    /// Creates a new server using a shared code database handle.
    #[must_use]
    pub fn with_database(codes: Arc<CodeDatabase>) -> Self {
        let tool_router = Self::tool_router_core() + Self::tool_router_codes();
        Self { tool_router, codes }
    }

    pub(crate) fn codes(&self) -> &CodeDatabase {
        &self.codes
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl CodesMcp {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl ServerHandler for CodesMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(CODES_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}

/// MCP server over the supplier catalog and the material calculators.
#[derive(Clone)]
pub struct MaterialsMcp {
    tool_router: ToolRouter<Self>,
    catalog: Arc<ProductCatalog>,
}

impl MaterialsMcp {
    /// Creates a new server owning the product catalog.
    #[must_use]
    pub fn new(catalog: ProductCatalog) -> Self {
        Self::with_catalog(Arc::new(catalog))
    }

    /// Creates a new server using a shared product catalog handle.
    #[must_use]
    pub fn with_catalog(catalog: Arc<ProductCatalog>) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_products()
            + Self::tool_router_calculators();
        Self {
            tool_router,
            catalog,
        }
    }

    pub(crate) fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl MaterialsMcp {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl ServerHandler for MaterialsMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(MATERIALS_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
