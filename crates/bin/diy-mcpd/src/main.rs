//! Daemon entry point for the DIY MCP servers.
//!
//! Loads configuration from the environment, builds the code database and
//! product catalog once, and serves them over stdio or streamable HTTP.

mod config;

use std::sync::Arc;

use diy_core::codes::CodeDatabase;
use diy_core::error::LoadError;
use diy_core::products::{ProductCatalog, StaticProductSource};
use diy_mcp::server::{ServerHandles, serve_stdio, serve_streamable_http};
use diy_mcp::{CodesMcp, MaterialsMcp};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{DiyConfig, StdioServer};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = DiyConfig::from_args()?;
    init_tracing(&config.log_filter);

    match config.stdio {
        Some(StdioServer::Codes) => {
            let codes = CodeDatabase::load(&config.codes_path)?;
            info!(sections = codes.len(), "serving building codes over stdio");
            serve_stdio(CodesMcp::new(codes)).await
        }
        Some(StdioServer::Materials) => {
            let catalog = build_catalog()?;
            info!(suppliers = ?catalog.supplier_keys(), "serving materials over stdio");
            serve_stdio(MaterialsMcp::new(catalog)).await
        }
        None => {
            let mut handles = ServerHandles::default();
            if config.codes_serve {
                handles = handles.with_codes(Arc::new(CodeDatabase::load(&config.codes_path)?));
            }
            if config.materials_serve {
                handles = handles.with_materials(Arc::new(build_catalog()?));
            }
            serve_streamable_http(handles, config.http).await
        }
    }
}

/// Logs go to stderr so stdout stays free for the stdio transport.
fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

fn build_catalog() -> Result<ProductCatalog, LoadError> {
    let home_depot = StaticProductSource::home_depot()?;
    Ok(ProductCatalog::default().with_source(Arc::new(home_depot)))
}
