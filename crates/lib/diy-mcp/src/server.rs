//! MCP server runners for the DIY tool servers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use diy_core::codes::CodeDatabase;
use diy_core::products::ProductCatalog;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig,
    StreamableHttpService,
    session::local::LocalSessionManager,
};
use rmcp::{ServerHandler, serve_server};
use tracing::info;

use crate::{CodesMcp, MaterialsMcp};

pub const DEFAULT_HTTP_ADDR: SocketAddr =
    SocketAddr::V4(std::net::SocketAddrV4::new(std::net::Ipv4Addr::LOCALHOST, 4020));

/// Configuration for the MCP streamable HTTP server.
#[derive(Debug, Clone)]
pub struct McpHttpServerConfig {
    pub addr: SocketAddr,
    pub stateful_mode: bool,
    pub sse_keep_alive: Option<Duration>,
    pub sse_retry: Option<Duration>,
}

impl McpHttpServerConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            stateful_mode: true,
            sse_keep_alive: Some(Duration::from_secs(15)),
            sse_retry: Some(Duration::from_secs(3)),
        }
    }

    #[must_use]
    pub const fn with_stateful_mode(mut self, stateful_mode: bool) -> Self {
        self.stateful_mode = stateful_mode;
        self
    }

    #[must_use]
    pub const fn with_sse_keep_alive(mut self, sse_keep_alive: Option<Duration>) -> Self {
        self.sse_keep_alive = sse_keep_alive;
        self
    }

    #[must_use]
    pub const fn with_sse_retry(mut self, sse_retry: Option<Duration>) -> Self {
        self.sse_retry = sse_retry;
        self
    }

    fn transport_config(&self) -> StreamableHttpServerConfig {
        StreamableHttpServerConfig {
            sse_keep_alive: self.sse_keep_alive,
            sse_retry: self.sse_retry,
            stateful_mode: self.stateful_mode,
            ..Default::default()
        }
    }
}

impl Default for McpHttpServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HTTP_ADDR)
    }
}

/// Shared data handles for the servers mounted over HTTP.
///
/// A `None` handle leaves that server unmounted.
#[derive(Clone, Default)]
pub struct ServerHandles {
    pub codes: Option<Arc<CodeDatabase>>,
    pub materials: Option<Arc<ProductCatalog>>,
}

impl ServerHandles {
    #[must_use]
    pub fn with_codes(mut self, codes: Arc<CodeDatabase>) -> Self {
        self.codes = Some(codes);
        self
    }

    #[must_use]
    pub fn with_materials(mut self, materials: Arc<ProductCatalog>) -> Self {
        self.materials = Some(materials);
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.codes.is_none() && self.materials.is_none()
    }
}

/// Serves one MCP server over stdio.
///
/// # Errors
/// Returns any transport or server error.
pub async fn serve_stdio<S>(service: S) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    S: ServerHandler,
{
    let (stdin, stdout) = stdio();
    let running = serve_server(service, (stdin, stdout)).await?;
    let _ = running.waiting().await?;
    Ok(())
}

/// Builds the axum router: `/codes` and `/materials` streamable HTTP
/// services for the handles present, plus `GET /health`.
#[must_use]
pub fn http_router(handles: &ServerHandles, config: &McpHttpServerConfig) -> Router {
    let mut app = Router::new().route("/health", get(|| async { "ok" }));

    if let Some(codes) = handles.codes.clone() {
        let service: StreamableHttpService<CodesMcp, LocalSessionManager> =
            StreamableHttpService::new(
                move || Ok(CodesMcp::with_database(codes.clone())),
                Arc::new(LocalSessionManager::default()),
                config.transport_config(),
            );
        app = app.nest_service("/codes", service);
    }

    if let Some(catalog) = handles.materials.clone() {
        let service: StreamableHttpService<MaterialsMcp, LocalSessionManager> =
            StreamableHttpService::new(
                move || Ok(MaterialsMcp::with_catalog(catalog.clone())),
                Arc::new(LocalSessionManager::default()),
                config.transport_config(),
            );
        app = app.nest_service("/materials", service);
    }

    app
}

/// Serves the configured MCP servers using streamable HTTP transport.
///
/// # Errors
/// Returns any listener or server error.
pub async fn serve_streamable_http(
    handles: ServerHandles,
    config: McpHttpServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = http_router(&handles, &config);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(
        addr = %config.addr,
        codes = handles.codes.is_some(),
        materials = handles.materials.is_some(),
        "serving MCP over streamable HTTP"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
