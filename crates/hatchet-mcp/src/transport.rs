//! Transports the MCP server can be served over.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use rmcp::{
    transport::{
        stdio,
        streamable_http_server::{
            session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
        },
    },
    ServiceExt,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use hatchet_client::HatchetApi;

use crate::server::HatchetMcpServer;

/// Serve MCP over stdin/stdout until the client disconnects.
pub async fn serve_stdio(api: Arc<dyn HatchetApi>) -> Result<(), Box<dyn std::error::Error>> {
    info!("MCP server listening on stdio");

    let service = HatchetMcpServer::new(api).serve(stdio()).await?;
    let reason = service.waiting().await?;

    info!(reason = ?reason, "MCP stdio session ended");
    Ok(())
}

/// Create an axum Router for the MCP HTTP server.
///
/// This router handles MCP protocol requests over HTTP using the Streamable HTTP transport,
/// mounted at `/mcp`.
pub fn create_mcp_router(api: Arc<dyn HatchetApi>, ct: CancellationToken) -> Router {
    let service = StreamableHttpService::new(
        move || Ok(HatchetMcpServer::new(api.clone())),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig {
            cancellation_token: ct,
            ..Default::default()
        },
    );

    info!("MCP server initialized with Streamable HTTP transport");

    Router::new().nest_service("/mcp", service)
}

/// Serve MCP over Streamable HTTP until `ct` is cancelled.
pub async fn serve_http(
    api: Arc<dyn HatchetApi>,
    addr: SocketAddr,
    ct: CancellationToken,
) -> std::io::Result<()> {
    let router = create_mcp_router(api, ct.clone());
    let listener = TcpListener::bind(addr).await?;

    info!("MCP HTTP server listening on http://{}/mcp", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await?;

    info!("MCP HTTP server stopped");
    Ok(())
}
