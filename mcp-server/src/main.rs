//! OrdersFlow MCP Server
//!
//! This MCP server lets an assistant work with an OrdersFlow API instance.
//! It exposes tools for:
//! - Viewing the order board and production totals
//! - Managing products and orders
//! - Pushing, pulling and sharing backups

mod client;
mod server;

use anyhow::Result;
use rmcp::ServiceExt;
use server::OrdersFlowServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is used for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting OrdersFlow MCP server");

    let server = OrdersFlowServer::from_env()?;

    // Serve over stdio - pass as tuple (stdin, stdout)
    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let service = server.serve(transport).await?;

    // Wait for shutdown
    service.waiting().await?;

    Ok(())
}
