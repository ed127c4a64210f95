//! Azure SQL MCP Server entry point.
//!
//! This binary starts the MCP server using stdio transport for integration
//! with Claude Desktop, Cursor, and other MCP clients.
//!
//! Credential resolution runs once at startup; a missing subscription or
//! failed client construction degrades the server instead of aborting it.

use anyhow::Result;
use azure_sql_mcp_server::{AzureSqlMcpServer, Config};
use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present, then initialize logging to stderr
    // (stdout is reserved for JSON-RPC).
    let _ = dotenvy::dotenv();
    init_logging();

    let version = env!("CARGO_PKG_VERSION");
    eprintln!("Azure SQL MCP Server v{version} starting...");
    eprintln!("Transport: stdio");

    // Set up panic hook for debugging
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] {}", info);
    }));

    // Load configuration and resolve the session context (runs exactly once)
    let config = Config::from_env();
    let server = AzureSqlMcpServer::new(config).await;
    eprintln!("Server initialized. Ready to accept requests...");

    // Start serving on stdio transport
    let transport = rmcp::transport::stdio();
    let service = server.serve(transport).await?;

    // Wait for the client to disconnect or a shutdown signal
    tokio::select! {
        quit_reason = service.waiting() => {
            match quit_reason {
                Ok(reason) => eprintln!("Service stopped: {reason:?}"),
                Err(e) => eprintln!("Service error: {e}"),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            eprintln!("Shutdown signal received");
        }
    }

    // The session context is released when the server drops.
    eprintln!("Server shutdown complete");

    Ok(())
}

/// Initialize tracing subscriber with stderr output.
///
/// Logs MUST go to stderr because stdout is used for JSON-RPC communication.
fn init_logging() {
    let filter = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn,azure_sql_mcp_server=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
