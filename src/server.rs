//! MCP server struct definition and initialization.

use crate::config::Config;
use crate::context::AzureContext;
use rmcp::handler::server::router::tool::ToolRouter;
use std::sync::Arc;

/// The Azure SQL MCP Server instance.
///
/// This struct is cloned for each request, but the session context is shared
/// via `Arc` and is immutable after construction. The server provides:
///
/// - **Tools**: Resource group, server, and database management
/// - **Resources**: Subscription info and the server inventory
/// - **Prompts**: Database creation guidance
#[derive(Clone)]
pub struct AzureSqlMcpServer {
    /// Shared session context, built once at startup.
    pub(crate) context: Arc<AzureContext>,

    /// Tool router for dispatching tool calls.
    pub(crate) tool_router: ToolRouter<Self>,
}

impl AzureSqlMcpServer {
    /// Create a new server instance with the given configuration.
    ///
    /// Credential resolution and client construction happen here, exactly
    /// once. Initialization never fails; missing configuration or client
    /// construction faults leave the server in a degraded mode where every
    /// tool reports an initialization error.
    pub async fn new(config: Config) -> Self {
        let context = Arc::new(AzureContext::initialize(&config).await);
        Self::with_context(context)
    }

    /// Create a server from environment variables.
    ///
    /// This is the standard way to create a server for production use.
    pub async fn from_env() -> Self {
        Self::new(Config::from_env()).await
    }

    /// Create a server around an existing context. Used by tests to inject
    /// stub management planes.
    pub fn with_context(context: Arc<AzureContext>) -> Self {
        Self {
            context,
            tool_router: Self::tool_router(),
        }
    }

    /// Get a reference to the session context.
    pub fn context(&self) -> &AzureContext {
        &self.context
    }
}
