//! ServerHandler implementation for the Azure SQL MCP Server.
//!
//! This module implements the rmcp `ServerHandler` trait which defines how
//! the server responds to MCP protocol requests.

use crate::prompts::{build_prompt_list, get_prompt};
use crate::resources::{build_resource_list, read_resource};
use crate::server::AzureSqlMcpServer;
use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult, ListResourcesResult,
    PaginatedRequestParam, ProtocolVersion, ReadResourceRequestParam, ReadResourceResult,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{tool_handler, ErrorData};
use tracing::info;

/// The `#[tool_handler]` macro wires up tool routing automatically.
/// It generates the `list_tools` and `call_tool` method implementations.
#[tool_handler]
impl ServerHandler for AzureSqlMcpServer {
    /// Server identification - called during initialization handshake.
    fn get_info(&self) -> ServerInfo {
        info!("MCP client requesting server info");

        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,

            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),

            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                title: Some("Azure SQL Management Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },

            instructions: Some(build_instructions(self)),
        }
    }

    /// List available resources.
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult {
            resources: build_resource_list(),
            next_cursor: None,
            meta: None,
        })
    }

    /// Read a specific resource.
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        read_resource(self, &request.uri)
            .await
            .map_err(|e| ErrorData::invalid_params(e, None))
    }

    /// List available prompts.
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        Ok(ListPromptsResult {
            prompts: build_prompt_list(),
            next_cursor: None,
            meta: None,
        })
    }

    /// Get a specific prompt.
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        // Convert Map<String, Value> to HashMap<String, String>
        let arguments: Option<std::collections::HashMap<String, String>> =
            request.arguments.map(|map| {
                map.into_iter()
                    .map(|(k, v)| match v {
                        serde_json::Value::String(s) => (k, s),
                        other => (k, other.to_string()),
                    })
                    .collect()
            });

        get_prompt(&request.name, arguments.as_ref())
            .map_err(|e| ErrorData::invalid_params(e, None))
    }
}

/// Build server instructions based on current state.
fn build_instructions(server: &AzureSqlMcpServer) -> String {
    let mut instructions = String::new();

    instructions.push_str("# Azure SQL Management Server\n\n");
    instructions
        .push_str("This server manages Azure resource groups, SQL servers, and databases.\n\n");

    match server.context().subscription_id() {
        Some(id) if server.context().is_initialized() => {
            instructions.push_str(&format!("**Subscription:** `{}`\n\n", id));
        }
        Some(id) => {
            instructions.push_str(&format!(
                "**Subscription:** `{}` (clients unavailable - tool calls will report an initialization error)\n\n",
                id
            ));
        }
        None => {
            instructions.push_str(
                "**No subscription configured** - set AZURE_SUBSCRIPTION_ID to enable tools.\n\n",
            );
        }
    }

    instructions.push_str("## Available Operations\n\n");
    instructions.push_str("### Tools\n");
    instructions.push_str("- List and create resource groups\n");
    instructions.push_str("- List and create SQL servers (name availability is checked first)\n");
    instructions.push_str("- List and create databases\n\n");
    instructions.push_str("### Resources\n");
    instructions.push_str("- `azure://subscription` - subscription information\n");
    instructions.push_str("- `azure://servers` - all SQL servers\n\n");
    instructions.push_str("### Prompts\n");
    instructions
        .push_str("- `database_creation_prompt` - edition and service objective guidance\n\n");
    instructions.push_str("Server and database creation are long-running operations and may take several minutes.\n");

    instructions
}
