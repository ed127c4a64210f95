//! MCP Tools for Azure SQL management operations.
//!
//! Tools are action-oriented operations against the Azure control plane:
//!
//! - `list_resource_groups`: List all resource groups in the subscription
//! - `create_resource_group`: Create a resource group
//! - `list_sql_servers`: List SQL servers, optionally filtered by resource group
//! - `create_sql_server`: Availability-checked SQL server creation
//! - `list_databases`: List databases on a server
//! - `create_database`: Create a database in the server's region
//!
//! Every tool returns text. Faults from the management plane are returned as
//! text results too (never protocol errors), so the calling agent can read and
//! react to them in-band. Unknown tool names and schema-invalid arguments are
//! the router's problem and do surface as protocol errors.

mod inputs;

pub use inputs::*;

use crate::ops::{self, OpResult};
use crate::server::AzureSqlMcpServer;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content};
use rmcp::{tool, tool_router, ErrorData};
use tracing::warn;

/// Flatten an operation outcome into a text tool result.
///
/// Failures are data: they ride in the success payload as their message text.
fn text_result(result: OpResult) -> CallToolResult {
    let text = match result {
        Ok(text) => text,
        Err(failure) => {
            warn!("Tool failure ({:?}): {}", failure.kind, failure.message);
            failure.into_text()
        }
    };
    CallToolResult::success(vec![Content::text(text)])
}

// The generated router constructor is consumed by `AzureSqlMcpServer` in the
// server module, so it needs crate visibility.
#[tool_router(vis = "pub(crate)")]
impl AzureSqlMcpServer {
    /// List all resource groups in the subscription.
    #[tool(description = "List all resource groups in the subscription")]
    pub async fn list_resource_groups(&self) -> Result<CallToolResult, ErrorData> {
        Ok(text_result(ops::list_resource_groups(self.context()).await))
    }

    /// Create a new resource group.
    #[tool(
        description = "Create a new resource group. Tags may be passed as a JSON object string."
    )]
    pub async fn create_resource_group(
        &self,
        Parameters(input): Parameters<CreateResourceGroupInput>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(text_result(
            ops::create_resource_group(self.context(), input).await,
        ))
    }

    /// List SQL servers in the subscription or a specific resource group.
    #[tool(description = "List SQL servers in subscription or specific resource group")]
    pub async fn list_sql_servers(
        &self,
        Parameters(input): Parameters<ListSqlServersInput>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(text_result(
            ops::list_sql_servers(self.context(), input).await,
        ))
    }

    /// Create a new Azure SQL server.
    ///
    /// Checks global name availability first and refuses the creation when the
    /// name is taken.
    #[tool(
        description = "Create a new Azure SQL Server. Checks name availability before creating."
    )]
    pub async fn create_sql_server(
        &self,
        Parameters(input): Parameters<CreateSqlServerInput>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(text_result(
            ops::create_sql_server(self.context(), input).await,
        ))
    }

    /// List databases on a SQL server.
    #[tool(description = "List databases on a SQL server")]
    pub async fn list_databases(
        &self,
        Parameters(input): Parameters<ListDatabasesInput>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(text_result(ops::list_databases(self.context(), input).await))
    }

    /// Create a new database on a SQL server, in the server's region.
    #[tool(
        description = "Create a new database on a SQL server. The database is placed in the server's region."
    )]
    pub async fn create_database(
        &self,
        Parameters(input): Parameters<CreateDatabaseInput>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(text_result(
            ops::create_database(self.context(), input).await,
        ))
    }
}
