//! MCP Resources for passive Azure state retrieval.
//!
//! Resources provide read-only access under stable URIs:
//!
//! - `azure://subscription` - Configured subscription id
//! - `azure://servers` - All SQL servers in the subscription
//!
//! Reading a resource never raises a management-plane fault to the transport;
//! like tools, failures ride in the text payload.

use crate::constants::{SERVERS_RESOURCE_URI, SUBSCRIPTION_RESOURCE_URI};
use crate::ops;
use crate::server::AzureSqlMcpServer;
use crate::tools::ListSqlServersInput;
use rmcp::model::{AnnotateAble, RawResource, ReadResourceResult, Resource, ResourceContents};

/// Build the list of available resources.
pub fn build_resource_list() -> Vec<Resource> {
    vec![
        create_resource(
            SUBSCRIPTION_RESOURCE_URI,
            "Subscription",
            "Azure subscription information",
        ),
        create_resource(
            SERVERS_RESOURCE_URI,
            "SQL Servers",
            "All SQL servers in the subscription",
        ),
    ]
}

/// Read a resource by URI.
pub async fn read_resource(
    server: &AzureSqlMcpServer,
    uri: &str,
) -> Result<ReadResourceResult, String> {
    let content = match uri {
        SUBSCRIPTION_RESOURCE_URI => ops::subscription_info(server.context()),
        SERVERS_RESOURCE_URI => {
            // Same text as the unfiltered list_sql_servers tool, including its
            // in-band error text.
            match ops::list_sql_servers(server.context(), ListSqlServersInput::default()).await {
                Ok(text) => text,
                Err(failure) => failure.into_text(),
            }
        }
        other => {
            return Err(format!(
                "Invalid resource URI '{}'. Valid URIs: {}, {}",
                other, SUBSCRIPTION_RESOURCE_URI, SERVERS_RESOURCE_URI
            ))
        }
    };

    Ok(ReadResourceResult {
        contents: vec![ResourceContents::text(content, uri.to_string())],
    })
}

/// Create a resource definition.
fn create_resource(uri: &str, name: &str, description: &str) -> Resource {
    let mut resource = RawResource::new(uri, name);
    resource.description = Some(description.to_string());
    resource.mime_type = Some("text/plain".to_string());
    resource.no_annotation()
}
