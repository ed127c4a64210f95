//! Tool handler bodies.
//!
//! Each operation receives the shared [`AzureContext`] and its typed input,
//! performs one or two management-plane calls, and produces either the
//! formatted success text or an [`OpFailure`]. The rmcp wrappers in
//! [`crate::tools`] flatten both into text; keeping the bodies here lets tests
//! drive them against stub management planes and branch on the failure kind.
//!
//! Contract for every operation:
//! - a missing client handle short-circuits with the not-initialized message
//!   before anything else runs;
//! - malformed structured input is rejected locally without an API call;
//! - any fault the management plane raises is converted here, never
//!   propagated.

use crate::azure::models::{
    DatabaseParams, ResourceGroupParams, ServerCreateProperties, ServerParams, Sku,
};
use crate::context::AzureContext;
use crate::error::OpFailure;
use crate::format;
use crate::tools::{
    CreateDatabaseInput, CreateResourceGroupInput, CreateSqlServerInput, ListDatabasesInput,
    ListSqlServersInput,
};
use std::collections::HashMap;
use tracing::info;

/// Outcome of one tool invocation body.
pub type OpResult = Result<String, OpFailure>;

/// List all resource groups in the subscription.
pub async fn list_resource_groups(ctx: &AzureContext) -> OpResult {
    let resources = ctx.resources().ok_or_else(OpFailure::not_initialized)?;

    let groups = resources
        .list_resource_groups()
        .await
        .map_err(|e| OpFailure::failed_to("list resource groups", &e))?;

    Ok(format::format_resource_groups(&groups))
}

/// Create a new resource group.
pub async fn create_resource_group(ctx: &AzureContext, input: CreateResourceGroupInput) -> OpResult {
    let resources = ctx.resources().ok_or_else(OpFailure::not_initialized)?;

    // Tags arrive as a JSON-encoded object; reject malformed input before
    // touching the API.
    let tags = match input.tags.as_deref() {
        Some(raw) if !raw.is_empty() => parse_tags(raw)
            .ok_or_else(|| OpFailure::invalid_input("Error: Tags must be valid JSON format"))?,
        _ => HashMap::new(),
    };

    let params = ResourceGroupParams {
        location: input.location.clone(),
        tags,
    };

    resources
        .create_or_update_resource_group(&input.name, params)
        .await
        .map_err(|e| OpFailure::failed_to("create resource group", &e))?;

    Ok(format::format_resource_group_created(
        &input.name,
        &input.location,
    ))
}

/// Parse a JSON object of tags; scalar values are stringified.
fn parse_tags(raw: &str) -> Option<HashMap<String, String>> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    let object = value.as_object()?;

    let mut tags = HashMap::with_capacity(object.len());
    for (key, value) in object {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        tags.insert(key.clone(), value);
    }
    Some(tags)
}

/// List SQL servers in the subscription or a specific resource group.
pub async fn list_sql_servers(ctx: &AzureContext, input: ListSqlServersInput) -> OpResult {
    let sql = ctx.sql().ok_or_else(OpFailure::sql_not_initialized)?;

    let servers = sql
        .list_servers(input.resource_group.as_deref())
        .await
        .map_err(|e| OpFailure::failed_to("list SQL servers", &e))?;

    Ok(format::format_sql_servers(
        &servers,
        input.resource_group.as_deref(),
    ))
}

/// Create a new SQL server after checking name availability.
pub async fn create_sql_server(ctx: &AzureContext, input: CreateSqlServerInput) -> OpResult {
    let sql = ctx.sql().ok_or_else(OpFailure::sql_not_initialized)?;

    let availability = sql
        .check_server_name_availability(&input.server_name)
        .await
        .map_err(|e| OpFailure::failed_to("create SQL server", &e))?;

    if !availability.available {
        // Short-circuit without issuing a create call; the availability
        // verdict is a normal result, not a failure.
        return Ok(format!(
            "Server name '{}' is not available: {}",
            input.server_name,
            availability.message.as_deref().unwrap_or("unavailable")
        ));
    }

    let params = ServerParams {
        location: input.location.clone(),
        properties: ServerCreateProperties {
            version: input.version.clone(),
            administrator_login: input.admin_login.clone(),
            administrator_login_password: input.admin_password.clone(),
        },
    };

    info!(
        "Creating SQL server '{}'... This may take several minutes.",
        input.server_name
    );

    let server = sql
        .create_or_update_server(&input.resource_group, &input.server_name, params)
        .await
        .map_err(|e| OpFailure::failed_to("create SQL server", &e))?;

    Ok(format::format_server_created(&server))
}

/// List databases on a SQL server.
pub async fn list_databases(ctx: &AzureContext, input: ListDatabasesInput) -> OpResult {
    let sql = ctx.sql().ok_or_else(OpFailure::sql_not_initialized)?;

    let databases = sql
        .list_databases(&input.resource_group, &input.server_name)
        .await
        .map_err(|e| OpFailure::failed_to("list databases", &e))?;

    Ok(format::format_databases(&input.server_name, &databases))
}

/// Create a new database, placed in the owning server's region.
pub async fn create_database(ctx: &AzureContext, input: CreateDatabaseInput) -> OpResult {
    let sql = ctx.sql().ok_or_else(OpFailure::sql_not_initialized)?;

    let server = sql
        .get_server(&input.resource_group, &input.server_name)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                OpFailure::not_found(format!(
                    "SQL Server '{}' not found in resource group '{}'.",
                    input.server_name, input.resource_group
                ))
            } else {
                OpFailure::failed_to("create database", &e)
            }
        })?;

    let params = DatabaseParams {
        location: server.location.clone(),
        sku: Sku {
            name: input.service_objective.clone(),
            tier: Some(input.edition.clone()),
        },
    };

    info!(
        "Creating database '{}' on server '{}' in location '{}'...",
        input.database_name, input.server_name, server.location
    );

    let database = sql
        .create_or_update_database(
            &input.resource_group,
            &input.server_name,
            &input.database_name,
            params,
        )
        .await
        .map_err(|e| OpFailure::failed_to("create database", &e))?;

    Ok(format::format_database_created(
        &input.server_name,
        &input.database_name,
        &database,
    ))
}

/// Subscription info text for the `azure://subscription` resource.
pub fn subscription_info(ctx: &AzureContext) -> String {
    match ctx.subscription_id() {
        Some(id) => format!("Azure Subscription ID: {}", id),
        None => "No Azure subscription configured".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags_accepts_object() {
        let tags = parse_tags(r#"{"Environment": "Dev", "Count": 3}"#).unwrap();
        assert_eq!(tags.get("Environment").map(String::as_str), Some("Dev"));
        assert_eq!(tags.get("Count").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_parse_tags_rejects_non_object() {
        assert!(parse_tags("not json").is_none());
        assert!(parse_tags(r#"["a", "b"]"#).is_none());
        assert!(parse_tags(r#""scalar""#).is_none());
    }

    #[test]
    fn test_subscription_info_degraded() {
        let ctx = crate::context::AzureContext::degraded();
        assert_eq!(subscription_info(&ctx), "No Azure subscription configured");
    }
}
