//! Tool input types with JSON Schema generation.

use crate::constants::{
    DEFAULT_DATABASE_EDITION, DEFAULT_SERVER_VERSION, DEFAULT_SERVICE_OBJECTIVE,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_server_version() -> String {
    DEFAULT_SERVER_VERSION.to_string()
}

fn default_edition() -> String {
    DEFAULT_DATABASE_EDITION.to_string()
}

fn default_service_objective() -> String {
    DEFAULT_SERVICE_OBJECTIVE.to_string()
}

/// Input for the `create_resource_group` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateResourceGroupInput {
    /// Name of the resource group.
    #[schemars(description = "Name of the resource group")]
    pub name: String,

    /// Azure region.
    #[schemars(description = "Azure region (e.g., 'East US', 'West Europe')")]
    pub location: String,

    /// Optional tags as a JSON-encoded object.
    #[serde(default)]
    #[schemars(
        description = "Optional tags as JSON string (e.g., '{\"Environment\": \"Dev\", \"Project\": \"MyApp\"}')"
    )]
    pub tags: Option<String>,
}

/// Input for the `list_sql_servers` tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListSqlServersInput {
    /// Optional resource group to filter servers.
    #[serde(default)]
    #[schemars(description = "Optional resource group name to filter servers")]
    pub resource_group: Option<String>,
}

/// Input for the `create_sql_server` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateSqlServerInput {
    /// Name of the resource group.
    #[schemars(description = "Name of the resource group")]
    pub resource_group: String,

    /// Globally unique server name.
    #[schemars(
        description = "Globally unique SQL server name (lowercase letters and numbers only, 3-63 chars)"
    )]
    pub server_name: String,

    /// Azure region.
    #[schemars(description = "Azure region (e.g., 'eastus', 'westeurope')")]
    pub location: String,

    /// Administrator login name.
    #[schemars(description = "Administrator login name")]
    pub admin_login: String,

    /// Administrator password.
    #[schemars(description = "Administrator password")]
    pub admin_password: String,

    /// SQL Server version.
    #[serde(default = "default_server_version")]
    #[schemars(description = "SQL Server version (default: 12.0)")]
    pub version: String,
}

/// Input for the `list_databases` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListDatabasesInput {
    /// Resource group name.
    #[schemars(description = "Resource group name")]
    pub resource_group: String,

    /// SQL server name.
    #[schemars(description = "SQL server name")]
    pub server_name: String,
}

/// Input for the `create_database` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateDatabaseInput {
    /// Resource group name.
    #[schemars(description = "Resource group name")]
    pub resource_group: String,

    /// SQL server name.
    #[schemars(description = "SQL server name")]
    pub server_name: String,

    /// Database name.
    #[schemars(description = "Database name")]
    pub database_name: String,

    /// Database edition.
    #[serde(default = "default_edition")]
    #[schemars(
        description = "Database edition (Basic, Standard, Premium, GeneralPurpose, BusinessCritical)"
    )]
    pub edition: String,

    /// Service level objective.
    #[serde(default = "default_service_objective")]
    #[schemars(description = "Service level objective (Basic, S0, S1, P1, GP_Gen5_2, etc.)")]
    pub service_objective: String,
}
