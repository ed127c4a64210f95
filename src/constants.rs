//! Centralized constants for the Azure SQL MCP Server.
//!
//! This module contains the ARM endpoint versions and default values used
//! throughout the codebase, making them easy to find, understand, and modify.

use std::time::Duration;

// =============================================================================
// Azure Resource Manager Endpoints
// =============================================================================

/// Base URL for the Azure Resource Manager REST API.
pub const ARM_BASE_URL: &str = "https://management.azure.com";

/// OAuth scope for ARM bearer tokens.
pub const ARM_SCOPE: &str = "https://management.azure.com/.default";

/// API version for resource group operations (Microsoft.Resources).
pub const RESOURCES_API_VERSION: &str = "2021-04-01";

/// API version for SQL server and database operations (Microsoft.Sql).
pub const SQL_API_VERSION: &str = "2021-11-01";

/// ARM resource type used for server name availability checks.
pub const SQL_SERVER_RESOURCE_TYPE: &str = "Microsoft.Sql/servers";

// =============================================================================
// Timeout and Polling Constants
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Default HTTP request timeout as Duration.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS);

/// Poll interval for long-running operations when ARM sends no Retry-After.
pub const DEFAULT_LRO_POLL_INTERVAL: Duration = Duration::from_secs(10);

// =============================================================================
// Provisioning Defaults
// =============================================================================

/// Default SQL server version for `create_sql_server`.
pub const DEFAULT_SERVER_VERSION: &str = "12.0";

/// Default database edition for `create_database`.
pub const DEFAULT_DATABASE_EDITION: &str = "Basic";

/// Default service objective for `create_database`.
pub const DEFAULT_SERVICE_OBJECTIVE: &str = "Basic";

/// Fallback edition suggested by `database_creation_prompt` for unknown
/// load/size combinations.
pub const FALLBACK_EDITION: &str = "Standard";

/// Fallback service objective suggested by `database_creation_prompt`.
pub const FALLBACK_SERVICE_OBJECTIVE: &str = "S1";

// =============================================================================
// Wire-Visible Names
// =============================================================================

/// URI of the subscription info resource.
pub const SUBSCRIPTION_RESOURCE_URI: &str = "azure://subscription";

/// URI of the all-servers resource.
pub const SERVERS_RESOURCE_URI: &str = "azure://servers";

/// Name of the database creation guidance prompt.
pub const DATABASE_CREATION_PROMPT: &str = "database_creation_prompt";
