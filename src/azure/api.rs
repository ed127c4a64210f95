//! Capability traits for the Azure management planes.
//!
//! Tool handlers depend on these traits rather than on the HTTP client, which
//! keeps the handlers testable against stub implementations. The contract is
//! deliberately thin: every call is synchronous-to-completion from the
//! caller's point of view (long-running creates poll internally), and every
//! fault surfaces as a [`ServerError`].

use crate::azure::models::{
    Database, DatabaseParams, NameAvailability, ResourceGroup, ResourceGroupParams, ServerParams,
    SqlServer,
};
use crate::error::ServerError;
use async_trait::async_trait;

/// Resource-management plane (resource groups).
#[async_trait]
pub trait ResourceApi: Send + Sync {
    /// List all resource groups in the subscription.
    async fn list_resource_groups(&self) -> Result<Vec<ResourceGroup>, ServerError>;

    /// Create or update a resource group.
    async fn create_or_update_resource_group(
        &self,
        name: &str,
        params: ResourceGroupParams,
    ) -> Result<ResourceGroup, ServerError>;
}

/// SQL-management plane (servers and databases).
#[async_trait]
pub trait SqlApi: Send + Sync {
    /// List SQL servers, optionally scoped to a resource group.
    async fn list_servers(
        &self,
        resource_group: Option<&str>,
    ) -> Result<Vec<SqlServer>, ServerError>;

    /// Get a single SQL server.
    async fn get_server(
        &self,
        resource_group: &str,
        server_name: &str,
    ) -> Result<SqlServer, ServerError>;

    /// Check whether a server name is globally available.
    async fn check_server_name_availability(
        &self,
        server_name: &str,
    ) -> Result<NameAvailability, ServerError>;

    /// Create or update a SQL server. Long-running; resolves only once the
    /// operation reaches a terminal state.
    async fn create_or_update_server(
        &self,
        resource_group: &str,
        server_name: &str,
        params: ServerParams,
    ) -> Result<SqlServer, ServerError>;

    /// List databases on a server.
    async fn list_databases(
        &self,
        resource_group: &str,
        server_name: &str,
    ) -> Result<Vec<Database>, ServerError>;

    /// Create or update a database. Long-running; resolves only once the
    /// operation reaches a terminal state.
    async fn create_or_update_database(
        &self,
        resource_group: &str,
        server_name: &str,
        database_name: &str,
        params: DatabaseParams,
    ) -> Result<Database, ServerError>;
}
