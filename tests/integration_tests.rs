//! Integration tests for the Azure SQL MCP Server.
//!
//! These run entirely against stub management planes; no Azure subscription
//! or network access is needed. They exercise the handler bodies through the
//! same [`AzureContext`] seam the live server uses, verifying the dispatch
//! contract: degraded-mode short-circuits, local input rejection,
//! availability checks, in-band fault conversion, and context immutability
//! under concurrent invocations.

use async_trait::async_trait;
use azure_sql_mcp_server::azure::models::{
    Database, DatabaseParams, DatabaseProperties, NameAvailability, ResourceGroup,
    ResourceGroupParams, ServerParams, ServerProperties, Sku, SqlServer,
};
use azure_sql_mcp_server::azure::{ResourceApi, SqlApi};
use azure_sql_mcp_server::config::{AuthConfig, Config};
use azure_sql_mcp_server::error::FailureKind;
use azure_sql_mcp_server::tools::{
    CreateDatabaseInput, CreateResourceGroupInput, CreateSqlServerInput, ListDatabasesInput,
    ListSqlServersInput,
};
use azure_sql_mcp_server::{ops, AzureContext, ServerError};
use serial_test::serial;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// =========================================================================
// Stub management planes
// =========================================================================

/// Stub resource-management plane with call counting.
#[derive(Default)]
struct StubResources {
    /// When set, every call fails with an API fault carrying this message.
    fail_with: Option<String>,
    groups: Vec<ResourceGroup>,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
}

impl StubResources {
    fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn fault(&self) -> Option<ServerError> {
        self.fail_with
            .as_ref()
            .map(|m| ServerError::api(500, None, m.clone()))
    }
}

#[async_trait]
impl ResourceApi for StubResources {
    async fn list_resource_groups(&self) -> Result<Vec<ResourceGroup>, ServerError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        match self.fault() {
            Some(e) => Err(e),
            None => Ok(self.groups.clone()),
        }
    }

    async fn create_or_update_resource_group(
        &self,
        name: &str,
        params: ResourceGroupParams,
    ) -> Result<ResourceGroup, ServerError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        match self.fault() {
            Some(e) => Err(e),
            None => Ok(ResourceGroup {
                id: None,
                name: name.to_string(),
                location: params.location,
                tags: Some(params.tags),
            }),
        }
    }
}

/// Stub sql-management plane with call counting and parameter capture.
struct StubSql {
    fail_with: Option<String>,
    servers: Vec<SqlServer>,
    databases: Vec<Database>,
    name_available: bool,
    availability_message: Option<String>,
    server_exists: bool,
    create_server_calls: AtomicUsize,
    create_database_calls: AtomicUsize,
    captured_database_params: Mutex<Option<DatabaseParams>>,
}

impl Default for StubSql {
    fn default() -> Self {
        Self {
            fail_with: None,
            servers: vec![sample_server("srv1", "rg1")],
            databases: Vec::new(),
            name_available: true,
            availability_message: None,
            server_exists: true,
            create_server_calls: AtomicUsize::new(0),
            create_database_calls: AtomicUsize::new(0),
            captured_database_params: Mutex::new(None),
        }
    }
}

impl StubSql {
    fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn fault(&self) -> Option<ServerError> {
        self.fail_with
            .as_ref()
            .map(|m| ServerError::api(500, None, m.clone()))
    }
}

#[async_trait]
impl SqlApi for StubSql {
    async fn list_servers(
        &self,
        resource_group: Option<&str>,
    ) -> Result<Vec<SqlServer>, ServerError> {
        if let Some(e) = self.fault() {
            return Err(e);
        }
        let servers = match resource_group {
            Some(rg) => self
                .servers
                .iter()
                .filter(|s| s.resource_group() == Some(rg))
                .cloned()
                .collect(),
            None => self.servers.clone(),
        };
        Ok(servers)
    }

    async fn get_server(
        &self,
        resource_group: &str,
        server_name: &str,
    ) -> Result<SqlServer, ServerError> {
        if let Some(e) = self.fault() {
            return Err(e);
        }
        if !self.server_exists {
            return Err(ServerError::not_found(format!(
                "servers/{}",
                server_name
            )));
        }
        Ok(self
            .servers
            .first()
            .cloned()
            .unwrap_or_else(|| sample_server(server_name, resource_group)))
    }

    async fn check_server_name_availability(
        &self,
        _server_name: &str,
    ) -> Result<NameAvailability, ServerError> {
        if let Some(e) = self.fault() {
            return Err(e);
        }
        Ok(NameAvailability {
            available: self.name_available,
            reason: None,
            message: self.availability_message.clone(),
        })
    }

    async fn create_or_update_server(
        &self,
        resource_group: &str,
        server_name: &str,
        params: ServerParams,
    ) -> Result<SqlServer, ServerError> {
        self.create_server_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = self.fault() {
            return Err(e);
        }
        let mut server = sample_server(server_name, resource_group);
        server.location = params.location;
        server.properties.version = Some(params.properties.version);
        server.properties.administrator_login = Some(params.properties.administrator_login);
        Ok(server)
    }

    async fn list_databases(
        &self,
        _resource_group: &str,
        _server_name: &str,
    ) -> Result<Vec<Database>, ServerError> {
        match self.fault() {
            Some(e) => Err(e),
            None => Ok(self.databases.clone()),
        }
    }

    async fn create_or_update_database(
        &self,
        _resource_group: &str,
        _server_name: &str,
        database_name: &str,
        params: DatabaseParams,
    ) -> Result<Database, ServerError> {
        self.create_database_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = self.fault() {
            return Err(e);
        }
        *self.captured_database_params.lock().unwrap() = Some(params.clone());
        Ok(Database {
            id: None,
            name: database_name.to_string(),
            location: Some(params.location),
            sku: Some(params.sku),
            properties: DatabaseProperties {
                status: Some("Online".to_string()),
                ..Default::default()
            },
        })
    }
}

fn sample_server(name: &str, resource_group: &str) -> SqlServer {
    SqlServer {
        id: Some(format!(
            "/subscriptions/sub/resourceGroups/{}/providers/Microsoft.Sql/servers/{}",
            resource_group, name
        )),
        name: name.to_string(),
        location: "eastus".to_string(),
        properties: ServerProperties {
            state: Some("Ready".to_string()),
            version: Some("12.0".to_string()),
            administrator_login: Some("admin".to_string()),
            fully_qualified_domain_name: Some(format!("{}.database.windows.net", name)),
        },
    }
}

fn stub_context(resources: Arc<StubResources>, sql: Arc<StubSql>) -> AzureContext {
    AzureContext::with_clients("sub-0000", resources, sql)
}

fn create_server_input() -> CreateSqlServerInput {
    serde_json::from_value(serde_json::json!({
        "resource_group": "rg1",
        "server_name": "newsrv",
        "location": "westeurope",
        "admin_login": "admin",
        "admin_password": "pw"
    }))
    .unwrap()
}

fn create_database_input() -> CreateDatabaseInput {
    serde_json::from_value(serde_json::json!({
        "resource_group": "rg1",
        "server_name": "srv1",
        "database_name": "appdb"
    }))
    .unwrap()
}

// =========================================================================
// Credential configuration
// =========================================================================

#[test]
#[serial]
fn from_env_selects_documented_strategy_for_all_combinations() {
    let keys = [
        "AZURE_SUBSCRIPTION_ID",
        "AZURE_TENANT_ID",
        "AZURE_CLIENT_ID",
        "AZURE_CLIENT_SECRET",
    ];
    let clear = || {
        for key in keys {
            std::env::remove_var(key);
        }
    };

    // Full service principal triple.
    clear();
    std::env::set_var("AZURE_SUBSCRIPTION_ID", "sub");
    std::env::set_var("AZURE_TENANT_ID", "tenant");
    std::env::set_var("AZURE_CLIENT_ID", "client");
    std::env::set_var("AZURE_CLIENT_SECRET", "secret");
    let config = Config::from_env();
    assert!(matches!(config.auth, AuthConfig::ServicePrincipal { .. }));
    assert!(config.is_configured());

    // Partial triple falls back to the ambient chain.
    std::env::remove_var("AZURE_CLIENT_SECRET");
    let config = Config::from_env();
    assert_eq!(config.auth, AuthConfig::DefaultChain);
    assert!(config.is_configured());

    // No auth values at all.
    std::env::remove_var("AZURE_TENANT_ID");
    std::env::remove_var("AZURE_CLIENT_ID");
    let config = Config::from_env();
    assert_eq!(config.auth, AuthConfig::DefaultChain);

    // No subscription: degraded but not an error.
    clear();
    let config = Config::from_env();
    assert!(!config.is_configured());
    assert_eq!(config.auth, AuthConfig::DefaultChain);
}

// =========================================================================
// Degraded mode
// =========================================================================

#[tokio::test]
async fn degraded_context_short_circuits_every_tool() {
    let ctx = AzureContext::degraded();

    let failure = ops::list_resource_groups(&ctx).await.unwrap_err();
    assert_eq!(failure.kind, FailureKind::NotInitialized);
    assert_eq!(
        failure.into_text(),
        "Error: Azure client not initialized. Please check your credentials."
    );

    let failure = ops::list_sql_servers(&ctx, ListSqlServersInput::default())
        .await
        .unwrap_err();
    assert_eq!(failure.kind, FailureKind::NotInitialized);
    assert_eq!(
        failure.into_text(),
        "Error: Azure SQL client not initialized. Please check your credentials."
    );

    let failure = ops::create_sql_server(&ctx, create_server_input())
        .await
        .unwrap_err();
    assert_eq!(failure.kind, FailureKind::NotInitialized);

    let failure = ops::create_database(&ctx, create_database_input())
        .await
        .unwrap_err();
    assert_eq!(failure.kind, FailureKind::NotInitialized);

    let input = ListDatabasesInput {
        resource_group: "rg1".to_string(),
        server_name: "srv1".to_string(),
    };
    let failure = ops::list_databases(&ctx, input).await.unwrap_err();
    assert_eq!(failure.kind, FailureKind::NotInitialized);
}

// =========================================================================
// Local input validation
// =========================================================================

#[tokio::test]
async fn invalid_tags_are_rejected_without_an_api_call() {
    let resources = Arc::new(StubResources::default());
    let sql = Arc::new(StubSql::default());
    let ctx = stub_context(resources.clone(), sql);

    let input = CreateResourceGroupInput {
        name: "rg-new".to_string(),
        location: "eastus".to_string(),
        tags: Some("{not json".to_string()),
    };
    let failure = ops::create_resource_group(&ctx, input).await.unwrap_err();

    assert_eq!(failure.kind, FailureKind::InvalidInput);
    assert_eq!(failure.into_text(), "Error: Tags must be valid JSON format");
    assert_eq!(resources.create_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn valid_tags_reach_the_api() {
    let resources = Arc::new(StubResources::default());
    let sql = Arc::new(StubSql::default());
    let ctx = stub_context(resources.clone(), sql);

    let input = CreateResourceGroupInput {
        name: "rg-new".to_string(),
        location: "eastus".to_string(),
        tags: Some(r#"{"Environment": "Dev"}"#.to_string()),
    };
    let text = ops::create_resource_group(&ctx, input).await.unwrap();

    assert_eq!(
        text,
        "Resource group 'rg-new' created successfully in eastus"
    );
    assert_eq!(resources.create_calls.load(Ordering::SeqCst), 1);
}

// =========================================================================
// Server creation
// =========================================================================

#[tokio::test]
async fn unavailable_server_name_short_circuits_creation() {
    let resources = Arc::new(StubResources::default());
    let sql = Arc::new(StubSql {
        name_available: false,
        availability_message: Some("Name already taken".to_string()),
        ..Default::default()
    });
    let ctx = stub_context(resources, sql.clone());

    let text = ops::create_sql_server(&ctx, create_server_input())
        .await
        .unwrap();

    assert_eq!(
        text,
        "Server name 'newsrv' is not available: Name already taken"
    );
    assert_eq!(sql.create_server_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn available_server_name_is_created_with_requested_version() {
    let resources = Arc::new(StubResources::default());
    let sql = Arc::new(StubSql::default());
    let ctx = stub_context(resources, sql.clone());

    let text = ops::create_sql_server(&ctx, create_server_input())
        .await
        .unwrap();

    assert!(text.starts_with("SQL Server created successfully!"));
    assert!(text.contains("Name: newsrv"));
    assert!(text.contains("Next steps:"));
    assert_eq!(sql.create_server_calls.load(Ordering::SeqCst), 1);
}

// =========================================================================
// Database creation
// =========================================================================

#[tokio::test]
async fn database_defaults_are_basic_basic_and_placed_in_server_region() {
    let resources = Arc::new(StubResources::default());
    let sql = Arc::new(StubSql::default());
    let ctx = stub_context(resources, sql.clone());

    let text = ops::create_database(&ctx, create_database_input())
        .await
        .unwrap();

    assert!(text.starts_with("Database created successfully!"));
    assert!(text.contains("Server=srv1.database.windows.net;Database=appdb;"));

    let params = sql
        .captured_database_params
        .lock()
        .unwrap()
        .clone()
        .expect("database create was invoked");
    assert_eq!(params.sku.name, "Basic");
    assert_eq!(params.sku.tier.as_deref(), Some("Basic"));
    // Region comes from the server lookup, not from the input.
    assert_eq!(params.location, "eastus");
}

#[tokio::test]
async fn missing_server_yields_the_specific_not_found_message() {
    let resources = Arc::new(StubResources::default());
    let sql = Arc::new(StubSql {
        server_exists: false,
        ..Default::default()
    });
    let ctx = stub_context(resources, sql.clone());

    let failure = ops::create_database(&ctx, create_database_input())
        .await
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::NotFound);
    assert_eq!(
        failure.into_text(),
        "SQL Server 'srv1' not found in resource group 'rg1'."
    );
    assert_eq!(sql.create_database_calls.load(Ordering::SeqCst), 0);
}

// =========================================================================
// Fault conversion
// =========================================================================

#[tokio::test]
async fn every_handler_converts_api_faults_to_failed_to_text() {
    let resources = Arc::new(StubResources::failing("subscription throttled"));
    let sql = Arc::new(StubSql::failing("subscription throttled"));
    let ctx = stub_context(resources, sql);

    let failure = ops::list_resource_groups(&ctx).await.unwrap_err();
    assert_eq!(failure.kind, FailureKind::Api);
    assert!(failure
        .into_text()
        .starts_with("Failed to list resource groups: "));

    let input = CreateResourceGroupInput {
        name: "rg".to_string(),
        location: "eastus".to_string(),
        tags: None,
    };
    let failure = ops::create_resource_group(&ctx, input).await.unwrap_err();
    assert!(failure
        .into_text()
        .starts_with("Failed to create resource group: "));

    let failure = ops::list_sql_servers(&ctx, ListSqlServersInput::default())
        .await
        .unwrap_err();
    assert!(failure.into_text().starts_with("Failed to list SQL servers: "));

    let failure = ops::create_sql_server(&ctx, create_server_input())
        .await
        .unwrap_err();
    assert!(failure
        .into_text()
        .starts_with("Failed to create SQL server: "));

    let input = ListDatabasesInput {
        resource_group: "rg1".to_string(),
        server_name: "srv1".to_string(),
    };
    let failure = ops::list_databases(&ctx, input).await.unwrap_err();
    assert!(failure.into_text().starts_with("Failed to list databases: "));

    let failure = ops::create_database(&ctx, create_database_input())
        .await
        .unwrap_err();
    assert!(failure.into_text().starts_with("Failed to create database: "));
}

// =========================================================================
// Listings
// =========================================================================

#[tokio::test]
async fn server_listing_filters_by_resource_group() {
    let resources = Arc::new(StubResources::default());
    let sql = Arc::new(StubSql {
        servers: vec![sample_server("a", "rg1"), sample_server("b", "rg2")],
        ..Default::default()
    });
    let ctx = stub_context(resources, sql);

    let all = ops::list_sql_servers(&ctx, ListSqlServersInput::default())
        .await
        .unwrap();
    assert!(all.contains("Name: a") && all.contains("Name: b"));

    let input = ListSqlServersInput {
        resource_group: Some("rg2".to_string()),
    };
    let filtered = ops::list_sql_servers(&ctx, input).await.unwrap();
    assert!(!filtered.contains("Name: a") && filtered.contains("Name: b"));

    let input = ListSqlServersInput {
        resource_group: Some("rg3".to_string()),
    };
    let empty = ops::list_sql_servers(&ctx, input).await.unwrap();
    assert_eq!(empty, "No SQL servers found in resource group 'rg3'.");
}

#[tokio::test]
async fn database_listing_renders_sku_fields() {
    let resources = Arc::new(StubResources::default());
    let sql = Arc::new(StubSql {
        databases: vec![Database {
            id: None,
            name: "appdb".to_string(),
            location: Some("eastus".to_string()),
            sku: Some(Sku {
                name: "S2".to_string(),
                tier: Some("Standard".to_string()),
            }),
            properties: DatabaseProperties {
                status: Some("Online".to_string()),
                max_size_bytes: Some(268_435_456_000),
                ..Default::default()
            },
        }],
        ..Default::default()
    });
    let ctx = stub_context(resources, sql);

    let input = ListDatabasesInput {
        resource_group: "rg1".to_string(),
        server_name: "srv1".to_string(),
    };
    let text = ops::list_databases(&ctx, input).await.unwrap();
    assert!(text.starts_with("DATABASES ON srv1"));
    assert!(text.contains("Edition: Standard"));
    assert!(text.contains("Service Objective: S2"));
    assert!(text.contains("Max Size: 268435456000"));
}

// =========================================================================
// Shared context
// =========================================================================

#[tokio::test]
async fn concurrent_invocations_observe_an_identical_context() {
    let resources = Arc::new(StubResources::default());
    let sql = Arc::new(StubSql::default());
    let ctx = Arc::new(stub_context(resources, sql));

    let mut handles = Vec::new();
    for _ in 0..16 {
        let ctx = Arc::clone(&ctx);
        handles.push(tokio::spawn(async move {
            let listing = ops::list_sql_servers(&ctx, ListSqlServersInput::default())
                .await
                .unwrap();
            (ctx.subscription_id().map(str::to_string), listing)
        }));
    }

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    // Every in-flight invocation saw the same subscription and inventory.
    assert!(results
        .iter()
        .all(|(sub, listing)| sub.as_deref() == Some("sub-0000") && listing == &results[0].1));
    assert!(ctx.is_initialized());
}

#[tokio::test]
async fn subscription_resource_text() {
    let resources = Arc::new(StubResources::default());
    let sql = Arc::new(StubSql::default());
    let ctx = stub_context(resources, sql);

    assert_eq!(ops::subscription_info(&ctx), "Azure Subscription ID: sub-0000");
}
