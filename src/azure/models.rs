//! ARM wire types for the resource and SQL management planes.
//!
//! Only the fields the server formats or forwards are modelled; ARM payloads
//! carry much more, and serde ignores the rest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Envelope for ARM list responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(default)]
    pub next_link: Option<String>,
}

/// A resource group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceGroup {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub tags: Option<HashMap<String, String>>,
}

/// Body for `createOrUpdateResourceGroup`.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceGroupParams {
    pub location: String,
    pub tags: HashMap<String, String>,
}

/// A logical SQL server (control plane).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlServer {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub properties: ServerProperties,
}

/// Control-plane properties of a SQL server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerProperties {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub administrator_login: Option<String>,
    #[serde(default)]
    pub fully_qualified_domain_name: Option<String>,
}

impl SqlServer {
    /// Extract the owning resource group from the ARM resource id.
    ///
    /// Ids look like
    /// `/subscriptions/{sub}/resourceGroups/{rg}/providers/Microsoft.Sql/servers/{name}`.
    pub fn resource_group(&self) -> Option<&str> {
        self.id.as_deref().and_then(|id| id.split('/').nth(4))
    }
}

/// Body for `createOrUpdateServer`.
#[derive(Debug, Clone, Serialize)]
pub struct ServerParams {
    pub location: String,
    pub properties: ServerCreateProperties,
}

/// Properties block for server creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCreateProperties {
    pub version: String,
    pub administrator_login: String,
    pub administrator_login_password: String,
}

/// A database on a SQL server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub sku: Option<Sku>,
    #[serde(default)]
    pub properties: DatabaseProperties,
}

/// Performance tier and pricing class of a database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sku {
    pub name: String,
    #[serde(default)]
    pub tier: Option<String>,
}

/// Control-plane properties of a database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseProperties {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub max_size_bytes: Option<i64>,
    #[serde(default)]
    pub current_service_objective_name: Option<String>,
}

/// Body for `createOrUpdateDatabase`.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseParams {
    pub location: String,
    pub sku: Sku,
}

/// Body for `checkServerNameAvailability`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckNameRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
}

/// Result of a server name availability check.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameAvailability {
    pub available: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// ARM error envelope (`{"error": {"code": ..., "message": ...}}`).
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<ErrorDetail>,
}

/// Inner ARM error detail.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Status body polled from an `Azure-AsyncOperation` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationStatus {
    pub status: String,
    #[serde(default)]
    pub error: Option<ErrorDetail>,
}

impl OperationStatus {
    /// Whether the operation has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status.as_str(),
            "Succeeded" | "Failed" | "Canceled" | "Cancelled"
        )
    }

    /// Whether the operation finished successfully.
    pub fn succeeded(&self) -> bool {
        self.status == "Succeeded"
    }
}
