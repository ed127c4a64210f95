//! Configuration management for the Azure SQL MCP Server.
//!
//! Configuration is loaded from environment variables following the 12-factor
//! app pattern. Unlike most servers, a missing subscription id is not a startup
//! failure: the server comes up in a degraded mode where every tool reports an
//! initialization error, so documentation surfaces (prompts, the subscription
//! resource) keep responding.

use serde::{Deserialize, Serialize};

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Azure subscription to operate on. `None` puts the server in degraded
    /// mode.
    pub subscription_id: Option<String>,

    /// Authentication configuration.
    pub auth: AuthConfig,
}

/// Authentication configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthConfig {
    /// Service principal authentication (client credentials flow).
    ServicePrincipal {
        /// Azure AD tenant ID
        tenant_id: String,
        /// Client ID for the Azure AD application
        client_id: String,
        /// Client secret
        client_secret: String,
    },

    /// Ambient credential resolved from the host environment (managed
    /// identity, Azure CLI session, etc.).
    DefaultChain,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AZURE_SUBSCRIPTION_ID`: subscription to manage (omit for degraded mode)
    /// - `AZURE_TENANT_ID`: tenant for service principal auth
    /// - `AZURE_CLIENT_ID`: client id for service principal auth
    /// - `AZURE_CLIENT_SECRET`: client secret for service principal auth
    ///
    /// Service principal auth is selected only when all three of tenant id,
    /// client id, and client secret are present; any partial set falls back to
    /// the ambient credential chain.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("AZURE_SUBSCRIPTION_ID").ok(),
            std::env::var("AZURE_TENANT_ID").ok(),
            std::env::var("AZURE_CLIENT_ID").ok(),
            std::env::var("AZURE_CLIENT_SECRET").ok(),
        )
    }

    /// Build a configuration from the four optional values.
    pub fn from_values(
        subscription_id: Option<String>,
        tenant_id: Option<String>,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Self {
        let auth = match (tenant_id, client_id, client_secret) {
            (Some(tenant_id), Some(client_id), Some(client_secret)) => {
                AuthConfig::ServicePrincipal {
                    tenant_id,
                    client_id,
                    client_secret,
                }
            }
            _ => AuthConfig::DefaultChain,
        };

        Config {
            subscription_id,
            auth,
        }
    }

    /// Whether a subscription id is configured.
    pub fn is_configured(&self) -> bool {
        self.subscription_id.is_some()
    }
}
