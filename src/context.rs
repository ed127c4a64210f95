//! Session context shared by every tool invocation.
//!
//! The [`AzureContext`] is built exactly once at startup and never mutated
//! afterwards. Arbitrarily many invocations may hold a reference to it
//! concurrently, so immutability after construction is the one
//! correctness-relevant invariant here; there are no locks.
//!
//! Initialization never fails the process. A missing subscription id, a
//! credential that cannot be built, or a client that cannot be constructed all
//! degrade the context instead: the subscription id may still be present, but
//! the client handles are absent, and every tool reports an initialization
//! error rather than attempting a call.

use crate::azure::{ArmClient, ResourceApi, SqlApi};
use crate::config::Config;
use std::sync::Arc;
use tracing::{info, warn};

/// Azure management context, held for the server process lifetime.
pub struct AzureContext {
    subscription_id: Option<String>,
    resources: Option<Arc<dyn ResourceApi>>,
    sql: Option<Arc<dyn SqlApi>>,
}

impl AzureContext {
    /// Resolve credentials and construct the management clients.
    ///
    /// Runs once per process lifetime. Returns a degraded context (never an
    /// error) when configuration is missing or client construction fails.
    pub async fn initialize(config: &Config) -> Self {
        let Some(subscription_id) = config.subscription_id.as_deref() else {
            warn!("AZURE_SUBSCRIPTION_ID not set; tools will report an initialization error");
            return Self::degraded();
        };

        let credential = match crate::azure::resolve_credential(&config.auth) {
            Ok(credential) => credential,
            Err(e) => {
                warn!("Could not initialize Azure credential: {}", e);
                return Self {
                    subscription_id: Some(subscription_id.to_string()),
                    resources: None,
                    sql: None,
                };
            }
        };

        // Both planes share one client; construction failure degrades rather
        // than aborting so documentation surfaces keep responding.
        match ArmClient::new(credential, subscription_id) {
            Ok(client) => {
                info!("Connected to Azure subscription: {}", subscription_id);
                let client = Arc::new(client);
                Self {
                    subscription_id: Some(subscription_id.to_string()),
                    resources: Some(client.clone() as Arc<dyn ResourceApi>),
                    sql: Some(client as Arc<dyn SqlApi>),
                }
            }
            Err(e) => {
                warn!("Could not initialize Azure clients: {}", e);
                Self {
                    subscription_id: Some(subscription_id.to_string()),
                    resources: None,
                    sql: None,
                }
            }
        }
    }

    /// A context with every field absent.
    pub fn degraded() -> Self {
        Self {
            subscription_id: None,
            resources: None,
            sql: None,
        }
    }

    /// Assemble a context from explicit handles. Used by tests to inject stub
    /// management planes.
    pub fn with_clients(
        subscription_id: impl Into<String>,
        resources: Arc<dyn ResourceApi>,
        sql: Arc<dyn SqlApi>,
    ) -> Self {
        Self {
            subscription_id: Some(subscription_id.into()),
            resources: Some(resources),
            sql: Some(sql),
        }
    }

    /// The configured subscription id, if any.
    pub fn subscription_id(&self) -> Option<&str> {
        self.subscription_id.as_deref()
    }

    /// The resource-management handle, if initialized.
    pub fn resources(&self) -> Option<&Arc<dyn ResourceApi>> {
        self.resources.as_ref()
    }

    /// The sql-management handle, if initialized.
    pub fn sql(&self) -> Option<&Arc<dyn SqlApi>> {
        self.sql.as_ref()
    }

    /// Whether both client handles are present.
    pub fn is_initialized(&self) -> bool {
        self.resources.is_some() && self.sql.is_some()
    }
}

impl Drop for AzureContext {
    fn drop(&mut self) {
        // Handles are released by Arc; nothing to tear down explicitly.
        info!("Azure client context closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_missing_subscription_degrades() {
        let config = Config::from_values(None, None, None, None);
        let ctx = AzureContext::initialize(&config).await;
        assert!(ctx.subscription_id().is_none());
        assert!(ctx.resources().is_none());
        assert!(ctx.sql().is_none());
        assert!(!ctx.is_initialized());
    }

    #[tokio::test]
    async fn test_subscription_with_default_chain() {
        let config = Config::from_values(Some("sub-1234".into()), None, None, None);
        let ctx = AzureContext::initialize(&config).await;
        // Building the default credential chain can fail on hosts without
        // any credential source; the subscription id survives either way,
        // and the handles are all-or-nothing.
        assert_eq!(ctx.subscription_id(), Some("sub-1234"));
        assert_eq!(ctx.resources().is_some(), ctx.sql().is_some());
    }

    #[test]
    fn test_degraded_invariant() {
        // If subscription_id is absent, both handles must be absent.
        let ctx = AzureContext::degraded();
        assert!(ctx.subscription_id().is_none());
        assert!(!ctx.is_initialized());
    }
}
