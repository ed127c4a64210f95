//! Credential resolution for the Azure management planes.
//!
//! Supports two strategies, chosen once at startup:
//! - Service principal (client credentials flow) when tenant id, client id,
//!   and client secret are all configured
//! - The default credential chain (managed identity, Azure CLI session, etc.)
//!   otherwise

use crate::config::AuthConfig;
use crate::constants::ARM_SCOPE;
use crate::error::ServerError;
use azure_core::credentials::{Secret, TokenCredential};
use azure_identity::{ClientSecretCredential, DefaultAzureCredential};
use std::sync::Arc;
use tracing::{debug, info};

/// Shared handle to the resolved credential.
pub type SharedCredential = Arc<dyn TokenCredential>;

/// Build a credential from the configured authentication strategy.
///
/// This runs exactly once per process lifetime.
pub fn resolve_credential(auth: &AuthConfig) -> Result<SharedCredential, ServerError> {
    match auth {
        AuthConfig::ServicePrincipal {
            tenant_id,
            client_id,
            client_secret,
        } => {
            // Log a prefix only; char-wise so an odd id cannot split a
            // character.
            let id_prefix: String = client_id.chars().take(8).collect();
            debug!(
                "Building service principal credential for client_id: {}",
                id_prefix
            );

            let credential: SharedCredential = ClientSecretCredential::new(
                tenant_id,
                client_id.clone(),
                Secret::new(client_secret.clone()),
                None,
            )
            .map_err(|e| {
                ServerError::auth(format!(
                    "Failed to build service principal credential: {}",
                    e
                ))
            })?;

            info!("Using Service Principal authentication");
            Ok(credential)
        }
        AuthConfig::DefaultChain => {
            let credential: SharedCredential = DefaultAzureCredential::new().map_err(|e| {
                ServerError::auth(format!("Failed to build default credential chain: {}", e))
            })?;

            info!("Using Default Azure credential");
            Ok(credential)
        }
    }
}

/// Acquire a bearer token for the ARM scope.
pub async fn acquire_arm_token(credential: &SharedCredential) -> Result<String, ServerError> {
    let token_response = credential
        .get_token(&[ARM_SCOPE], None)
        .await
        .map_err(|e| ServerError::auth(format!("Failed to acquire ARM token: {}", e)))?;

    Ok(token_response.token.secret().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_principal_credential_constructs() {
        let auth = AuthConfig::ServicePrincipal {
            tenant_id: "contoso.onmicrosoft.com".to_string(),
            client_id: "11111111-2222-3333-4444-555555555555".to_string(),
            client_secret: "s3cret".to_string(),
        };
        assert!(resolve_credential(&auth).is_ok());
    }

    #[test]
    fn test_multibyte_client_id_does_not_panic() {
        // The logged prefix is taken char-wise; an id shorter than the
        // prefix or containing multi-byte characters must still resolve.
        let auth = AuthConfig::ServicePrincipal {
            tenant_id: "contoso.onmicrosoft.com".to_string(),
            client_id: "クライアント識別子テスト".to_string(),
            client_secret: "s3cret".to_string(),
        };
        assert!(resolve_credential(&auth).is_ok());
    }
}
