//! Error types for the Azure SQL MCP Server.
//!
//! Two tiers of failure exist:
//!
//! - [`ServerError`]: faults raised while talking to Azure (authentication,
//!   transport, ARM error responses). These never cross a tool boundary.
//! - [`OpFailure`]: the in-band failure payload a tool handler produces. Tool
//!   results are always "successful" at the protocol level; failures travel as
//!   text so the calling agent can read and react to them. `OpFailure` keeps a
//!   machine-checkable [`FailureKind`] alongside the message so internal logic
//!   and tests can branch on the kind instead of parsing strings.

use thiserror::Error;

/// Faults from the Azure control plane or the layers beneath it.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential construction or token acquisition failure
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// HTTP transport failure before an ARM response was received
    #[error("Request error: {message}")]
    Http {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// ARM answered with an error payload
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// ARM answered 404 for the addressed resource
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A long-running operation reached a failed or canceled terminal state
    #[error("Operation failed: {0}")]
    Operation(String),

    /// ARM response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ServerError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an authentication error.
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create an HTTP transport error without a source.
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http {
            message: msg.into(),
            source: None,
        }
    }

    /// Create an ARM API error.
    pub fn api(status: u16, code: Option<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            code,
            message: message.into(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    /// Create a long-running-operation failure.
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// Create an invalid-response error.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Whether this fault means the addressed resource does not exist.
    ///
    /// `create_database` uses this to distinguish a missing server from a
    /// generic provisioning fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_)) || matches!(self, Self::Api { status: 404, .. })
    }
}

impl From<reqwest::Error> for ServerError {
    fn from(e: reqwest::Error) -> Self {
        let message = e.to_string();
        ServerError::Http {
            message,
            source: Some(e),
        }
    }
}

/// Classification of an in-band tool failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Session context has no client handle; nothing was attempted.
    NotInitialized,
    /// Structured input was malformed; nothing was attempted.
    InvalidInput,
    /// The addressed resource does not exist.
    NotFound,
    /// The Azure API rejected or failed the call.
    Api,
}

/// In-band failure payload for a tool invocation.
///
/// Carries the exact text that will be returned to the caller plus the kind of
/// failure. Formatting into text happens when the failure is constructed; the
/// boundary only forwards `message`.
#[derive(Debug, Clone)]
pub struct OpFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl OpFailure {
    /// The uniform message for tools that need the resource-management client.
    pub fn not_initialized() -> Self {
        Self {
            kind: FailureKind::NotInitialized,
            message: "Error: Azure client not initialized. Please check your credentials."
                .to_string(),
        }
    }

    /// The uniform message for tools that need the sql-management client.
    pub fn sql_not_initialized() -> Self {
        Self {
            kind: FailureKind::NotInitialized,
            message: "Error: Azure SQL client not initialized. Please check your credentials."
                .to_string(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::InvalidInput,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::NotFound,
            message: message.into(),
        }
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Api,
            message: message.into(),
        }
    }

    /// Build the generic "Failed to <verb>: <message>" failure for a fault
    /// raised by the external API.
    pub fn failed_to(verb: &str, err: &ServerError) -> Self {
        Self::api(format!("Failed to {}: {}", verb, err))
    }

    /// Consume the failure and return the text payload.
    pub fn into_text(self) -> String {
        self.message
    }
}

impl std::fmt::Display for OpFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
