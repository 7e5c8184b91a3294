//! Inventory client error types.

use thiserror::Error;

/// Errors raised while talking to the inventory service.
#[derive(Debug, Clone, Error)]
pub enum InventoryError {
    /// Transport error or non-2xx response.
    ///
    /// Carries the message of the most recent failure together with the HTTP
    /// status and raw response body when the service answered at all.
    #[error("{message}")]
    RemoteFailure {
        message: String,
        status: Option<u16>,
        body: Option<String>,
    },

    /// The service answered 2xx but the payload is unusable.
    #[error("Invalid inventory service response: {0}")]
    InvalidResponse(String),

    /// The client could not be built from its configuration.
    #[error("Invalid inventory client configuration: {0}")]
    Configuration(String),
}

impl InventoryError {
    /// Wraps a transport-level failure (connection refused, timeout, ...).
    pub fn transport(err: reqwest::Error) -> Self {
        InventoryError::RemoteFailure {
            message: format!("Failed to reach inventory service: {err}"),
            status: None,
            body: None,
        }
    }

    /// Builds the failure for a non-2xx response.
    pub fn unexpected_status(status: u16, body: Option<String>) -> Self {
        InventoryError::RemoteFailure {
            message: format!("Inventory service responded with status {status}"),
            status: Some(status),
            body,
        }
    }

    /// HTTP status of the failed response, if the service answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            InventoryError::RemoteFailure { status, .. } => *status,
            _ => None,
        }
    }

    /// Raw body of the failed response, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            InventoryError::RemoteFailure { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Prefixes the message of a remote failure, keeping status and body.
    pub fn with_context(self, context: impl std::fmt::Display) -> Self {
        match self {
            InventoryError::RemoteFailure {
                message,
                status,
                body,
            } => InventoryError::RemoteFailure {
                message: format!("{context}: {message}"),
                status,
                body,
            },
            other => other,
        }
    }
}

/// Result type for inventory operations.
pub type Result<T> = std::result::Result<T, InventoryError>;
