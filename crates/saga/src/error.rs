//! Saga error types.

use catalog::StoreError;
use common::ProductId;
use inventory::InventoryError;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during product operations.
///
/// Store and inventory failures pass through unchanged so callers see the
/// original cause.
#[derive(Debug, Error)]
pub enum SagaError {
    /// No product with this id exists locally.
    #[error("Product not found with id: {0}")]
    NotFound(ProductId),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Classification of a failure, independent of where it was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    RemoteInventoryFailure,
    InvalidRemoteResponse,
    NotFound,
    PersistenceConflict,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::RemoteInventoryFailure => "remote_inventory_failure",
            ErrorKind::InvalidRemoteResponse => "invalid_remote_response",
            ErrorKind::NotFound => "not_found",
            ErrorKind::PersistenceConflict => "persistence_conflict",
            ErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SagaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SagaError::NotFound(_) => ErrorKind::NotFound,
            SagaError::Store(StoreError::NotFound(_)) => ErrorKind::NotFound,
            SagaError::Store(StoreError::Conflict(_)) => ErrorKind::PersistenceConflict,
            SagaError::Store(StoreError::Unavailable(_)) => ErrorKind::Internal,
            SagaError::Inventory(InventoryError::RemoteFailure { .. }) => {
                ErrorKind::RemoteInventoryFailure
            }
            SagaError::Inventory(InventoryError::InvalidResponse(_)) => {
                ErrorKind::InvalidRemoteResponse
            }
            SagaError::Inventory(InventoryError::Configuration(_)) => ErrorKind::Internal,
        }
    }
}

/// Convenience type alias for saga results.
pub type Result<T> = std::result::Result<T, SagaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let cases = [
            (SagaError::NotFound(ProductId::new(1)), ErrorKind::NotFound),
            (
                StoreError::NotFound(ProductId::new(1)).into(),
                ErrorKind::NotFound,
            ),
            (
                StoreError::Conflict("dup".to_string()).into(),
                ErrorKind::PersistenceConflict,
            ),
            (
                StoreError::Unavailable("down".to_string()).into(),
                ErrorKind::Internal,
            ),
            (
                InventoryError::unexpected_status(503, None).into(),
                ErrorKind::RemoteInventoryFailure,
            ),
            (
                InventoryError::InvalidResponse("empty body".to_string()).into(),
                ErrorKind::InvalidRemoteResponse,
            ),
        ];

        for (error, kind) in cases {
            assert_eq!(error.kind(), kind, "{error}");
        }
    }

    #[test]
    fn test_wrapped_errors_are_transparent() {
        let store: SagaError = StoreError::Unavailable("Database connection failed".to_string()).into();
        assert_eq!(
            store.to_string(),
            "Product store unavailable: Database connection failed"
        );

        let remote: SagaError =
            InventoryError::unexpected_status(400, Some("Invalid data".to_string())).into();
        assert_eq!(
            remote.to_string(),
            "Inventory service responded with status 400"
        );
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::RemoteInventoryFailure).unwrap();
        assert_eq!(json, "\"remote_inventory_failure\"");
        assert_eq!(ErrorKind::PersistenceConflict.to_string(), "persistence_conflict");
    }
}
