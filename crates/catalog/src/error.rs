use thiserror::Error;

use crate::ProductId;

/// Errors that can occur when interacting with the product store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The product was not found in the store.
    #[error("Product not found with id: {0}")]
    NotFound(ProductId),

    /// A storage constraint was violated (e.g. a duplicate product name).
    #[error("Integrity error while saving product: {0}")]
    Conflict(String),

    /// The store could not be reached or failed internally.
    #[error("Product store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for product store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
