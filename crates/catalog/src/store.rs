use async_trait::async_trait;

use crate::{NewProduct, Product, ProductId, ProductQuery, Result};

/// Persistence boundary for the product record.
///
/// Atomic only over the local record: nothing here coordinates with the
/// inventory service. All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persists a new product, assigning its id and timestamps.
    ///
    /// Fails with `Conflict` when a storage constraint is violated.
    async fn insert(&self, product: NewProduct) -> Result<Product>;

    /// Persists changes to an existing product and refreshes `updated_at`.
    ///
    /// Fails with `NotFound` if the product does not exist.
    async fn update(&self, product: Product) -> Result<Product>;

    /// Loads a product by id.
    ///
    /// Returns None if the product doesn't exist.
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>>;

    /// Lists products matching a query.
    async fn find_all(&self, query: ProductQuery) -> Result<Vec<Product>>;

    /// Removes a product.
    ///
    /// Fails with `NotFound` if the product does not exist.
    async fn delete(&self, id: ProductId) -> Result<()>;
}
