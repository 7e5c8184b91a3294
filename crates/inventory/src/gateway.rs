//! Inventory gateway trait.

use async_trait::async_trait;

use crate::{InventoryRecord, ProductId, Result};

/// Operations the product service needs from the inventory service.
///
/// The inventory service is the system of record for quantity; nothing
/// behind this trait is transactional with the product store.
#[async_trait]
pub trait InventoryGateway: Send + Sync {
    /// Creates the inventory record for a freshly persisted product.
    ///
    /// Retried with a bounded, fixed-delay policy. The returned record has
    /// been validated to carry an identity; a 2xx answer without one fails
    /// with `InvalidResponse` and is not retried.
    async fn create(&self, product_id: ProductId, quantity: i32) -> Result<InventoryRecord>;

    /// Fetches inventory records for the given products in one round trip.
    ///
    /// Products without a record are simply absent from the result. Single
    /// attempt.
    async fn bulk_fetch(&self, product_ids: &[ProductId]) -> Result<Vec<InventoryRecord>>;

    /// Sets the available quantity of a product. Single attempt.
    async fn update(&self, product_id: ProductId, quantity: i32) -> Result<()>;
}
