//! Read paths that decorate products with their inventory quantity.

use catalog::{Product, ProductId, ProductQuery, ProductStore};
use inventory::{InventoryGateway, quantities_by_product, quantity_for};

use crate::error::{Result, SagaError};
use crate::view::ProductWithQuantity;

/// Product lookups, listing and deletion.
///
/// Quantities come from the inventory service on every read; nothing is
/// cached between requests.
pub struct ProductCatalog<S, G>
where
    S: ProductStore,
    G: InventoryGateway,
{
    store: S,
    inventory: G,
}

impl<S, G> ProductCatalog<S, G>
where
    S: ProductStore,
    G: InventoryGateway,
{
    pub fn new(store: S, inventory: G) -> Self {
        Self { store, inventory }
    }

    /// Loads one product with its quantity.
    ///
    /// An unknown id fails with `NotFound` before the inventory service is
    /// contacted.
    #[tracing::instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<ProductWithQuantity> {
        let product = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(SagaError::NotFound(id))?;

        self.with_quantity(product).await
    }

    /// Lists products, decorating all of them with a single bulk lookup.
    #[tracing::instrument(skip(self))]
    pub async fn list_products(&self, query: ProductQuery) -> Result<Vec<ProductWithQuantity>> {
        let products = self.store.find_all(query).await?;
        let ids: Vec<ProductId> = products.iter().map(|p| p.id).collect();

        let records = self.inventory.bulk_fetch(&ids).await?;
        let quantities = quantities_by_product(&records);
        tracing::debug!(
            products = products.len(),
            with_inventory = quantities.len(),
            "products listed"
        );

        Ok(products
            .into_iter()
            .map(|product| {
                let quantity = quantities.get(&product.id).copied();
                ProductWithQuantity::new(product, quantity)
            })
            .collect())
    }

    /// Removes the local product row.
    ///
    /// The inventory record is left in place.
    #[tracing::instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<()> {
        if self.store.find_by_id(id).await?.is_none() {
            return Err(SagaError::NotFound(id));
        }
        self.store.delete(id).await?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }

    /// Attaches the current inventory quantity to an already loaded product.
    pub async fn with_quantity(&self, product: Product) -> Result<ProductWithQuantity> {
        let records = self.inventory.bulk_fetch(&[product.id]).await?;
        let quantity = quantity_for(product.id, &records);
        Ok(ProductWithQuantity::new(product, quantity))
    }
}
