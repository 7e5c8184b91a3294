//! Product orchestrator coordinating the product store and the inventory service.

use std::time::Instant;

use catalog::{NewProduct, Product, ProductChanges, ProductId, ProductStore};
use inventory::{InventoryGateway, quantity_for};

use crate::error::{Result, SagaError};
use crate::state::CreationState;
use crate::view::ProductWithQuantity;

/// Orchestrates writes that span the product store and the inventory service.
///
/// Creation is a two-step saga (persist product, then create inventory) with
/// no compensating step: an inventory failure after the product committed
/// leaves the product persisted and surfaces the inventory error.
pub struct ProductOrchestrator<S, G>
where
    S: ProductStore,
    G: InventoryGateway,
{
    store: S,
    inventory: G,
}

impl<S, G> ProductOrchestrator<S, G>
where
    S: ProductStore,
    G: InventoryGateway,
{
    /// Creates a new product orchestrator.
    pub fn new(store: S, inventory: G) -> Self {
        Self { store, inventory }
    }

    /// Persists a product, then creates its inventory record with `quantity`.
    ///
    /// A store failure propagates unchanged and the inventory service is never
    /// contacted. An inventory failure propagates unchanged too, but the
    /// product stays persisted.
    #[tracing::instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create_product_with_inventory(
        &self,
        product: NewProduct,
        quantity: i32,
    ) -> Result<Product> {
        metrics::counter!("saga_executions_total").increment(1);
        let saga_start = Instant::now();
        let mut state = CreationState::default();

        tracing::info!(step = %state, "saga step started");
        let product = match self.store.insert(product).await {
            Ok(product) => product,
            Err(e) => {
                state = state.fail();
                self.finish(state, saga_start);
                tracing::warn!(step = %state, error = %e, "product could not be persisted");
                return Err(SagaError::Store(e));
            }
        };
        state = state.succeed();

        tracing::info!(step = %state, product_id = %product.id, quantity, "saga step started");
        match self.inventory.create(product.id, quantity).await {
            Ok(record) => {
                state = state.succeed();
                self.finish(state, saga_start);
                tracing::info!(
                    product_id = %product.id,
                    inventory_id = ?record.id,
                    "product created with inventory"
                );
                Ok(product)
            }
            Err(e) => {
                state = state.fail();
                self.finish(state, saga_start);
                if state.leaves_orphan() {
                    metrics::counter!("saga_orphaned_products_total").increment(1);
                    tracing::warn!(
                        product_id = %product.id,
                        error = %e,
                        "inventory creation failed; product persisted without inventory"
                    );
                }
                Err(SagaError::Inventory(e))
            }
        }
    }

    /// Applies `changes` to a product and, if a different quantity was asked
    /// for, pushes it to the inventory service.
    ///
    /// The current quantity is read with a single-product lookup; the update
    /// call is skipped when the requested quantity matches it.
    #[tracing::instrument(skip(self, changes))]
    pub async fn update_product_and_maybe_inventory(
        &self,
        id: ProductId,
        changes: ProductChanges,
    ) -> Result<ProductWithQuantity> {
        let mut product = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(SagaError::NotFound(id))?;

        changes.apply_to(&mut product);
        let product = self.store.update(product).await?;

        let records = self.inventory.bulk_fetch(&[id]).await?;
        let current = quantity_for(id, &records);

        let quantity = match changes.quantity {
            Some(requested) if Some(requested) != current => {
                self.inventory.update(id, requested).await?;
                tracing::info!(
                    product_id = %id,
                    previous = ?current,
                    quantity = requested,
                    "inventory quantity changed"
                );
                Some(requested)
            }
            _ => current,
        };

        Ok(ProductWithQuantity::new(product, quantity))
    }

    fn finish(&self, state: CreationState, saga_start: Instant) {
        metrics::histogram!("saga_duration_seconds").record(saga_start.elapsed().as_secs_f64());
        match state {
            CreationState::Done => metrics::counter!("saga_completed").increment(1),
            CreationState::Aborted | CreationState::Failed => {
                metrics::counter!("saga_failed").increment(1)
            }
            _ => {}
        }
    }
}
