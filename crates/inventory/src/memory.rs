//! In-memory inventory gateway.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::validation::validate_created;
use crate::{InventoryError, InventoryGateway, InventoryRecord, ProductId, Result};

#[derive(Debug, Default)]
struct InMemoryInventoryState {
    quantities: BTreeMap<ProductId, i32>,
    next_id: u32,
    create_calls: Vec<(ProductId, i32)>,
    update_calls: Vec<(ProductId, i32)>,
    fetch_calls: Vec<Vec<ProductId>>,
    fail_on_create: bool,
    fail_on_update: bool,
    fail_on_fetch: bool,
    omit_created_id: bool,
}

/// In-memory inventory gateway for testing and local runs.
///
/// Records every call so tests can assert on what the orchestrator sent.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventoryGateway {
    state: Arc<RwLock<InMemoryInventoryState>>,
}

impl InMemoryInventoryGateway {
    /// Creates a new empty in-memory gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a quantity without recording a create call.
    pub fn with_quantity(self, product_id: ProductId, quantity: i32) -> Self {
        self.write().quantities.insert(product_id, quantity);
        self
    }

    /// Makes every create call fail as if all remote attempts were used up.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.write().fail_on_create = fail;
    }

    pub fn set_fail_on_update(&self, fail: bool) {
        self.write().fail_on_update = fail;
    }

    pub fn set_fail_on_fetch(&self, fail: bool) {
        self.write().fail_on_fetch = fail;
    }

    /// Makes create calls answer 2xx with a record that has no id.
    pub fn set_omit_created_id(&self, omit: bool) {
        self.write().omit_created_id = omit;
    }

    /// Returns the quantity currently held for a product.
    pub fn quantity_of(&self, product_id: ProductId) -> Option<i32> {
        self.read().quantities.get(&product_id).copied()
    }

    pub fn create_calls(&self) -> Vec<(ProductId, i32)> {
        self.read().create_calls.clone()
    }

    pub fn update_calls(&self) -> Vec<(ProductId, i32)> {
        self.read().update_calls.clone()
    }

    pub fn fetch_calls(&self) -> Vec<Vec<ProductId>> {
        self.read().fetch_calls.clone()
    }

    /// Total number of remote calls of any kind.
    pub fn call_count(&self) -> usize {
        let state = self.read();
        state.create_calls.len() + state.update_calls.len() + state.fetch_calls.len()
    }

    fn read(&self) -> RwLockReadGuard<'_, InMemoryInventoryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InMemoryInventoryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn service_unavailable(context: String) -> InventoryError {
    InventoryError::unexpected_status(503, Some("Service error".to_string())).with_context(context)
}

#[async_trait]
impl InventoryGateway for InMemoryInventoryGateway {
    async fn create(&self, product_id: ProductId, quantity: i32) -> Result<InventoryRecord> {
        let mut state = self.write();
        state.create_calls.push((product_id, quantity));

        if state.fail_on_create {
            return Err(service_unavailable(format!(
                "Failed to create inventory for product {product_id} after 3 attempts"
            )));
        }

        state.next_id += 1;
        let mut record = InventoryRecord::new(state.next_id.to_string(), product_id, quantity);
        if state.omit_created_id {
            record.id = None;
        }
        let record = validate_created(record)?;

        state.quantities.insert(product_id, quantity);
        Ok(record)
    }

    async fn bulk_fetch(&self, product_ids: &[ProductId]) -> Result<Vec<InventoryRecord>> {
        let mut state = self.write();
        state.fetch_calls.push(product_ids.to_vec());

        if state.fail_on_fetch {
            return Err(service_unavailable("Inventory lookup failed".to_string()));
        }

        Ok(product_ids
            .iter()
            .filter_map(|id| {
                state
                    .quantities
                    .get(id)
                    .map(|quantity| InventoryRecord::new(id.to_string(), *id, *quantity))
            })
            .collect())
    }

    async fn update(&self, product_id: ProductId, quantity: i32) -> Result<()> {
        let mut state = self.write();
        state.update_calls.push((product_id, quantity));

        if state.fail_on_update {
            return Err(service_unavailable("Inventory update failed".to_string()));
        }

        state.quantities.insert(product_id, quantity);
        Ok(())
    }
}
