use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    NewProduct, Product, ProductId, ProductQuery, Result, SortOrder, StoreError,
    store::ProductStore,
};

#[derive(Debug, Default)]
struct InMemoryState {
    products: BTreeMap<ProductId, Product>,
    last_id: i64,
}

/// In-memory product store.
///
/// Assigns sequential ids starting at 1 and enforces unique product names,
/// which stands in for the unique constraint of a relational table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductStore {
    state: Arc<RwLock<InMemoryState>>,
    fail_on_write: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryProductStore {
    /// Creates a new empty in-memory product store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail every insert/update/delete.
    pub fn set_fail_on_write(&self, fail: bool) {
        self.fail_on_write.store(fail, Ordering::SeqCst);
    }

    /// Returns the number of write attempts (including failed ones).
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Returns the number of stored products.
    pub async fn product_count(&self) -> usize {
        self.state.read().await.products.len()
    }

    fn begin_write(&self) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_write.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "Database connection failed".to_string(),
            ));
        }
        Ok(())
    }
}

fn ensure_unique_name(
    products: &BTreeMap<ProductId, Product>,
    name: &str,
    except: Option<ProductId>,
) -> Result<()> {
    let taken = products
        .values()
        .any(|p| p.name == name && Some(p.id) != except);
    if taken {
        return Err(StoreError::Conflict(format!(
            "a product named '{name}' already exists"
        )));
    }
    Ok(())
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, product: NewProduct) -> Result<Product> {
        self.begin_write()?;
        let mut state = self.state.write().await;

        ensure_unique_name(&state.products, &product.name, None)?;

        state.last_id += 1;
        let id = ProductId::new(state.last_id);
        let stored = Product::from_new(id, product, Utc::now());
        state.products.insert(id, stored.clone());

        tracing::debug!(product_id = %id, "product inserted");
        Ok(stored)
    }

    async fn update(&self, mut product: Product) -> Result<Product> {
        self.begin_write()?;
        let mut state = self.state.write().await;

        let existing = state
            .products
            .get(&product.id)
            .ok_or(StoreError::NotFound(product.id))?;
        // id and creation time are owned by the store
        product.created_at = existing.created_at;

        ensure_unique_name(&state.products, &product.name, Some(product.id))?;

        product.updated_at = Utc::now();
        state.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.get(&id).cloned())
    }

    async fn find_all(&self, query: ProductQuery) -> Result<Vec<Product>> {
        let state = self.state.read().await;
        let mut products: Vec<_> = state
            .products
            .values()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();

        if query.order == SortOrder::Descending {
            products.reverse();
        }
        Ok(products)
    }

    async fn delete(&self, id: ProductId) -> Result<()> {
        self.begin_write()?;
        let mut state = self.state.write().await;
        state
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
