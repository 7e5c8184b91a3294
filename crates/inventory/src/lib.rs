//! Client side of the inventory service.
//!
//! The inventory service owns quantity-on-hand; this crate is the only code
//! that speaks its wire protocol. It provides:
//! - `InventoryGateway`, the create / bulk-fetch / update operations
//! - `HttpInventoryGateway`, the reqwest implementation with a bounded
//!   retry on creation
//! - `quantity_for` and `quantities_by_product` for decorating products on read paths
//! - `InMemoryInventoryGateway` for tests and local wiring

pub mod aggregator;
pub mod error;
pub mod gateway;
pub mod http;
pub mod memory;
pub mod record;
pub mod retry;
pub mod validation;

pub use aggregator::{quantities_by_product, quantity_for};
pub use common::ProductId;
pub use error::{InventoryError, Result};
pub use gateway::InventoryGateway;
pub use http::{HttpInventoryGateway, InventoryConfig};
pub use memory::InMemoryInventoryGateway;
pub use record::{
    BulkFetchRequest, InventoryAttributes, InventoryListResponse, InventoryRecord,
    InventoryRequest, InventoryResponse, RESOURCE_TYPE,
};
pub use retry::RetryPolicy;
