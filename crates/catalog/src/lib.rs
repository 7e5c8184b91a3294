//! Product catalog entity and persistence.
//!
//! The product record is owned locally. This crate provides:
//! - `Product` and its creation/partial-update inputs
//! - the `ProductStore` trait that the catalog services persist through
//! - an in-memory store used by tests and the default server wiring

pub mod error;
pub mod memory;
pub mod product;
pub mod query;
pub mod store;

pub use common::ProductId;
pub use error::{Result, StoreError};
pub use memory::InMemoryProductStore;
pub use product::{NewProduct, Product, ProductChanges};
pub use query::{ProductQuery, SortOrder};
pub use store::ProductStore;
