//! Product creation saga and catalog read paths.
//!
//! A product lives in two systems: the local product store owns the record,
//! the remote inventory service owns its quantity. This crate coordinates
//! the two:
//! 1. Persist the product locally (assigns the id)
//! 2. Create the inventory record for that id
//!
//! There is no compensation: if step 2 fails after step 1 committed, the
//! product row stays behind without inventory. That outcome is logged and
//! counted (`saga_orphaned_products_total`) rather than undone.

pub mod error;
pub mod orchestrator;
pub mod reads;
pub mod state;
pub mod view;

pub use error::{ErrorKind, Result, SagaError};
pub use orchestrator::ProductOrchestrator;
pub use reads::ProductCatalog;
pub use state::CreationState;
pub use view::ProductWithQuantity;
