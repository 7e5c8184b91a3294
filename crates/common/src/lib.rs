//! Shared types used across the product catalog workspace.

pub mod types;

pub use types::{ParseProductIdError, ProductId};
