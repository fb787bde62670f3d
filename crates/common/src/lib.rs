//! Shared identifier types used across the allocation workspace.

mod types;

pub use types::{BatchReference, OrderId, Sku};
