//! Domain layer for batch allocation.
//!
//! This crate holds the business rules for assigning order lines to stock
//! batches:
//! - `OrderLine` value object
//! - `Batch` entity with idempotent allocate/deallocate
//! - `allocate` / `deallocate` domain services choosing between batches
//!
//! The model is synchronous and not internally synchronized. Hosts that take
//! allocation requests concurrently must serialize them per SKU.

pub mod allocation;
pub mod error;

pub use allocation::{
    AllocationError, Batch, OrderLine, allocate, allocation_priority, deallocate,
};
pub use common::{BatchReference, OrderId, Sku};
pub use error::DomainError;
