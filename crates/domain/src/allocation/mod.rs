//! Batch allocation: order lines, stock batches and the allocation service.

mod batch;
mod order_line;
mod service;

pub use batch::Batch;
pub use order_line::OrderLine;
pub use service::{allocate, allocation_priority, deallocate};

use common::{BatchReference, Sku};
use thiserror::Error;

/// Errors that can occur while allocating order lines to batches.
///
/// A wrong SKU and a lack of capacity are reported the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// The batch cannot accept the line.
    #[error("Cannot allocate line: {qty} x {sku} to batch {reference}")]
    CannotAllocate {
        reference: BatchReference,
        sku: Sku,
        qty: u32,
    },

    /// No candidate batch can accept the line.
    #[error("No batch can allocate the line: {qty} x {sku}")]
    OutOfStock { sku: Sku, qty: u32 },
}
