//! Domain error types.

use common::BatchReference;
use thiserror::Error;

use crate::allocation::AllocationError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An order line could not be allocated.
    #[error("Allocation error: {0}")]
    Allocation(#[from] AllocationError),

    /// A quantity was zero where a positive quantity is required.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// A batch was restored with allocations that break its invariants.
    #[error("Invalid allocation state for batch {reference}: {source}")]
    InvalidAllocationState {
        reference: BatchReference,
        #[source]
        source: AllocationError,
    },
}
