//! Stock batch entity.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use common::{BatchReference, Sku};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

use super::{AllocationError, OrderLine};

/// A lot of stock for one SKU that order lines can be allocated against.
///
/// A batch's identity is its reference: two batches with the same reference
/// are the same batch, whatever their other fields say. Equality and hashing
/// are implemented over the reference only.
///
/// A batch without an ETA is already in the warehouse; one with an ETA is
/// still in transit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "BatchRecord", try_from = "BatchRecord")]
pub struct Batch {
    reference: BatchReference,
    sku: Sku,
    purchased_quantity: u32,
    eta: Option<NaiveDate>,
    allocations: HashSet<OrderLine>,
}

impl Batch {
    /// Creates a batch with no allocations.
    ///
    /// Returns [`DomainError::InvalidQuantity`] if `purchased_quantity` is zero.
    pub fn new(
        reference: impl Into<BatchReference>,
        sku: impl Into<Sku>,
        purchased_quantity: u32,
        eta: Option<NaiveDate>,
    ) -> Result<Self, DomainError> {
        if purchased_quantity == 0 {
            return Err(DomainError::InvalidQuantity {
                quantity: purchased_quantity,
            });
        }
        Ok(Self {
            reference: reference.into(),
            sku: sku.into(),
            purchased_quantity,
            eta,
            allocations: HashSet::new(),
        })
    }

    /// Rebuilds a batch together with the lines previously allocated to it.
    ///
    /// Each line goes through [`Batch::allocate`], so a stored allocation set
    /// holding a foreign SKU or exceeding the purchased quantity is rejected.
    pub fn restore(
        reference: impl Into<BatchReference>,
        sku: impl Into<Sku>,
        purchased_quantity: u32,
        eta: Option<NaiveDate>,
        allocations: impl IntoIterator<Item = OrderLine>,
    ) -> Result<Self, DomainError> {
        let mut batch = Self::new(reference, sku, purchased_quantity, eta)?;
        for line in allocations {
            batch
                .allocate(&line)
                .map_err(|source| DomainError::InvalidAllocationState {
                    reference: batch.reference.clone(),
                    source,
                })?;
        }
        Ok(batch)
    }

    /// Returns true if `line` is for this batch's SKU and fits in the
    /// remaining quantity.
    pub fn can_allocate(&self, line: &OrderLine) -> bool {
        self.sku == *line.sku() && self.available_quantity() >= line.qty()
    }

    /// Allocates `line` to this batch.
    ///
    /// Allocating a line that is already allocated is a no-op.
    pub fn allocate(&mut self, line: &OrderLine) -> Result<(), AllocationError> {
        if self.allocations.contains(line) {
            return Ok(());
        }
        if !self.can_allocate(line) {
            return Err(AllocationError::CannotAllocate {
                reference: self.reference.clone(),
                sku: line.sku().clone(),
                qty: line.qty(),
            });
        }
        self.allocations.insert(line.clone());
        Ok(())
    }

    /// Removes `line` from this batch. Returns true if it was allocated here.
    ///
    /// Deallocating a line that is not allocated is a no-op.
    pub fn deallocate(&mut self, line: &OrderLine) -> bool {
        self.allocations.remove(line)
    }

    /// Returns the sum of the quantities of all allocated lines.
    pub fn allocated_quantity(&self) -> u32 {
        self.allocations.iter().map(OrderLine::qty).sum()
    }

    /// Returns the quantity still free for allocation.
    pub fn available_quantity(&self) -> u32 {
        self.purchased_quantity.saturating_sub(self.allocated_quantity())
    }

    /// Returns the batch reference, which is its identity.
    pub fn reference(&self) -> &BatchReference {
        &self.reference
    }

    /// Returns the product this batch holds.
    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    /// Returns the quantity bought, fixed at construction.
    pub fn purchased_quantity(&self) -> u32 {
        self.purchased_quantity
    }

    /// Returns the expected arrival date, or `None` for stock on hand.
    pub fn eta(&self) -> Option<NaiveDate> {
        self.eta
    }

    /// Returns true if the batch is already in the warehouse.
    pub fn is_in_stock(&self) -> bool {
        self.eta.is_none()
    }

    /// Returns the lines currently allocated to this batch, in no particular
    /// order.
    pub fn allocations(&self) -> impl Iterator<Item = &OrderLine> {
        self.allocations.iter()
    }

    /// Returns true if `line` is allocated to this batch.
    pub fn is_allocated(&self, line: &OrderLine) -> bool {
        self.allocations.contains(line)
    }
}

impl PartialEq for Batch {
    fn eq(&self, other: &Self) -> bool {
        self.reference == other.reference
    }
}

impl Eq for Batch {}

impl Hash for Batch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.reference.hash(state);
    }
}

/// Flat serialized form of a batch.
#[derive(Debug, Serialize, Deserialize)]
struct BatchRecord {
    reference: BatchReference,
    sku: Sku,
    purchased_quantity: u32,
    #[serde(default)]
    eta: Option<NaiveDate>,
    #[serde(default)]
    allocations: Vec<OrderLine>,
}

impl From<Batch> for BatchRecord {
    fn from(batch: Batch) -> Self {
        Self {
            reference: batch.reference,
            sku: batch.sku,
            purchased_quantity: batch.purchased_quantity,
            eta: batch.eta,
            allocations: batch.allocations.into_iter().collect(),
        }
    }
}

impl TryFrom<BatchRecord> for Batch {
    type Error = DomainError;

    fn try_from(record: BatchRecord) -> Result<Self, Self::Error> {
        Batch::restore(
            record.reference,
            record.sku,
            record.purchased_quantity,
            record.eta,
            record.allocations,
        )
    }
}
