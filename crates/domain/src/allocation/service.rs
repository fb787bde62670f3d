//! Allocation domain service.

use chrono::NaiveDate;
use common::BatchReference;

use super::{AllocationError, Batch, OrderLine};

/// Returns the key batches are ranked by when choosing where to allocate.
///
/// Batches in transit rank by their ETA. Batches already in stock have no ETA
/// and get `NaiveDate::MIN`, so they rank ahead of every shipment.
pub fn allocation_priority(batch: &Batch) -> NaiveDate {
    batch.eta().unwrap_or(NaiveDate::MIN)
}

/// Allocates `line` to the preferred batch that can take it and returns that
/// batch's reference.
///
/// Batches are tried in [`allocation_priority`] order, and the first one with
/// a matching SKU and enough free quantity wins. Batches with equal priority
/// keep their order in `batches`. The slice itself is not reordered.
///
/// If one of the batches already holds `line`, its reference is returned and
/// nothing changes, even when a batch with a better priority now has room.
/// A line is never held by two batches; to move it, [`deallocate`] it first.
///
/// # Errors
///
/// Returns [`AllocationError::OutOfStock`] when no batch can take the line,
/// including when `batches` is empty.
#[tracing::instrument(
    skip_all,
    fields(order_id = %line.order_id(), sku = %line.sku(), qty = line.qty())
)]
pub fn allocate(
    line: &OrderLine,
    batches: &mut [Batch],
) -> Result<BatchReference, AllocationError> {
    if let Some(batch) = batches.iter().find(|batch| batch.is_allocated(line)) {
        tracing::debug!(reference = %batch.reference(), "line already allocated");
        return Ok(batch.reference().clone());
    }

    let mut ranked: Vec<usize> = (0..batches.len()).collect();
    ranked.sort_by_key(|&index| allocation_priority(&batches[index]));

    let Some(index) = ranked
        .into_iter()
        .find(|&index| batches[index].can_allocate(line))
    else {
        metrics::counter!("allocation_failures_total").increment(1);
        tracing::warn!(candidates = batches.len(), "out of stock");
        return Err(AllocationError::OutOfStock {
            sku: line.sku().clone(),
            qty: line.qty(),
        });
    };

    let batch = &mut batches[index];
    batch.allocate(line)?;

    metrics::counter!("allocations_total").increment(1);
    tracing::debug!(
        reference = %batch.reference(),
        available = batch.available_quantity(),
        "line allocated"
    );
    Ok(batch.reference().clone())
}

/// Removes `line` from whichever batch holds it.
///
/// Returns the reference of that batch, or `None` if no batch held the line.
#[tracing::instrument(
    skip_all,
    fields(order_id = %line.order_id(), sku = %line.sku(), qty = line.qty())
)]
pub fn deallocate(line: &OrderLine, batches: &mut [Batch]) -> Option<BatchReference> {
    let batch = batches.iter_mut().find(|batch| batch.is_allocated(line))?;
    batch.deallocate(line);

    metrics::counter!("deallocations_total").increment(1);
    tracing::debug!(reference = %batch.reference(), "line deallocated");
    Some(batch.reference().clone())
}
