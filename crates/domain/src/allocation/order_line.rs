//! Order line value object.

use common::{OrderId, Sku};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A request to supply `qty` units of one product for one customer order.
///
/// Order lines are values: two lines with the same order id, SKU and quantity
/// are interchangeable. Equality and hashing cover all three fields, which is
/// what makes a batch's allocation set idempotent.
///
/// The quantity is always greater than zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "OrderLineRecord")]
pub struct OrderLine {
    order_id: OrderId,
    sku: Sku,
    qty: u32,
}

impl OrderLine {
    /// Creates a new order line.
    ///
    /// Returns [`DomainError::InvalidQuantity`] if `qty` is zero.
    pub fn new(
        order_id: impl Into<OrderId>,
        sku: impl Into<Sku>,
        qty: u32,
    ) -> Result<Self, DomainError> {
        if qty == 0 {
            return Err(DomainError::InvalidQuantity { quantity: qty });
        }
        Ok(Self {
            order_id: order_id.into(),
            sku: sku.into(),
            qty,
        })
    }

    /// Returns the order this line belongs to.
    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// Returns the requested product.
    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    /// Returns the requested quantity.
    pub fn qty(&self) -> u32 {
        self.qty
    }
}

#[derive(Deserialize)]
struct OrderLineRecord {
    order_id: OrderId,
    sku: Sku,
    qty: u32,
}

impl TryFrom<OrderLineRecord> for OrderLine {
    type Error = DomainError;

    fn try_from(record: OrderLineRecord) -> Result<Self, Self::Error> {
        OrderLine::new(record.order_id, record.sku, record.qty)
    }
}
