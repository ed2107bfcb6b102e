use crate::model::{CustomerId, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// One `(product, quantity)` pair of a placement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl OrderLineRequest {
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// A line of a placed order.
///
/// `price` is the product's unit price at the moment the order was placed and
/// does not follow later catalog changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderLine {
    /// `None` if `price * quantity` does not fit in a `Decimal`.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// A placed order. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub lines: Vec<OrderLine>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Sum of the line subtotals, or `None` on overflow.
    pub fn total(&self) -> Option<Decimal> {
        self.lines
            .iter()
            .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.subtotal()?))
    }

    /// Quantity ordered for `product_id`, if the order contains it.
    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| line.product_id == product_id)
            .map(|line| line.quantity)
    }
}

/// Payload for storing a new order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_id: CustomerId,
    pub lines: Vec<OrderLine>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn order(lines: Vec<OrderLine>) -> Order {
        Order {
            id: OrderId(1),
            customer_id: CustomerId(1),
            lines,
            created_at: Utc::now(),
        }
    }

    fn line(product: u32, price: Decimal, quantity: u32) -> OrderLine {
        OrderLine {
            product_id: ProductId(product),
            price,
            quantity,
        }
    }

    #[test]
    fn test_total_sums_subtotals() {
        let order = order(vec![
            line(1, Decimal::new(450, 2), 4),
            line(2, Decimal::new(10, 0), 5),
        ]);
        assert_eq!(order.total(), Some(Decimal::new(6800, 2)));
        assert_eq!(order.quantity_of(ProductId(2)), Some(5));
        assert_eq!(order.quantity_of(ProductId(3)), None);
    }

    #[test]
    fn test_overflowing_amounts_are_none() {
        assert_eq!(line(1, Decimal::MAX, 2).subtotal(), None);
        assert_eq!(line(1, Decimal::MAX, 1).subtotal(), Some(Decimal::MAX));

        // Each line fits, their sum does not.
        let order = order(vec![line(1, Decimal::MAX, 1), line(2, Decimal::MAX, 1)]);
        assert_eq!(order.total(), None);
    }
}
