//! [`ActorEntity`] implementation for [`Order`].

use super::error::OrderError;
use crate::model::{Order, OrderCreate, OrderId};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = OrderError;

    /// Stamps `created_at` with the current time.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.lines.is_empty() {
            return Err(OrderError::ValidationError(
                "order has no lines".to_string(),
            ));
        }
        if let Some(line) = params.lines.iter().find(|line| line.quantity == 0) {
            return Err(OrderError::ValidationError(format!(
                "zero quantity for {}",
                line.product_id
            )));
        }
        Ok(Self {
            id,
            customer_id: params.customer_id,
            lines: params.lines,
            created_at: Utc::now(),
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Err(OrderError::ValidationError(format!(
            "{} is immutable",
            self.id
        )))
    }

    async fn handle_action(&mut self, _action: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerId, OrderLine, ProductId};
    use rust_decimal::Decimal;

    fn line(product: u32, quantity: u32) -> OrderLine {
        OrderLine {
            product_id: ProductId(product),
            price: Decimal::new(250, 2),
            quantity,
        }
    }

    #[test]
    fn test_create_stamps_time_and_keeps_lines() {
        let before = Utc::now();
        let order = Order::from_create_params(
            OrderId(1),
            OrderCreate {
                customer_id: CustomerId(9),
                lines: vec![line(1, 2), line(2, 1)],
            },
        )
        .unwrap();
        assert_eq!(order.id, OrderId(1));
        assert_eq!(order.customer_id, CustomerId(9));
        assert_eq!(order.lines.len(), 2);
        assert!(order.created_at >= before);
        assert_eq!(order.total(), Some(Decimal::new(750, 2)));
    }

    #[test]
    fn test_create_rejects_empty_and_zero_quantity() {
        let empty = OrderCreate {
            customer_id: CustomerId(1),
            lines: vec![],
        };
        assert!(Order::from_create_params(OrderId(1), empty).is_err());

        let zero = OrderCreate {
            customer_id: CustomerId(1),
            lines: vec![line(1, 0)],
        };
        assert!(matches!(
            Order::from_create_params(OrderId(1), zero),
            Err(OrderError::ValidationError(_))
        ));
    }
}
