//! [`ActorEntity`] implementation for [`Product`], including the stock actions.

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use rust_decimal::Decimal;

fn validate_price(price: Decimal) -> Result<(), ProductError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ProductError::InvalidPrice(price.to_string()));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        validate_price(params.price)?;
        Ok(Self::new(id, params.name, params.price, params.quantity))
    }

    /// Restocking goes through here; it is unconditional, unlike `AdjustStock`.
    async fn on_update(
        &mut self,
        update: ProductUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(price) = update.price {
            validate_price(price)?;
            self.price = price;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &Self::Context,
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.quantity)),
            ProductAction::AdjustStock {
                expected,
                new_quantity,
            } => {
                if self.quantity != expected {
                    return Err(ProductError::StockConflict {
                        product_id: self.id,
                        expected,
                        actual: self.quantity,
                    });
                }
                if new_quantity > expected {
                    return Err(ProductError::InvalidAdjustment(format!(
                        "{} cannot raise stock from {expected} to {new_quantity}",
                        self.id
                    )));
                }
                self.quantity = new_quantity;
                Ok(ProductActionResult::AdjustStock(self.quantity))
            }
        }
    }
}
