//! Failures of [`OrderPlacement::place_order`](super::OrderPlacement::place_order).

use crate::customer_actor::CustomerError;
use crate::model::{CustomerId, ProductId};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    #[error("Order has no lines")]
    EmptyOrder,

    #[error("Quantity must be at least 1 for {0}")]
    InvalidQuantity(ProductId),

    #[error("{0} appears more than once in the order")]
    DuplicateProduct(ProductId),

    #[error("{0} is out of stock")]
    OutOfStock(ProductId),

    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("Products not found: {}", join_ids(.0))]
    ProductNotFound(Vec<ProductId>),

    /// Stock moved between the batch read and the conditional write.
    #[error("Stock of {product_id} changed while the order was being placed")]
    StockConflict { product_id: ProductId },

    #[error("Infrastructure error: {0}")]
    Infrastructure(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PlacementError {
    /// True for errors caused by the request or the catalog state, as opposed
    /// to store failures and lost races.
    pub fn is_domain_error(&self) -> bool {
        !matches!(
            self,
            PlacementError::StockConflict { .. } | PlacementError::Infrastructure(_)
        )
    }
}

fn join_ids(ids: &[ProductId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<CustomerError> for PlacementError {
    fn from(err: CustomerError) -> Self {
        PlacementError::Infrastructure(Box::new(err))
    }
}

impl From<ProductError> for PlacementError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::StockConflict { product_id, .. } => {
                PlacementError::StockConflict { product_id }
            }
            other => PlacementError::Infrastructure(Box::new(other)),
        }
    }
}

impl From<OrderError> for PlacementError {
    fn from(err: OrderError) -> Self {
        PlacementError::Infrastructure(Box::new(err))
    }
}
