//! Error types for the Product store.

use crate::model::ProductId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Stock changed between the read and the conditional write.
    #[error("Stock conflict on {product_id}: expected {expected}, found {actual}")]
    StockConflict {
        product_id: ProductId,
        expected: u32,
        actual: u32,
    },

    #[error("Invalid stock adjustment: {0}")]
    InvalidAdjustment(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ProductError {
    fn from(msg: String) -> Self {
        ProductError::ActorCommunicationError(msg)
    }
}
