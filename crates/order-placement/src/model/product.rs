//! Catalog entries and the stock values derived from them.
//!
//! A [`Product`] is owned by the product store. Order placement reads a
//! snapshot of it and later writes back a [`StockAdjustment`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price, never negative.
    pub price: Decimal,
    /// Units available for reservation.
    pub quantity: u32,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (normally assigned by the product store)
    /// * `name` - Display name
    /// * `price` - Unit price
    /// * `quantity` - Available stock
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal, quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            quantity,
        }
    }
}

/// Payload for adding a product to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<u32>,
}

/// New stock level for one product, conditional on the level it was computed from.
///
/// The store applies it only if the product still holds `expected_quantity`
/// units, so a reservation computed from a stale read is refused rather than
/// overselling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub product_id: ProductId,
    pub expected_quantity: u32,
    pub new_quantity: u32,
}

impl StockAdjustment {
    /// Units this adjustment takes out of stock.
    pub fn reserved(&self) -> u32 {
        self.expected_quantity.saturating_sub(self.new_quantity)
    }
}
