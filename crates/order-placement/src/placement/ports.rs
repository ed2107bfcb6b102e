//! What order placement needs from the outside world.
//!
//! The store clients in [`crate::clients`] implement these; tests can swap
//! in anything else.

use super::PlacementError;
use crate::model::{
    Customer, CustomerId, Order, OrderId, OrderLine, Product, ProductId, StockAdjustment,
};
use async_trait::async_trait;

#[async_trait]
pub trait CustomerLookup: Send + Sync {
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, PlacementError>;
}

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// One batched read. Unknown ids are left out of the result, not reported.
    async fn find_all_by_id(&self, ids: &[ProductId]) -> Result<Vec<Product>, PlacementError>;

    /// Applies every adjustment or none of them.
    ///
    /// An adjustment whose `expected_quantity` no longer matches the stored
    /// level fails the whole batch with [`PlacementError::StockConflict`].
    async fn update_quantities(
        &self,
        adjustments: &[StockAdjustment],
    ) -> Result<(), PlacementError>;
}

#[async_trait]
pub trait OrderWriter: Send + Sync {
    /// Stores a new order and returns it with its assigned id and timestamp.
    ///
    /// On error no order is left behind.
    async fn create(
        &self,
        customer_id: CustomerId,
        lines: Vec<OrderLine>,
    ) -> Result<Order, PlacementError>;

    /// Removes an order created by a placement that later failed.
    async fn discard(&self, id: OrderId) -> Result<(), PlacementError>;
}
