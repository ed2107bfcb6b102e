//! # Product Store
//!
//! Owns the catalog and its stock levels. Besides CRUD it exposes two
//! custom actions:
//!
//! ```rust,ignore
//! // Read the current stock level
//! let stock = products.check_stock(product_id).await?;
//!
//! // Write back a new level, only if nobody changed it since it was read
//! products
//!     .update_quantities(&[StockAdjustment {
//!         product_id,
//!         expected_quantity: 10,
//!         new_quantity: 7,
//!     }])
//!     .await?;
//! ```
//!
//! `update_quantities` sends all adjustments as one batch, so either every
//! product is updated or none is.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) impl for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`]
//! - [`new()`] - factory returning the actor and a [`ProductClient`]

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use actor_framework::ResourceActor;

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ProductClient::new(generic_client))
}
