//! # Order Store
//!
//! Holds placed orders. Orders are immutable once stored: the only
//! lifecycle after creation is deletion, which order placement uses to
//! undo an order whose stock write failed.
//!
//! The store itself has no dependencies; coordination with customers and
//! products lives in [`placement`](crate::placement).

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use actor_framework::ResourceActor;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
