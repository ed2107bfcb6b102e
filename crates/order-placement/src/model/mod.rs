//! Plain data: the stored entities, their payloads, and the request/response
//! values of order placement.
//!
//! The [`ActorEntity`](actor_framework::ActorEntity) impls live next to each
//! store (`customer_actor`, `product_actor`, `order_actor`).

pub mod customer;
pub mod order;
pub mod product;

pub use customer::*;
pub use order::*;
pub use product::*;
