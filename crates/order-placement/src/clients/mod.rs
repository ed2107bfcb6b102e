//! Typed clients for the three stores.
//!
//! Each wraps a [`ResourceClient`](actor_framework::ResourceClient), maps
//! [`FrameworkError`](actor_framework::FrameworkError) into its store's error
//! enum, and implements the matching [`placement`](crate::placement) port.

pub mod customer_client;
pub mod order_client;
pub mod product_client;

pub use customer_client::CustomerClient;
pub use order_client::OrderClient;
pub use product_client::ProductClient;
