//! # Customer Store
//!
//! The simplest store: plain CRUD, no dependencies, no custom actions.
//! Order placement only ever reads from it.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) impl for [`Customer`]
//! - [`error`] - [`CustomerError`]
//! - [`new()`] - factory returning the actor and a [`CustomerClient`]
//!
//! ```rust,ignore
//! let (actor, customers) = customer_actor::new(32);
//! tokio::spawn(actor.run(()));
//!
//! let id = customers
//!     .create_customer(CustomerCreate {
//!         name: "Alice".to_string(),
//!         email: "alice@example.com".to_string(),
//!     })
//!     .await?;
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CustomerClient;
use crate::model::Customer;
use actor_framework::ResourceActor;

/// Creates a new Customer actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Customer>, CustomerClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CustomerClient::new(generic_client))
}
