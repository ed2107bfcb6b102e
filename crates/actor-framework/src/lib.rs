//! # Actor Framework
//!
//! In-process resource stores built on the actor model. Every store is a
//! [`ResourceActor`] that owns a map of entities and serves requests one at a
//! time on its own tokio task; callers hold a cheap, cloneable
//! [`ResourceClient`].
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): the domain type and its hooks.
//! 2. **Runtime** ([`ResourceActor`]): the message loop and the store.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed requests.
//!
//! ## Requests
//!
//! The usual CRUD calls plus one custom `Action` type per entity, and two
//! batch forms:
//!
//! - [`ResourceClient::get_many`]: one round trip for any number of ids;
//!   unknown ids are left out of the result.
//! - [`ResourceClient::perform_batch`]: several actions applied all-or-nothing.
//!   Because the actor is sequential, nothing else can observe or interleave
//!   with a half-applied batch.
//!
//! ## Context Injection
//!
//! Dependencies are passed to [`ResourceActor::run`], not to the constructor,
//! so stores can be created first and wired afterwards:
//!
//! ```rust,ignore
//! let (customer_actor, customers) = ResourceActor::<Customer>::new(32);
//! let (product_actor, products) = ResourceActor::<Product>::new(32);
//! tokio::spawn(customer_actor.run(()));
//! tokio::spawn(product_actor.run(()));
//! ```
//!
//! ## Shutdown
//!
//! A store stops when its last client is dropped, after draining whatever is
//! already queued.
//!
//! ## Testing
//!
//! [`mock::MockClient`] gives a real `ResourceClient` backed by scripted
//! replies, for testing code that talks to stores without running any.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
