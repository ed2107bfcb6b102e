//! # System Lifecycle
//!
//! Starts the three stores, wires an [`OrderPlacement`](crate::placement::OrderPlacement)
//! over their clients, and shuts everything down again.
//!
//! ```rust,ignore
//! let config = SystemConfig::from_env()?;
//! let system = OrderSystem::with_config(&config);
//! system.seed(&SeedCatalog::sample()).await?;
//!
//! let order = system
//!     .placement
//!     .place_order(CustomerId(1), &[OrderLineRequest::new(ProductId(1), 3)])
//!     .await?;
//!
//! system.shutdown().await?;
//! ```
//!
//! ## Shutdown
//!
//! None of the stores holds another store's client in its context, so the
//! dependency graph is acyclic and channel closure is enough:
//!
//! 1. drop every client, including the clones inside `placement`
//! 2. each actor's `recv()` returns `None` and its loop ends
//! 3. await every actor task
//!
//! Logging is set up separately with
//! [`actor_framework::tracing::setup_tracing`].

pub mod order_system;

pub use order_system::*;
