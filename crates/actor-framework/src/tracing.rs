//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide `tracing` subscriber.
//!
//! ## Configuration
//!
//! - **Filtering** through `RUST_LOG` (`EnvFilter`), defaulting to `info`.
//! - **Compact format** with spans inline and the module target hidden; store
//!   logs carry an `entity_type` field instead.
//!
//! ```bash
//! RUST_LOG=info cargo run      # state changes only
//! RUST_LOG=debug cargo run     # full payloads (params, actions, batches)
//! RUST_LOG=order_placement::placement=debug,info cargo run
//! ```
//!
//! ## What an order placement looks like
//!
//! With `RUST_LOG=info`:
//!
//! ```text
//! INFO place_order{customer_id=customer_1 lines=1}: Placing order
//! INFO place_order{customer_id=customer_1 lines=1}: Created entity_type="Order" id=order_1 size=1
//! INFO place_order{customer_id=customer_1 lines=1}: Batch committed entity_type="Product" size=1
//! INFO place_order{customer_id=customer_1 lines=1}: Order placed order_id=order_1 total=30
//! ```
//!
//! A rejected request logs one `warn` with the domain error and nothing else;
//! a compensated order logs the rolled-back batch followed by a `Deleted`.

/// Installs the global subscriber. Call once, from the binary.
pub fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
