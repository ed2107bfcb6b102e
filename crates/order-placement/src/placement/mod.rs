//! # Order Placement
//!
//! Turns `(customer, [(product, quantity)])` into a stored order with its
//! stock reserved, or into a [`PlacementError`] with nothing changed.
//!
//! One attempt runs these steps and stops at the first failure:
//!
//! 1. the customer must exist
//! 2. the request must be non-empty, with positive quantities and no repeated product
//! 3. all requested products are fetched in one batch
//! 4. every fetched product must have stock (`OutOfStock`) and enough of it
//!    (`InsufficientStock`)
//! 5. every requested product must have been fetched (`ProductNotFound`)
//! 6. the order is stored with prices copied from the fetched products
//! 7. all stock levels are written back in one conditional batch; if that
//!    fails the order from step 6 is discarded
//!
//! ```rust,ignore
//! let placement = OrderPlacement::new(customers, products, orders, 3);
//! let order = placement
//!     .place_order(CustomerId(1), &[OrderLineRequest::new(ProductId(1), 3)])
//!     .await?;
//! ```

pub mod error;
pub mod plan;
pub mod ports;
mod service;

pub use error::PlacementError;
pub use plan::ReservationPlan;
pub use ports::{CustomerLookup, OrderWriter, ProductCatalog};
pub use service::OrderPlacement;
