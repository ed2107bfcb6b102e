//! # Order Placement
//!
//! Places retail orders against three in-process stores (customers,
//! products, orders) built on [`actor_framework`].
//!
//! - [`model`] - the records the stores hold
//! - [`customer_actor`], [`product_actor`], [`order_actor`] - the stores
//! - [`clients`] - typed clients for the stores
//! - [`placement`] - the order placement workflow and its ports
//! - [`config`] - environment configuration and the seed catalog
//! - [`lifecycle`] - starting, seeding and stopping the whole system

pub mod clients;
pub mod config;
pub mod customer_actor;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod placement;
pub mod product_actor;
