//! # ActorEntity Trait
//!
//! The contract every stored resource (Customer, Product, Order) implements so a
//! generic [`ResourceActor`](crate::ResourceActor) can own it.
//!
//! Associated types pin each store to its own payloads: a `Product` store only
//! accepts `ProductCreate`, only runs `ProductAction`s, and only fails with
//! `ProductError`. Sending the wrong payload is a compile error.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by a `ResourceActor`.
///
/// # Async & Context
/// Hooks are async so they may call other actors. The `Context` is handed to
/// `run()` and passed to every hook, which lets stores be wired together after
/// all of them have been constructed.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier of the entity. Generated from the actor's `u32` counter.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload used to create a new instance.
    type Create: Send + Sync + Debug;

    /// Payload used to patch an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `AdjustStock`).
    type Action: Send + Sync + Debug;

    /// Result returned by [`ActorEntity::handle_action`].
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected at `run()` time. `()` when there are none.
    type Context: Send + Sync;

    /// One error enum per store, shared by every hook and action.
    ///
    /// Errors cross the channel boxed inside
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError)
    /// and can be recovered with `downcast`.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the entity from its freshly assigned id and the create payload.
    /// Called before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Runs after construction and before insertion. An error aborts the create.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Runs before removal. An error keeps the entity in the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply a resource-specific action.
    ///
    /// When the action is part of a batch the entity is a staged copy; a
    /// failure discards every staged copy of that batch.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
