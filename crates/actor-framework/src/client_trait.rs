//! # ActorClient Trait
//!
//! Shared `get`/`delete` for the typed store clients, built on an inner
//! [`ResourceClient`].
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Implemented by every typed store client (`CustomerClient`, `ProductClient`, ...).
///
/// The implementor provides access to its `ResourceClient` and a mapping from
/// [`FrameworkError`] into its own error enum; `get` and `delete` come for free.
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<Customer> for CustomerClient {
///     type Error = CustomerError;
///
///     fn inner(&self) -> &ResourceClient<Customer> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> CustomerError {
///         CustomerError::ActorCommunicationError(e.to_string())
///     }
/// }
///
/// let customer = customer_client.get(CustomerId(1)).await?;
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
