//! # Customer Client
//!
//! High-level API over a `ResourceClient<Customer>`.
use crate::customer_actor::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId, CustomerUpdate};
use crate::placement::{CustomerLookup, PlacementError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Customer actor.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
}

impl CustomerClient {
    pub fn new(inner: ResourceClient<Customer>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_customer(&self, params: CustomerCreate) -> Result<CustomerId, CustomerError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_customer(
        &self,
        id: CustomerId,
        update: CustomerUpdate,
    ) -> Result<Customer, CustomerError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Customer> for CustomerClient {
    type Error = CustomerError;

    fn inner(&self) -> &ResourceClient<Customer> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<CustomerError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => CustomerError::NotFound(id),
            Err(other) => CustomerError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl CustomerLookup for CustomerClient {
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, PlacementError> {
        Ok(self.get(id).await?)
    }
}
