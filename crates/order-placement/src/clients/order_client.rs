//! # Order Client
//!
//! High-level API over a `ResourceClient<Order>`.
use crate::model::{CustomerId, Order, OrderCreate, OrderId, OrderLine};
use crate::order_actor::OrderError;
use crate::placement::{OrderWriter, PlacementError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, error, info, instrument, warn};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Stores an order and reads it back, so the caller sees the assigned
    /// id and `created_at`.
    ///
    /// If the read-back fails the stored order is deleted again before the
    /// error is returned.
    #[instrument(skip(self, params), fields(customer = %params.customer_id, lines = params.lines.len()))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!("Sending create_order to actor");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(order = %id, "Order created");

        let err = match self.get(id).await {
            Ok(Some(order)) => return Ok(order),
            Ok(None) => OrderError::NotFound(id.to_string()),
            Err(err) => err,
        };
        match self.delete(id).await {
            Ok(()) => warn!(order = %id, error = %err, "Read-back failed, order deleted"),
            Err(delete_err) => error!(
                order = %id,
                error = %err,
                delete_error = %delete_err,
                "Read-back failed and the order could not be deleted"
            ),
        }
        Err(err)
    }

    #[instrument(skip(self))]
    pub async fn discard_order(&self, id: OrderId) -> Result<(), OrderError> {
        debug!("Sending request");
        self.delete(id).await
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl OrderWriter for OrderClient {
    async fn create(
        &self,
        customer_id: CustomerId,
        lines: Vec<OrderLine>,
    ) -> Result<Order, PlacementError> {
        Ok(self.create_order(OrderCreate { customer_id, lines }).await?)
    }

    async fn discard(&self, id: OrderId) -> Result<(), PlacementError> {
        Ok(self.discard_order(id).await?)
    }
}
