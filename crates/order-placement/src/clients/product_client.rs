//! # Product Client
//!
//! High-level API over a `ResourceClient<Product>`: catalog CRUD, stock
//! checks, and the batched read/write used by order placement.
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate, StockAdjustment};
use crate::placement::{PlacementError, ProductCatalog};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    /// Typed `ProductError`s raised by the entity come back as themselves,
    /// so callers can match on `StockConflict`.
    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<ProductError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => ProductError::NotFound(id),
            Err(other) => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Unconditional update, e.g. a restock.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Check the current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Checking stock");
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(ProductError::ActorCommunicationError(format!(
                "unexpected result for CheckStock: {other:?}"
            ))),
        }
    }

    /// Fetches the products in `ids` with one request. Unknown ids are skipped.
    #[instrument(skip(self), fields(count = ids.len()))]
    pub async fn find_all_by_id(&self, ids: &[ProductId]) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        self.inner
            .get_many(ids.to_vec())
            .await
            .map_err(Self::map_error)
    }

    /// Writes every adjustment as one all-or-nothing batch of
    /// `AdjustStock` actions.
    #[instrument(skip(self, adjustments), fields(count = adjustments.len()))]
    pub async fn update_quantities(
        &self,
        adjustments: &[StockAdjustment],
    ) -> Result<(), ProductError> {
        debug!(?adjustments, "Sending batch");
        let actions = adjustments
            .iter()
            .map(|adjustment| {
                (
                    adjustment.product_id,
                    ProductAction::AdjustStock {
                        expected: adjustment.expected_quantity,
                        new_quantity: adjustment.new_quantity,
                    },
                )
            })
            .collect();
        self.inner
            .perform_batch(actions)
            .await
            .map(|_| ())
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ProductCatalog for ProductClient {
    async fn find_all_by_id(&self, ids: &[ProductId]) -> Result<Vec<Product>, PlacementError> {
        Ok(ProductClient::find_all_by_id(self, ids).await?)
    }

    async fn update_quantities(
        &self,
        adjustments: &[StockAdjustment],
    ) -> Result<(), PlacementError> {
        Ok(ProductClient::update_quantities(self, adjustments).await?)
    }
}
