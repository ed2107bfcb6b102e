use crate::clients::{CustomerClient, OrderClient, ProductClient};
use crate::config::{SeedCatalog, SystemConfig};
use crate::customer_actor::{self, CustomerError};
use crate::model::{CustomerId, ProductId};
use crate::order_actor;
use crate::placement::OrderPlacement;
use crate::product_actor::{self, ProductError};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Order placement wired to the in-process stores.
pub type StorePlacement = OrderPlacement<CustomerClient, ProductClient, OrderClient>;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Actor task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),

    #[error("Seeding customers failed: {0}")]
    SeedCustomer(#[from] CustomerError),

    #[error("Seeding products failed: {0}")]
    SeedProduct(#[from] ProductError),
}

/// Ids assigned while seeding, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Seeded {
    pub customers: Vec<CustomerId>,
    pub products: Vec<ProductId>,
}

/// The running system: three store actors plus the placement workflow.
pub struct OrderSystem {
    pub customer_client: CustomerClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    pub placement: StorePlacement,

    handles: Vec<JoinHandle<()>>,
}

impl OrderSystem {
    /// Starts the system with [`SystemConfig::default`].
    pub fn new() -> Self {
        Self::with_config(&SystemConfig::default())
    }

    /// Spawns the store actors. Must be called inside a Tokio runtime.
    pub fn with_config(config: &SystemConfig) -> Self {
        let (customer_actor, customer_client) = customer_actor::new(config.channel_buffer);
        let (product_actor, product_client) = product_actor::new(config.channel_buffer);
        let (order_actor, order_client) = order_actor::new(config.channel_buffer);

        let handles = vec![
            tokio::spawn(customer_actor.run(())),
            tokio::spawn(product_actor.run(())),
            tokio::spawn(order_actor.run(())),
        ];

        let placement = OrderPlacement::new(
            customer_client.clone(),
            product_client.clone(),
            order_client.clone(),
            config.conflict_retries,
        );

        info!(
            channel_buffer = config.channel_buffer,
            conflict_retries = config.conflict_retries,
            "Order system started"
        );

        Self {
            customer_client,
            product_client,
            order_client,
            placement,
            handles,
        }
    }

    /// Creates every customer and product in `catalog`.
    pub async fn seed(&self, catalog: &SeedCatalog) -> Result<Seeded, SystemError> {
        let mut seeded = Seeded::default();
        for customer in &catalog.customers {
            seeded
                .customers
                .push(self.customer_client.create_customer(customer.clone()).await?);
        }
        for product in &catalog.products {
            seeded
                .products
                .push(self.product_client.create_product(product.clone()).await?);
        }
        info!(
            customers = seeded.customers.len(),
            products = seeded.products.len(),
            "Catalog seeded"
        );
        Ok(seeded)
    }

    /// Drops every client and waits for the actors to stop.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        drop(self.placement);
        drop(self.customer_client);
        drop(self.product_client);
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::TaskFailed(e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for OrderSystem {
    fn default() -> Self {
        Self::new()
    }
}
