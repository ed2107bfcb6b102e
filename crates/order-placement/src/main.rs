//! Demo: seeds a catalog and places a handful of orders against it,
//! logging how each one ends.
//!
//! ```bash
//! RUST_LOG=info cargo run -p order-placement
//! ORDER_SEED_PATH=seed.json RUST_LOG=debug cargo run -p order-placement
//! ```

use actor_framework::tracing::setup_tracing;
use actor_framework::ActorClient;
use anyhow::{bail, Context};
use order_placement::config::{SeedCatalog, SystemConfig};
use order_placement::lifecycle::OrderSystem;
use order_placement::model::{OrderLineRequest, ProductId};
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let config = SystemConfig::from_env().context("loading configuration")?;
    let catalog = match &config.seed_path {
        Some(path) => SeedCatalog::load(path)?,
        None => SeedCatalog::sample(),
    };

    let system = OrderSystem::with_config(&config);
    let seeded = system.seed(&catalog).await?;

    let (Some(&customer), [stocked, sold_out, ..]) =
        (seeded.customers.first(), seeded.products.as_slice())
    else {
        bail!("seed catalog needs at least one customer and two products");
    };
    let unknown = ProductId(u32::MAX);

    let scenarios = [
        (
            "sold-out product",
            vec![
                OrderLineRequest::new(*stocked, 3),
                OrderLineRequest::new(*sold_out, 1),
            ],
        ),
        ("in stock", vec![OrderLineRequest::new(*stocked, 3)]),
        ("more than available", vec![OrderLineRequest::new(*stocked, 10)]),
        ("unknown product", vec![OrderLineRequest::new(unknown, 1)]),
    ];

    for (name, lines) in scenarios {
        let span = tracing::info_span!("scenario", name);
        async {
            match system.placement.place_order(customer, &lines).await {
                Ok(order) => info!(order = %order.id, total = ?order.total(), "Placed"),
                Err(e) if e.is_domain_error() => warn!(error = %e, "Rejected"),
                Err(e) => return Err(e),
            }
            Ok(())
        }
        .instrument(span)
        .await?;
    }

    for id in &seeded.products {
        if let Some(product) = system.product_client.get(*id).await? {
            info!(product = %product.id, stock = product.quantity, "Final stock");
        }
    }

    system.shutdown().await?;
    Ok(())
}
