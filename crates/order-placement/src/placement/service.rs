//! The placement workflow: one attempt per catalog read, retried on lost
//! stock races, with the stored order discarded if its stock write fails.

use super::plan::{check_request, ReservationPlan};
use super::ports::{CustomerLookup, OrderWriter, ProductCatalog};
use super::PlacementError;
use crate::model::{CustomerId, Order, OrderId, OrderLineRequest};
use tracing::{debug, error, info, instrument, warn};

/// Places orders against a customer lookup, a product catalog and an order
/// writer.
///
/// Each attempt reads the catalog once and writes it once. The stock write is
/// conditional on the quantities that were read, so a concurrent placement
/// touching the same products makes it fail with
/// [`PlacementError::StockConflict`]; the attempt then starts over from a
/// fresh read, at most `conflict_retries` times.
pub struct OrderPlacement<C, P, O> {
    customers: C,
    catalog: P,
    orders: O,
    conflict_retries: u32,
}

impl<C, P, O> OrderPlacement<C, P, O>
where
    C: CustomerLookup,
    P: ProductCatalog,
    O: OrderWriter,
{
    pub fn new(customers: C, catalog: P, orders: O, conflict_retries: u32) -> Self {
        Self {
            customers,
            catalog,
            orders,
            conflict_retries,
        }
    }

    /// Validates the request, stores the order and reserves its stock.
    ///
    /// # Errors
    /// Domain errors (see [`PlacementError::is_domain_error`]) leave every
    /// store untouched. So does an exhausted `StockConflict` or an
    /// infrastructure failure, except when discarding the half-placed order
    /// fails too; that case is logged at error level.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn place_order(
        &self,
        customer_id: CustomerId,
        lines: &[OrderLineRequest],
    ) -> Result<Order, PlacementError> {
        let mut conflicts = 0;
        loop {
            match self.attempt(customer_id, lines).await {
                Err(PlacementError::StockConflict { product_id })
                    if conflicts < self.conflict_retries =>
                {
                    conflicts += 1;
                    warn!(%product_id, conflicts, "Stock changed during placement, retrying");
                }
                Err(err) => {
                    warn!(error = %err, "Order rejected");
                    return Err(err);
                }
                Ok(order) => return Ok(order),
            }
        }
    }

    async fn attempt(
        &self,
        customer_id: CustomerId,
        requested: &[OrderLineRequest],
    ) -> Result<Order, PlacementError> {
        if self.customers.find_by_id(customer_id).await?.is_none() {
            return Err(PlacementError::CustomerNotFound(customer_id));
        }

        let ids = check_request(requested)?;
        let products = self.catalog.find_all_by_id(&ids).await?;
        debug!(requested = ids.len(), found = products.len(), "Fetched products");

        let ReservationPlan { lines, adjustments } = ReservationPlan::build(requested, &products)?;

        let order = self.orders.create(customer_id, lines).await?;
        debug!(order = %order.id, "Order stored, reserving stock");

        if let Err(err) = self.catalog.update_quantities(&adjustments).await {
            self.discard(order.id).await;
            return Err(err);
        }

        match order.total() {
            Some(total) => info!(order = %order.id, %total, "Order placed"),
            None => info!(order = %order.id, "Order placed, total exceeds Decimal range"),
        }
        Ok(order)
    }

    async fn discard(&self, id: OrderId) {
        match self.orders.discard(id).await {
            Ok(()) => info!(order = %id, "Discarded order after failed stock reservation"),
            Err(err) => error!(
                order = %id,
                error = %err,
                "Failed to discard order after failed stock reservation"
            ),
        }
    }
}
