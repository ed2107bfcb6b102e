//! Real `OrderPlacement` and real clients over `MockClient` stores, for the
//! paths that are hard to reach with live actors: failing writes, lost
//! stock races and compensation.

use actor_framework::mock::MockClient;
use actor_framework::FrameworkError;
use chrono::Utc;
use order_placement::clients::{CustomerClient, OrderClient, ProductClient};
use order_placement::model::{
    Customer, CustomerId, Order, OrderId, OrderLine, OrderLineRequest, Product, ProductId,
};
use order_placement::placement::{OrderPlacement, PlacementError};
use order_placement::product_actor::{ProductAction, ProductActionResult, ProductError};
use rust_decimal::Decimal;

struct Mocks {
    customers: MockClient<Customer>,
    products: MockClient<Product>,
    orders: MockClient<Order>,
}

impl Mocks {
    fn new() -> Self {
        Self {
            customers: MockClient::new(),
            products: MockClient::new(),
            orders: MockClient::new(),
        }
    }

    fn placement(
        &self,
        conflict_retries: u32,
    ) -> OrderPlacement<CustomerClient, ProductClient, OrderClient> {
        OrderPlacement::new(
            CustomerClient::new(self.customers.client()),
            ProductClient::new(self.products.client()),
            OrderClient::new(self.orders.client()),
            conflict_retries,
        )
    }

    fn verify(&self) {
        self.customers.verify();
        self.products.verify();
        self.orders.verify();
    }

    fn customer_exists(&mut self) {
        self.customers
            .expect_get(CustomerId(1))
            .return_ok(Some(Customer::new(
                CustomerId(1),
                "Alice",
                "alice@example.com",
            )));
    }

    fn widget_in_stock(&mut self, quantity: u32) {
        self.products
            .expect_get_many()
            .return_ok(vec![widget(quantity)]);
    }

    fn order_stored(&mut self, id: u32) {
        self.orders.expect_create().return_ok(OrderId(id));
        self.orders.expect_get(OrderId(id)).return_ok(Some(Order {
            id: OrderId(id),
            customer_id: CustomerId(1),
            lines: vec![OrderLine {
                product_id: ProductId(1),
                price: Decimal::new(10, 0),
                quantity: 3,
            }],
            created_at: Utc::now(),
        }));
    }
}

fn widget(quantity: u32) -> Product {
    Product::new(ProductId(1), "Widget", Decimal::new(10, 0), quantity)
}

fn three_widgets() -> Vec<OrderLineRequest> {
    vec![OrderLineRequest::new(ProductId(1), 3)]
}

fn stock_conflict(actual: u32) -> FrameworkError {
    FrameworkError::EntityError(Box::new(ProductError::StockConflict {
        product_id: ProductId(1),
        expected: 5,
        actual,
    }))
}

#[tokio::test]
async fn test_happy_path_makes_one_call_per_step() {
    let mut mocks = Mocks::new();
    mocks.customer_exists();
    mocks.widget_in_stock(5);
    mocks.order_stored(1);
    mocks
        .products
        .expect_batch()
        .return_ok(vec![ProductActionResult::AdjustStock(2)]);

    let order = mocks
        .placement(3)
        .place_order(CustomerId(1), &three_widgets())
        .await
        .unwrap();

    assert_eq!(order.id, OrderId(1));
    assert_eq!(
        mocks.products.received_batches(),
        vec![vec![(
            ProductId(1),
            ProductAction::AdjustStock {
                expected: 5,
                new_quantity: 2,
            }
        )]]
    );
    mocks.verify();
}

#[tokio::test]
async fn test_rejection_stops_before_any_write() {
    let mut mocks = Mocks::new();
    mocks.customer_exists();
    mocks.widget_in_stock(2);

    let err = mocks
        .placement(3)
        .place_order(CustomerId(1), &three_widgets())
        .await
        .unwrap_err();

    assert!(matches!(err, PlacementError::InsufficientStock { .. }));
    // No create, no batch: any extra request would be a mismatch.
    mocks.verify();
}

#[tokio::test]
async fn test_missing_customer_stops_before_product_fetch() {
    let mut mocks = Mocks::new();
    mocks.customers.expect_get(CustomerId(1)).return_ok(None);

    let err = mocks
        .placement(3)
        .place_order(CustomerId(1), &three_widgets())
        .await
        .unwrap_err();

    assert!(matches!(err, PlacementError::CustomerNotFound(CustomerId(1))));
    mocks.verify();
}

#[tokio::test]
async fn test_failed_stock_write_discards_the_order() {
    let mut mocks = Mocks::new();
    mocks.customer_exists();
    mocks.widget_in_stock(5);
    mocks.order_stored(7);
    mocks.products.expect_batch().return_err(FrameworkError::ActorClosed);
    mocks.orders.expect_delete(OrderId(7)).return_ok(());

    let err = mocks
        .placement(3)
        .place_order(CustomerId(1), &three_widgets())
        .await
        .unwrap_err();

    assert!(matches!(err, PlacementError::Infrastructure(_)));
    assert!(!err.is_domain_error());
    mocks.verify();
}

#[tokio::test]
async fn test_failed_compensation_still_returns_the_original_error() {
    let mut mocks = Mocks::new();
    mocks.customer_exists();
    mocks.widget_in_stock(5);
    mocks.order_stored(7);
    mocks
        .products
        .expect_batch()
        .return_err(FrameworkError::EntityError(Box::new(
            ProductError::InvalidAdjustment("boom".to_string()),
        )));
    mocks
        .orders
        .expect_delete(OrderId(7))
        .return_err(FrameworkError::ActorClosed);

    let err = mocks
        .placement(3)
        .place_order(CustomerId(1), &three_widgets())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("boom"), "got {err}");
    mocks.verify();
}

#[tokio::test]
async fn test_failed_read_back_deletes_the_order_before_any_stock_write() {
    let mut mocks = Mocks::new();
    mocks.customer_exists();
    mocks.widget_in_stock(5);
    mocks.orders.expect_create().return_ok(OrderId(7));
    mocks
        .orders
        .expect_get(OrderId(7))
        .return_err(FrameworkError::ActorDropped);
    mocks.orders.expect_delete(OrderId(7)).return_ok(());

    let err = mocks
        .placement(3)
        .place_order(CustomerId(1), &three_widgets())
        .await
        .unwrap_err();

    assert!(matches!(err, PlacementError::Infrastructure(_)));
    assert!(mocks.products.received_batches().is_empty());
    mocks.verify();
}

#[tokio::test]
async fn test_lost_race_is_retried_from_a_fresh_read() {
    let mut mocks = Mocks::new();

    // First attempt: stock moved from 5 to 4 before the write.
    mocks.customer_exists();
    mocks.widget_in_stock(5);
    mocks.order_stored(1);
    mocks.products.expect_batch().return_err(stock_conflict(4));
    mocks.orders.expect_delete(OrderId(1)).return_ok(());

    // Second attempt sees the new level.
    mocks.customer_exists();
    mocks.widget_in_stock(4);
    mocks.order_stored(2);
    mocks
        .products
        .expect_batch()
        .return_ok(vec![ProductActionResult::AdjustStock(1)]);

    let order = mocks
        .placement(1)
        .place_order(CustomerId(1), &three_widgets())
        .await
        .unwrap();

    assert_eq!(order.id, OrderId(2));
    let batches = mocks.products.received_batches();
    assert_eq!(batches.len(), 2);
    assert_eq!(
        batches[1],
        vec![(
            ProductId(1),
            ProductAction::AdjustStock {
                expected: 4,
                new_quantity: 1,
            }
        )]
    );
    mocks.verify();
}

#[tokio::test]
async fn test_conflict_surfaces_once_retries_are_used_up() {
    let mut mocks = Mocks::new();
    mocks.customer_exists();
    mocks.widget_in_stock(5);
    mocks.order_stored(1);
    mocks.products.expect_batch().return_err(stock_conflict(4));
    mocks.orders.expect_delete(OrderId(1)).return_ok(());

    let err = mocks
        .placement(0)
        .place_order(CustomerId(1), &three_widgets())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PlacementError::StockConflict {
            product_id: ProductId(1)
        }
    ));
    mocks.verify();
}

#[tokio::test]
async fn test_lookup_failure_is_infrastructure_and_not_retried() {
    let mut mocks = Mocks::new();
    mocks
        .customers
        .expect_get(CustomerId(1))
        .return_err(FrameworkError::ActorClosed);

    let err = mocks
        .placement(3)
        .place_order(CustomerId(1), &three_widgets())
        .await
        .unwrap_err();

    assert!(matches!(err, PlacementError::Infrastructure(_)));
    mocks.verify();
}
