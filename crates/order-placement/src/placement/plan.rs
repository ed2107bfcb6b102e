//! The pure part of order placement: deciding, from a request and a catalog
//! snapshot, which lines to write and how stock moves.

use super::PlacementError;
use crate::model::{OrderLine, OrderLineRequest, Product, ProductId, StockAdjustment};
use std::collections::{HashMap, HashSet};

/// Rejects malformed requests and returns the product ids to fetch.
pub fn check_request(requested: &[OrderLineRequest]) -> Result<Vec<ProductId>, PlacementError> {
    if requested.is_empty() {
        return Err(PlacementError::EmptyOrder);
    }
    let mut seen = HashSet::with_capacity(requested.len());
    for line in requested {
        if line.quantity == 0 {
            return Err(PlacementError::InvalidQuantity(line.product_id));
        }
        if !seen.insert(line.product_id) {
            return Err(PlacementError::DuplicateProduct(line.product_id));
        }
    }
    Ok(requested.iter().map(|line| line.product_id).collect())
}

/// Order lines and matching stock writes for one accepted request.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationPlan {
    /// In request order, priced from the snapshot.
    pub lines: Vec<OrderLine>,
    /// One per line, conditional on the snapshot quantity.
    pub adjustments: Vec<StockAdjustment>,
}

impl ReservationPlan {
    /// Checks availability of every fetched product, then that nothing
    /// requested is missing, then builds the plan.
    ///
    /// Availability errors win over [`PlacementError::ProductNotFound`] when a
    /// request has both. Fetched products nobody asked for are ignored.
    pub fn build(
        requested: &[OrderLineRequest],
        fetched: &[Product],
    ) -> Result<Self, PlacementError> {
        let wanted: HashMap<ProductId, u32> = requested
            .iter()
            .map(|line| (line.product_id, line.quantity))
            .collect();

        for product in fetched {
            let Some(&quantity) = wanted.get(&product.id) else {
                continue;
            };
            if product.quantity == 0 {
                return Err(PlacementError::OutOfStock(product.id));
            }
            if quantity > product.quantity {
                return Err(PlacementError::InsufficientStock {
                    product_id: product.id,
                    requested: quantity,
                    available: product.quantity,
                });
            }
        }

        let by_id: HashMap<ProductId, &Product> =
            fetched.iter().map(|product| (product.id, product)).collect();
        let mut lines = Vec::with_capacity(requested.len());
        let mut adjustments = Vec::with_capacity(requested.len());
        let mut missing = Vec::new();

        for request in requested {
            let Some(product) = by_id.get(&request.product_id) else {
                missing.push(request.product_id);
                continue;
            };
            // Guard only: the availability loop above already rejected this.
            let new_quantity = product.quantity.checked_sub(request.quantity).ok_or(
                PlacementError::InsufficientStock {
                    product_id: product.id,
                    requested: request.quantity,
                    available: product.quantity,
                },
            )?;
            lines.push(OrderLine {
                product_id: product.id,
                price: product.price,
                quantity: request.quantity,
            });
            adjustments.push(StockAdjustment {
                product_id: product.id,
                expected_quantity: product.quantity,
                new_quantity,
            });
        }

        if !missing.is_empty() {
            return Err(PlacementError::ProductNotFound(missing));
        }
        Ok(Self { lines, adjustments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn product(id: u32, price: i64, quantity: u32) -> Product {
        Product::new(ProductId(id), format!("p{id}"), Decimal::new(price, 0), quantity)
    }

    fn request(id: u32, quantity: u32) -> OrderLineRequest {
        OrderLineRequest::new(ProductId(id), quantity)
    }

    #[test]
    fn test_check_request_shapes() {
        assert!(matches!(check_request(&[]), Err(PlacementError::EmptyOrder)));
        assert!(matches!(
            check_request(&[request(1, 1), request(2, 0)]),
            Err(PlacementError::InvalidQuantity(ProductId(2)))
        ));
        assert!(matches!(
            check_request(&[request(1, 1), request(1, 2)]),
            Err(PlacementError::DuplicateProduct(ProductId(1)))
        ));
        assert_eq!(
            check_request(&[request(4, 1), request(2, 3)]).unwrap(),
            vec![ProductId(4), ProductId(2)]
        );
    }

    #[test]
    fn test_out_of_stock_beats_missing_product() {
        let fetched = [product(1, 10, 5), product(2, 20, 0)];
        let err = ReservationPlan::build(&[request(9, 1), request(1, 3), request(2, 1)], &fetched)
            .unwrap_err();
        assert!(matches!(err, PlacementError::OutOfStock(ProductId(2))));
    }

    #[test]
    fn test_zero_stock_reports_out_of_stock_not_insufficient() {
        let err = ReservationPlan::build(&[request(2, 50)], &[product(2, 20, 0)]).unwrap_err();
        assert!(matches!(err, PlacementError::OutOfStock(ProductId(2))));
    }

    #[test]
    fn test_insufficient_stock_reports_amounts() {
        let err = ReservationPlan::build(&[request(1, 10)], &[product(1, 10, 5)]).unwrap_err();
        assert!(matches!(
            err,
            PlacementError::InsufficientStock {
                product_id: ProductId(1),
                requested: 10,
                available: 5,
            }
        ));
    }

    #[test]
    fn test_missing_products_listed_in_request_order() {
        let err = ReservationPlan::build(
            &[request(7, 1), request(1, 1), request(3, 1)],
            &[product(1, 10, 5)],
        )
        .unwrap_err();
        match err {
            PlacementError::ProductNotFound(ids) => {
                assert_eq!(ids, vec![ProductId(7), ProductId(3)])
            }
            other => panic!("Expected ProductNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_plan_follows_request_order_and_snapshots_price() {
        // Fetch order differs from request order.
        let fetched = [product(2, 20, 4), product(1, 10, 5)];
        let plan = ReservationPlan::build(&[request(1, 3), request(2, 4)], &fetched).unwrap();

        assert_eq!(
            plan.lines,
            vec![
                OrderLine {
                    product_id: ProductId(1),
                    price: Decimal::new(10, 0),
                    quantity: 3,
                },
                OrderLine {
                    product_id: ProductId(2),
                    price: Decimal::new(20, 0),
                    quantity: 4,
                },
            ]
        );
        assert_eq!(
            plan.adjustments,
            vec![
                StockAdjustment {
                    product_id: ProductId(1),
                    expected_quantity: 5,
                    new_quantity: 2,
                },
                StockAdjustment {
                    product_id: ProductId(2),
                    expected_quantity: 4,
                    new_quantity: 0,
                },
            ]
        );
    }

    /// Per product: (stock, requested, present in catalog).
    fn catalog_and_request() -> impl Strategy<Value = Vec<(u32, u32, bool)>> {
        prop::collection::vec((0u32..20, 1u32..20, prop::bool::weighted(0.9)), 1..8)
    }

    fn split(cases: &[(u32, u32, bool)]) -> (Vec<OrderLineRequest>, Vec<Product>) {
        let requested = cases
            .iter()
            .enumerate()
            .map(|(i, &(_, qty, _))| request(i as u32 + 1, qty))
            .collect();
        let fetched = cases
            .iter()
            .enumerate()
            .filter(|(_, case)| case.2)
            .map(|(i, &(stock, _, _))| product(i as u32 + 1, i as i64 + 1, stock))
            .collect();
        (requested, fetched)
    }

    proptest! {
        #[test]
        fn prop_accepted_plans_conserve_stock(cases in catalog_and_request()) {
            let (requested, fetched) = split(&cases);
            if let Ok(plan) = ReservationPlan::build(&requested, &fetched) {
                prop_assert_eq!(plan.lines.len(), requested.len());
                for ((line, adjustment), request) in
                    plan.lines.iter().zip(&plan.adjustments).zip(&requested)
                {
                    prop_assert_eq!(line.product_id, request.product_id);
                    prop_assert_eq!(line.quantity, request.quantity);
                    prop_assert_eq!(adjustment.product_id, request.product_id);
                    prop_assert_eq!(adjustment.reserved(), request.quantity);
                    prop_assert!(adjustment.new_quantity <= adjustment.expected_quantity);
                }
            }
        }

        #[test]
        fn prop_outcome_matches_catalog(cases in catalog_and_request()) {
            let (requested, fetched) = split(&cases);
            let short = cases.iter().any(|&(stock, qty, present)| present && qty > stock);
            let missing = cases.iter().any(|&(_, _, present)| !present);

            match ReservationPlan::build(&requested, &fetched) {
                Ok(_) => prop_assert!(!short && !missing),
                Err(PlacementError::OutOfStock(_))
                | Err(PlacementError::InsufficientStock { .. }) => prop_assert!(short),
                Err(PlacementError::ProductNotFound(ids)) => {
                    prop_assert!(!short && missing);
                    prop_assert!(!ids.is_empty());
                }
                Err(other) => prop_assert!(false, "unexpected error {:?}", other),
            }
        }
    }
}
