use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{ListResult, OrderLineInput, OrderView};
use crate::domain::ports::OrderRepository;

pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_order(
        &self,
        customer_id: Uuid,
        lines: Vec<OrderLineInput>,
    ) -> Result<Uuid, DomainError> {
        if lines.is_empty() {
            return Err(DomainError::InvalidInput(
                "an order needs at least one line".to_string(),
            ));
        }
        if let Some(line) = lines.iter().find(|l| l.quantity <= 0) {
            return Err(DomainError::InvalidInput(format!(
                "quantity must be positive, got {} for variant {}",
                line.quantity, line.variant_id
            )));
        }
        self.repo.create(customer_id, lines)
    }

    pub fn get_order(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        self.repo.find_by_id(id)
    }

    pub fn list_orders(&self, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        self.repo.list(page, limit)
    }

    /// Cancel an order and restore its line items' stock.
    ///
    /// Delegates atomicity to the repository: either the status flips to
    /// cancelled and every variant's stock is credited, or nothing changes.
    /// Errors are surfaced as-is; a failed cancellation is never retried here
    /// because blindly retrying a stock mutation risks double effects.
    pub fn cancel_order(&self, id: Uuid) -> Result<(), DomainError> {
        self.repo.cancel(id)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::str::FromStr;
    use std::sync::Mutex;

    use bigdecimal::BigDecimal;
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::order::{OrderLineView, OrderStatus};
    use crate::domain::pricing::{effective_price, DiscountRule};

    #[derive(Clone)]
    struct StoredOrder {
        customer_id: Uuid,
        status: OrderStatus,
        lines: Vec<(Uuid, i32, BigDecimal)>,
    }

    #[derive(Clone)]
    struct StoredVariant {
        price: BigDecimal,
        discount: DiscountRule,
        stock: i32,
    }

    #[derive(Default)]
    struct State {
        orders: HashMap<Uuid, StoredOrder>,
        variants: HashMap<Uuid, StoredVariant>,
        fail_writes: bool,
    }

    /// In-memory stand-in for the Postgres store. Mutations run against a
    /// staged copy under one lock and swap in only on success, mirroring the
    /// all-or-nothing transaction semantics of the real repository.
    #[derive(Default)]
    struct InMemoryOrderStore {
        state: Mutex<State>,
    }

    impl InMemoryOrderStore {
        fn with_variant(&self, id: Uuid, price: &str, stock: i32) {
            self.state.lock().unwrap().variants.insert(
                id,
                StoredVariant {
                    price: BigDecimal::from_str(price).unwrap(),
                    discount: DiscountRule::None,
                    stock,
                },
            );
        }

        fn with_order(&self, id: Uuid, status: OrderStatus, lines: &[(Uuid, i32)]) {
            self.state.lock().unwrap().orders.insert(
                id,
                StoredOrder {
                    customer_id: Uuid::new_v4(),
                    status,
                    lines: lines
                        .iter()
                        .map(|(v, q)| (*v, *q, BigDecimal::from(1)))
                        .collect(),
                },
            );
        }

        fn fail_next_writes(&self) {
            self.state.lock().unwrap().fail_writes = true;
        }

        fn stock_of(&self, variant_id: Uuid) -> i32 {
            self.state.lock().unwrap().variants[&variant_id].stock
        }

        fn status_of(&self, order_id: Uuid) -> OrderStatus {
            self.state.lock().unwrap().orders[&order_id].status
        }
    }

    impl OrderRepository for InMemoryOrderStore {
        fn create(
            &self,
            customer_id: Uuid,
            lines: Vec<OrderLineInput>,
        ) -> Result<Uuid, DomainError> {
            let mut state = self.state.lock().unwrap();
            if state.fail_writes {
                return Err(DomainError::Store("injected write failure".to_string()));
            }
            // Stage against a copy so a failing line leaves nothing behind.
            let mut staged = state.variants.clone();
            let mut stored_lines = Vec::with_capacity(lines.len());
            for line in &lines {
                let variant = staged.get_mut(&line.variant_id).ok_or(DomainError::NotFound)?;
                if variant.stock < line.quantity {
                    return Err(DomainError::InsufficientStock {
                        variant_id: line.variant_id,
                    });
                }
                variant.stock -= line.quantity;
                let unit = effective_price(&variant.price, &variant.discount);
                stored_lines.push((line.variant_id, line.quantity, unit));
            }
            let id = Uuid::new_v4();
            state.variants = staged;
            state.orders.insert(
                id,
                StoredOrder {
                    customer_id,
                    status: OrderStatus::Pending,
                    lines: stored_lines,
                },
            );
            Ok(id)
        }

        fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
            let state = self.state.lock().unwrap();
            Ok(state.orders.get(&id).map(|o| OrderView {
                id,
                customer_id: o.customer_id,
                status: o.status,
                created_at: Utc::now(),
                lines: o
                    .lines
                    .iter()
                    .map(|(variant_id, quantity, unit_price)| OrderLineView {
                        id: Uuid::new_v4(),
                        variant_id: *variant_id,
                        quantity: *quantity,
                        unit_price: unit_price.clone(),
                    })
                    .collect(),
            }))
        }

        fn list(&self, _page: i64, _limit: i64) -> Result<ListResult, DomainError> {
            let state = self.state.lock().unwrap();
            Ok(ListResult {
                items: vec![],
                total: state.orders.len() as i64,
            })
        }

        fn cancel(&self, id: Uuid) -> Result<(), DomainError> {
            let mut state = self.state.lock().unwrap();
            let order = state.orders.get(&id).cloned().ok_or(DomainError::NotFound)?;
            if !order.status.is_cancellable() {
                return Err(DomainError::NotCancellable {
                    status: order.status.as_str().to_string(),
                });
            }
            if state.fail_writes {
                return Err(DomainError::Store("injected write failure".to_string()));
            }
            let mut staged = state.variants.clone();
            for (variant_id, quantity, _) in &order.lines {
                let variant = staged.get_mut(variant_id).ok_or(DomainError::NotFound)?;
                variant.stock += quantity;
            }
            state.variants = staged;
            state.orders.get_mut(&id).unwrap().status = OrderStatus::Cancelled;
            Ok(())
        }
    }

    #[test]
    fn cancelling_pending_order_restores_stock_and_flips_status() {
        let store = InMemoryOrderStore::default();
        let (variant_a, variant_b) = (Uuid::new_v4(), Uuid::new_v4());
        store.with_variant(variant_a, "10.00", 3);
        store.with_variant(variant_b, "5.00", 0);
        let order_id = Uuid::new_v4();
        store.with_order(order_id, OrderStatus::Pending, &[(variant_a, 2), (variant_b, 1)]);

        let service = OrderService::new(store);
        service.cancel_order(order_id).expect("cancel failed");

        assert_eq!(service.repo.stock_of(variant_a), 5);
        assert_eq!(service.repo.stock_of(variant_b), 1);
        assert_eq!(service.repo.status_of(order_id), OrderStatus::Cancelled);
    }

    #[test]
    fn cancelling_twice_rejects_and_does_not_double_credit() {
        let store = InMemoryOrderStore::default();
        let variant = Uuid::new_v4();
        store.with_variant(variant, "10.00", 0);
        let order_id = Uuid::new_v4();
        store.with_order(order_id, OrderStatus::Pending, &[(variant, 2)]);

        let service = OrderService::new(store);
        service.cancel_order(order_id).expect("first cancel failed");
        assert_eq!(service.repo.stock_of(variant), 2);

        let err = service.cancel_order(order_id).unwrap_err();
        assert!(matches!(err, DomainError::NotCancellable { .. }));
        assert_eq!(service.repo.stock_of(variant), 2);
    }

    #[test]
    fn shipped_order_is_not_cancellable_and_stock_is_untouched() {
        let store = InMemoryOrderStore::default();
        let variant = Uuid::new_v4();
        store.with_variant(variant, "10.00", 7);
        let order_id = Uuid::new_v4();
        store.with_order(order_id, OrderStatus::Shipped, &[(variant, 3)]);

        let service = OrderService::new(store);
        let err = service.cancel_order(order_id).unwrap_err();
        assert!(matches!(err, DomainError::NotCancellable { ref status } if status == "SHIPPED"));
        assert_eq!(service.repo.stock_of(variant), 7);
        assert_eq!(service.repo.status_of(order_id), OrderStatus::Shipped);
    }

    #[test]
    fn concurrent_cancellations_credit_stock_only_once() {
        let store = InMemoryOrderStore::default();
        let variant = Uuid::new_v4();
        store.with_variant(variant, "10.00", 0);
        let order_id = Uuid::new_v4();
        store.with_order(order_id, OrderStatus::Pending, &[(variant, 2)]);

        let service = OrderService::new(store);
        let results = std::thread::scope(|s| {
            let first = s.spawn(|| service.cancel_order(order_id));
            let second = s.spawn(|| service.cancel_order(order_id));
            [first.join().unwrap(), second.join().unwrap()]
        });

        // Exactly one call wins; the loser sees the already-cancelled order
        // and must not credit the line again.
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(DomainError::NotCancellable { .. }))));
        assert_eq!(service.repo.stock_of(variant), 2);
        assert_eq!(service.repo.status_of(order_id), OrderStatus::Cancelled);
    }

    #[test]
    fn cancelling_unknown_order_is_not_found() {
        let service = OrderService::new(InMemoryOrderStore::default());
        assert!(matches!(
            service.cancel_order(Uuid::new_v4()),
            Err(DomainError::NotFound)
        ));
    }

    #[test]
    fn failed_write_leaves_status_and_stocks_at_pre_call_values() {
        let store = InMemoryOrderStore::default();
        let variant = Uuid::new_v4();
        store.with_variant(variant, "10.00", 1);
        let order_id = Uuid::new_v4();
        store.with_order(order_id, OrderStatus::Processing, &[(variant, 4)]);
        store.fail_next_writes();

        let service = OrderService::new(store);
        let err = service.cancel_order(order_id).unwrap_err();
        assert!(matches!(err, DomainError::Store(_)));
        assert_eq!(service.repo.stock_of(variant), 1);
        assert_eq!(service.repo.status_of(order_id), OrderStatus::Processing);
    }

    #[test]
    fn checkout_charges_effective_price_and_decrements_stock() {
        let store = InMemoryOrderStore::default();
        let variant = Uuid::new_v4();
        store.with_variant(variant, "100", 5);
        {
            let mut state = store.state.lock().unwrap();
            state.variants.get_mut(&variant).unwrap().discount =
                DiscountRule::Percentage(BigDecimal::from(20));
        }

        let service = OrderService::new(store);
        let order_id = service
            .create_order(
                Uuid::new_v4(),
                vec![OrderLineInput {
                    variant_id: variant,
                    quantity: 2,
                }],
            )
            .expect("create failed");

        assert_eq!(service.repo.stock_of(variant), 3);
        let order = service.get_order(order_id).unwrap().unwrap();
        assert_eq!(order.lines[0].unit_price, BigDecimal::from(80));
    }

    #[test]
    fn checkout_with_insufficient_stock_commits_nothing() {
        let store = InMemoryOrderStore::default();
        let (variant_a, variant_b) = (Uuid::new_v4(), Uuid::new_v4());
        store.with_variant(variant_a, "10.00", 5);
        store.with_variant(variant_b, "10.00", 0);

        let service = OrderService::new(store);
        let err = service
            .create_order(
                Uuid::new_v4(),
                vec![
                    OrderLineInput { variant_id: variant_a, quantity: 2 },
                    OrderLineInput { variant_id: variant_b, quantity: 1 },
                ],
            )
            .unwrap_err();

        assert!(matches!(err, DomainError::InsufficientStock { variant_id } if variant_id == variant_b));
        assert_eq!(service.repo.stock_of(variant_a), 5);
    }

    #[test]
    fn create_order_rejects_empty_and_non_positive_lines() {
        let service = OrderService::new(InMemoryOrderStore::default());
        assert!(matches!(
            service.create_order(Uuid::new_v4(), vec![]),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            service.create_order(
                Uuid::new_v4(),
                vec![OrderLineInput { variant_id: Uuid::new_v4(), quantity: 0 }]
            ),
            Err(DomainError::InvalidInput(_))
        ));
    }
}
