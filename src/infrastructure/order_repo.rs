use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{ListResult, OrderLineInput, OrderLineView, OrderStatus, OrderView};
use crate::domain::ports::OrderRepository;
use crate::domain::pricing::{effective_price, DiscountRule};
use crate::schema::{order_lines, orders, product_variants};

use super::models::{NewOrderLineRow, NewOrderRow, OrderLineRow, OrderRow};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn parse_status(raw: &str) -> Result<OrderStatus, DomainError> {
    OrderStatus::parse(raw)
        .ok_or_else(|| DomainError::Store(format!("unknown order status in store: {raw}")))
}

fn view_from_rows(order: OrderRow, lines: Vec<OrderLineRow>) -> Result<OrderView, DomainError> {
    Ok(OrderView {
        id: order.id,
        customer_id: order.customer_id,
        status: parse_status(&order.status)?,
        created_at: order.created_at,
        lines: lines
            .into_iter()
            .map(|l| OrderLineView {
                id: l.id,
                variant_id: l.variant_id,
                quantity: l.quantity,
                unit_price: l.unit_price,
            })
            .collect(),
    })
}

impl OrderRepository for DieselOrderRepository {
    /// Checkout. The order insert, every line insert, and every guarded stock
    /// decrement commit together or not at all.
    fn create(&self, customer_id: Uuid, lines: Vec<OrderLineInput>) -> Result<Uuid, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let order_id = Uuid::new_v4();
            diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    id: order_id,
                    customer_id,
                    status: OrderStatus::Pending.as_str().to_string(),
                })
                .execute(conn)?;

            for (position, line) in lines.iter().enumerate() {
                let variant = product_variants::table
                    .find(line.variant_id)
                    .select((
                        product_variants::price,
                        product_variants::discount_kind,
                        product_variants::discount_value,
                    ))
                    .first::<(
                        bigdecimal::BigDecimal,
                        Option<String>,
                        Option<bigdecimal::BigDecimal>,
                    )>(conn)
                    .optional()?;
                let Some((price, discount_kind, discount_value)) = variant else {
                    return Err(DomainError::NotFound);
                };

                // Relative, guarded decrement: correct under concurrent
                // checkouts and cancellations on the same variant.
                let updated = diesel::update(
                    product_variants::table.filter(
                        product_variants::id
                            .eq(line.variant_id)
                            .and(product_variants::stock.ge(line.quantity)),
                    ),
                )
                .set(product_variants::stock.eq(product_variants::stock - line.quantity))
                .execute(conn)?;
                if updated == 0 {
                    return Err(DomainError::InsufficientStock {
                        variant_id: line.variant_id,
                    });
                }

                let rule = DiscountRule::from_parts(discount_kind.as_deref(), discount_value);
                diesel::insert_into(order_lines::table)
                    .values(&NewOrderLineRow {
                        id: Uuid::new_v4(),
                        order_id,
                        variant_id: line.variant_id,
                        quantity: line.quantity,
                        unit_price: effective_price(&price, &rule),
                        position: position as i32,
                    })
                    .execute(conn)?;
            }

            Ok(order_id)
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders::table
            .filter(orders::id.eq(id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        // All of an order's lines share the transaction timestamp, so the
        // explicit position column is what keeps their order stable.
        let lines = order_lines::table
            .filter(order_lines::order_id.eq(order.id))
            .order(order_lines::position.asc())
            .select(OrderLineRow::as_select())
            .load(&mut conn)?;

        Ok(Some(view_from_rows(order, lines)?))
    }

    fn list(&self, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        let mut conn = self.pool.get()?;

        let offset = (page - 1) * limit;
        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = orders::table.count().get_result(conn)?;

            let rows = orders::table
                .select(OrderRow::as_select())
                .order(orders::created_at.desc())
                .limit(limit)
                .offset(offset)
                .load(conn)?;

            let items = rows
                .into_iter()
                .map(|o| view_from_rows(o, vec![]))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(ListResult { items, total })
        })
    }

    /// The reconciler: status flip, then per-line stock restoration, in one
    /// transaction, so a mid-flight failure (missing variant row, rejected
    /// write) rolls the flip back and leaves no partial stock restoration
    /// behind.
    ///
    /// The flip is a compare-and-set on the status column rather than a
    /// read-then-write: of two concurrent cancellations, the second blocks on
    /// the first's row lock and then re-evaluates the guard against the
    /// committed CANCELLED row, matches zero rows, and rejects — so stock is
    /// credited exactly once no matter how the calls interleave.
    fn cancel(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let flipped = diesel::update(
                orders::table.filter(
                    orders::id
                        .eq(id)
                        .and(orders::status.eq_any(OrderStatus::cancellable().map(OrderStatus::as_str))),
                ),
            )
            .set((
                orders::status.eq(OrderStatus::Cancelled.as_str()),
                orders::updated_at.eq(diesel::dsl::now),
            ))
            .execute(conn)?;

            if flipped == 0 {
                let status: Option<String> = orders::table
                    .find(id)
                    .select(orders::status)
                    .first(conn)
                    .optional()?;
                return match status {
                    None => Err(DomainError::NotFound),
                    Some(status) => {
                        parse_status(&status)?;
                        Err(DomainError::NotCancellable { status })
                    }
                };
            }

            let lines = order_lines::table
                .filter(order_lines::order_id.eq(id))
                .select(OrderLineRow::as_select())
                .load(conn)?;

            for line in &lines {
                // Relative delta, never an absolute overwrite: a checkout
                // decrementing the same variant concurrently cannot be lost.
                let updated = diesel::update(product_variants::table.find(line.variant_id))
                    .set(product_variants::stock.eq(product_variants::stock + line.quantity))
                    .execute(conn)?;
                if updated == 0 {
                    return Err(DomainError::NotFound);
                }
            }

            Ok(())
        })
    }
}
