use std::collections::HashMap;

use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{LineItem, NewOrder, Order, Payment};
use crate::domain::paging::{OrderSort, Page, PageRequest, SortDirection};
use crate::domain::ports::OrderRepository;
use crate::schema::{order_items, orders, payments, products};

use super::models::{NewOrderRow, OrderItemRow, OrderRow, PaymentRow};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Attaches payments and line items to `rows`, keeping the rows' order.
fn load_orders(conn: &mut PgConnection, rows: Vec<OrderRow>) -> Result<Vec<Order>, DomainError> {
    let ids: Vec<i32> = rows.iter().map(|o| o.id).collect();

    let payment_rows: Vec<PaymentRow> = payments::table
        .filter(payments::order_id.eq_any(&ids))
        .select(PaymentRow::as_select())
        .load(conn)?;
    let mut payments_by_order: HashMap<i32, Payment> = HashMap::with_capacity(payment_rows.len());
    for row in payment_rows {
        let payment = Payment::try_from(row)?;
        payments_by_order.insert(payment.order_id, payment);
    }

    let item_rows: Vec<(OrderItemRow, String)> = order_items::table
        .inner_join(products::table)
        .filter(order_items::order_id.eq_any(&ids))
        .order((order_items::order_id.asc(), order_items::product_id.asc()))
        .select((OrderItemRow::as_select(), products::name))
        .load(conn)?;
    let mut items_by_order: HashMap<i32, Vec<LineItem>> = HashMap::new();
    for (row, product_name) in item_rows {
        items_by_order
            .entry(row.order_id)
            .or_default()
            .push(row.into_line_item(product_name));
    }

    rows.into_iter()
        .map(|row| {
            let Some(payment) = payments_by_order.remove(&row.id) else {
                log::error!("Order {} has no payment row", row.id);
                return Err(DomainError::Storage);
            };
            Ok(Order {
                id: row.id,
                placed_at: row.placed_at,
                customer_id: row.customer_id,
                payment,
                items: items_by_order.remove(&row.id).unwrap_or_default(),
            })
        })
        .collect()
}

impl OrderRepository for DieselOrderRepository {
    fn insert(&self, order: NewOrder) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Insert the order
            let row: OrderRow = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    placed_at: order.placed_at,
                    customer_id: order.customer_id,
                })
                .returning(OrderRow::as_returning())
                .get_result(conn)?;

            // 2. Insert its payment
            diesel::insert_into(payments::table)
                .values(&PaymentRow::new(row.id, &order.payment))
                .execute(conn)?;

            // 3. Insert the line items
            let item_rows: Vec<OrderItemRow> = order
                .items
                .iter()
                .map(|item| OrderItemRow::new(row.id, item))
                .collect();
            if !item_rows.is_empty() {
                diesel::insert_into(order_items::table)
                    .values(&item_rows)
                    .execute(conn)?;
            }

            Ok(Order {
                id: row.id,
                placed_at: row.placed_at,
                customer_id: row.customer_id,
                payment: Payment {
                    order_id: row.id,
                    state: order.payment.state,
                    method: order.payment.method,
                },
                items: order.items,
            })
        })
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = orders::table
            .find(id)
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(load_orders(&mut conn, vec![row])?.pop())
    }

    fn find_page_by_customer(
        &self,
        customer_id: i32,
        request: &PageRequest<OrderSort>,
    ) -> Result<Page<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = orders::table
                .filter(orders::customer_id.eq(customer_id))
                .count()
                .get_result(conn)?;

            let query = orders::table
                .filter(orders::customer_id.eq(customer_id))
                .select(OrderRow::as_select())
                .into_boxed();
            let query = match (request.order_by, request.direction) {
                (OrderSort::Id, SortDirection::Asc) => query.order(orders::id.asc()),
                (OrderSort::Id, SortDirection::Desc) => query.order(orders::id.desc()),
                (OrderSort::PlacedAt, SortDirection::Asc) => {
                    query.order((orders::placed_at.asc(), orders::id.asc()))
                }
                (OrderSort::PlacedAt, SortDirection::Desc) => {
                    query.order((orders::placed_at.desc(), orders::id.desc()))
                }
            };

            let rows: Vec<OrderRow> = query
                .limit(request.size)
                .offset(request.offset())
                .load(conn)?;

            Ok(Page::new(load_orders(conn, rows)?, total, request))
        })
    }
}
