//! Repository for the `orders` and `order_items` tables.
//!
//! Orders are only ever created by checkout fulfillment, which runs in a
//! single transaction keyed on the payment session id.

use std::collections::HashMap;

use emporium_core::orders::{order_total, STATUS_PAID};
use emporium_core::pagination::{Page, PageRequest};
use emporium_core::types::DbId;
use sqlx::PgPool;

use crate::listing::{ListBind, ListQuery, ListSpec};
use crate::models::order::{
    FulfillCheckout, FulfilledOrder, Order, OrderItem, OrderLine, OrderWithItems,
};

const COLUMNS: &str = "id, user_id, status, payment_session_id, payment_intent_id, \
                       invoice_pdf_url, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, order_id, antique_id, quantity";

/// Order history, newest first. Always narrowed to one user.
const LIST_SPEC: ListSpec = ListSpec {
    table: "orders",
    columns: COLUMNS,
    search_fields: &[],
    filter_fields: &[("status", "status")],
    ordering: "created_at DESC, id DESC",
};

pub struct OrderRepo;

impl OrderRepo {
    /// Create the paid order, its single item and decrement stock, atomically.
    ///
    /// The antique row is locked first so concurrent deliveries serialize.
    /// Returns `None` when an order for `session_id` already exists (webhook
    /// redelivery); nothing is written in that case. Fails with
    /// `RowNotFound` if the antique does not exist.
    pub async fn fulfill_checkout(
        pool: &PgPool,
        input: &FulfillCheckout,
    ) -> Result<Option<FulfilledOrder>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT id FROM antiques WHERE id = $1 FOR UPDATE")
            .bind(input.antique_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        let query = format!(
            "INSERT INTO orders (user_id, status, payment_session_id, payment_intent_id)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (payment_session_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(input.user_id)
            .bind(STATUS_PAID)
            .bind(&input.session_id)
            .bind(&input.payment_intent_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(order) = order else {
            tx.rollback().await?;
            tracing::debug!(session_id = %input.session_id, "Checkout session already fulfilled");
            return Ok(None);
        };

        let query = format!(
            "INSERT INTO order_items (order_id, antique_id, quantity)
             VALUES ($1, $2, $3)
             RETURNING {ITEM_COLUMNS}"
        );
        let item = sqlx::query_as::<_, OrderItem>(&query)
            .bind(order.id)
            .bind(input.antique_id)
            .bind(input.quantity)
            .fetch_one(&mut *tx)
            .await?;

        let remaining_quantity: i32 = sqlx::query_scalar(
            "UPDATE antiques SET quantity = GREATEST(quantity - $2, 0)
             WHERE id = $1
             RETURNING quantity",
        )
        .bind(input.antique_id)
        .bind(input.quantity)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(FulfilledOrder {
            order,
            item,
            remaining_quantity,
        }))
    }

    pub async fn find_by_session(
        pool: &PgPool,
        session_id: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE payment_session_id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(session_id)
            .fetch_optional(pool)
            .await
    }

    /// Most recent order paid with the given payment intent.
    pub async fn find_by_payment_intent(
        pool: &PgPool,
        payment_intent_id: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders WHERE payment_intent_id = $1
             ORDER BY created_at DESC, id DESC LIMIT 1"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(payment_intent_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_invoice_pdf(
        pool: &PgPool,
        id: DbId,
        invoice_pdf_url: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query =
            format!("UPDATE orders SET invoice_pdf_url = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(invoice_pdf_url)
            .fetch_optional(pool)
            .await
    }

    /// Paginated order history of one user, lines pre-loaded.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        filters: &HashMap<String, String>,
        request: PageRequest,
    ) -> Result<Page<OrderWithItems>, sqlx::Error> {
        let page = ListQuery::new(LIST_SPEC)
            .filters(filters)
            .narrow("user_id", ListBind::Int(user_id))
            .fetch_page::<Order>(pool, request)
            .await?;

        let ids: Vec<DbId> = page.items.iter().map(|o| o.id).collect();
        let mut lines: HashMap<DbId, Vec<OrderLine>> = HashMap::new();
        for line in Self::lines_for_orders(pool, &ids).await? {
            lines.entry(line.order_id).or_default().push(line);
        }
        Ok(page.map(|order| {
            let items = lines.remove(&order.id).unwrap_or_default();
            Self::with_items(order, items)
        }))
    }

    /// One order, only if it belongs to `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<OrderWithItems>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1 AND user_id = $2");
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        let Some(order) = order else {
            return Ok(None);
        };
        let items = Self::lines_for_orders(pool, &[order.id]).await?;
        Ok(Some(Self::with_items(order, items)))
    }

    async fn lines_for_orders(
        pool: &PgPool,
        order_ids: &[DbId],
    ) -> Result<Vec<OrderLine>, sqlx::Error> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, OrderLine>(
            "SELECT oi.id, oi.order_id, oi.antique_id, oi.quantity,
                    a.title, a.slug, a.short_id, a.price_cents
             FROM order_items oi
             JOIN antiques a ON a.id = oi.antique_id
             WHERE oi.order_id = ANY($1)
             ORDER BY oi.order_id, oi.id",
        )
        .bind(order_ids)
        .fetch_all(pool)
        .await
    }

    fn with_items(order: Order, items: Vec<OrderLine>) -> OrderWithItems {
        let total_cents = order_total(items.iter().map(|l| (l.price_cents, l.quantity)));
        OrderWithItems {
            order,
            items,
            total_cents,
        }
    }
}
