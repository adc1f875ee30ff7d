//! Order and order-item models.

use emporium_core::types::{Cents, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub user_id: DbId,
    pub status: String,
    pub payment_session_id: Option<String>,
    pub payment_intent_id: Option<String>,
    pub invoice_pdf_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `order_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderItem {
    pub id: DbId,
    pub order_id: DbId,
    pub antique_id: DbId,
    pub quantity: i32,
}

/// An order line joined with the antique's current title and price.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderLine {
    pub id: DbId,
    pub order_id: DbId,
    pub antique_id: DbId,
    pub quantity: i32,
    pub title: String,
    pub slug: String,
    pub short_id: i64,
    pub price_cents: Cents,
}

/// An order with its lines and computed total.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderLine>,
    pub total_cents: Cents,
}

/// Input for fulfilling a completed checkout session.
#[derive(Debug, Clone)]
pub struct FulfillCheckout {
    pub user_id: DbId,
    pub antique_id: DbId,
    pub quantity: i32,
    pub session_id: String,
    pub payment_intent_id: Option<String>,
}

/// Result of a fulfillment that created a new order.
#[derive(Debug, Clone, Serialize)]
pub struct FulfilledOrder {
    pub order: Order,
    pub item: OrderItem,
    pub remaining_quantity: i32,
}
