use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{payments, webhook};
use crate::state::AppState;

/// Routes mounted at `/payments`.
///
/// ```text
/// POST /buy/{slug}          -> buy
/// GET  /checkout/{status}   -> checkout_result
/// GET  /orders              -> list_orders
/// GET  /orders/{id}         -> get_order
/// POST /test-order/{slug}   -> test_order (superuser, development mode)
/// POST /webhook             -> webhook::receive (provider callback)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/buy/{slug}", post(payments::buy))
        .route("/checkout/{status}", get(payments::checkout_result))
        .route("/orders", get(payments::list_orders))
        .route("/orders/{id}", get(payments::get_order))
        .route("/test-order/{slug}", post(payments::test_order))
        .route("/webhook", post(webhook::receive))
}
