//! Handlers for checkout, checkout results and order history.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use emporium_core::catalog::{antique_path, validate_purchase_quantity};
use emporium_core::error::CoreError;
use emporium_core::orders::{is_checkout_status, CHECKOUT_SUCCESS};
use emporium_core::pagination::{Page, ORDER_PAGE_SIZE};
use emporium_core::types::DbId;
use emporium_db::models::order::{FulfillCheckout, FulfilledOrder, OrderWithItems};
use emporium_db::repositories::{OrderRepo, UserRepo};
use emporium_payments::gateway::CheckoutRequest;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::antiques::find_antique;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireSuperuser;
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /payments/buy/{slug}`.
#[derive(Debug, Default, Deserialize)]
pub struct BuyRequest {
    /// Units to purchase (default: 1).
    pub quantity: Option<i32>,
}

/// A hosted checkout session the buyer should be redirected to.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub checkout_url: String,
    pub session_id: String,
}

/// What the buyer sees after returning from the hosted checkout.
#[derive(Debug, Serialize)]
pub struct CheckoutResult {
    pub status: String,
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Checkout
// ---------------------------------------------------------------------------

/// POST /api/v1/payments/buy/{slug}
///
/// Starts a hosted checkout for one listing. The order itself is created
/// later, when the provider reports the completed session to the webhook.
pub async fn buy(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    input: Option<Json<BuyRequest>>,
) -> AppResult<Json<DataResponse<CheckoutResponse>>> {
    let antique = find_antique(&state, slug).await?;
    let quantity = input.and_then(|Json(body)| body.quantity).unwrap_or(1);
    validate_purchase_quantity(quantity, antique.quantity)?;

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let base = &state.config.public_base_url;
    let request = CheckoutRequest {
        product_name: antique.title.clone(),
        unit_amount_cents: antique.price_cents,
        currency: state.config.payments.currency.clone(),
        quantity,
        success_url: format!("{base}/api/v1/payments/checkout/success"),
        cancel_url: format!("{base}/api/v1/payments/checkout/cancel"),
        customer_email: Some(user.email.clone()),
        metadata: vec![
            ("user_id".to_string(), user.id.to_string()),
            ("antique_id".to_string(), antique.id.to_string()),
            ("quantity".to_string(), quantity.to_string()),
        ],
    };

    let session = state
        .payments
        .create_checkout_session(&request)
        .await
        .map_err(|e| {
            tracing::error!(antique_id = antique.id, user_id = user.id, error = %e, "Checkout session failed");
            AppError::PaymentProvider {
                message: e.user_message(),
                return_to: Some(antique_path(antique.short_id, &antique.slug)),
            }
        })?;

    tracing::info!(
        antique_id = antique.id,
        user_id = user.id,
        quantity,
        session_id = %session.id,
        "Checkout session created"
    );
    Ok(Json(DataResponse {
        data: CheckoutResponse {
            checkout_url: session.url,
            session_id: session.id,
        },
    }))
}

/// GET /api/v1/payments/checkout/{status}
///
/// Return target for the hosted checkout; `status` is `success` or `cancel`.
pub async fn checkout_result(
    Path(status): Path<String>,
) -> AppResult<Json<DataResponse<CheckoutResult>>> {
    if !is_checkout_status(&status) {
        return Err(AppError::NotFound(format!(
            "Unknown checkout status '{status}'"
        )));
    }
    let message = if status == CHECKOUT_SUCCESS {
        "Payment successful! Your order is being processed."
    } else {
        "Payment was canceled. You have not been charged."
    };
    Ok(Json(DataResponse {
        data: CheckoutResult { status, message },
    }))
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// GET /api/v1/payments/orders
///
/// Query: `status`, `page`.
pub async fn list_orders(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
) -> AppResult<Json<DataResponse<Page<OrderWithItems>>>> {
    let params = ListParams::from_query(raw, ORDER_PAGE_SIZE);
    let page = OrderRepo::list_for_user(&state.pool, auth.user_id, &params.raw, params.page).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/payments/orders/{id}
pub async fn get_order(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<OrderWithItems>>> {
    let order = OrderRepo::find_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id,
        }))?;
    Ok(Json(DataResponse { data: order }))
}

/// POST /api/v1/payments/test-order/{slug}
///
/// Fulfills one unit for the caller without the payment provider. Only
/// available to superusers while webhooks run in development mode.
pub async fn test_order(
    RequireSuperuser(admin): RequireSuperuser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<(StatusCode, Json<DataResponse<FulfilledOrder>>)> {
    if !state.config.payments.is_development_mode() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Test orders are only available in development mode".into(),
        )));
    }

    let antique = find_antique(&state, slug).await?;
    validate_purchase_quantity(1, antique.quantity)?;

    let input = FulfillCheckout {
        user_id: admin.user_id,
        antique_id: antique.id,
        quantity: 1,
        session_id: format!("test_{}_{}", antique.id, uuid::Uuid::new_v4().simple()),
        payment_intent_id: None,
    };
    let fulfilled = OrderRepo::fulfill_checkout(&state.pool, &input)
        .await?
        .ok_or_else(|| AppError::InternalError("Test order session id collided".into()))?;

    tracing::warn!(
        order_id = fulfilled.order.id,
        antique_id = antique.id,
        "Test order fulfilled without payment"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: fulfilled })))
}
