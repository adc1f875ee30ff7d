//! Payment provider webhook: checkout fulfillment and invoice links.
//!
//! The endpoint answers with bare status codes so the provider's retry logic
//! sees the outcome: 2xx is final, 4xx means the delivery can never succeed,
//! 5xx asks for a retry.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use emporium_core::orders::parse_purchase_quantity;
use emporium_core::types::DbId;
use emporium_db::models::order::FulfillCheckout;
use emporium_db::models::user::User;
use emporium_db::repositories::{AntiqueRepo, OrderRepo, UserRepo};
use emporium_payments::event::{CheckoutSession, EventKind, Invoice, WebhookEvent};
use emporium_payments::signature::{self, SIGNATURE_HEADER};

use crate::state::AppState;

/// Why a delivery was not processed.
#[derive(Debug, thiserror::Error)]
pub enum WebhookFailure {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for WebhookFailure {
    fn into_response(self) -> Response {
        let status = match &self {
            WebhookFailure::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebhookFailure::NotFound(_) => StatusCode::NOT_FOUND,
            WebhookFailure::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "Webhook processing failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Webhook rejected");
        }
        status.into_response()
    }
}

/// POST /api/v1/payments/webhook
pub async fn receive(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, WebhookFailure> {
    let payments = &state.config.payments;
    match &payments.webhook_secret {
        Some(secret) => {
            let header = headers
                .get(SIGNATURE_HEADER)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| WebhookFailure::BadRequest("Missing signature header".into()))?;
            signature::verify(
                &body,
                header,
                secret,
                chrono::Utc::now().timestamp(),
                payments.webhook_tolerance_secs,
            )
            .map_err(|e| WebhookFailure::BadRequest(format!("Invalid signature: {e}")))?;
        }
        None => {
            tracing::warn!("Accepting unverified webhook (development mode)");
        }
    }

    let event =
        WebhookEvent::parse(&body).map_err(|e| WebhookFailure::BadRequest(e.to_string()))?;
    let event_id = event.id.clone().unwrap_or_default();
    let kind = event
        .into_kind()
        .map_err(|e| WebhookFailure::BadRequest(e.to_string()))?;

    match kind {
        EventKind::CheckoutCompleted(session) => fulfill(&state, &event_id, session).await?,
        EventKind::Invoice(invoice) => attach_invoice(&state, &event_id, invoice).await?,
        EventKind::Other(event_type) => {
            tracing::debug!(event_id = %event_id, event_type = %event_type, "Ignoring webhook event");
        }
    }
    Ok(StatusCode::OK)
}

/// Turn a completed checkout session into a paid order.
async fn fulfill(
    state: &AppState,
    event_id: &str,
    session: CheckoutSession,
) -> Result<(), WebhookFailure> {
    let (Some(raw_user_id), Some(raw_antique_id)) = (
        session.metadata_str("user_id"),
        session.metadata_str("antique_id"),
    ) else {
        return Err(WebhookFailure::BadRequest(
            "Missing user_id or antique_id in session metadata".into(),
        ));
    };
    let quantity = parse_purchase_quantity(session.metadata_str("quantity").as_deref())
        .map_err(|e| WebhookFailure::BadRequest(e.to_string()))?;

    let user = resolve_buyer(state, &session, &raw_user_id).await?;

    let antique_id: DbId = raw_antique_id
        .parse()
        .map_err(|_| WebhookFailure::BadRequest(format!("Malformed antique_id '{raw_antique_id}'")))?;
    let antique = AntiqueRepo::find_by_id(&state.pool, antique_id)
        .await?
        .ok_or_else(|| WebhookFailure::NotFound(format!("Antique {antique_id} not found")))?;

    let input = FulfillCheckout {
        user_id: user.id,
        antique_id: antique.id,
        quantity,
        session_id: session.id.clone(),
        payment_intent_id: session.payment_intent.clone(),
    };
    match OrderRepo::fulfill_checkout(&state.pool, &input).await {
        Ok(Some(fulfilled)) => {
            tracing::info!(
                event_id = %event_id,
                order_id = fulfilled.order.id,
                antique_id = antique.id,
                user_id = user.id,
                quantity,
                remaining_quantity = fulfilled.remaining_quantity,
                "Checkout fulfilled"
            );
        }
        Ok(None) => {
            tracing::info!(
                event_id = %event_id,
                session_id = %session.id,
                "Checkout session already fulfilled"
            );
        }
        // The listing vanished between lookup and lock.
        Err(sqlx::Error::RowNotFound) => {
            return Err(WebhookFailure::NotFound(format!(
                "Antique {antique_id} not found"
            )));
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Buyer from the `user_id` metadata; when that id matches no account,
/// from the checkout email.
async fn resolve_buyer(
    state: &AppState,
    session: &CheckoutSession,
    raw_user_id: &str,
) -> Result<User, WebhookFailure> {
    if let Ok(user_id) = raw_user_id.parse::<DbId>() {
        if let Some(user) = UserRepo::find_by_id(&state.pool, user_id).await? {
            return Ok(user);
        }
    }
    tracing::warn!(user_id = %raw_user_id, "Metadata user not found, falling back to email");

    let email = session.email().ok_or_else(|| {
        WebhookFailure::BadRequest(
            "Unknown user id and no customer email in checkout session".into(),
        )
    })?;
    UserRepo::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| WebhookFailure::NotFound(format!("No user with email {email}")))
}

/// Store the invoice PDF link on the order paid with the same payment intent.
async fn attach_invoice(
    state: &AppState,
    event_id: &str,
    invoice: Invoice,
) -> Result<(), WebhookFailure> {
    let (Some(payment_intent), Some(pdf)) = (&invoice.payment_intent, &invoice.invoice_pdf) else {
        tracing::info!(event_id = %event_id, "Invoice without payment intent or PDF");
        return Ok(());
    };

    match OrderRepo::find_by_payment_intent(&state.pool, payment_intent).await? {
        Some(order) => {
            OrderRepo::set_invoice_pdf(&state.pool, order.id, pdf).await?;
            tracing::info!(event_id = %event_id, order_id = order.id, "Invoice PDF attached");
        }
        None => {
            tracing::info!(
                event_id = %event_id,
                payment_intent = %payment_intent,
                "No order for invoice payment intent"
            );
        }
    }
    Ok(())
}
