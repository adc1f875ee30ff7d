use std::sync::Arc;

use emporium_payments::PaymentGateway;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: emporium_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Outbound payment provider (Stripe in production, a stub in tests).
    pub payments: Arc<dyn PaymentGateway>,
}
