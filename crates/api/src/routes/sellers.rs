//! Route definitions for seller profiles.
//!
//! Two routers are provided:
//! - `router()` for seller routes mounted at `/sellers`
//! - `admin_router()` for verification mounted at `/admin`

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::sellers;
use crate::state::AppState;

/// Seller routes mounted at `/sellers`.
///
/// ```text
/// POST /               -> create
/// GET  /me             -> get_mine
/// PUT  /me             -> update_mine
/// GET  /me/dashboard   -> dashboard
/// GET  /{slug}         -> get_by_slug
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(sellers::create))
        .route("/me", get(sellers::get_mine).put(sellers::update_mine))
        .route("/me/dashboard", get(sellers::dashboard))
        .route("/{slug}", get(sellers::get_by_slug))
}

/// Superuser routes mounted at `/admin`.
///
/// ```text
/// PUT /sellers/{id}/verification  -> set_verification
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new().route(
        "/sellers/{id}/verification",
        put(sellers::set_verification),
    )
}
