pub mod antiques;
pub mod auth;
pub mod blog;
pub mod health;
pub mod payments;
pub mod sellers;
pub mod users;
pub mod wishlists;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth                                   register, login
/// /users/me                               account, profile
/// /sellers                                seller profiles, dashboard
/// /admin/sellers/{id}/verification        seller verification (superuser)
/// /antiques                               catalog, listing management
/// /wishlists                              wishlists, toggle
/// /blog                                   posts, topics
/// /payments                               checkout, orders, webhook
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/sellers", sellers::router())
        .nest("/admin", sellers::admin_router())
        .nest("/antiques", antiques::router())
        .nest("/wishlists", wishlists::router())
        .nest("/blog", blog::router())
        .nest("/payments", payments::router())
}
