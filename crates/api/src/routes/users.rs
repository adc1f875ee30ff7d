use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET  /me          -> me
/// GET  /me/profile  -> get_profile
/// PUT  /me/profile  -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(users::me))
        .route(
            "/me/profile",
            get(users::get_profile).put(users::update_profile),
        )
}
