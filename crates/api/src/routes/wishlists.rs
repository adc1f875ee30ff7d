use axum::routing::{get, post};
use axum::Router;

use crate::handlers::wishlists;
use crate::state::AppState;

/// Routes mounted at `/wishlists`. All require authentication.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create
/// GET    /toggle/{slug}         -> toggle_options
/// POST   /toggle/{slug}         -> toggle
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
/// POST   /{id}/add/{slug}       -> add
/// POST   /{id}/remove/{slug}    -> remove
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlists::list).post(wishlists::create))
        .route(
            "/toggle/{slug}",
            get(wishlists::toggle_options).post(wishlists::toggle),
        )
        .route(
            "/{id}",
            get(wishlists::get_by_id)
                .put(wishlists::update)
                .delete(wishlists::delete),
        )
        .route("/{id}/add/{slug}", post(wishlists::add))
        .route("/{id}/remove/{slug}", post(wishlists::remove))
}
