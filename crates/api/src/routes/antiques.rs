use axum::routing::get;
use axum::Router;

use crate::handlers::antiques;
use crate::state::AppState;

/// Routes mounted at `/antiques`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create (verified seller)
/// GET    /types     -> types
/// GET    /{slug}    -> get_by_slug
/// PUT    /{slug}    -> update (owner or superuser)
/// DELETE /{slug}    -> delete (owner or superuser)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(antiques::list).post(antiques::create))
        .route("/types", get(antiques::types))
        .route(
            "/{slug}",
            get(antiques::get_by_slug)
                .put(antiques::update)
                .delete(antiques::delete),
        )
}
