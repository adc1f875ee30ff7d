use axum::routing::get;
use axum::Router;

use crate::handlers::blog;
use crate::state::AppState;

/// Routes mounted at `/blog`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create (superuser)
/// GET    /topics    -> topics
/// GET    /{slug}    -> get_by_slug
/// PUT    /{slug}    -> update (superuser)
/// DELETE /{slug}    -> delete (superuser)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(blog::list).post(blog::create))
        .route("/topics", get(blog::topics))
        .route(
            "/{slug}",
            get(blog::get_by_slug).put(blog::update).delete(blog::delete),
        )
}
