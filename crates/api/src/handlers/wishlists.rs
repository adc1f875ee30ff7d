//! Handlers for the caller's wishlists and the wishlist toggle.
//!
//! Every operation is scoped to the signed-in user: another user's wishlist
//! is indistinguishable from a missing one (404).

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use emporium_core::error::CoreError;
use emporium_core::pagination::{Page, WISHLIST_PAGE_SIZE};
use emporium_core::types::DbId;
use emporium_core::wishlist::{validate_title, ToggleAction};
use emporium_db::models::wishlist::{
    CreateWishlist, UpdateWishlist, Wishlist, WishlistStatus, WishlistWithAntiques,
};
use emporium_db::repositories::WishlistRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::antiques::find_antique;
use crate::middleware::auth::AuthUser;
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /wishlists/toggle/{slug}`.
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub wishlist_id: Option<DbId>,
}

/// The caller's wishlists annotated for one antique.
#[derive(Debug, Serialize)]
pub struct ToggleOptions {
    pub has_wishlists: bool,
    pub wishlists: Vec<WishlistStatus>,
}

/// Outcome of a toggle.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub action: ToggleAction,
    pub message: String,
    /// Whether any of the caller's wishlists now holds the antique.
    pub in_wishlist: bool,
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/wishlists
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
) -> AppResult<Json<DataResponse<Page<Wishlist>>>> {
    let params = ListParams::from_query(raw, WISHLIST_PAGE_SIZE);
    let page =
        WishlistRepo::list_for_user(&state.pool, auth.user_id, params.search(), params.page)
            .await?;
    Ok(Json(DataResponse { data: page }))
}

/// POST /api/v1/wishlists
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateWishlist>,
) -> AppResult<(StatusCode, Json<DataResponse<Wishlist>>)> {
    let title = input.title.trim();
    validate_title(title)?;
    let wishlist = WishlistRepo::create(&state.pool, auth.user_id, title).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: wishlist })))
}

/// GET /api/v1/wishlists/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<WishlistWithAntiques>>> {
    let wishlist = own_wishlist(&state, &auth, id).await?;
    let antiques = WishlistRepo::antiques(&state.pool, wishlist.id).await?;
    Ok(Json(DataResponse {
        data: WishlistWithAntiques { wishlist, antiques },
    }))
}

/// PUT /api/v1/wishlists/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWishlist>,
) -> AppResult<Json<DataResponse<Wishlist>>> {
    let Some(title) = input.title.as_deref().map(str::trim) else {
        return Ok(Json(DataResponse {
            data: own_wishlist(&state, &auth, id).await?,
        }));
    };
    validate_title(title)?;

    let wishlist = WishlistRepo::rename(&state.pool, id, auth.user_id, title)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Wishlist",
            id,
        }))?;
    Ok(Json(DataResponse { data: wishlist }))
}

/// DELETE /api/v1/wishlists/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if WishlistRepo::delete(&state.pool, id, auth.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Wishlist",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Membership
// ---------------------------------------------------------------------------

/// GET /api/v1/wishlists/toggle/{slug}
///
/// Lists the caller's wishlists, each flagged with whether it holds the antique.
pub async fn toggle_options(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<ToggleOptions>>> {
    let antique = find_antique(&state, slug).await?;
    let wishlists = WishlistRepo::statuses(&state.pool, auth.user_id, antique.id).await?;
    Ok(Json(DataResponse {
        data: ToggleOptions {
            has_wishlists: !wishlists.is_empty(),
            wishlists,
        },
    }))
}

/// POST /api/v1/wishlists/toggle/{slug}
///
/// Adds the antique to the chosen wishlist if absent, removes it otherwise.
pub async fn toggle(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<ToggleRequest>,
) -> AppResult<Json<DataResponse<ToggleResponse>>> {
    let wishlist_id = input
        .wishlist_id
        .ok_or_else(|| AppError::BadRequest("wishlist_id is required".into()))?;
    let antique = find_antique(&state, slug).await?;
    let wishlist = own_wishlist(&state, &auth, wishlist_id).await?;

    let action = WishlistRepo::toggle(&state.pool, wishlist.id, antique.id).await?;
    let in_wishlist = WishlistRepo::user_has_antique(&state.pool, auth.user_id, antique.id).await?;
    tracing::debug!(
        wishlist_id = wishlist.id,
        antique_id = antique.id,
        ?action,
        "Wishlist toggled"
    );

    Ok(Json(DataResponse {
        data: ToggleResponse {
            action,
            message: action.message(&wishlist.title),
            in_wishlist,
        },
    }))
}

/// POST /api/v1/wishlists/{id}/add/{slug}
pub async fn add(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, slug)): Path<(DbId, String)>,
) -> AppResult<Json<DataResponse<Vec<WishlistStatus>>>> {
    let antique = find_antique(&state, slug).await?;
    let wishlist = own_wishlist(&state, &auth, id).await?;
    WishlistRepo::add(&state.pool, wishlist.id, antique.id).await?;

    let statuses = WishlistRepo::statuses(&state.pool, auth.user_id, antique.id).await?;
    Ok(Json(DataResponse { data: statuses }))
}

/// POST /api/v1/wishlists/{id}/remove/{slug}
pub async fn remove(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, slug)): Path<(DbId, String)>,
) -> AppResult<Json<DataResponse<Vec<WishlistStatus>>>> {
    let antique = find_antique(&state, slug).await?;
    let wishlist = own_wishlist(&state, &auth, id).await?;
    WishlistRepo::remove(&state.pool, wishlist.id, antique.id).await?;

    let statuses = WishlistRepo::statuses(&state.pool, auth.user_id, antique.id).await?;
    Ok(Json(DataResponse { data: statuses }))
}

async fn own_wishlist(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<Wishlist> {
    WishlistRepo::find_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Wishlist",
            id,
        }))
}
