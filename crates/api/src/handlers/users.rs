//! Handlers for the signed-in user's own account and profile.

use axum::extract::State;
use axum::Json;
use emporium_core::error::CoreError;
use emporium_db::models::profile::{Profile, UpdateProfile};
use emporium_db::repositories::{ProfileRepo, SellerRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::auth::UserInfo;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Longest accepted profile location.
const MAX_LOCATION_LENGTH: usize = 30;

/// Account summary returned by `GET /users/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    #[serde(flatten)]
    pub user: UserInfo,
    pub is_seller: bool,
}

/// GET /api/v1/users/me
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<MeResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    let is_seller = SellerRepo::find_by_user(&state.pool, user.id)
        .await?
        .is_some();

    Ok(Json(DataResponse {
        data: MeResponse {
            user: UserInfo::from(&user),
            is_seller,
        },
    }))
}

/// GET /api/v1/users/me/profile
pub async fn get_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = ProfileRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: auth.user_id,
        }))?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/users/me/profile
pub async fn update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<Profile>>> {
    if let Some(location) = &input.location {
        if location.chars().count() > MAX_LOCATION_LENGTH {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Location must be at most {MAX_LOCATION_LENGTH} characters"
            ))));
        }
    }

    let profile = ProfileRepo::update(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: auth.user_id,
        }))?;
    Ok(Json(DataResponse { data: profile }))
}
