//! Handlers for seller profiles, the seller dashboard and verification.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use emporium_core::error::CoreError;
use emporium_core::sellers::{validate_email, validate_link, validate_store_name};
use emporium_core::slug::seller_slug;
use emporium_core::types::DbId;
use emporium_db::models::antique::{AntiqueImage, AntiqueWithImages};
use emporium_db::models::seller::{CreateSeller, Seller, SellerStats, UpdateSeller};
use emporium_db::repositories::{AntiqueImageRepo, AntiqueRepo, SellerRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireSuperuser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PUT /admin/sellers/{id}/verification`.
#[derive(Debug, Deserialize)]
pub struct VerificationRequest {
    pub is_verified: bool,
}

/// The seller dashboard: profile, counters and every listing.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub seller: Seller,
    pub stats: SellerStats,
    pub listings: Vec<AntiqueWithImages>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/sellers
///
/// Create the caller's seller profile. New profiles start unverified.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSeller>,
) -> AppResult<(StatusCode, Json<DataResponse<Seller>>)> {
    validate_store_name(&input.store_name)?;
    validate_contact(
        input.email.as_deref(),
        &[
            ("facebook", input.facebook.as_deref()),
            ("instagram", input.instagram.as_deref()),
            ("twitter", input.twitter.as_deref()),
            ("pinterest", input.pinterest.as_deref()),
            ("linkedin", input.linkedin.as_deref()),
            ("website", input.website.as_deref()),
        ],
    )?;

    if SellerRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "You already have a seller profile".into(),
        )));
    }

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let seller =
        SellerRepo::create(&state.pool, user.id, &seller_slug(&user.username), &input).await?;
    tracing::info!(seller_id = seller.id, user_id = user.id, "Seller profile created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: seller })))
}

/// GET /api/v1/sellers/me
pub async fn get_mine(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Seller>>> {
    let seller = own_seller(&state, &auth).await?;
    Ok(Json(DataResponse { data: seller }))
}

/// PUT /api/v1/sellers/me
pub async fn update_mine(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateSeller>,
) -> AppResult<Json<DataResponse<Seller>>> {
    if let Some(name) = &input.store_name {
        validate_store_name(name)?;
    }
    validate_contact(
        input.email.as_deref(),
        &[
            ("facebook", input.facebook.as_deref()),
            ("instagram", input.instagram.as_deref()),
            ("twitter", input.twitter.as_deref()),
            ("pinterest", input.pinterest.as_deref()),
            ("linkedin", input.linkedin.as_deref()),
            ("website", input.website.as_deref()),
        ],
    )?;

    let seller = own_seller(&state, &auth).await?;
    let updated = SellerRepo::update(&state.pool, seller.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Seller",
            id: seller.id,
        }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// GET /api/v1/sellers/me/dashboard
pub async fn dashboard(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardResponse>>> {
    let seller = own_seller(&state, &auth).await?;

    let antiques = AntiqueRepo::list_for_seller(&state.pool, seller.id).await?;
    let ids: Vec<DbId> = antiques.iter().map(|a| a.id).collect();
    let mut images: HashMap<DbId, Vec<AntiqueImage>> = HashMap::new();
    for image in AntiqueImageRepo::list_for_antiques(&state.pool, &ids).await? {
        images.entry(image.antique_id).or_default().push(image);
    }
    let listings = antiques
        .into_iter()
        .map(|antique| {
            let own = images.remove(&antique.id).unwrap_or_default();
            AntiqueRepo::with_images(antique, own)
        })
        .collect();
    let stats = SellerRepo::stats(&state.pool, seller.id).await?;

    Ok(Json(DataResponse {
        data: DashboardResponse {
            seller,
            stats,
            listings,
        },
    }))
}

/// GET /api/v1/sellers/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Seller>>> {
    let seller = SellerRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundBySlug {
            entity: "Seller",
            slug,
        }))?;
    Ok(Json(DataResponse { data: seller }))
}

/// PUT /api/v1/admin/sellers/{id}/verification
///
/// Superuser only. Grants or revokes permission to list antiques.
pub async fn set_verification(
    RequireSuperuser(admin): RequireSuperuser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<VerificationRequest>,
) -> AppResult<Json<DataResponse<Seller>>> {
    let seller = SellerRepo::set_verified(&state.pool, id, input.is_verified)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Seller",
            id,
        }))?;

    tracing::info!(
        seller_id = seller.id,
        is_verified = seller.is_verified,
        admin_id = admin.user_id,
        "Seller verification changed"
    );
    Ok(Json(DataResponse { data: seller }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn own_seller(state: &AppState, auth: &AuthUser) -> AppResult<Seller> {
    SellerRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("You do not have a seller profile".into()))
}

fn validate_contact(email: Option<&str>, links: &[(&str, Option<&str>)]) -> AppResult<()> {
    if let Some(email) = email.filter(|e| !e.is_empty()) {
        validate_email(email)?;
    }
    for (field, url) in links {
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            validate_link(field, url)?;
        }
    }
    Ok(())
}
