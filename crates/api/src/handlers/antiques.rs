//! Handlers for the `/antiques` catalog.
//!
//! Browsing is public. Creating and managing listings requires a verified
//! seller profile ([`SellerAccess`]); only the owner of a listing may change
//! it, except superusers who may change any listing.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use emporium_core::catalog::{
    should_register_product, validate_image_count, validate_image_url, validate_price,
    validate_quantity, validate_short_field, validate_title,
};
use emporium_core::error::CoreError;
use emporium_core::pagination::{Page, ANTIQUE_PAGE_SIZE};
use emporium_core::slug::{generate_slug, validate_slug};
use emporium_db::models::antique::{
    Antique, AntiqueDetail, AntiqueWithImages, CreateAntique, UpdateAntique,
};
use emporium_db::repositories::{AntiqueImageRepo, AntiqueRepo, SellerRepo, WishlistRepo};
use emporium_payments::gateway::ProductRequest;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::SellerAccess;
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Public catalog
// ---------------------------------------------------------------------------

/// GET /api/v1/antiques
///
/// Query: `search`, `type`, `show_sold`, `page`. Sold-out listings are
/// hidden unless `show_sold=true`.
pub async fn list(
    State(state): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
) -> AppResult<Json<DataResponse<Page<AntiqueWithImages>>>> {
    let params = ListParams::from_query(raw, ANTIQUE_PAGE_SIZE);
    let page = AntiqueRepo::list(
        &state.pool,
        params.search(),
        &params.raw,
        params.flag("show_sold"),
        params.page,
    )
    .await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/antiques/types
pub async fn types(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let types = AntiqueRepo::distinct_types(&state.pool).await?;
    Ok(Json(DataResponse { data: types }))
}

/// GET /api/v1/antiques/{slug}
///
/// Signed-in callers also get `in_wishlist`.
pub async fn get_by_slug(
    auth: Option<AuthUser>,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<AntiqueDetail>>> {
    let antique = find_antique(&state, slug).await?;
    let images = AntiqueImageRepo::list_for_antique(&state.pool, antique.id).await?;

    let seller = match antique.seller_id {
        Some(seller_id) => SellerRepo::summary(&state.pool, seller_id).await?,
        None => None,
    };
    let in_wishlist = match &auth {
        Some(user) => {
            Some(WishlistRepo::user_has_antique(&state.pool, user.user_id, antique.id).await?)
        }
        None => None,
    };

    let AntiqueWithImages {
        antique,
        path,
        images,
    } = AntiqueRepo::with_images(antique, images);
    Ok(Json(DataResponse {
        data: AntiqueDetail {
            antique,
            path,
            images,
            seller,
            in_wishlist,
        },
    }))
}

// ---------------------------------------------------------------------------
// Seller management
// ---------------------------------------------------------------------------

/// POST /api/v1/antiques
///
/// Creates the listing with its images, then registers it with the payment
/// provider when it has a price and stock. Registration failures are logged
/// and leave the listing unregistered.
pub async fn create(
    access: SellerAccess,
    State(state): State<AppState>,
    Json(input): Json<CreateAntique>,
) -> AppResult<(StatusCode, Json<DataResponse<AntiqueWithImages>>)> {
    validate_title(&input.title)?;
    validate_price(input.price_cents)?;
    validate_quantity(input.quantity)?;
    validate_short_field("Type of antique", &input.type_of_antique, true)?;
    validate_short_field("Dimensions", &input.dimensions, false)?;
    validate_image_count(0, input.images.len())?;
    for url in &input.images {
        validate_image_url(url)?;
    }

    let slug = match input.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => {
            validate_slug(slug)?;
            slug.to_string()
        }
        None => AntiqueRepo::unique_slug(&state.pool, &generate_slug(&input.title)).await?,
    };

    let seller_id = access.seller.as_ref().map(|s| s.id);
    let (antique, images) =
        AntiqueRepo::create(&state.pool, access.user.user_id, seller_id, &slug, &input).await?;
    tracing::info!(
        antique_id = antique.id,
        short_id = antique.short_id,
        user_id = access.user.user_id,
        "Antique listed"
    );

    let antique = register_with_provider(&state, antique).await;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AntiqueRepo::with_images(antique, images),
        }),
    ))
}

/// PUT /api/v1/antiques/{slug}
///
/// Partial update. `remove_image_ids` are removed before `add_images` are
/// appended; the result may not exceed the per-listing image limit.
pub async fn update(
    access: SellerAccess,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<UpdateAntique>,
) -> AppResult<Json<DataResponse<AntiqueWithImages>>> {
    let antique = find_antique(&state, slug).await?;
    ensure_can_manage(&access, &antique)?;

    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(price) = input.price_cents {
        validate_price(price)?;
    }
    if let Some(quantity) = input.quantity {
        validate_quantity(quantity)?;
    }
    if let Some(kind) = &input.type_of_antique {
        validate_short_field("Type of antique", kind, true)?;
    }
    if let Some(dimensions) = &input.dimensions {
        validate_short_field("Dimensions", dimensions, false)?;
    }
    for url in &input.add_images {
        validate_image_url(url)?;
    }

    let current = AntiqueImageRepo::list_for_antique(&state.pool, antique.id).await?;
    let kept = current
        .iter()
        .filter(|img| !input.remove_image_ids.contains(&img.id))
        .count();
    validate_image_count(kept, input.add_images.len())?;

    let updated = AntiqueRepo::update(&state.pool, antique.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Antique",
            id: antique.id,
        }))?;
    let updated = register_with_provider(&state, updated).await;
    let images = AntiqueImageRepo::list_for_antique(&state.pool, updated.id).await?;

    Ok(Json(DataResponse {
        data: AntiqueRepo::with_images(updated, images),
    }))
}

/// DELETE /api/v1/antiques/{slug}
pub async fn delete(
    access: SellerAccess,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<StatusCode> {
    let antique = find_antique(&state, slug).await?;
    ensure_can_manage(&access, &antique)?;

    if AntiqueRepo::delete(&state.pool, antique.id).await? {
        tracing::info!(antique_id = antique.id, user_id = access.user.user_id, "Antique deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Antique",
            id: antique.id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a listing by slug or fail with 404.
pub(crate) async fn find_antique(state: &AppState, slug: String) -> AppResult<Antique> {
    AntiqueRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundBySlug {
            entity: "Antique",
            slug,
        }))
}

fn ensure_can_manage(access: &SellerAccess, antique: &Antique) -> AppResult<()> {
    if access.user.is_superuser() || antique.user_id == access.user.user_id {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "You can only manage your own listings".into(),
        )))
    }
}

/// Register an unregistered, priced, in-stock listing with the payment provider.
///
/// Returns the listing with the provider ids recorded, or unchanged if
/// registration is not needed or fails.
async fn register_with_provider(state: &AppState, antique: Antique) -> Antique {
    if !should_register_product(
        antique.price_cents,
        antique.quantity,
        antique.payment_product_id.is_some(),
    ) {
        return antique;
    }

    let request = ProductRequest {
        name: antique.title.clone(),
        description: Some(antique.description.clone()).filter(|d| !d.trim().is_empty()),
        unit_amount_cents: antique.price_cents,
        currency: state.config.payments.currency.clone(),
    };
    let registration = match state.payments.register_product(&request).await {
        Ok(registration) => registration,
        Err(e) => {
            tracing::warn!(antique_id = antique.id, error = %e, "Product registration failed");
            return antique;
        }
    };

    match AntiqueRepo::set_payment_product(
        &state.pool,
        antique.id,
        &registration.product_id,
        &registration.price_id,
    )
    .await
    {
        Ok(Some(registered)) => registered,
        Ok(None) => antique,
        Err(e) => {
            tracing::error!(antique_id = antique.id, error = %e, "Failed to store product ids");
            antique
        }
    }
}
