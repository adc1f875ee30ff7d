//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests that do not meet
//! the requirement, so authorization is enforced at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use emporium_core::error::CoreError;
use emporium_db::models::seller::Seller;
use emporium_db::repositories::SellerRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `superuser` role. Rejects with 403 Forbidden otherwise.
pub struct RequireSuperuser(pub AuthUser);

impl FromRequestParts<AppState> for RequireSuperuser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_superuser() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Superuser role required".into(),
            )));
        }
        Ok(RequireSuperuser(user))
    }
}

/// Caller allowed to create and manage listings.
///
/// Customers must own a verified seller profile; superusers always pass and
/// carry their seller profile only if they happen to have one.
pub struct SellerAccess {
    pub user: AuthUser,
    pub seller: Option<Seller>,
}

impl FromRequestParts<AppState> for SellerAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let seller = SellerRepo::find_by_user(&state.pool, user.user_id).await?;

        if user.is_superuser() {
            return Ok(SellerAccess { user, seller });
        }

        match seller {
            Some(seller) if seller.is_verified => Ok(SellerAccess {
                user,
                seller: Some(seller),
            }),
            Some(_) => Err(AppError::Core(CoreError::Forbidden(
                "Your seller account has not been verified yet".into(),
            ))),
            None => Err(AppError::Core(CoreError::Forbidden(
                "A verified seller account is required to manage listings".into(),
            ))),
        }
    }
}
