//! Wishlist model and DTOs.

use emporium_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::antique::Antique;

/// A row from the `wishlists` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Wishlist {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateWishlist {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWishlist {
    pub title: Option<String>,
}

/// A wishlist together with the antiques saved in it.
#[derive(Debug, Clone, Serialize)]
pub struct WishlistWithAntiques {
    #[serde(flatten)]
    pub wishlist: Wishlist,
    pub antiques: Vec<Antique>,
}

/// One of the caller's wishlists and whether it holds a given antique.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WishlistStatus {
    pub id: DbId,
    pub title: String,
    pub contains_antique: bool,
}
