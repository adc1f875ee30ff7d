//! Seller (vendor storefront) model and DTOs.

use emporium_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sellers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Seller {
    pub id: DbId,
    pub user_id: DbId,
    pub store_name: String,
    pub slug: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub notes: Option<String>,
    pub address: Option<String>,
    pub is_verified: bool,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub pinterest: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public subset embedded in antique detail responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SellerSummary {
    pub id: DbId,
    pub store_name: String,
    pub slug: String,
    pub is_verified: bool,
}

/// DTO for creating the caller's seller profile. Owner and slug are set by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSeller {
    pub store_name: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub notes: Option<String>,
    pub address: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub pinterest: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
}

/// DTO for updating a seller profile. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSeller {
    pub store_name: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub notes: Option<String>,
    pub address: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub pinterest: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
}

/// Seller dashboard: the profile plus stock counters.
#[derive(Debug, Clone, Serialize)]
pub struct SellerStats {
    pub total_listings: i64,
    pub in_stock: i64,
    pub sold_out: i64,
}
