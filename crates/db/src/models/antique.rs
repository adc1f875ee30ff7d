//! Antique listing model, its images and DTOs.

use emporium_core::types::{Cents, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::seller::SellerSummary;

/// A row from the `antiques` table.
///
/// `is_sold` is a generated column (`quantity = 0`) and is never written.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Antique {
    pub id: DbId,
    pub user_id: DbId,
    pub seller_id: Option<DbId>,
    pub title: String,
    pub description: String,
    pub content: String,
    pub price_cents: Cents,
    pub quantity: i32,
    pub is_sold: bool,
    pub type_of_antique: String,
    pub slug: String,
    pub short_id: i64,
    pub dimensions: String,
    pub additional_info: String,
    pub payment_product_id: Option<String>,
    pub payment_price_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `antique_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AntiqueImage {
    pub id: DbId,
    pub antique_id: DbId,
    pub image_url: String,
    pub position: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a listing. Slug is generated from the title when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAntique {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    pub price_cents: Cents,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    pub type_of_antique: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub dimensions: String,
    #[serde(default)]
    pub additional_info: String,
    #[serde(default)]
    pub images: Vec<String>,
}

fn default_quantity() -> i32 {
    1
}

/// DTO for updating a listing. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAntique {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub price_cents: Option<Cents>,
    pub quantity: Option<i32>,
    pub type_of_antique: Option<String>,
    pub dimensions: Option<String>,
    pub additional_info: Option<String>,
    /// Image URLs appended after the existing ones.
    #[serde(default)]
    pub add_images: Vec<String>,
    /// Image ids to delete.
    #[serde(default)]
    pub remove_image_ids: Vec<DbId>,
}

/// A listing with its images, as returned by list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct AntiqueWithImages {
    #[serde(flatten)]
    pub antique: Antique,
    pub path: String,
    pub images: Vec<AntiqueImage>,
}

/// Full detail view.
#[derive(Debug, Clone, Serialize)]
pub struct AntiqueDetail {
    #[serde(flatten)]
    pub antique: Antique,
    pub path: String,
    pub images: Vec<AntiqueImage>,
    pub seller: Option<SellerSummary>,
    /// `None` for anonymous callers.
    pub in_wishlist: Option<bool>,
}
