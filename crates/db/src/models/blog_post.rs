//! Blog post model and DTOs.

use emporium_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `blog_posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogPost {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub title: String,
    pub slug: String,
    pub status: String,
    pub content: Option<String>,
    pub topic: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlogPost {
    pub title: String,
    pub slug: Option<String>,
    /// Defaults to `draft`.
    pub status: Option<String>,
    pub content: Option<String>,
    pub topic: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBlogPost {
    pub title: Option<String>,
    pub status: Option<String>,
    pub content: Option<String>,
    pub topic: Option<String>,
    pub image_url: Option<String>,
}
