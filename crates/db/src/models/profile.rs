//! Per-user profile (bio, location, birth date).

use chrono::NaiveDate;
use emporium_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `profiles` table. Created alongside its user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub user_id: DbId,
    pub bio: String,
    pub location: String,
    pub birth_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfile {
    pub bio: Option<String>,
    pub location: Option<String>,
    pub birth_date: Option<NaiveDate>,
}
