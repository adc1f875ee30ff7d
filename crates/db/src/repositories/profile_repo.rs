//! Repository for the `profiles` table.

use emporium_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{Profile, UpdateProfile};

const COLUMNS: &str = "user_id, bio, location, birth_date, created_at, updated_at";

pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a profile. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                bio = COALESCE($2, bio),
                location = COALESCE($3, location),
                birth_date = COALESCE($4, birth_date)
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(&input.bio)
            .bind(&input.location)
            .bind(input.birth_date)
            .fetch_optional(pool)
            .await
    }
}
