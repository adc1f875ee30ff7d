//! Repository for the `antique_images` table.

use emporium_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::antique::AntiqueImage;

const COLUMNS: &str = "id, antique_id, image_url, position, created_at";

pub struct AntiqueImageRepo;

impl AntiqueImageRepo {
    /// Images of one antique in display order.
    pub async fn list_for_antique(
        pool: &PgPool,
        antique_id: DbId,
    ) -> Result<Vec<AntiqueImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM antique_images WHERE antique_id = $1 ORDER BY position, id"
        );
        sqlx::query_as::<_, AntiqueImage>(&query)
            .bind(antique_id)
            .fetch_all(pool)
            .await
    }

    /// Images for a batch of antiques in a single query.
    pub async fn list_for_antiques(
        pool: &PgPool,
        antique_ids: &[DbId],
    ) -> Result<Vec<AntiqueImage>, sqlx::Error> {
        if antique_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM antique_images WHERE antique_id = ANY($1) \
             ORDER BY antique_id, position, id"
        );
        sqlx::query_as::<_, AntiqueImage>(&query)
            .bind(antique_ids)
            .fetch_all(pool)
            .await
    }

    pub async fn count_for_antique(pool: &PgPool, antique_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM antique_images WHERE antique_id = $1")
            .bind(antique_id)
            .fetch_one(pool)
            .await
    }

    /// Append images after the current last position. Runs on the caller's transaction.
    pub(crate) async fn append(
        conn: &mut PgConnection,
        antique_id: DbId,
        urls: &[String],
    ) -> Result<Vec<AntiqueImage>, sqlx::Error> {
        let start: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM antique_images WHERE antique_id = $1",
        )
        .bind(antique_id)
        .fetch_one(&mut *conn)
        .await?;

        let query = format!(
            "INSERT INTO antique_images (antique_id, image_url, position)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let mut images = Vec::with_capacity(urls.len());
        for (offset, url) in urls.iter().enumerate() {
            let image = sqlx::query_as::<_, AntiqueImage>(&query)
                .bind(antique_id)
                .bind(url)
                .bind(start + offset as i32)
                .fetch_one(&mut *conn)
                .await?;
            images.push(image);
        }
        Ok(images)
    }

    /// Delete images by id, restricted to one antique. Returns the number removed.
    pub(crate) async fn remove(
        conn: &mut PgConnection,
        antique_id: DbId,
        image_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        if image_ids.is_empty() {
            return Ok(0);
        }
        let result =
            sqlx::query("DELETE FROM antique_images WHERE antique_id = $1 AND id = ANY($2)")
                .bind(antique_id)
                .bind(image_ids)
                .execute(&mut *conn)
                .await?;
        Ok(result.rows_affected())
    }
}
