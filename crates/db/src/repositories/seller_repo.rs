//! Repository for the `sellers` table.

use emporium_core::types::DbId;
use sqlx::PgPool;

use crate::models::seller::{CreateSeller, Seller, SellerStats, SellerSummary, UpdateSeller};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, store_name, slug, description, email, phone_number, notes, \
                       address, is_verified, facebook, instagram, twitter, pinterest, linkedin, \
                       website, created_at, updated_at";

/// Provides CRUD operations for seller profiles.
pub struct SellerRepo;

impl SellerRepo {
    /// Insert a new, unverified seller profile for `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        slug: &str,
        input: &CreateSeller,
    ) -> Result<Seller, sqlx::Error> {
        let query = format!(
            "INSERT INTO sellers
                (user_id, store_name, slug, description, email, phone_number, notes, address,
                 facebook, instagram, twitter, pinterest, linkedin, website)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Seller>(&query)
            .bind(user_id)
            .bind(&input.store_name)
            .bind(slug)
            .bind(&input.description)
            .bind(&input.email)
            .bind(&input.phone_number)
            .bind(&input.notes)
            .bind(&input.address)
            .bind(&input.facebook)
            .bind(&input.instagram)
            .bind(&input.twitter)
            .bind(&input.pinterest)
            .bind(&input.linkedin)
            .bind(&input.website)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Seller>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sellers WHERE id = $1");
        sqlx::query_as::<_, Seller>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Seller>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sellers WHERE user_id = $1");
        sqlx::query_as::<_, Seller>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Seller>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sellers WHERE slug = $1");
        sqlx::query_as::<_, Seller>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Public summary for embedding in listing detail.
    pub async fn summary(pool: &PgPool, id: DbId) -> Result<Option<SellerSummary>, sqlx::Error> {
        sqlx::query_as::<_, SellerSummary>(
            "SELECT id, store_name, slug, is_verified FROM sellers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Update a seller profile. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSeller,
    ) -> Result<Option<Seller>, sqlx::Error> {
        let query = format!(
            "UPDATE sellers SET
                store_name = COALESCE($2, store_name),
                description = COALESCE($3, description),
                email = COALESCE($4, email),
                phone_number = COALESCE($5, phone_number),
                notes = COALESCE($6, notes),
                address = COALESCE($7, address),
                facebook = COALESCE($8, facebook),
                instagram = COALESCE($9, instagram),
                twitter = COALESCE($10, twitter),
                pinterest = COALESCE($11, pinterest),
                linkedin = COALESCE($12, linkedin),
                website = COALESCE($13, website)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Seller>(&query)
            .bind(id)
            .bind(&input.store_name)
            .bind(&input.description)
            .bind(&input.email)
            .bind(&input.phone_number)
            .bind(&input.notes)
            .bind(&input.address)
            .bind(&input.facebook)
            .bind(&input.instagram)
            .bind(&input.twitter)
            .bind(&input.pinterest)
            .bind(&input.linkedin)
            .bind(&input.website)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the verified flag. Returns `None` if no such seller.
    pub async fn set_verified(
        pool: &PgPool,
        id: DbId,
        is_verified: bool,
    ) -> Result<Option<Seller>, sqlx::Error> {
        let query = format!("UPDATE sellers SET is_verified = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Seller>(&query)
            .bind(id)
            .bind(is_verified)
            .fetch_optional(pool)
            .await
    }

    /// Listing counters for the seller dashboard.
    pub async fn stats(pool: &PgPool, id: DbId) -> Result<SellerStats, sqlx::Error> {
        let (total_listings, sold_out): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE is_sold) FROM antiques WHERE seller_id = $1",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(SellerStats {
            total_listings,
            in_stock: total_listings - sold_out,
            sold_out,
        })
    }
}
