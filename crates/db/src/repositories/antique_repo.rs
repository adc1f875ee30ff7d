//! Repository for the `antiques` table.

use std::collections::HashMap;

use emporium_core::catalog::antique_path;
use emporium_core::pagination::{Page, PageRequest};
use emporium_core::types::DbId;
use sqlx::PgPool;

use crate::listing::{ListBind, ListQuery, ListSpec};
use crate::models::antique::{
    Antique, AntiqueImage, AntiqueWithImages, CreateAntique, UpdateAntique,
};
use crate::repositories::slugs::unique_slug;
use crate::repositories::AntiqueImageRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, seller_id, title, description, content, price_cents, quantity, \
                       is_sold, type_of_antique, slug, short_id, dimensions, additional_info, \
                       payment_product_id, payment_price_id, created_at, updated_at";

/// Public catalog listing: search over title, description and type; `?type=` filter.
const LIST_SPEC: ListSpec = ListSpec {
    table: "antiques",
    columns: COLUMNS,
    search_fields: &["title", "description", "type_of_antique"],
    filter_fields: &[("type", "type_of_antique")],
    ordering: "created_at DESC, id DESC",
};

/// Provides CRUD and catalog queries for antiques.
pub struct AntiqueRepo;

impl AntiqueRepo {
    /// Insert a listing and its images in one transaction.
    ///
    /// `slug` must already be unique (see [`AntiqueRepo::unique_slug`]); a
    /// concurrent insert of the same slug fails on `uq_antiques_slug`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        seller_id: Option<DbId>,
        slug: &str,
        input: &CreateAntique,
    ) -> Result<(Antique, Vec<AntiqueImage>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO antiques
                (user_id, seller_id, title, description, content, price_cents, quantity,
                 type_of_antique, slug, dimensions, additional_info)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        let antique = sqlx::query_as::<_, Antique>(&query)
            .bind(user_id)
            .bind(seller_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content)
            .bind(input.price_cents)
            .bind(input.quantity)
            .bind(&input.type_of_antique)
            .bind(slug)
            .bind(&input.dimensions)
            .bind(&input.additional_info)
            .fetch_one(&mut *tx)
            .await?;

        let images = AntiqueImageRepo::append(&mut *tx, antique.id, &input.images).await?;

        tx.commit().await?;
        Ok((antique, images))
    }

    /// First free slug derived from `base`.
    pub async fn unique_slug(pool: &PgPool, base: &str) -> Result<String, sqlx::Error> {
        unique_slug(pool, "antiques", base).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Antique>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM antiques WHERE id = $1");
        sqlx::query_as::<_, Antique>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Antique>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM antiques WHERE slug = $1");
        sqlx::query_as::<_, Antique>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Paginated catalog. Sold-out listings are hidden unless `show_sold`.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        filters: &HashMap<String, String>,
        show_sold: bool,
        request: PageRequest,
    ) -> Result<Page<AntiqueWithImages>, sqlx::Error> {
        let mut query = ListQuery::new(LIST_SPEC).search(search).filters(filters);
        if !show_sold {
            query = query.narrow("is_sold", ListBind::Bool(false));
        }
        let page = query.fetch_page::<Antique>(pool, request).await?;

        let ids: Vec<DbId> = page.items.iter().map(|a| a.id).collect();
        let mut images = Self::group_images(AntiqueImageRepo::list_for_antiques(pool, &ids).await?);
        Ok(page.map(|antique| {
            let images = images.remove(&antique.id).unwrap_or_default();
            Self::with_images(antique, images)
        }))
    }

    /// Every listing belonging to a seller, newest first.
    pub async fn list_for_seller(
        pool: &PgPool,
        seller_id: DbId,
    ) -> Result<Vec<Antique>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM antiques WHERE seller_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Antique>(&query)
            .bind(seller_id)
            .fetch_all(pool)
            .await
    }

    /// Distinct antique types, alphabetically.
    pub async fn distinct_types(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT type_of_antique FROM antiques \
             WHERE type_of_antique <> '' ORDER BY type_of_antique",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a listing and its images in one transaction.
    ///
    /// Images listed in `remove_image_ids` are deleted before `add_images`
    /// are appended. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAntique,
    ) -> Result<Option<Antique>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE antiques SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                content = COALESCE($4, content),
                price_cents = COALESCE($5, price_cents),
                quantity = COALESCE($6, quantity),
                type_of_antique = COALESCE($7, type_of_antique),
                dimensions = COALESCE($8, dimensions),
                additional_info = COALESCE($9, additional_info)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let antique = sqlx::query_as::<_, Antique>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content)
            .bind(input.price_cents)
            .bind(input.quantity)
            .bind(&input.type_of_antique)
            .bind(&input.dimensions)
            .bind(&input.additional_info)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(antique) = antique else {
            return Ok(None);
        };

        AntiqueImageRepo::remove(&mut *tx, id, &input.remove_image_ids).await?;
        AntiqueImageRepo::append(&mut *tx, id, &input.add_images).await?;

        tx.commit().await?;
        Ok(Some(antique))
    }

    /// Record the payment provider's product and price for a listing.
    pub async fn set_payment_product(
        pool: &PgPool,
        id: DbId,
        product_id: &str,
        price_id: &str,
    ) -> Result<Option<Antique>, sqlx::Error> {
        let query = format!(
            "UPDATE antiques SET payment_product_id = $2, payment_price_id = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Antique>(&query)
            .bind(id)
            .bind(product_id)
            .bind(price_id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a listing (images and wishlist entries cascade).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM antiques WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub fn with_images(antique: Antique, images: Vec<AntiqueImage>) -> AntiqueWithImages {
        let path = antique_path(antique.short_id, &antique.slug);
        AntiqueWithImages {
            antique,
            path,
            images,
        }
    }

    fn group_images(images: Vec<AntiqueImage>) -> HashMap<DbId, Vec<AntiqueImage>> {
        let mut grouped: HashMap<DbId, Vec<AntiqueImage>> = HashMap::new();
        for image in images {
            grouped.entry(image.antique_id).or_default().push(image);
        }
        grouped
    }
}
