//! Repository for the `wishlists` and `wishlist_antiques` tables.

use emporium_core::pagination::{Page, PageRequest};
use emporium_core::types::DbId;
use emporium_core::wishlist::ToggleAction;
use sqlx::PgPool;

use crate::listing::{ListBind, ListQuery, ListSpec};
use crate::models::antique::Antique;
use crate::models::wishlist::{Wishlist, WishlistStatus};

const COLUMNS: &str = "id, user_id, title, created_at, updated_at";

/// A user's wishlists, searchable by title.
const LIST_SPEC: ListSpec = ListSpec {
    table: "wishlists",
    columns: COLUMNS,
    search_fields: &["title"],
    filter_fields: &[],
    ordering: "created_at DESC, id DESC",
};

/// Antique columns qualified with the `a` alias used by membership joins.
const ANTIQUE_COLUMNS: &str = "a.id, a.user_id, a.seller_id, a.title, a.description, a.content, \
                               a.price_cents, a.quantity, a.is_sold, a.type_of_antique, a.slug, \
                               a.short_id, a.dimensions, a.additional_info, a.payment_product_id, \
                               a.payment_price_id, a.created_at, a.updated_at";

/// Provides CRUD and membership operations for wishlists.
pub struct WishlistRepo;

impl WishlistRepo {
    pub async fn create(pool: &PgPool, user_id: DbId, title: &str) -> Result<Wishlist, sqlx::Error> {
        let query = format!(
            "INSERT INTO wishlists (user_id, title) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Wishlist>(&query)
            .bind(user_id)
            .bind(title)
            .fetch_one(pool)
            .await
    }

    /// Find a wishlist owned by `user_id`. Someone else's wishlist yields `None`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Wishlist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM wishlists WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Wishlist>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Paginated wishlists of one user.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        search: Option<&str>,
        request: PageRequest,
    ) -> Result<Page<Wishlist>, sqlx::Error> {
        ListQuery::new(LIST_SPEC)
            .search(search)
            .narrow("user_id", ListBind::Int(user_id))
            .fetch_page(pool, request)
            .await
    }

    pub async fn rename(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        title: &str,
    ) -> Result<Option<Wishlist>, sqlx::Error> {
        let query = format!(
            "UPDATE wishlists SET title = $3 WHERE id = $1 AND user_id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Wishlist>(&query)
            .bind(id)
            .bind(user_id)
            .bind(title)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM wishlists WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Antiques saved in a wishlist, most recently added first.
    pub async fn antiques(pool: &PgPool, wishlist_id: DbId) -> Result<Vec<Antique>, sqlx::Error> {
        let query = format!(
            "SELECT {ANTIQUE_COLUMNS} FROM antiques a
             JOIN wishlist_antiques wa ON wa.antique_id = a.id
             WHERE wa.wishlist_id = $1
             ORDER BY wa.added_at DESC, a.id DESC"
        );
        sqlx::query_as::<_, Antique>(&query)
            .bind(wishlist_id)
            .fetch_all(pool)
            .await
    }

    /// Add the antique if absent, remove it if present, atomically.
    pub async fn toggle(
        pool: &PgPool,
        wishlist_id: DbId,
        antique_id: DbId,
    ) -> Result<ToggleAction, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let removed =
            sqlx::query("DELETE FROM wishlist_antiques WHERE wishlist_id = $1 AND antique_id = $2")
                .bind(wishlist_id)
                .bind(antique_id)
                .execute(&mut *tx)
                .await?
                .rows_affected();

        let action = if removed > 0 {
            ToggleAction::Removed
        } else {
            sqlx::query(
                "INSERT INTO wishlist_antiques (wishlist_id, antique_id) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(wishlist_id)
            .bind(antique_id)
            .execute(&mut *tx)
            .await?;
            ToggleAction::Added
        };

        tx.commit().await?;
        Ok(action)
    }

    /// Add an antique. Returns `false` if it was already present.
    pub async fn add(pool: &PgPool, wishlist_id: DbId, antique_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO wishlist_antiques (wishlist_id, antique_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(wishlist_id)
        .bind(antique_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove an antique. Returns `false` if it was not present.
    pub async fn remove(
        pool: &PgPool,
        wishlist_id: DbId,
        antique_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM wishlist_antiques WHERE wishlist_id = $1 AND antique_id = $2")
                .bind(wishlist_id)
                .bind(antique_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Each of the user's wishlists with whether it contains the antique.
    pub async fn statuses(
        pool: &PgPool,
        user_id: DbId,
        antique_id: DbId,
    ) -> Result<Vec<WishlistStatus>, sqlx::Error> {
        sqlx::query_as::<_, WishlistStatus>(
            "SELECT w.id, w.title,
                    EXISTS (
                        SELECT 1 FROM wishlist_antiques wa
                        WHERE wa.wishlist_id = w.id AND wa.antique_id = $2
                    ) AS contains_antique
             FROM wishlists w
             WHERE w.user_id = $1
             ORDER BY w.created_at, w.id",
        )
        .bind(user_id)
        .bind(antique_id)
        .fetch_all(pool)
        .await
    }

    /// Whether any of the user's wishlists contains the antique.
    pub async fn user_has_antique(
        pool: &PgPool,
        user_id: DbId,
        antique_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM wishlist_antiques wa
                JOIN wishlists w ON w.id = wa.wishlist_id
                WHERE w.user_id = $1 AND wa.antique_id = $2
             )",
        )
        .bind(user_id)
        .bind(antique_id)
        .fetch_one(pool)
        .await
    }
}
