//! Repository for the `blog_posts` table.

use std::collections::HashMap;

use emporium_core::blog::STATUS_PUBLISHED;
use emporium_core::pagination::{Page, PageRequest};
use emporium_core::types::DbId;
use sqlx::PgPool;

use crate::listing::{ListBind, ListQuery, ListSpec};
use crate::models::blog_post::{BlogPost, CreateBlogPost, UpdateBlogPost};
use crate::repositories::slugs::unique_slug;

const COLUMNS: &str =
    "id, user_id, title, slug, status, content, topic, image_url, created_at, updated_at";

/// Blog listing: search over title, content and topic; `?status=` and `?topic=` filters.
const LIST_SPEC: ListSpec = ListSpec {
    table: "blog_posts",
    columns: COLUMNS,
    search_fields: &["title", "content", "topic"],
    filter_fields: &[("status", "status"), ("topic", "topic")],
    ordering: "created_at DESC, id DESC",
};

pub struct BlogPostRepo;

impl BlogPostRepo {
    /// Insert a post. `slug` must already be unique and `status` valid.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        slug: &str,
        status: &str,
        input: &CreateBlogPost,
    ) -> Result<BlogPost, sqlx::Error> {
        let query = format!(
            "INSERT INTO blog_posts (user_id, title, slug, status, content, topic, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(slug)
            .bind(status)
            .bind(&input.content)
            .bind(&input.topic)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    pub async fn unique_slug(pool: &PgPool, base: &str) -> Result<String, sqlx::Error> {
        unique_slug(pool, "blog_posts", base).await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE slug = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Paginated listing; `published_only` hides drafts regardless of filters.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        filters: &HashMap<String, String>,
        published_only: bool,
        request: PageRequest,
    ) -> Result<Page<BlogPost>, sqlx::Error> {
        let mut query = ListQuery::new(LIST_SPEC).search(search).filters(filters);
        if published_only {
            query = query.narrow("status", ListBind::Text(STATUS_PUBLISHED.to_string()));
        }
        query.fetch_page(pool, request).await
    }

    /// Distinct non-empty topics, alphabetically.
    pub async fn topics(pool: &PgPool, published_only: bool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT topic FROM blog_posts
             WHERE topic IS NOT NULL AND topic <> '' AND (NOT $1 OR status = $2)
             ORDER BY topic",
        )
        .bind(published_only)
        .bind(STATUS_PUBLISHED)
        .fetch_all(pool)
        .await
    }

    /// Update a post. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlogPost,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET
                title = COALESCE($2, title),
                status = COALESCE($3, status),
                content = COALESCE($4, content),
                topic = COALESCE($5, topic),
                image_url = COALESCE($6, image_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.status)
            .bind(&input.content)
            .bind(&input.topic)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
