//! Handlers for the `/blog` resource.
//!
//! Anyone may read published posts; drafts and all writes are reserved for
//! superusers.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use emporium_core::blog::{
    is_visible, reading_time_minutes, validate_status, validate_topic, STATUS_DRAFT,
};
use emporium_core::catalog::validate_title;
use emporium_core::error::CoreError;
use emporium_core::pagination::{Page, BLOG_PAGE_SIZE};
use emporium_core::slug::{generate_slug, validate_slug};
use emporium_db::models::blog_post::{BlogPost, CreateBlogPost, UpdateBlogPost};
use emporium_db::repositories::BlogPostRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireSuperuser;
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A post with its estimated reading time.
#[derive(Debug, Serialize)]
pub struct BlogPostDetail {
    #[serde(flatten)]
    pub post: BlogPost,
    pub reading_time_minutes: usize,
}

fn is_superuser(auth: &Option<AuthUser>) -> bool {
    auth.as_ref().is_some_and(AuthUser::is_superuser)
}

/// GET /api/v1/blog
///
/// Query: `search`, `status`, `topic`, `page`. Non-superusers only ever see
/// published posts.
pub async fn list(
    auth: Option<AuthUser>,
    State(state): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
) -> AppResult<Json<DataResponse<Page<BlogPost>>>> {
    let params = ListParams::from_query(raw, BLOG_PAGE_SIZE);
    let page = BlogPostRepo::list(
        &state.pool,
        params.search(),
        &params.raw,
        !is_superuser(&auth),
        params.page,
    )
    .await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/blog/topics
pub async fn topics(
    auth: Option<AuthUser>,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let topics = BlogPostRepo::topics(&state.pool, !is_superuser(&auth)).await?;
    Ok(Json(DataResponse { data: topics }))
}

/// GET /api/v1/blog/{slug}
pub async fn get_by_slug(
    auth: Option<AuthUser>,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<BlogPostDetail>>> {
    let post = find_post(&state, slug).await?;
    if !is_visible(&post.status, is_superuser(&auth)) {
        return Err(AppError::Core(CoreError::Forbidden(
            "This post is not published".into(),
        )));
    }

    let reading_time_minutes = reading_time_minutes(post.content.as_deref());
    Ok(Json(DataResponse {
        data: BlogPostDetail {
            post,
            reading_time_minutes,
        },
    }))
}

/// POST /api/v1/blog
pub async fn create(
    RequireSuperuser(admin): RequireSuperuser,
    State(state): State<AppState>,
    Json(input): Json<CreateBlogPost>,
) -> AppResult<(StatusCode, Json<DataResponse<BlogPost>>)> {
    validate_title(&input.title)?;
    let status = input.status.as_deref().unwrap_or(STATUS_DRAFT);
    validate_status(status)?;
    if let Some(topic) = &input.topic {
        validate_topic(topic)?;
    }

    let slug = match input.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => {
            validate_slug(slug)?;
            slug.to_string()
        }
        None => BlogPostRepo::unique_slug(&state.pool, &generate_slug(&input.title)).await?,
    };

    let post = BlogPostRepo::create(&state.pool, admin.user_id, &slug, status, &input).await?;
    tracing::info!(post_id = post.id, slug = %post.slug, status = %post.status, "Blog post created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// PUT /api/v1/blog/{slug}
pub async fn update(
    RequireSuperuser(_admin): RequireSuperuser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<UpdateBlogPost>,
) -> AppResult<Json<DataResponse<BlogPost>>> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(status) = &input.status {
        validate_status(status)?;
    }
    if let Some(topic) = &input.topic {
        validate_topic(topic)?;
    }

    let post = find_post(&state, slug).await?;
    let updated = BlogPostRepo::update(&state.pool, post.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BlogPost",
            id: post.id,
        }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/blog/{slug}
pub async fn delete(
    RequireSuperuser(_admin): RequireSuperuser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<StatusCode> {
    let post = find_post(&state, slug).await?;
    if BlogPostRepo::delete(&state.pool, post.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "BlogPost",
            id: post.id,
        }))
    }
}

async fn find_post(state: &AppState, slug: String) -> AppResult<BlogPost> {
    BlogPostRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundBySlug {
            entity: "BlogPost",
            slug,
        }))
}
