//! Integration tests for wishlists and the wishlist toggle.

mod common;

use axum::http::StatusCode;
use common::{delete_auth, expect_status, get_auth, post_json_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

async fn create_wishlist(pool: &PgPool, token: &str, title: &str) -> i64 {
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/wishlists",
        token,
        json!({ "title": title }),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;
    json["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn toggling_twice_restores_membership(pool: PgPool) {
    let user = common::create_user(&pool, "clara", false).await;
    let antique = common::create_antique(&pool, &user, None, "Tea Caddy", 4000, 1).await;
    let token = common::token_for(&user);
    let wishlist_id = create_wishlist(&pool, &token, "Favourites").await;
    let uri = format!("/api/v1/wishlists/toggle/{}", antique.slug);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        &token,
        json!({ "wishlist_id": wishlist_id }),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["action"], "added");
    assert_eq!(json["data"]["message"], "Added to Favourites");
    assert_eq!(json["data"]["in_wishlist"], true);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        &token,
        json!({ "wishlist_id": wishlist_id }),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["action"], "removed");
    assert_eq!(json["data"]["in_wishlist"], false);

    let response = get_auth(common::build_test_app(pool), &uri, &token).await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["has_wishlists"], true);
    assert_eq!(json["data"]["wishlists"][0]["contains_antique"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn toggle_without_wishlist_id_is_400(pool: PgPool) {
    let user = common::create_user(&pool, "clara", false).await;
    let antique = common::create_antique(&pool, &user, None, "Tea Caddy", 4000, 1).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/wishlists/toggle/{}", antique.slug),
        &common::token_for(&user),
        json!({}),
    )
    .await;
    expect_status(response, StatusCode::BAD_REQUEST).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn toggle_on_someone_elses_wishlist_is_404(pool: PgPool) {
    let owner = common::create_user(&pool, "clara", false).await;
    let intruder = common::create_user(&pool, "dora", false).await;
    let antique = common::create_antique(&pool, &owner, None, "Tea Caddy", 4000, 1).await;
    let wishlist_id = create_wishlist(&pool, &common::token_for(&owner), "Mine").await;

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/wishlists/toggle/{}", antique.slug),
        &common::token_for(&intruder),
        json!({ "wishlist_id": wishlist_id }),
    )
    .await;
    expect_status(response, StatusCode::NOT_FOUND).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn toggle_options_without_wishlists(pool: PgPool) {
    let user = common::create_user(&pool, "clara", false).await;
    let antique = common::create_antique(&pool, &user, None, "Tea Caddy", 4000, 1).await;

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/wishlists/toggle/{}", antique.slug),
        &common::token_for(&user),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["has_wishlists"], false);
    assert_eq!(json["data"]["wishlists"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_and_remove_return_statuses(pool: PgPool) {
    let user = common::create_user(&pool, "clara", false).await;
    let antique = common::create_antique(&pool, &user, None, "Tea Caddy", 4000, 1).await;
    let token = common::token_for(&user);
    let wishlist_id = create_wishlist(&pool, &token, "Favourites").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/wishlists/{wishlist_id}/add/{}", antique.slug),
        &token,
        json!({}),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"][0]["contains_antique"], true);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/wishlists/{wishlist_id}"),
        &token,
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["antiques"][0]["title"], "Tea Caddy");

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/wishlists/{wishlist_id}/remove/{}", antique.slug),
        &token,
        json!({}),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"][0]["contains_antique"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wishlist_crud_is_owner_scoped(pool: PgPool) {
    let owner = common::create_user(&pool, "clara", false).await;
    let other = common::create_user(&pool, "dora", false).await;
    let token = common::token_for(&owner);
    let other_token = common::token_for(&other);
    let wishlist_id = create_wishlist(&pool, &token, "Favourites").await;
    let uri = format!("/api/v1/wishlists/{wishlist_id}");

    let response = get_auth(common::build_test_app(pool.clone()), &uri, &other_token).await;
    expect_status(response, StatusCode::NOT_FOUND).await;

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        &token,
        json!({ "title": "Clocks" }),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["title"], "Clocks");

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/wishlists?search=clo",
        &token,
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["total_count"], 1);
    assert_eq!(json["data"]["page_size"], 10);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/wishlists",
        &other_token,
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["total_count"], 0);

    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &other_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(common::build_test_app(pool), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_reports_in_wishlist_after_toggle(pool: PgPool) {
    let user = common::create_user(&pool, "clara", false).await;
    let antique = common::create_antique(&pool, &user, None, "Tea Caddy", 4000, 1).await;
    let token = common::token_for(&user);
    let wishlist_id = create_wishlist(&pool, &token, "Favourites").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/wishlists/toggle/{}", antique.slug),
        &token,
        json!({ "wishlist_id": wishlist_id }),
    )
    .await;
    expect_status(response, StatusCode::OK).await;

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/antiques/{}", antique.slug),
        &token,
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["in_wishlist"], true);
}
