//! Integration tests for the antique catalog and seller endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    delete_auth, expect_status, get, get_auth, post_json_auth, put_json_auth, MockGateway,
};
use serde_json::json;
use sqlx::PgPool;

fn listing(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "description": "Carved oak",
        "price_cents": 125_000,
        "quantity": 2,
        "type_of_antique": "Furniture",
        "images": ["https://img.example/1.jpg", "https://img.example/2.jpg"],
    })
}

// ---------------------------------------------------------------------------
// Listing management
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unverified_seller_cannot_list(pool: PgPool) {
    let user = common::create_user(&pool, "arthur", false).await;
    common::create_seller(&pool, &user, false).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/antiques",
        &common::token_for(&user),
        listing("Oak Chest"),
    )
    .await;
    let json = expect_status(response, StatusCode::FORBIDDEN).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn customer_without_seller_profile_cannot_list(pool: PgPool) {
    let user = common::create_user(&pool, "arthur", false).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/antiques",
        &common::token_for(&user),
        listing("Oak Chest"),
    )
    .await;
    expect_status(response, StatusCode::FORBIDDEN).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn verified_seller_creates_listing_and_registers_product(pool: PgPool) {
    let user = common::create_user(&pool, "arthur", false).await;
    let seller = common::create_seller(&pool, &user, true).await;
    let gateway = Arc::new(MockGateway::default());

    let app = common::build_test_app_with(pool, common::test_config(), gateway.clone());
    let response = post_json_auth(
        app,
        "/api/v1/antiques",
        &common::token_for(&user),
        listing("Oak Chest"),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;

    let data = &json["data"];
    assert_eq!(data["slug"], "oak-chest");
    assert_eq!(data["short_id"], 10000);
    assert_eq!(data["path"], "/antiques/10000-oak-chest/");
    assert_eq!(data["seller_id"], seller.id);
    assert_eq!(data["is_sold"], false);
    assert_eq!(data["images"].as_array().unwrap().len(), 2);
    assert_eq!(data["payment_product_id"], "prod_1");
    assert_eq!(data["payment_price_id"], "price_1");

    let products = gateway.products.lock().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].unit_amount_cents, 125_000);
    assert_eq!(products[0].currency, "aud");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_registration_failure_does_not_fail_listing(pool: PgPool) {
    let user = common::create_user(&pool, "arthur", false).await;
    common::create_seller(&pool, &user, true).await;

    let app = common::build_test_app_with(
        pool,
        common::test_config(),
        Arc::new(MockGateway::failing()),
    );
    let response = post_json_auth(
        app,
        "/api/v1/antiques",
        &common::token_for(&user),
        listing("Oak Chest"),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;
    assert!(json["data"]["payment_product_id"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn zero_price_listing_is_not_registered(pool: PgPool) {
    let user = common::create_user(&pool, "arthur", false).await;
    common::create_seller(&pool, &user, true).await;
    let gateway = Arc::new(MockGateway::default());

    let mut body = listing("Free Crate");
    body["price_cents"] = json!(0);
    let app = common::build_test_app_with(pool, common::test_config(), gateway.clone());
    let response = post_json_auth(app, "/api/v1/antiques", &common::token_for(&user), body).await;
    expect_status(response, StatusCode::CREATED).await;

    assert!(gateway.products.lock().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn too_many_images_is_rejected(pool: PgPool) {
    let user = common::create_user(&pool, "arthur", false).await;
    common::create_seller(&pool, &user, true).await;

    let mut body = listing("Oak Chest");
    body["images"] = json!((0..11)
        .map(|i| format!("https://img.example/{i}.jpg"))
        .collect::<Vec<_>>());
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/antiques",
        &common::token_for(&user),
        body,
    )
    .await;
    expect_status(response, StatusCode::BAD_REQUEST).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_titles_get_suffixed_slugs(pool: PgPool) {
    let user = common::create_user(&pool, "arthur", false).await;
    common::create_seller(&pool, &user, true).await;
    let token = common::token_for(&user);

    for expected in ["oak-chest", "oak-chest-1"] {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/antiques",
            &token,
            listing("Oak Chest"),
        )
        .await;
        let json = expect_status(response, StatusCode::CREATED).await;
        assert_eq!(json["data"]["slug"], expected);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_by_non_owner_is_forbidden(pool: PgPool) {
    let owner = common::create_user(&pool, "arthur", false).await;
    let owner_seller = common::create_seller(&pool, &owner, true).await;
    let other = common::create_user(&pool, "beatrice", false).await;
    common::create_seller(&pool, &other, true).await;
    let antique =
        common::create_antique(&pool, &owner, Some(owner_seller.id), "Oak Chest", 5000, 1).await;

    let response = put_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/antiques/{}", antique.slug),
        &common::token_for(&other),
        json!({ "title": "Stolen Chest" }),
    )
    .await;
    expect_status(response, StatusCode::FORBIDDEN).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn superuser_may_update_any_listing(pool: PgPool) {
    let owner = common::create_user(&pool, "arthur", false).await;
    let seller = common::create_seller(&pool, &owner, true).await;
    let admin = common::create_user(&pool, "admin", true).await;
    let antique =
        common::create_antique(&pool, &owner, Some(seller.id), "Oak Chest", 5000, 1).await;

    let response = put_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/antiques/{}", antique.slug),
        &common::token_for(&admin),
        json!({ "quantity": 0 }),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["quantity"], 0);
    assert_eq!(json["data"]["is_sold"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_replaces_images(pool: PgPool) {
    let user = common::create_user(&pool, "arthur", false).await;
    common::create_seller(&pool, &user, true).await;
    let token = common::token_for(&user);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/antiques",
        &token,
        listing("Oak Chest"),
    )
    .await;
    let created = expect_status(response, StatusCode::CREATED).await;
    let first_image = created["data"]["images"][0]["id"].as_i64().unwrap();

    let response = put_json_auth(
        common::build_test_app(pool),
        "/api/v1/antiques/oak-chest",
        &token,
        json!({
            "remove_image_ids": [first_image],
            "add_images": ["https://img.example/3.jpg"],
        }),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    let urls: Vec<&str> = json["data"]["images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|img| img["image_url"].as_str().unwrap())
        .collect();
    assert_eq!(
        urls,
        vec!["https://img.example/2.jpg", "https://img.example/3.jpg"]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn owner_deletes_listing(pool: PgPool) {
    let user = common::create_user(&pool, "arthur", false).await;
    let seller = common::create_seller(&pool, &user, true).await;
    let antique = common::create_antique(&pool, &user, Some(seller.id), "Oak Chest", 5000, 1).await;
    let token = common::token_for(&user);
    let uri = format!("/api/v1/antiques/{}", antique.slug);

    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Public catalog
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_hides_sold_items_unless_asked(pool: PgPool) {
    let user = common::create_user(&pool, "arthur", false).await;
    common::create_antique(&pool, &user, None, "Mantel Clock", 9000, 1).await;
    common::create_antique(&pool, &user, None, "Sold Clock", 9000, 0).await;

    let response = get(common::build_test_app(pool.clone()), "/api/v1/antiques").await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["total_count"], 1);
    assert_eq!(json["data"]["items"][0]["title"], "Mantel Clock");
    assert_eq!(json["data"]["page_size"], 20);

    let response = get(
        common::build_test_app(pool),
        "/api/v1/antiques?show_sold=true&search=clock",
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["total_count"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn huge_page_number_returns_an_empty_page(pool: PgPool) {
    let user = common::create_user(&pool, "arthur", false).await;
    common::create_antique(&pool, &user, None, "Mantel Clock", 9000, 1).await;

    let response = get(
        common::build_test_app(pool),
        "/api/v1/antiques?page=9223372036854775807",
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["total_count"], 1);
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 0);
    assert_eq!(json["data"]["page"], i64::MAX / 20);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn types_are_distinct_and_sorted(pool: PgPool) {
    let user = common::create_user(&pool, "arthur", false).await;
    common::create_antique(&pool, &user, None, "Oak Chest", 9000, 1).await;
    common::create_antique(&pool, &user, None, "Pine Chest", 9000, 1).await;

    let response = get(common::build_test_app(pool), "/api/v1/antiques/types").await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"], json!(["Furniture"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_includes_seller_and_wishlist_flag(pool: PgPool) {
    let user = common::create_user(&pool, "arthur", false).await;
    let seller = common::create_seller(&pool, &user, true).await;
    let antique =
        common::create_antique(&pool, &user, Some(seller.id), "Oak Chest", 5000, 1).await;
    let uri = format!("/api/v1/antiques/{}", antique.slug);

    let response = get(common::build_test_app(pool.clone()), &uri).await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["seller"]["store_name"], "arthur Antiques");
    assert!(json["data"]["in_wishlist"].is_null());

    let response = get_auth(common::build_test_app(pool), &uri, &common::token_for(&user)).await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["in_wishlist"], false);
}

// ---------------------------------------------------------------------------
// Sellers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn seller_lifecycle(pool: PgPool) {
    let user = common::create_user(&pool, "arthur", false).await;
    let admin = common::create_user(&pool, "admin", true).await;
    let token = common::token_for(&user);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/sellers",
        &token,
        json!({ "store_name": "Arthur's Attic", "website": "https://attic.example" }),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;
    assert_eq!(json["data"]["is_verified"], false);
    assert_eq!(json["data"]["slug"], "arthur");
    let seller_id = json["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/sellers",
        &token,
        json!({ "store_name": "Second Shop" }),
    )
    .await;
    expect_status(response, StatusCode::CONFLICT).await;

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/sellers/{seller_id}/verification"),
        &token,
        json!({ "is_verified": true }),
    )
    .await;
    expect_status(response, StatusCode::FORBIDDEN).await;

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/sellers/{seller_id}/verification"),
        &common::token_for(&admin),
        json!({ "is_verified": true }),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["is_verified"], true);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/antiques",
        &token,
        listing("Oak Chest"),
    )
    .await;
    expect_status(response, StatusCode::CREATED).await;

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/sellers/me/dashboard",
        &token,
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["stats"]["total_listings"], 1);
    assert_eq!(json["data"]["listings"][0]["images"].as_array().unwrap().len(), 2);

    let response = get(common::build_test_app(pool), "/api/v1/sellers/arthur").await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["store_name"], "Arthur's Attic");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_seller_profile_is_404(pool: PgPool) {
    let user = common::create_user(&pool, "arthur", false).await;
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/sellers/me",
        &common::token_for(&user),
    )
    .await;
    expect_status(response, StatusCode::NOT_FOUND).await;
}
