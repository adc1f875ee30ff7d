#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use emporium_api::auth::jwt::{generate_access_token, JwtConfig};
use emporium_api::config::{PaymentConfig, ServerConfig};
use emporium_api::router::build_app_router;
use emporium_api::state::AppState;
use emporium_core::roles::role_for;
use emporium_core::types::DbId;
use emporium_db::models::antique::{Antique, CreateAntique};
use emporium_db::models::seller::{CreateSeller, Seller};
use emporium_db::models::user::{CreateUser, User};
use emporium_db::repositories::{AntiqueRepo, SellerRepo, UserRepo};
use emporium_payments::gateway::{
    CheckoutRequest, CheckoutSessionCreated, PaymentGateway, ProductRegistration, ProductRequest,
};
use emporium_payments::PaymentError;

pub const TEST_JWT_SECRET: &str = "emporium-test-secret";
pub const TEST_WEBHOOK_SECRET: &str = "whsec_test_secret";

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
///
/// Webhooks run in development mode (no signing secret) unless a test
/// overrides `payments.webhook_secret`.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_base_url: "http://testserver".to_string(),
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        payments: PaymentConfig {
            secret_key: Some("sk_test".to_string()),
            webhook_secret: None,
            api_base: "http://127.0.0.1:9".to_string(),
            currency: "aud".to_string(),
            webhook_tolerance_secs: 300,
        },
    }
}

/// Same as [`test_config`] but with webhook signature verification enabled.
pub fn signed_webhook_config() -> ServerConfig {
    let mut config = test_config();
    config.payments.webhook_secret = Some(TEST_WEBHOOK_SECRET.to_string());
    config
}

/// Full application router over `pool` with the default test config and a
/// succeeding [`MockGateway`].
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config(), Arc::new(MockGateway::default()))
}

/// Full application router with an explicit config and gateway.
pub fn build_test_app_with(
    pool: PgPool,
    config: ServerConfig,
    gateway: Arc<MockGateway>,
) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        payments: gateway,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Payment gateway stub
// ---------------------------------------------------------------------------

/// Records outbound calls instead of talking to a provider.
#[derive(Default)]
pub struct MockGateway {
    pub fail: bool,
    pub checkouts: Mutex<Vec<CheckoutRequest>>,
    pub products: Mutex<Vec<ProductRequest>>,
}

impl MockGateway {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSessionCreated, PaymentError> {
        if self.fail {
            return Err(PaymentError::Api {
                status: 400,
                message: "Your card was declined".to_string(),
            });
        }
        let mut checkouts = self.checkouts.lock().unwrap();
        checkouts.push(request.clone());
        let id = format!("cs_test_{}", checkouts.len());
        Ok(CheckoutSessionCreated {
            url: format!("https://checkout.example/pay/{id}"),
            id,
        })
    }

    async fn register_product(
        &self,
        request: &ProductRequest,
    ) -> Result<ProductRegistration, PaymentError> {
        if self.fail {
            return Err(PaymentError::NotConfigured);
        }
        let mut products = self.products.lock().unwrap();
        products.push(request.clone());
        Ok(ProductRegistration {
            product_id: format!("prod_{}", products.len()),
            price_id: format!("price_{}", products.len()),
        })
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user directly. The password hash is never checked by these helpers.
pub async fn create_user(pool: &PgPool, username: &str, is_superuser: bool) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            is_superuser,
        },
    )
    .await
    .expect("user insert should succeed")
}

/// Insert a seller profile for `user`, optionally verified.
pub async fn create_seller(pool: &PgPool, user: &User, verified: bool) -> Seller {
    let seller = SellerRepo::create(
        pool,
        user.id,
        &user.username,
        &CreateSeller {
            store_name: format!("{} Antiques", user.username),
            description: None,
            email: None,
            phone_number: None,
            notes: None,
            address: None,
            facebook: None,
            instagram: None,
            twitter: None,
            pinterest: None,
            linkedin: None,
            website: None,
        },
    )
    .await
    .expect("seller insert should succeed");
    if verified {
        SellerRepo::set_verified(pool, seller.id, true)
            .await
            .expect("verification should succeed")
            .expect("seller should exist")
    } else {
        seller
    }
}

/// Insert a listing owned by `user` without going through the API.
pub async fn create_antique(
    pool: &PgPool,
    user: &User,
    seller_id: Option<DbId>,
    title: &str,
    price_cents: i64,
    quantity: i32,
) -> Antique {
    let input = CreateAntique {
        title: title.to_string(),
        description: format!("A fine {title}"),
        content: String::new(),
        price_cents,
        quantity,
        type_of_antique: "Furniture".to_string(),
        slug: None,
        dimensions: String::new(),
        additional_info: String::new(),
        images: Vec::new(),
    };
    let slug = AntiqueRepo::unique_slug(pool, &emporium_core::slug::generate_slug(title))
        .await
        .expect("slug lookup should succeed");
    let (antique, _) = AntiqueRepo::create(pool, user.id, seller_id, &slug, &input)
        .await
        .expect("antique insert should succeed");
    antique
}

/// Access token for `user` signed with the test secret.
pub fn token_for(user: &User) -> String {
    let config = test_config();
    generate_access_token(user.id, role_for(user.is_superuser), &config.jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

/// POST with a bearer token and no body at all.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// POST a raw body with extra headers (used for webhook deliveries).
pub async fn post_raw(
    app: Router,
    uri: &str,
    body: Vec<u8>,
    headers: &[(&str, String)],
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, value.as_str());
    }
    app.oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status, printing the body on mismatch.
pub async fn expect_status(response: Response<Body>, expected: StatusCode) -> Value {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(
        status,
        expected,
        "unexpected status; body: {}",
        String::from_utf8_lossy(&bytes)
    );
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    }
}
