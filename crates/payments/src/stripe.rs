//! Stripe REST client.
//!
//! Requests are form-encoded with bracketed keys for nested fields
//! (`line_items[0][price_data][currency]=aud`) and authenticated with the
//! secret key as a bearer token.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::PaymentError;
use crate::gateway::{
    CheckoutRequest, CheckoutSessionCreated, PaymentGateway, ProductRegistration, ProductRequest,
};

/// Default API origin.
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// HTTP client for the Stripe API.
pub struct StripeClient {
    client: reqwest::Client,
    api_base: String,
    secret_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IdResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

type Form = Vec<(String, String)>;

impl StripeClient {
    /// Create a client. Without a secret key every call fails with
    /// [`PaymentError::NotConfigured`].
    pub fn new(api_base: String, secret_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            secret_key,
        }
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        form: &Form,
    ) -> Result<T, PaymentError> {
        let key = self.secret_key.as_deref().ok_or(PaymentError::NotConfigured)?;
        let response = self
            .client
            .post(format!("{}{path}", self.api_base))
            .bearer_auth(key)
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(response.json::<T>().await?)
    }
}

/// Extract `error.message` from a Stripe error body, else return the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error.message)
        .unwrap_or_else(|| body.to_string())
}

fn checkout_form(request: &CheckoutRequest) -> Form {
    let mut form: Form = vec![
        ("mode".into(), "payment".into()),
        ("payment_method_types[0]".into(), "card".into()),
        (
            "line_items[0][price_data][currency]".into(),
            request.currency.clone(),
        ),
        (
            "line_items[0][price_data][product_data][name]".into(),
            request.product_name.clone(),
        ),
        (
            "line_items[0][price_data][unit_amount]".into(),
            request.unit_amount_cents.to_string(),
        ),
        ("line_items[0][quantity]".into(), request.quantity.to_string()),
        ("success_url".into(), request.success_url.clone()),
        ("cancel_url".into(), request.cancel_url.clone()),
    ];
    if let Some(email) = &request.customer_email {
        form.push(("customer_email".into(), email.clone()));
    }
    for (key, value) in &request.metadata {
        form.push((format!("metadata[{key}]"), value.clone()));
    }
    form
}

fn product_form(request: &ProductRequest) -> Form {
    let mut form: Form = vec![("name".into(), request.name.clone())];
    if let Some(description) = request.description.as_ref().filter(|d| !d.is_empty()) {
        form.push(("description".into(), description.clone()));
    }
    form
}

fn price_form(product_id: &str, request: &ProductRequest) -> Form {
    vec![
        ("product".into(), product_id.to_string()),
        ("unit_amount".into(), request.unit_amount_cents.to_string()),
        ("currency".into(), request.currency.clone()),
    ]
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSessionCreated, PaymentError> {
        let session: SessionResponse =
            self.post("/v1/checkout/sessions", &checkout_form(request)).await?;
        let url = session.url.ok_or_else(|| {
            PaymentError::InvalidPayload("checkout session has no url".to_string())
        })?;
        tracing::debug!(session_id = %session.id, "Checkout session created");
        Ok(CheckoutSessionCreated {
            id: session.id,
            url,
        })
    }

    async fn register_product(
        &self,
        request: &ProductRequest,
    ) -> Result<ProductRegistration, PaymentError> {
        let product: IdResponse = self.post("/v1/products", &product_form(request)).await?;
        let price: IdResponse = self
            .post("/v1/prices", &price_form(&product.id, request))
            .await?;
        Ok(ProductRegistration {
            product_id: product.id,
            price_id: price.id,
        })
    }
}
