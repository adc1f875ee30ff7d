//! Provider-agnostic payment gateway interface.

use async_trait::async_trait;

use crate::error::PaymentError;

/// A hosted checkout for a single line item.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    pub product_name: String,
    pub unit_amount_cents: i64,
    pub currency: String,
    pub quantity: i32,
    pub success_url: String,
    pub cancel_url: String,
    pub customer_email: Option<String>,
    /// Echoed back on the completed-session webhook.
    pub metadata: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSessionCreated {
    pub id: String,
    /// Where the buyer is sent to pay.
    pub url: String,
}

/// Catalog registration of a listing (a product plus one price).
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub unit_amount_cents: i64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRegistration {
    pub product_id: String,
    pub price_id: String,
}

/// Outbound operations the marketplace needs from a payment provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSessionCreated, PaymentError>;

    async fn register_product(
        &self,
        request: &ProductRequest,
    ) -> Result<ProductRegistration, PaymentError>;
}
