//! Decoding of provider webhook events.
//!
//! Only the fields the marketplace acts on are modelled; everything else in
//! the payload is ignored.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::PaymentError;

pub const CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";
pub const INVOICE_FINALIZED: &str = "invoice.finalized";
pub const INVOICE_PAYMENT_SUCCEEDED: &str = "invoice.payment_succeeded";

/// Envelope shared by every webhook event.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: EventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventData {
    pub object: Value,
}

/// The events the marketplace reacts to.
#[derive(Debug, Clone)]
pub enum EventKind {
    CheckoutCompleted(CheckoutSession),
    /// `invoice.finalized` or `invoice.payment_succeeded`.
    Invoice(Invoice),
    Other(String),
}

impl WebhookEvent {
    /// Decode a raw request body.
    pub fn parse(payload: &[u8]) -> Result<Self, PaymentError> {
        serde_json::from_slice(payload).map_err(|e| PaymentError::InvalidPayload(e.to_string()))
    }

    /// Classify the event and decode its object.
    pub fn into_kind(self) -> Result<EventKind, PaymentError> {
        let decode_err = |e: serde_json::Error| PaymentError::InvalidPayload(e.to_string());
        match self.event_type.as_str() {
            CHECKOUT_SESSION_COMPLETED => serde_json::from_value(self.data.object)
                .map(EventKind::CheckoutCompleted)
                .map_err(decode_err),
            INVOICE_FINALIZED | INVOICE_PAYMENT_SUCCEEDED => serde_json::from_value(self.data.object)
                .map(EventKind::Invoice)
                .map_err(decode_err),
            _ => Ok(EventKind::Other(self.event_type)),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerDetails {
    #[serde(default)]
    pub email: Option<String>,
}

/// A completed hosted checkout session.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    #[serde(default)]
    pub payment_intent: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_details: Option<CustomerDetails>,
    /// Provider metadata values are strings, but numbers are tolerated.
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl CheckoutSession {
    /// A metadata value as text. Null and blank values count as absent.
    pub fn metadata_str(&self, key: &str) -> Option<String> {
        let text = match self.metadata.get(key)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    /// Buyer email: `customer_details.email`, falling back to `customer_email`.
    pub fn email(&self) -> Option<&str> {
        self.customer_details
            .as_ref()
            .and_then(|d| d.email.as_deref())
            .or(self.customer_email.as_deref())
            .filter(|e| !e.trim().is_empty())
    }
}

/// An invoice lifecycle event payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Invoice {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub payment_intent: Option<String>,
    #[serde(default)]
    pub invoice_pdf: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn event(event_type: &str, object: Value) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "id": "evt_1",
            "type": event_type,
            "data": { "object": object },
        }))
        .unwrap()
    }

    #[test]
    fn checkout_session_decoded() {
        let body = event(
            CHECKOUT_SESSION_COMPLETED,
            json!({
                "id": "cs_1",
                "payment_intent": "pi_1",
                "customer_details": { "email": "buyer@example.com" },
                "metadata": { "user_id": "7", "antique_id": 12, "quantity": "2" },
            }),
        );
        let kind = WebhookEvent::parse(&body).unwrap().into_kind().unwrap();
        let session = assert_matches!(kind, EventKind::CheckoutCompleted(s) => s);
        assert_eq!(session.id, "cs_1");
        assert_eq!(session.payment_intent.as_deref(), Some("pi_1"));
        assert_eq!(session.metadata_str("user_id").as_deref(), Some("7"));
        assert_eq!(session.metadata_str("antique_id").as_deref(), Some("12"));
        assert_eq!(session.metadata_str("missing"), None);
        assert_eq!(session.email(), Some("buyer@example.com"));
    }

    #[test]
    fn email_falls_back_to_customer_email() {
        let body = event(
            CHECKOUT_SESSION_COMPLETED,
            json!({ "id": "cs_2", "customer_email": "fallback@example.com", "metadata": {} }),
        );
        let kind = WebhookEvent::parse(&body).unwrap().into_kind().unwrap();
        let session = assert_matches!(kind, EventKind::CheckoutCompleted(s) => s);
        assert_eq!(session.email(), Some("fallback@example.com"));
    }

    #[test]
    fn blank_metadata_is_absent() {
        let body = event(
            CHECKOUT_SESSION_COMPLETED,
            json!({ "id": "cs_3", "metadata": { "user_id": "", "quantity": null } }),
        );
        let kind = WebhookEvent::parse(&body).unwrap().into_kind().unwrap();
        let session = assert_matches!(kind, EventKind::CheckoutCompleted(s) => s);
        assert_eq!(session.metadata_str("user_id"), None);
        assert_eq!(session.metadata_str("quantity"), None);
        assert_eq!(session.email(), None);
    }

    #[test]
    fn invoice_events_share_a_kind() {
        for event_type in [INVOICE_FINALIZED, INVOICE_PAYMENT_SUCCEEDED] {
            let body = event(
                event_type,
                json!({ "id": "in_1", "payment_intent": "pi_1", "invoice_pdf": "https://pdf" }),
            );
            let kind = WebhookEvent::parse(&body).unwrap().into_kind().unwrap();
            let invoice = assert_matches!(kind, EventKind::Invoice(i) => i);
            assert_eq!(invoice.invoice_pdf.as_deref(), Some("https://pdf"));
        }
    }

    #[test]
    fn unknown_events_pass_through() {
        let body = event("customer.created", json!({ "id": "cus_1" }));
        let kind = WebhookEvent::parse(&body).unwrap().into_kind().unwrap();
        assert_matches!(kind, EventKind::Other(t) if t == "customer.created");
    }

    #[test]
    fn garbage_is_invalid_payload() {
        assert_matches!(WebhookEvent::parse(b"not json"), Err(PaymentError::InvalidPayload(_)));
        let body = event(CHECKOUT_SESSION_COMPLETED, json!({ "no_id": true }));
        assert_matches!(
            WebhookEvent::parse(&body).unwrap().into_kind(),
            Err(PaymentError::InvalidPayload(_))
        );
    }
}
