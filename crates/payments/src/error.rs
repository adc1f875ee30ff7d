//! Error types for the payments crate.

/// Why a webhook signature was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("Signature header is malformed")]
    Malformed,

    #[error("Signature header has no timestamp")]
    MissingTimestamp,

    #[error("Signature header has no v1 signatures")]
    NoSignatures,

    #[error("Signature timestamp is outside the tolerance window ({age_secs}s old)")]
    Expired { age_secs: i64 },

    #[error("No signature matches the payload")]
    Mismatch,
}

/// Errors from talking to the payment provider or decoding its payloads.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Payment provider error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A webhook or API payload could not be decoded.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// No secret key is configured, so outbound calls are impossible.
    #[error("Payment provider is not configured")]
    NotConfigured,
}

impl PaymentError {
    /// Message suitable for showing to the buyer.
    pub fn user_message(&self) -> String {
        match self {
            PaymentError::Api { message, .. } => message.clone(),
            PaymentError::NotConfigured => "Payments are currently unavailable".to_string(),
            _ => "The payment provider could not be reached".to_string(),
        }
    }
}
