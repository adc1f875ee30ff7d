//! Payment-provider integration.
//!
//! - [`signature`]: webhook signature verification (HMAC-SHA256 over `"{t}.{body}"`)
//! - [`event`]: typed decoding of the webhook events the marketplace handles
//! - [`gateway`]: the [`gateway::PaymentGateway`] trait used by the API
//! - [`stripe`]: the Stripe REST implementation of that trait

pub mod error;
pub mod event;
pub mod gateway;
pub mod signature;
pub mod stripe;

pub use error::{PaymentError, SignatureError};
pub use gateway::PaymentGateway;
