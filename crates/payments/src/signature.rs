//! Webhook signature verification.
//!
//! The provider sends a header of the form `t=<unix>,v1=<hex>[,v1=<hex>...]`.
//! Each `v1` value is the hex HMAC-SHA256 of `"{t}.{body}"` keyed with the
//! endpoint secret. Comparison is constant-time via [`Mac::verify_slice`].

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::SignatureError;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Maximum accepted age (and clock skew) of a signed timestamp.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Parsed signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    /// Parse `t=...,v1=...` pairs. Unknown schemes (e.g. `v0`) are ignored;
    /// `v1` values that are not valid hex are skipped.
    pub fn parse(header: &str) -> Result<Self, SignatureError> {
        let mut timestamp = None;
        let mut signatures = Vec::new();

        for part in header.split(',') {
            let (key, value) = part
                .trim()
                .split_once('=')
                .ok_or(SignatureError::Malformed)?;
            match key {
                "t" => {
                    timestamp = Some(value.parse::<i64>().map_err(|_| SignatureError::Malformed)?)
                }
                "v1" => {
                    if let Ok(bytes) = hex::decode(value) {
                        signatures.push(bytes);
                    }
                }
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or(SignatureError::MissingTimestamp)?;
        if signatures.is_empty() {
            return Err(SignatureError::NoSignatures);
        }
        Ok(Self {
            timestamp,
            signatures,
        })
    }
}

fn mac_for(secret: &str, timestamp: i64, payload: &[u8]) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac
}

/// Verify `payload` against a signature header.
///
/// `now` is the current unix time in seconds; timestamps further than
/// `tolerance_secs` from it in either direction are rejected.
pub fn verify(
    payload: &[u8],
    header: &str,
    secret: &str,
    now: i64,
    tolerance_secs: i64,
) -> Result<(), SignatureError> {
    let parsed = SignatureHeader::parse(header)?;

    let age_secs = now - parsed.timestamp;
    if age_secs.abs() > tolerance_secs {
        return Err(SignatureError::Expired { age_secs });
    }

    let mac = mac_for(secret, parsed.timestamp, payload);
    let matched = parsed
        .signatures
        .iter()
        .any(|sig| mac.clone().verify_slice(sig).is_ok());
    if matched {
        Ok(())
    } else {
        Err(SignatureError::Mismatch)
    }
}

/// Produce a header value signing `payload` at `timestamp`.
///
/// Used by tests and local tooling to simulate provider deliveries.
pub fn sign(payload: &[u8], secret: &str, timestamp: i64) -> String {
    let signature = mac_for(secret, timestamp, payload).finalize().into_bytes();
    format!("t={timestamp},v1={}", hex::encode(signature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const SECRET: &str = "whsec_test";
    const BODY: &[u8] = br#"{"type":"checkout.session.completed"}"#;
    const NOW: i64 = 1_700_000_000;

    #[test]
    fn signed_payload_verifies() {
        let header = sign(BODY, SECRET, NOW);
        assert!(verify(BODY, &header, SECRET, NOW, DEFAULT_TOLERANCE_SECS).is_ok());
    }

    #[test]
    fn tampered_body_rejected() {
        let header = sign(BODY, SECRET, NOW);
        let tampered = br#"{"type":"checkout.session.completed","x":1}"#;
        assert_matches!(
            verify(tampered, &header, SECRET, NOW, DEFAULT_TOLERANCE_SECS),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn wrong_secret_rejected() {
        let header = sign(BODY, "whsec_other", NOW);
        assert_matches!(
            verify(BODY, &header, SECRET, NOW, DEFAULT_TOLERANCE_SECS),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn stale_timestamp_rejected() {
        let header = sign(BODY, SECRET, NOW - 301);
        assert_matches!(
            verify(BODY, &header, SECRET, NOW, DEFAULT_TOLERANCE_SECS),
            Err(SignatureError::Expired { age_secs: 301 })
        );
        let header = sign(BODY, SECRET, NOW - 300);
        assert!(verify(BODY, &header, SECRET, NOW, DEFAULT_TOLERANCE_SECS).is_ok());
    }

    #[test]
    fn any_matching_v1_accepted() {
        let good = sign(BODY, SECRET, NOW);
        let good_sig = good.split_once(",v1=").unwrap().1;
        let header = format!("t={NOW},v1={},v1={good_sig},v0=abc", "00".repeat(32));
        assert!(verify(BODY, &header, SECRET, NOW, DEFAULT_TOLERANCE_SECS).is_ok());
    }

    #[test]
    fn malformed_headers_rejected() {
        assert_matches!(SignatureHeader::parse("garbage"), Err(SignatureError::Malformed));
        assert_matches!(SignatureHeader::parse("t=abc,v1=00"), Err(SignatureError::Malformed));
        assert_matches!(SignatureHeader::parse("v1=00"), Err(SignatureError::MissingTimestamp));
        assert_matches!(SignatureHeader::parse("t=1"), Err(SignatureError::NoSignatures));
        assert_matches!(SignatureHeader::parse("t=1,v1=zz"), Err(SignatureError::NoSignatures));
    }

    #[test]
    fn undecodable_v1_values_are_skipped() {
        let header = SignatureHeader::parse("t=1,v1=abc,v1=dead01,v1=zz").unwrap();
        assert_eq!(header.signatures, vec![vec![0xde, 0xad, 0x01]]);
    }
}
