//! Bearer token decoding — advisory claims extraction, no signature check.
//!
//! DESIGN
//! ======
//! The client holds no verification key, so decoding only recovers the
//! claims (subject for identity display, fail-fast on locally garbage
//! tokens). The backend's status codes are the actual authorization
//! boundary; do not add signature checking here, it would verify nothing.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use serde_json::Value;

/// Why a token could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The token does not split into header, payload and signature.
    #[error("token has {0} segments, expected 3")]
    SegmentCount(usize),

    /// The payload segment is not valid base64.
    #[error("payload segment is not valid base64: {0}")]
    Base64(String),

    /// The decoded payload is not a JSON object.
    #[error("payload is not a JSON object: {0}")]
    Payload(String),
}

/// Claims recovered from a token payload. Ephemeral — decoded on demand,
/// checked, discarded. Never stored in the session.
#[derive(Debug, Clone)]
pub struct DecodedClaims {
    claims: serde_json::Map<String, Value>,
}

impl DecodedClaims {
    /// The `sub` claim normalized to a string.
    ///
    /// Issuers disagree on whether `sub` is a string or a number; a numeric
    /// subject becomes its canonical decimal form so `"42"` and `42` name
    /// the same identity. Absent or null subjects return `None`.
    #[must_use]
    pub fn subject(&self) -> Option<String> {
        match self.claims.get("sub") {
            Some(Value::String(sub)) => Some(sub.clone()),
            Some(Value::Number(sub)) => Some(sub.to_string()),
            _ => None,
        }
    }

    /// Look up an arbitrary claim.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.claims.get(key)
    }
}

/// Decode a three-segment token's payload into its claims. Pure; performs
/// no signature verification.
///
/// # Errors
///
/// Returns a [`DecodeError`] if the segment count is not 3, the payload
/// segment is not base64, or the decoded bytes are not a JSON object.
pub fn decode(token: &str) -> Result<DecodedClaims, DecodeError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::SegmentCount(segments.len()));
    }

    let bytes = decode_segment(segments[1])?;
    let payload: Value = serde_json::from_slice(&bytes).map_err(|e| DecodeError::Payload(e.to_string()))?;
    match payload {
        Value::Object(claims) => {
            tracing::debug!(?claims, "decoded token payload");
            Ok(DecodedClaims { claims })
        }
        other => Err(DecodeError::Payload(format!("expected object, got {other}"))),
    }
}

// Payload segments are base64url without padding per the token format, but
// some issuers emit the standard alphabet with padding.
fn decode_segment(segment: &str) -> Result<Vec<u8>, DecodeError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .or_else(|_| STANDARD.decode(segment))
        .map_err(|e| DecodeError::Base64(e.to_string()))
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
