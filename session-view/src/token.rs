//! Compact token payload decoding
//!
//! Tokens are `header.payload.signature`, with the payload a base64url JSON
//! object. Only the payload is read. The signature is NOT verified: the claims
//! are taken at face value, and callers must not treat a decoded token as
//! authentic.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::Serialize;
use serde_json::{Map, Value};

/// base64url, with or without trailing `=` padding
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Claims carried in a token payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenClaims {
    /// Expires at (Unix timestamp, seconds)
    pub exp: i64,
    /// Subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// User email, when the issuer includes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Issued at (Unix timestamp, seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Every other claim, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Why a token yielded no usable expiration
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Token is empty")]
    Empty,

    #[error("Expected 3 dot-separated segments, found {0}")]
    SegmentCount(usize),

    #[error("Payload is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Payload is not a JSON object")]
    NotAnObject,

    #[error("Payload has no exp claim")]
    MissingExp,

    #[error("exp claim is not a number")]
    NonNumericExp,
}

impl DecodeError {
    /// Short stable name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::Empty => "empty",
            DecodeError::SegmentCount(_) => "segment_count",
            DecodeError::Base64(_) => "base64",
            DecodeError::Json(_) => "json",
            DecodeError::NotAnObject => "not_an_object",
            DecodeError::MissingExp => "missing_exp",
            DecodeError::NonNumericExp => "non_numeric_exp",
        }
    }
}

/// Decode the claims of a compact token without verifying its signature
pub fn decode_claims(token: &str) -> Result<TokenClaims, DecodeError> {
    if token.is_empty() {
        return Err(DecodeError::Empty);
    }

    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::SegmentCount(segments.len()));
    }

    let payload = PAYLOAD_ENGINE.decode(segments[1])?;
    let Value::Object(mut claims) = serde_json::from_slice::<Value>(&payload)? else {
        return Err(DecodeError::NotAnObject);
    };

    let exp = match claims.remove("exp") {
        None | Some(Value::Null) => return Err(DecodeError::MissingExp),
        Some(Value::Number(n)) => number_to_secs(&n).ok_or(DecodeError::NonNumericExp)?,
        Some(_) => return Err(DecodeError::NonNumericExp),
    };

    let sub = take_string(&mut claims, "sub");
    let email = take_string(&mut claims, "email");
    let iat = match claims.get("iat") {
        Some(Value::Number(n)) => {
            let secs = number_to_secs(n);
            if secs.is_some() {
                claims.remove("iat");
            }
            secs
        }
        _ => None,
    };

    Ok(TokenClaims {
        exp,
        sub,
        email,
        iat,
        extra: claims,
    })
}

/// Whole seconds from a JSON number. Fractions are floored, which keeps
/// `exp >= now` exact when `now` is itself whole seconds.
fn number_to_secs(n: &serde_json::Number) -> Option<i64> {
    if let Some(secs) = n.as_i64() {
        return Some(secs);
    }
    let secs = n.as_f64()?;
    // `as` saturates out-of-range values
    secs.is_finite().then(|| secs.floor() as i64)
}

fn take_string(claims: &mut Map<String, Value>, key: &str) -> Option<String> {
    match claims.get(key) {
        Some(Value::String(_)) => match claims.remove(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        },
        _ => None,
    }
}
