//! Token claims and their payload codec.
//!
//! The claim names and types are fixed here: `sub`, `iss`, `exp`. Decoding
//! is strict. An unknown field, a missing field, or a field of the wrong type
//! fails the decode instead of falling back to a default.

use crate::errors::AuthError;
use chrono::{DateTime, Duration, Utc};
use common::jwt::{decode_segment, encode_segment};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Claims embedded in every issued token.
///
/// The `sub` field is redacted in Debug output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// Subject (the authenticated username).
    pub sub: String,

    /// Issuer identifier of this service.
    pub iss: String,

    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,
}

impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("sub", &"[REDACTED]")
            .field("iss", &self.iss)
            .field("exp", &self.exp)
            .finish()
    }
}

impl Claims {
    /// Build claims that expire exactly `ttl` after `issued_at`.
    pub fn new(subject: &str, issuer: &str, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: subject.to_string(),
            iss: issuer.to_string(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Expiry as a timestamp. `None` if `exp` is out of range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Whether the claims are expired at `now`. A token is expired from the
    /// instant `now` reaches `exp`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    fn validate_shape(&self) -> Result<(), AuthError> {
        if self.sub.is_empty() {
            tracing::debug!(target: "auth.claims", "Claims rejected: empty subject");
            return Err(AuthError::MalformedToken);
        }

        if self.exp <= 0 || self.expires_at().is_none() {
            tracing::debug!(target: "auth.claims", exp = self.exp, "Claims rejected: invalid expiry");
            return Err(AuthError::MalformedToken);
        }

        Ok(())
    }
}

/// Encode claims into a base64url JSON payload segment.
pub fn encode_claims(claims: &Claims) -> Result<String, AuthError> {
    let json = serde_json::to_vec(claims).map_err(|e| {
        tracing::error!(target: "auth.claims", error = %e, "Failed to serialize claims");
        AuthError::Internal
    })?;

    Ok(encode_segment(&json))
}

/// Decode and shape-check a base64url JSON payload segment.
///
/// # Errors
///
/// Returns `AuthError::MalformedToken` for bad base64, bad JSON, a schema
/// mismatch, an empty subject, or an unrepresentable expiry.
pub fn decode_claims(payload: &str) -> Result<Claims, AuthError> {
    let bytes = decode_segment(payload).map_err(|_| AuthError::MalformedToken)?;

    let claims: Claims = serde_json::from_slice(&bytes).map_err(|e| {
        tracing::debug!(target: "auth.claims", error = %e, "Failed to parse claims JSON");
        AuthError::MalformedToken
    })?;

    claims.validate_shape()?;
    Ok(claims)
}
