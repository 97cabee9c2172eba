//! Compact JWT envelope utilities.
//!
//! A compact JWS is three base64url (unpadded) segments joined by dots:
//! `header.payload.signature`. This module provides:
//! - the size limit applied before any parsing
//! - splitting a token into its segments
//! - base64url segment encoding/decoding
//!
//! Nothing here verifies a signature. Callers must verify the signature over
//! [`TokenSegments::signing_input`] before trusting the payload.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Maximum allowed JWT size in bytes (8KB).
///
/// JWTs larger than this are rejected BEFORE any base64 decoding or
/// signature computation. A token issued by this service is well under
/// 300 bytes.
pub const MAX_JWT_SIZE_BYTES: usize = 8192; // 8KB

/// Authorization scheme accepted by the authentication gate.
///
/// Matched case-sensitively.
pub const BEARER_SCHEME: &str = "Bearer";

// =============================================================================
// Error Types
// =============================================================================

/// Structural errors in a compact JWT.
///
/// Messages are intentionally generic. Details are logged at debug level.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtValidationError {
    /// Token size exceeds maximum allowed.
    #[error("The access token is invalid or expired")]
    TokenTooLarge,

    /// Token is not a three-segment compact JWS, or a segment is not base64url.
    #[error("The access token is invalid or expired")]
    MalformedToken,
}

// =============================================================================
// Segments
// =============================================================================

/// The three segments of a compact JWT, borrowed from the original token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSegments<'a> {
    /// `header.payload`, the exact bytes the signature covers.
    pub signing_input: &'a str,
    /// base64url-encoded header JSON.
    pub header: &'a str,
    /// base64url-encoded claims JSON.
    pub payload: &'a str,
    /// base64url-encoded signature.
    pub signature: &'a str,
}

/// Split a compact JWT into its segments.
///
/// # Errors
///
/// - `TokenTooLarge` - token exceeds [`MAX_JWT_SIZE_BYTES`]
/// - `MalformedToken` - not exactly three non-empty dot-separated segments
pub fn split_token(token: &str) -> Result<TokenSegments<'_>, JwtValidationError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "common.jwt",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(JwtValidationError::TokenTooLarge);
    }

    let (signing_input, signature) = token
        .rsplit_once('.')
        .ok_or(JwtValidationError::MalformedToken)?;
    let (header, payload) = signing_input
        .split_once('.')
        .ok_or(JwtValidationError::MalformedToken)?;

    if payload.contains('.') || [header, payload, signature].iter().any(|s| s.is_empty()) {
        tracing::debug!(target: "common.jwt", "Token rejected: invalid JWT format");
        return Err(JwtValidationError::MalformedToken);
    }

    Ok(TokenSegments {
        signing_input,
        header,
        payload,
        signature,
    })
}

/// Encode bytes as an unpadded base64url segment.
#[must_use]
pub fn encode_segment(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode an unpadded base64url segment.
///
/// # Errors
///
/// Returns `MalformedToken` if the segment is not valid base64url.
pub fn decode_segment(segment: &str) -> Result<Vec<u8>, JwtValidationError> {
    URL_SAFE_NO_PAD.decode(segment).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Failed to decode JWT segment base64");
        JwtValidationError::MalformedToken
    })
}
