//! Token verification.
//!
//! # Checks, in order
//!
//! 1. Envelope: size limit, three segments, header decodes and names HS256
//! 2. Signature: recomputed with the shared secret, compared in constant time
//! 3. Claims: payload decodes and matches the claims schema
//! 4. Expiry: rejected once `now >= exp`
//!
//! Verification reads only the shared secret and writes nothing, so a single
//! verifier is shared across all requests without locking.

use crate::auth::claims::{decode_claims, Claims};
use crate::crypto::{self, SigningKeyStore, SIGNING_ALGORITHM};
use crate::errors::AuthError;
use chrono::{DateTime, Utc};
use common::jwt::{decode_segment, split_token};
use jsonwebtoken::Header;
use std::sync::Arc;
use tracing::instrument;

/// Authentication lifecycle of a single request.
///
/// `Unauthenticated -> HeaderChecked -> SignatureVerified -> ExpiryChecked
/// -> Authenticated`. A request can be rejected at each step; the rejection
/// records the last stage that passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStage {
    Unauthenticated,
    HeaderChecked,
    SignatureVerified,
    ExpiryChecked,
    Authenticated,
}

/// A failed verification and the last stage the token passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub stage: AuthStage,
    pub error: AuthError,
}

impl Rejection {
    fn at(stage: AuthStage, error: AuthError) -> Self {
        Self { stage, error }
    }
}

/// Verifies tokens signed with the shared secret.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    key_store: Arc<SigningKeyStore>,
}

impl TokenVerifier {
    pub fn new(key_store: Arc<SigningKeyStore>) -> Self {
        Self { key_store }
    }

    /// Verify `token` at the current time.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify `token` as of `now` and return its claims.
    ///
    /// # Errors
    ///
    /// - `MalformedToken` - bad envelope, header, or claims payload
    /// - `InvalidSignature` - signature does not match the payload
    /// - `TokenExpired` - `now` is at or past the `exp` claim
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        self.verify_staged_at(token, now).map_err(|r| r.error)
    }

    /// Verify `token` at the current time, reporting where a rejection happened.
    pub fn verify_staged(&self, token: &str) -> Result<Claims, Rejection> {
        self.verify_staged_at(token, Utc::now())
    }

    /// Verify `token` as of `now`. A rejection carries the last stage the
    /// token passed, starting from `HeaderChecked`.
    #[instrument(skip_all, name = "auth.verifier.verify")]
    pub fn verify_staged_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, Rejection> {
        let malformed = || Rejection::at(AuthStage::HeaderChecked, AuthError::MalformedToken);

        let segments = split_token(token).map_err(|e| {
            tracing::debug!(target: "auth.verifier", error = ?e, "Token envelope rejected");
            malformed()
        })?;

        let header_bytes = decode_segment(segments.header).map_err(|_| malformed())?;
        let header: Header = serde_json::from_slice(&header_bytes).map_err(|e| {
            tracing::debug!(target: "auth.verifier", error = %e, "Failed to parse JWT header JSON");
            malformed()
        })?;

        if header.alg != SIGNING_ALGORITHM {
            tracing::debug!(target: "auth.verifier", alg = ?header.alg, "Unexpected JWT algorithm");
            return Err(malformed());
        }

        let signature_ok =
            crypto::verify_signature(segments.signing_input, segments.signature, &self.key_store)
                .map_err(|e| Rejection::at(AuthStage::HeaderChecked, e))?;
        if !signature_ok {
            tracing::debug!(target: "auth.verifier", "Token signature mismatch");
            return Err(Rejection::at(AuthStage::HeaderChecked, AuthError::InvalidSignature));
        }

        let claims = decode_claims(segments.payload)
            .map_err(|e| Rejection::at(AuthStage::SignatureVerified, e))?;

        if claims.is_expired_at(now) {
            tracing::debug!(
                target: "auth.verifier",
                exp = claims.exp,
                now = now.timestamp(),
                "Token expired"
            );
            return Err(Rejection::at(AuthStage::SignatureVerified, AuthError::TokenExpired));
        }

        tracing::debug!(target: "auth.verifier", stage = ?AuthStage::ExpiryChecked, "Token verified");
        Ok(claims)
    }
}
