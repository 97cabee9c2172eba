//! Signing key store and HS256 signing primitives.
//!
//! The key store holds the single process-wide HMAC secret. It is built once
//! at startup, shared read-only behind an `Arc`, and exposes no mutation.
//! Restarting with a different secret invalidates every outstanding token.

use crate::config::Config;
use crate::errors::AuthError;
use common::secret::{ExposeSecret, SecretBox};
use jsonwebtoken::{Algorithm, EncodingKey};
use std::fmt;
use subtle::ConstantTimeEq;
use tracing::instrument;

/// Signing algorithm used for every token.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Process-wide signing secret.
pub struct SigningKeyStore {
    secret: SecretBox<Vec<u8>>,
}

impl SigningKeyStore {
    /// Build the key store from raw secret bytes.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::KeyStoreUninitialized` if the secret is empty.
    pub fn new(secret: SecretBox<Vec<u8>>) -> Result<Self, AuthError> {
        if secret.expose_secret().is_empty() {
            tracing::error!(target: "auth.crypto", "Signing secret is empty");
            return Err(AuthError::KeyStoreUninitialized);
        }

        Ok(Self { secret })
    }

    /// Build the key store from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, AuthError> {
        Self::new(SecretBox::new(Box::new(
            config.signing_secret.expose_secret().clone(),
        )))
    }

    /// The secret bytes. Constant for the lifetime of the process.
    pub fn get(&self) -> &[u8] {
        self.secret.expose_secret()
    }
}

impl fmt::Debug for SigningKeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKeyStore")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Compute the base64url HS256 signature of `signing_input`.
#[instrument(skip_all)]
pub fn sign(signing_input: &str, key_store: &SigningKeyStore) -> Result<String, AuthError> {
    let encoding_key = EncodingKey::from_secret(key_store.get());

    jsonwebtoken::crypto::sign(signing_input.as_bytes(), &encoding_key, SIGNING_ALGORITHM)
        .map_err(|e| {
            tracing::error!(target: "auth.crypto", error = %e, "JWT signing operation failed");
            AuthError::Internal
        })
}

/// Recompute the signature over `signing_input` and compare it with
/// `presented` in constant time.
#[instrument(skip_all)]
pub fn verify_signature(
    signing_input: &str,
    presented: &str,
    key_store: &SigningKeyStore,
) -> Result<bool, AuthError> {
    let expected = sign(signing_input, key_store)?;
    Ok(bool::from(expected.as_bytes().ct_eq(presented.as_bytes())))
}
