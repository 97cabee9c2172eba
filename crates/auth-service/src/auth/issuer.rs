//! Token issuance.
//!
//! Validates a presented credential pair and, on success, produces a signed
//! HS256 token whose claims expire exactly one TTL after issuance. Nothing
//! is stored server-side.

use crate::auth::claims::{encode_claims, Claims};
use crate::config::Config;
use crate::crypto::{self, SigningKeyStore, SIGNING_ALGORITHM};
use crate::errors::AuthError;
use crate::services::CredentialValidator;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use common::jwt::encode_segment;
use common::secret::SecretString;
use jsonwebtoken::Header;
use std::sync::Arc;
use tracing::instrument;

/// A username/password pair presented at login.
#[derive(Debug)]
pub struct CredentialPair {
    pub username: String,
    pub password: SecretString,
}

/// A freshly signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact JWS `header.payload.signature`.
    pub token: String,

    /// Issuance instant, truncated to whole seconds.
    pub issued_at: DateTime<Utc>,

    /// When the token stops being accepted. Always `issued_at + ttl`.
    pub expires_at: DateTime<Utc>,
}

/// Issues signed tokens for valid credentials.
pub struct TokenIssuer {
    key_store: Arc<SigningKeyStore>,
    validator: Arc<dyn CredentialValidator>,
    issuer: String,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create a new token issuer.
    ///
    /// # Arguments
    ///
    /// * `key_store` - Shared signing secret
    /// * `validator` - Credential validation capability
    /// * `issuer` - Fixed identifier written to the `iss` claim
    /// * `ttl` - Token time-to-live; must be positive
    pub fn new(
        key_store: Arc<SigningKeyStore>,
        validator: Arc<dyn CredentialValidator>,
        issuer: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            key_store,
            validator,
            issuer: issuer.into(),
            ttl,
        }
    }

    /// Build an issuer using the configured issuer identifier and TTL.
    pub fn from_config(
        config: &Config,
        key_store: Arc<SigningKeyStore>,
        validator: Arc<dyn CredentialValidator>,
    ) -> Self {
        Self::new(
            key_store,
            validator,
            config.issuer.clone(),
            Duration::seconds(config.token_ttl_seconds),
        )
    }

    /// Issue a token for `credentials` at the current time.
    pub fn issue(&self, credentials: &CredentialPair) -> Result<IssuedToken, AuthError> {
        self.issue_at(credentials, Utc::now())
    }

    /// Issue a token for `credentials` as of `now`.
    ///
    /// `exp` has one-second resolution, so `now` is truncated to the whole
    /// second before the expiry is computed.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` - the validator rejected the pair. Unknown
    ///   usernames and wrong passwords are not distinguished.
    /// - `Internal` - encoding or signing failed.
    #[instrument(skip_all, name = "auth.issuer.issue")]
    pub fn issue_at(
        &self,
        credentials: &CredentialPair,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        if !self
            .validator
            .validate(&credentials.username, &credentials.password)
        {
            tracing::debug!(target: "auth.issuer", "Credential validation failed");
            return Err(AuthError::InvalidCredentials);
        }

        let issued_at = now.trunc_subsecs(0);
        let claims = Claims::new(&credentials.username, &self.issuer, issued_at, self.ttl);
        let expires_at = claims.expires_at().ok_or(AuthError::Internal)?;

        let header = serde_json::to_vec(&Header::new(SIGNING_ALGORITHM)).map_err(|e| {
            tracing::error!(target: "auth.issuer", error = %e, "Failed to serialize JWT header");
            AuthError::Internal
        })?;

        let signing_input = format!("{}.{}", encode_segment(&header), encode_claims(&claims)?);
        let signature = crypto::sign(&signing_input, &self.key_store)?;

        tracing::debug!(target: "auth.issuer", exp = claims.exp, "Token issued");

        Ok(IssuedToken {
            token: format!("{}.{}", signing_input, signature),
            issued_at,
            expires_at,
        })
    }
}
