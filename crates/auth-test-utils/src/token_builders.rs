//! Builder patterns for test data construction
//!
//! Mints tokens directly, bypassing the login endpoint, so tests can control
//! every claim and the signing secret.

use crate::fixtures::{TEST_ISSUER, TEST_SIGNING_SECRET, TEST_USERNAME};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::json;

/// Builder for creating signed test tokens
///
/// # Example
/// ```rust,ignore
/// let token = TestTokenBuilder::new()
///     .for_user("alice")
///     .expires_in(-10)
///     .sign(TEST_SIGNING_SECRET);
/// ```
pub struct TestTokenBuilder {
    sub: String,
    iss: String,
    exp: i64,
    algorithm: Algorithm,
}

impl TestTokenBuilder {
    /// Create a new token builder with defaults
    pub fn new() -> Self {
        Self {
            sub: TEST_USERNAME.to_string(),
            iss: TEST_ISSUER.to_string(),
            exp: (Utc::now() + Duration::seconds(120)).timestamp(),
            algorithm: Algorithm::HS256,
        }
    }

    /// Set the subject
    pub fn for_user(mut self, subject: &str) -> Self {
        self.sub = subject.to_string();
        self
    }

    /// Set the issuer
    pub fn issued_by(mut self, issuer: &str) -> Self {
        self.iss = issuer.to_string();
        self
    }

    /// Set expiration in seconds from now (negative for already expired)
    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.exp = (Utc::now() + Duration::seconds(seconds)).timestamp();
        self
    }

    /// Set the absolute expiration timestamp
    pub fn expires_at(mut self, timestamp: i64) -> Self {
        self.exp = timestamp;
        self
    }

    /// Sign with a different HMAC algorithm
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Build the claims as a JSON value
    pub fn build_claims(&self) -> serde_json::Value {
        json!({
            "sub": self.sub,
            "iss": self.iss,
            "exp": self.exp,
        })
    }

    /// Sign the claims with `secret`
    pub fn sign(self, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::new(self.algorithm),
            &self.build_claims(),
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("test token signing should succeed")
    }

    /// Sign the claims with the test server's secret
    pub fn build(self) -> String {
        self.sign(TEST_SIGNING_SECRET)
    }
}

impl Default for TestTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_creates_expected_claims() {
        let claims = TestTokenBuilder::new()
            .for_user("alice")
            .expires_at(1_700_000_000)
            .build_claims();

        assert_eq!(claims["sub"], "alice");
        assert_eq!(claims["iss"], TEST_ISSUER);
        assert_eq!(claims["exp"], 1_700_000_000);
    }

    #[test]
    fn test_builder_default() {
        let claims = TestTokenBuilder::default().build_claims();
        assert_eq!(claims["sub"], TEST_USERNAME);
        assert!(claims["exp"].as_i64().unwrap() > Utc::now().timestamp());
    }

    #[test]
    fn test_build_produces_three_segments() {
        assert_eq!(TestTokenBuilder::new().build().split('.').count(), 3);
    }
}
