//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions for issued tokens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;

/// JWT header structure
#[derive(Debug, Deserialize)]
struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

/// JWT claims structure
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JwtClaims {
    pub sub: String,
    pub iss: String,
    pub exp: i64,
}

fn decode_part<T: for<'de> Deserialize<'de>>(token: &str, index: usize) -> T {
    let part = token
        .split('.')
        .nth(index)
        .unwrap_or_else(|| panic!("JWT has no part {}", index));
    let bytes = URL_SAFE_NO_PAD
        .decode(part)
        .unwrap_or_else(|e| panic!("Failed to base64 decode JWT part {}: {}", index, e));
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("Failed to parse JWT part {} JSON: {}", index, e))
}

/// Custom assertions for issued tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_valid_jwt()
///     .assert_for_subject("root")
///     .assert_expires_in(120);
/// ```
pub trait TokenAssertions {
    /// Assert that the token is a three-part HS256 JWT with the expected claims
    fn assert_valid_jwt(&self) -> &Self;

    /// Assert that the token is for the specified subject
    fn assert_for_subject(&self, subject: &str) -> &Self;

    /// Assert that the token names the specified issuer
    fn assert_issued_by(&self, issuer: &str) -> &Self;

    /// Assert that the token expires within the specified seconds
    fn assert_expires_in(&self, seconds: u64) -> &Self;
}

impl TokenAssertions for String {
    fn assert_valid_jwt(&self) -> &Self {
        let parts: Vec<_> = self.split('.').collect();
        assert_eq!(
            parts.len(),
            3,
            "JWT must have 3 parts (header.payload.signature), got {}",
            parts.len()
        );

        let header: JwtHeader = decode_part(self, 0);
        assert_eq!(header.alg, "HS256", "Expected HS256 algorithm");
        assert_eq!(header.typ, "JWT", "Expected JWT type");

        let _claims: JwtClaims = decode_part(self, 1);

        self
    }

    fn assert_for_subject(&self, subject: &str) -> &Self {
        let claims: JwtClaims = decode_part(self, 1);
        assert_eq!(
            claims.sub, subject,
            "Expected subject '{}', got '{}'",
            subject, claims.sub
        );

        self
    }

    fn assert_issued_by(&self, issuer: &str) -> &Self {
        let claims: JwtClaims = decode_part(self, 1);
        assert_eq!(
            claims.iss, issuer,
            "Expected issuer '{}', got '{}'",
            issuer, claims.iss
        );

        self
    }

    fn assert_expires_in(&self, seconds: u64) -> &Self {
        let claims: JwtClaims = decode_part(self, 1);

        let now = chrono::Utc::now().timestamp();
        let expires_in = claims.exp - now;

        // Allow 5-second tolerance for slow test runs
        assert!(
            (expires_in - seconds as i64).abs() <= 5,
            "Expected token to expire in {} seconds, but expires in {} seconds",
            seconds,
            expires_in
        );

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_builders::TestTokenBuilder;

    #[test]
    fn test_assertions_accept_built_token() {
        let token = TestTokenBuilder::new().for_user("alice").expires_in(120).build();

        token
            .assert_valid_jwt()
            .assert_for_subject("alice")
            .assert_issued_by("ferriem")
            .assert_expires_in(120);
    }

    #[test]
    #[should_panic(expected = "JWT must have 3 parts")]
    fn test_assert_valid_jwt_with_two_parts() {
        "header.payload".to_string().assert_valid_jwt();
    }

    #[test]
    #[should_panic(expected = "Expected HS256 algorithm")]
    fn test_assert_valid_jwt_with_wrong_algorithm() {
        TestTokenBuilder::new()
            .with_algorithm(jsonwebtoken::Algorithm::HS512)
            .build()
            .assert_valid_jwt();
    }

    #[test]
    #[should_panic(expected = "Expected subject")]
    fn test_assert_for_subject_mismatch() {
        TestTokenBuilder::new()
            .for_user("alice")
            .build()
            .assert_for_subject("bob");
    }
}
