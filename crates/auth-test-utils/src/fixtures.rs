//! Fixed test values and configuration.
//!
//! Every fixture is deterministic so tokens minted in one test can be
//! reproduced in another.

use auth_service::config::Config;
use auth_service::crypto::SigningKeyStore;
use common::secret::SecretBox;
use std::collections::HashMap;
use std::sync::Arc;

/// Signing secret used by test servers and token builders.
pub const TEST_SIGNING_SECRET: &str = "test-signing-secret-0123456789";

/// A secret that the test server does not hold.
pub const OTHER_SIGNING_SECRET: &str = "some-other-signing-secret";

/// Username of the test account.
pub const TEST_USERNAME: &str = "root";

/// Password of the test account.
pub const TEST_PASSWORD: &str = "123456";

/// Issuer identifier configured on test servers.
pub const TEST_ISSUER: &str = "ferriem";

/// Token TTL configured on test servers.
pub const TEST_TOKEN_TTL_SECONDS: i64 = 120;

/// Environment-style variables for a test server bound to a random port.
pub fn test_vars() -> HashMap<String, String> {
    HashMap::from([
        ("BIND_ADDRESS".to_string(), "127.0.0.1:0".to_string()),
        (
            "AUTH_SIGNING_SECRET".to_string(),
            TEST_SIGNING_SECRET.to_string(),
        ),
        (
            "AUTH_TOKEN_TTL_SECONDS".to_string(),
            TEST_TOKEN_TTL_SECONDS.to_string(),
        ),
        ("AUTH_ISSUER".to_string(), TEST_ISSUER.to_string()),
        ("AUTH_ACCOUNT_USERNAME".to_string(), TEST_USERNAME.to_string()),
        ("AUTH_ACCOUNT_PASSWORD".to_string(), TEST_PASSWORD.to_string()),
    ])
}

/// Configuration built from [`test_vars`].
pub fn test_config() -> Config {
    Config::from_vars(&test_vars()).expect("test configuration should be valid")
}

/// Key store holding `secret`.
pub fn test_key_store(secret: &str) -> Arc<SigningKeyStore> {
    Arc::new(
        SigningKeyStore::new(SecretBox::new(Box::new(secret.as_bytes().to_vec())))
            .expect("test secret should be non-empty"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_uses_fixtures() {
        let config = test_config();

        assert_eq!(config.bind_address, "127.0.0.1:0");
        assert_eq!(config.token_ttl_seconds, TEST_TOKEN_TTL_SECONDS);
        assert_eq!(config.issuer, TEST_ISSUER);
        assert_eq!(config.account_username, TEST_USERNAME);
        assert!(!config.account_password_defaulted);
    }

    #[test]
    fn test_key_store_holds_secret() {
        assert_eq!(
            test_key_store(TEST_SIGNING_SECRET).get(),
            TEST_SIGNING_SECRET.as_bytes()
        );
    }
}
