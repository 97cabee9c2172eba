//! Auth service configuration.
//!
//! Configuration is loaded from environment variables. The signing secret
//! and the account password are redacted in Debug output.

use common::secret::{ExposeSecret, SecretBox, SecretString};
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

/// Default server bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default token time-to-live in seconds (2 minutes).
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 120;

/// Maximum token time-to-live in seconds (24 hours).
pub const MAX_TOKEN_TTL_SECONDS: i64 = 86_400;

/// Default issuer identifier embedded in every token.
pub const DEFAULT_ISSUER: &str = "ferriem";

/// Default username of the built-in demo account.
pub const DEFAULT_ACCOUNT_USERNAME: &str = "root";

/// Default password of the built-in demo account.
pub const DEFAULT_ACCOUNT_PASSWORD: &str = "123456";

/// Auth service configuration.
pub struct Config {
    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// HMAC secret used to sign and verify tokens. Required, no default.
    pub signing_secret: SecretBox<Vec<u8>>,

    /// Token time-to-live in seconds (default: 120).
    pub token_ttl_seconds: i64,

    /// Fixed issuer identifier written to the `iss` claim (default: "ferriem").
    pub issuer: String,

    /// Username of the single configured account.
    pub account_username: String,

    /// Password of the single configured account.
    pub account_password: SecretString,

    /// True when the account password fell back to the demo default.
    pub account_password_defaulted: bool,

    /// Graceful shutdown drain period in seconds (default: 0).
    pub drain_seconds: u64,
}

impl Clone for Config {
    fn clone(&self) -> Self {
        Self {
            bind_address: self.bind_address.clone(),
            signing_secret: SecretBox::new(Box::new(self.signing_secret.expose_secret().clone())),
            token_ttl_seconds: self.token_ttl_seconds,
            issuer: self.issuer.clone(),
            account_username: self.account_username.clone(),
            account_password: self.account_password.clone(),
            account_password_defaulted: self.account_password_defaulted,
            drain_seconds: self.drain_seconds,
        }
    }
}

/// Custom Debug implementation that redacts sensitive fields.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("signing_secret", &"[REDACTED]")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("issuer", &self.issuer)
            .field("account_username", &self.account_username)
            .field("account_password", &"[REDACTED]")
            .field("account_password_defaulted", &self.account_password_defaulted)
            .field("drain_seconds", &self.drain_seconds)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid signing secret: {0}")]
    InvalidSigningSecret(String),

    #[error("Invalid token TTL configuration: {0}")]
    InvalidTokenTtl(String),

    #[error("Invalid issuer configuration: {0}")]
    InvalidIssuer(String),

    #[error("Invalid drain period configuration: {0}")]
    InvalidDrainSeconds(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let signing_secret = vars
            .get("AUTH_SIGNING_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("AUTH_SIGNING_SECRET".to_string()))?;

        if signing_secret.is_empty() {
            return Err(ConfigError::InvalidSigningSecret(
                "AUTH_SIGNING_SECRET must not be empty".to_string(),
            ));
        }

        let signing_secret = SecretBox::new(Box::new(signing_secret.as_bytes().to_vec()));

        // Parse token TTL with validation
        let token_ttl_seconds = if let Some(value_str) = vars.get("AUTH_TOKEN_TTL_SECONDS") {
            let value: i64 = value_str.parse().map_err(|e| {
                ConfigError::InvalidTokenTtl(format!(
                    "AUTH_TOKEN_TTL_SECONDS must be a valid integer, got '{}': {}",
                    value_str, e
                ))
            })?;

            if value <= 0 {
                return Err(ConfigError::InvalidTokenTtl(format!(
                    "AUTH_TOKEN_TTL_SECONDS must be positive, got {}",
                    value
                )));
            }

            if value > MAX_TOKEN_TTL_SECONDS {
                return Err(ConfigError::InvalidTokenTtl(format!(
                    "AUTH_TOKEN_TTL_SECONDS must not exceed {} seconds, got {}",
                    MAX_TOKEN_TTL_SECONDS, value
                )));
            }

            value
        } else {
            DEFAULT_TOKEN_TTL_SECONDS
        };

        let issuer = vars
            .get("AUTH_ISSUER")
            .cloned()
            .unwrap_or_else(|| DEFAULT_ISSUER.to_string());

        if issuer.trim().is_empty() {
            return Err(ConfigError::InvalidIssuer(
                "AUTH_ISSUER must not be empty".to_string(),
            ));
        }

        let account_username = vars
            .get("AUTH_ACCOUNT_USERNAME")
            .cloned()
            .unwrap_or_else(|| DEFAULT_ACCOUNT_USERNAME.to_string());

        let (account_password, account_password_defaulted) =
            match vars.get("AUTH_ACCOUNT_PASSWORD") {
                Some(password) => (SecretString::from(password.as_str()), false),
                None => (SecretString::from(DEFAULT_ACCOUNT_PASSWORD), true),
            };

        let drain_seconds = if let Some(value_str) = vars.get("AUTH_DRAIN_SECONDS") {
            value_str.parse().map_err(|e| {
                ConfigError::InvalidDrainSeconds(format!(
                    "AUTH_DRAIN_SECONDS must be a valid non-negative integer, got '{}': {}",
                    value_str, e
                ))
            })?
        } else {
            0
        };

        Ok(Config {
            bind_address,
            signing_secret,
            token_ttl_seconds,
            issuer,
            account_username,
            account_password,
            account_password_defaulted,
            drain_seconds,
        })
    }
}
