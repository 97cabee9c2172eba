//! Credential validation capability.
//!
//! The token issuer never compares credentials itself. It delegates to a
//! [`CredentialValidator`], so a real user directory can replace the single
//! configured account without touching issuance logic.

use crate::config::Config;
use common::secret::{ExposeSecret, SecretString};
use std::fmt;
use subtle::ConstantTimeEq;

/// Decides whether a username/password pair is valid.
///
/// Implementations must not reveal, through the return value or timing,
/// whether the username exists.
pub trait CredentialValidator: Send + Sync {
    /// Returns `true` only if `password` is correct for `username`.
    fn validate(&self, username: &str, password: &SecretString) -> bool;
}

/// A single statically configured account.
pub struct StaticAccount {
    username: String,
    password: SecretString,
}

impl StaticAccount {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Build the account from `AUTH_ACCOUNT_USERNAME` / `AUTH_ACCOUNT_PASSWORD`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.account_username.clone(),
            config.account_password.clone(),
        )
    }
}

impl fmt::Debug for StaticAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticAccount")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl CredentialValidator for StaticAccount {
    fn validate(&self, username: &str, password: &SecretString) -> bool {
        // Both comparisons always run so an unknown username costs the same
        // as a wrong password.
        let username_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let password_ok = self
            .password
            .expose_secret()
            .as_bytes()
            .ct_eq(password.expose_secret().as_bytes());

        bool::from(username_ok & password_ok)
    }
}
