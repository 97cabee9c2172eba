//! Secret types for protecting sensitive values from accidental logging.
//!
//! This module re-exports types from the [`secrecy`] crate. Use these types
//! for every sensitive value the auth service handles: the HMAC signing
//! secret, login passwords, and configured account passwords.
//!
//! `SecretBox<T>` and `SecretString` implement `Debug` with redaction, so a
//! struct that derives `Debug` and holds a secret is safe to log via `{:?}`
//! or tracing fields. Secrets are zeroized when dropped.
//!
//! # Example
//!
//! ```rust
//! use common::secret::SecretString;
//! use secrecy::ExposeSecret;
//!
//! #[derive(Debug)]
//! struct LoginRequest {
//!     username: String,
//!     password: SecretString,
//! }
//!
//! let req = LoginRequest {
//!     username: "root".to_string(),
//!     password: SecretString::from("123456"),
//! };
//!
//! // Password is redacted in Debug output
//! println!("{:?}", req);
//!
//! // Reading the value requires an explicit call
//! let password: &str = req.password.expose_secret();
//! ```
//!
//! # Usage Guidelines
//!
//! Use `SecretString` for:
//! - Login passwords
//! - Configured account passwords
//!
//! Use `SecretBox<T>` for:
//! - Binary key material (`SecretBox<Vec<u8>>` for the signing secret)
//!
//! # Serde Integration
//!
//! With the `serde` feature enabled, secrets deserialize directly from JSON:
//!
//! ```rust
//! use serde::Deserialize;
//! use common::secret::SecretString;
//!
//! #[derive(Debug, Deserialize)]
//! struct Credentials {
//!     username: String,
//!     password: SecretString,
//! }
//!
//! let json = r#"{"username": "root", "password": "123456"}"#;
//! let creds: Credentials = serde_json::from_str(json).unwrap();
//! println!("{:?}", creds);
//! ```

pub use secrecy::{ExposeSecret, SecretBox, SecretString};
