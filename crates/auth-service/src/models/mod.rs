//! Request and response models.

use common::secret::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Login request body for `POST /auth`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: SecretString,
}

/// Token payload returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenData {
    pub token: String,
}

/// Response envelope used by the login and demo endpoints.
///
/// ```json
/// {"code": 200, "msg": "success", "data": {"token": "<jwt>"}}
/// {"code": 400, "msg": "auth failed"}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            msg: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn failure(code: u16, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Identity attached to a request by the authentication gate.
///
/// Lives in the request's extensions for the duration of that request only.
/// The subject is redacted in Debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub subject: String,
}

impl fmt::Debug for AuthenticatedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedIdentity")
            .field("subject", &"[REDACTED]")
            .finish()
    }
}
