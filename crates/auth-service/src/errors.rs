//! Auth service error types.
//!
//! Every per-request failure maps to a stable, machine-readable kind via
//! [`AuthError::kind`]. Messages returned to clients never reveal whether a
//! username exists or why a signature or payload failed to parse. Details
//! are logged server-side at debug level where the error is raised.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Value of the `WWW-Authenticate` header attached to every 401 response.
const WWW_AUTHENTICATE_VALUE: &str = "Bearer realm=\"auth-service\"";

/// Auth service error type.
///
/// Issuance path: `InvalidCredentials`, `MalformedRequestBody`.
/// Verification path: `MissingCredentials`, `MalformedHeader`,
/// `MalformedToken`, `InvalidSignature`, `TokenExpired`.
/// Startup-fatal: `KeyStoreUninitialized`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("auth failed")]
    InvalidCredentials,

    #[error("invalid params")]
    MalformedRequestBody,

    #[error("Missing Authorization header")]
    MissingCredentials,

    #[error("Invalid Authorization header format")]
    MalformedHeader,

    #[error("The access token is invalid or expired")]
    MalformedToken,

    #[error("The access token is invalid or expired")]
    InvalidSignature,

    #[error("The access token is invalid or expired")]
    TokenExpired,

    #[error("Signing key store is not initialized")]
    KeyStoreUninitialized,

    #[error("Internal server error")]
    Internal,
}

impl AuthError {
    /// Stable machine-readable name of this error.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "InvalidCredentials",
            AuthError::MalformedRequestBody => "MalformedRequestBody",
            AuthError::MissingCredentials => "MissingCredentials",
            AuthError::MalformedHeader => "MalformedHeader",
            AuthError::MalformedToken => "MalformedToken",
            AuthError::InvalidSignature => "InvalidSignature",
            AuthError::TokenExpired => "TokenExpired",
            AuthError::KeyStoreUninitialized => "KeyStoreUninitialized",
            AuthError::Internal => "Internal",
        }
    }

    /// HTTP status code for this error when returned as a gate rejection.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials
            | AuthError::MalformedHeader
            | AuthError::MalformedToken
            | AuthError::InvalidSignature
            | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::InvalidCredentials | AuthError::MalformedRequestBody => {
                StatusCode::BAD_REQUEST
            }
            AuthError::KeyStoreUninitialized | AuthError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Status code carried in the login envelope's `code` field.
    ///
    /// The login endpoint always answers HTTP 200; the outcome lives here.
    pub fn envelope_code(&self) -> u16 {
        match self {
            AuthError::InvalidCredentials => 400,
            AuthError::MalformedRequestBody => 422,
            _ => 500,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(target: "auth.errors", kind = self.kind(), "Internal auth failure");
            "Internal"
        } else {
            self.kind()
        };

        let mut response = (status, Json(ErrorResponse { error })).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(WWW_AUTHENTICATE_VALUE),
            );
        }

        response
    }
}
