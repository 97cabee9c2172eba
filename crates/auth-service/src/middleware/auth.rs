//! Authentication gate for protected routes.
//!
//! Extracts the Bearer token from the Authorization header, verifies it, and
//! injects an [`AuthenticatedIdentity`] into request extensions. Any failure
//! short-circuits with a 401 before the downstream handler runs.

use crate::auth::{AuthStage, TokenVerifier};
use crate::errors::AuthError;
use crate::models::AuthenticatedIdentity;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::IntoResponse,
};
use common::jwt::BEARER_SCHEME;
use std::sync::Arc;
use tracing::instrument;

/// State for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    /// Shared token verifier.
    pub verifier: Arc<TokenVerifier>,
}

/// Extract the token from `Authorization: Bearer <token>`.
///
/// The value must be exactly two tokens separated by a single space, and the
/// scheme must be `Bearer` (case-sensitive).
///
/// # Errors
///
/// - `MissingCredentials` - header absent or empty
/// - `MalformedHeader` - anything other than `Bearer <token>`
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?;

    if value.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    let value = value.to_str().map_err(|_| AuthError::MalformedHeader)?;

    match value.split_once(' ') {
        Some((scheme, token))
            if scheme == BEARER_SCHEME && !token.is_empty() && !token.contains(' ') =>
        {
            Ok(token)
        }
        _ => Err(AuthError::MalformedHeader),
    }
}

/// Authentication middleware that validates Bearer tokens.
///
/// # Authorization Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// - 401 with `{"error": "<kind>"}` and a WWW-Authenticate header if the
///   header is missing or malformed, or the token fails verification
/// - Otherwise continues to the next handler with the identity in extensions
#[instrument(skip_all, name = "auth.middleware.gate")]
pub async fn require_auth(
    State(state): State<Arc<AuthState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, AuthError> {
    let token = extract_bearer_token(req.headers()).map_err(|e| {
        tracing::debug!(
            target: "auth.gate",
            kind = e.kind(),
            stage = ?AuthStage::Unauthenticated,
            "Request rejected"
        );
        e
    })?;

    let claims = state.verifier.verify_staged(token).map_err(|rejection| {
        tracing::debug!(
            target: "auth.gate",
            kind = rejection.error.kind(),
            stage = ?rejection.stage,
            "Request rejected"
        );
        rejection.error
    })?;

    // Only attached once every check has passed
    req.extensions_mut().insert(AuthenticatedIdentity {
        subject: claims.sub,
    });

    tracing::debug!(target: "auth.gate", stage = ?AuthStage::Authenticated, "Request authenticated");

    Ok(next.run(req).await)
}
