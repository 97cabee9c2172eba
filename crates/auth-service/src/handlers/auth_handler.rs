use crate::auth::CredentialPair;
use crate::errors::AuthError;
use crate::models::{ApiResponse, LoginRequest, TokenData};
use crate::routes::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use common::secret::ExposeSecret;
use std::sync::Arc;
use tracing::instrument;

/// Handle login request
///
/// POST /auth
///
/// Always answers HTTP 200; the outcome is carried in the envelope `code`:
///
/// - `200` with `data.token` on success
/// - `400 "auth failed"` for a wrong password or unknown username
/// - `422 "invalid params"` when the body is not a JSON object with a
///   non-empty `username` and `password`
#[instrument(skip_all, name = "auth.handlers.login")]
pub async fn handle_login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Json<ApiResponse<TokenData>> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(target: "auth.handlers", error = %rejection, "Rejected login body");
            return Json(failure(&AuthError::MalformedRequestBody));
        }
    };

    if request.username.is_empty() || request.password.expose_secret().is_empty() {
        tracing::debug!(target: "auth.handlers", "Login body has empty credentials");
        return Json(failure(&AuthError::MalformedRequestBody));
    }

    let credentials = CredentialPair {
        username: request.username,
        password: request.password,
    };

    match state.issuer.issue(&credentials) {
        Ok(issued) => {
            tracing::debug!(
                target: "auth.handlers",
                issued_at = %issued.issued_at,
                expires_at = %issued.expires_at,
                "Login succeeded"
            );
            Json(ApiResponse::success(TokenData {
                token: issued.token,
            }))
        }
        Err(e) => Json(failure(&e)),
    }
}

fn failure(error: &AuthError) -> ApiResponse<TokenData> {
    ApiResponse::failure(error.envelope_code(), error.to_string())
}
