//! Demo protected handler.
//!
//! Echoes the subject the authentication gate attached to the request.

use crate::models::{ApiResponse, AuthenticatedIdentity};
use axum::{Extension, Json};
use tracing::instrument;

/// Handler for GET /home
///
/// Requires valid authentication via the auth middleware.
///
/// ```json
/// {"code": 200, "msg": "success", "data": "root"}
/// ```
#[instrument(skip_all, name = "auth.handlers.home")]
pub async fn get_home(
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> Json<ApiResponse<String>> {
    Json(ApiResponse::success(identity.subject))
}
