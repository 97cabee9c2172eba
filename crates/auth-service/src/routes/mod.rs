//! HTTP routes for the auth service.
//!
//! Defines the Axum router and application state.

use crate::auth::{TokenIssuer, TokenVerifier};
use crate::handlers;
use crate::middleware::{access_log, require_auth, AuthState};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Issues tokens at login.
    pub issuer: Arc<TokenIssuer>,

    /// Verifies tokens on protected routes.
    pub verifier: Arc<TokenVerifier>,
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `POST /auth` - Login, returns a signed token
/// - `GET /health` - Liveness probe
/// - `GET /home` - Demo protected route behind the authentication gate
/// - Access log, TraceLayer and a 30 second request timeout
pub fn build_routes(state: Arc<AppState>) -> Router {
    let auth_state = Arc::new(AuthState {
        verifier: state.verifier.clone(),
    });

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/auth", post(handlers::handle_login))
        .route("/health", get(handlers::health_check))
        .with_state(state);

    // Protected routes (gate runs only for matched routes)
    let protected_routes = Router::new()
        .route("/home", get(handlers::get_home))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth));

    // Layer order (bottom-to-top execution):
    // 1. TimeoutLayer - Timeout the request (innermost)
    // 2. TraceLayer - Log request details
    // 3. access_log - One record per request, including rejections (outermost)
    public_routes
        .merge(protected_routes)
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(access_log))
}
