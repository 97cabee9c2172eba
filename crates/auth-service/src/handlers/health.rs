//! Liveness probe.

/// Handler for GET /health
///
/// The service holds no external connections, so being able to answer is
/// the whole check.
pub async fn health_check() -> &'static str {
    "OK"
}
