//! Middleware for the auth service.
//!
//! # Components
//!
//! - `auth` - Authentication gate for protected routes
//! - `access_log` - Per-request structured access log

pub mod access_log;
pub mod auth;

pub use access_log::access_log;
pub use auth::{require_auth, AuthState};
