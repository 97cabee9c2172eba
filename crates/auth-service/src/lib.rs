//! Auth Service Library
//!
//! Stateless token authentication: credentials are exchanged at login for a
//! short-lived HS256-signed token, and protected routes admit a request only
//! if its Bearer token verifies against the shared secret and has not expired.
//! No session state is kept server-side.
//!
//! # Modules
//!
//! - `auth` - Claims codec, token issuer, token verifier
//! - `config` - Service configuration
//! - `crypto` - Signing key store and HS256 primitives
//! - `errors` - Error types
//! - `handlers` - HTTP request handlers
//! - `middleware` - Authentication gate and access log
//! - `models` - Request and response models
//! - `routes` - Router and application state
//! - `services` - Credential validation

pub mod auth;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
