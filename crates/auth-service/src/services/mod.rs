//! Collaborators consumed by the token issuer.

pub mod credentials;

pub use credentials::{CredentialValidator, StaticAccount};
