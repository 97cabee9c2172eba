//! Token authentication core.
//!
//! - `claims` - Claims structure and payload codec
//! - `issuer` - Credential check and token signing
//! - `verifier` - Signature, schema, and expiry checks

pub mod claims;
pub mod issuer;
pub mod verifier;

pub use claims::Claims;
pub use issuer::{CredentialPair, IssuedToken, TokenIssuer};
pub use verifier::{AuthStage, Rejection, TokenVerifier};
