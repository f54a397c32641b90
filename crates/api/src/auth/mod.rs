//! Identity verification for third-party bearer tokens.
//!
//! - [`identity`] -- the [`IdentityVerifier`] seam and its error type.
//! - [`jwt`] -- HS256 shared-secret verification and token issuing.
//! - [`jwks`] -- RS256 verification against a remote JSON Web Key Set.

pub mod identity;
pub mod jwks;
pub mod jwt;

use std::sync::Arc;

pub use identity::{Identity, IdentityError, IdentityVerifier};

use crate::config::IdentityConfig;

/// Build the verifier named by the configuration. A shared secret wins
/// over a JWKS URL when both are set.
///
/// # Panics
///
/// Panics if neither is configured.
pub fn build_verifier(config: &IdentityConfig) -> Arc<dyn IdentityVerifier> {
    if let Some(secret) = &config.jwt_secret {
        return Arc::new(jwt::SharedSecretVerifier::new(secret, config));
    }
    let url = config
        .jwks_url
        .clone()
        .expect("IDENTITY_JWT_SECRET or IDENTITY_JWKS_URL must be set");
    Arc::new(jwks::JwksVerifier::new(url, config))
}
