use async_trait::async_trait;
use jsonwebtoken::{Algorithm, Validation};
use serde::{Deserialize, Serialize};

use crate::config::IdentityConfig;

/// A verified caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// The issuer's stable user id (`sub`).
    pub uid: String,
    pub email: Option<String>,
}

/// Claims read from an identity token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject -- the user's id at the identity provider.
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    #[serde(default)]
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

impl From<IdentityClaims> for Identity {
    fn from(claims: IdentityClaims) -> Self {
        Identity {
            uid: claims.sub,
            email: claims.email,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// Signature, expiry, issuer or audience check failed, or the token is malformed.
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// The token header names no signing key.
    #[error("Token header has no key id")]
    MissingKeyId,

    /// No key with this id exists in the key set, even after a refetch.
    #[error("Unknown signing key '{0}'")]
    UnknownKey(String),

    /// The key set could not be fetched.
    #[error("Key set fetch failed: {0}")]
    KeyFetch(#[from] reqwest::Error),
}

/// Verifies a bearer token and returns the caller's identity.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Identity, IdentityError>;
}

/// Validation rules for `algorithm` with the configured issuer and audience.
pub(crate) fn build_validation(algorithm: Algorithm, config: &IdentityConfig) -> Validation {
    let mut validation = Validation::new(algorithm);
    if let Some(issuer) = &config.issuer {
        validation.set_issuer(&[issuer]);
    }
    match &config.audience {
        Some(audience) => validation.set_audience(&[audience]),
        None => validation.validate_aud = false,
    }
    validation
}
