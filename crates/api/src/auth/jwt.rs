//! HS256 shared-secret token verification and issuing.
//!
//! Issuing exists for local development and tests; production tokens come
//! from the identity provider.

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::identity::{build_validation, Identity, IdentityClaims, IdentityError, IdentityVerifier};
use crate::config::IdentityConfig;

pub struct SharedSecretVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl SharedSecretVerifier {
    pub fn new(secret: &str, config: &IdentityConfig) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: build_validation(Algorithm::HS256, config),
        }
    }
}

#[async_trait]
impl IdentityVerifier for SharedSecretVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, IdentityError> {
        let data = decode::<IdentityClaims>(token, &self.key, &self.validation)?;
        Ok(data.claims.into())
    }
}

/// Issue an HS256 token for `uid` valid for `ttl_secs` seconds.
pub fn issue_token(
    uid: &str,
    email: Option<&str>,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = IdentityClaims {
        sub: uid.to_string(),
        email: email.map(str::to_string),
        exp: now + ttl_secs,
        iat: now,
        iss: None,
        aud: None,
    };
    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

    fn verifier() -> SharedSecretVerifier {
        SharedSecretVerifier::new(SECRET, &IdentityConfig::default())
    }

    #[tokio::test]
    async fn issued_token_verifies() {
        let token = issue_token("uid-1", Some("ana@example.com"), SECRET, 600).unwrap();
        let identity = verifier().verify(&token).await.unwrap();
        assert_eq!(identity.uid, "uid-1");
        assert_eq!(identity.email.as_deref(), Some("ana@example.com"));
    }

    #[tokio::test]
    async fn expired_token_fails() {
        // Well past the default 60-second leeway.
        let token = issue_token("uid-1", None, SECRET, -300).unwrap();
        assert_matches!(
            verifier().verify(&token).await,
            Err(IdentityError::InvalidToken(_))
        );
    }

    #[tokio::test]
    async fn different_secret_fails() {
        let token = issue_token("uid-1", None, "another-secret", 600).unwrap();
        assert!(verifier().verify(&token).await.is_err());
    }

    #[tokio::test]
    async fn issuer_is_enforced_when_configured() {
        let config = IdentityConfig {
            issuer: Some("https://issuer.example".into()),
            ..IdentityConfig::default()
        };
        let strict = SharedSecretVerifier::new(SECRET, &config);
        let token = issue_token("uid-1", None, SECRET, 600).unwrap();
        assert!(strict.verify(&token).await.is_err());
    }
}
