//! RS256 verification against a remote JSON Web Key Set.
//!
//! Keys are cached by `kid`. A token naming an unknown `kid` triggers one
//! refetch of the set, which covers provider key rotation.

use std::collections::HashMap;

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use tokio::sync::RwLock;

use super::identity::{build_validation, Identity, IdentityClaims, IdentityError, IdentityVerifier};
use crate::config::IdentityConfig;

pub struct JwksVerifier {
    client: reqwest::Client,
    url: String,
    validation: Validation,
    keys: RwLock<HashMap<String, DecodingKey>>,
}

impl JwksVerifier {
    pub fn new(url: String, config: &IdentityConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            validation: build_validation(Algorithm::RS256, config),
            keys: RwLock::new(HashMap::new()),
        }
    }

    async fn cached_key(&self, kid: &str) -> Option<DecodingKey> {
        self.keys.read().await.get(kid).cloned()
    }

    /// Replace the cache with the provider's current key set.
    async fn refresh(&self) -> Result<(), IdentityError> {
        let set: JwkSet = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut keys = HashMap::new();
        for jwk in &set.keys {
            let Some(kid) = jwk.common.key_id.clone() else {
                continue;
            };
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    keys.insert(kid, key);
                }
                Err(e) => tracing::warn!(kid = %kid, error = %e, "Skipping unusable JWK"),
            }
        }
        tracing::debug!(count = keys.len(), "Refreshed identity key set");
        *self.keys.write().await = keys;
        Ok(())
    }

    async fn key_for(&self, kid: &str) -> Result<DecodingKey, IdentityError> {
        if let Some(key) = self.cached_key(kid).await {
            return Ok(key);
        }
        self.refresh().await?;
        self.cached_key(kid)
            .await
            .ok_or_else(|| IdentityError::UnknownKey(kid.to_string()))
    }
}

#[async_trait]
impl IdentityVerifier for JwksVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, IdentityError> {
        let header = decode_header(token)?;
        let kid = header.kid.ok_or(IdentityError::MissingKeyId)?;
        let key = self.key_for(&kid).await?;
        let data = decode::<IdentityClaims>(token, &key, &self.validation)?;
        Ok(data.claims.into())
    }
}
