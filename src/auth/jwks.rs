// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity-provider signing keys (JWKS) fetching and caching.
//!
//! The provider publishes its token-signing keys at a JWKS endpoint. Keys
//! are fetched over HTTPS and cached with a TTL so each verification does
//! not pay a network round trip. Failures here are internal detail; the
//! verifier collapses them into `InvalidToken` for callers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use jsonwebtoken::jwk::{AlgorithmParameters, Jwk, JwkSet};
use jsonwebtoken::{Algorithm, DecodingKey, Header};
use tokio::sync::RwLock;

/// Default JWKS cache TTL (5 minutes).
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Errors while obtaining a decoding key. Logged internally only.
#[derive(Debug, thiserror::Error)]
pub enum JwksError {
    #[error("failed to fetch JWKS: {0}")]
    Fetch(String),

    #[error("no usable key in JWKS")]
    NoUsableKey,

    #[error("unsupported key type in JWKS")]
    UnsupportedKey,
}

struct CachedKeys {
    jwks: JwkSet,
    fetched_at: Instant,
}

/// JWKS client with TTL caching.
#[derive(Clone)]
pub struct JwksClient {
    jwks_url: String,
    cache_ttl: Duration,
    cache: Arc<RwLock<Option<CachedKeys>>>,
    http: reqwest::Client,
}

impl JwksClient {
    /// Create a client for the given JWKS endpoint URL.
    pub fn new(jwks_url: impl Into<String>) -> Self {
        Self {
            jwks_url: jwks_url.into(),
            cache_ttl: DEFAULT_CACHE_TTL,
            cache: Arc::new(RwLock::new(None)),
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Override the cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// The configured JWKS endpoint URL.
    pub fn jwks_url(&self) -> &str {
        &self.jwks_url
    }

    /// Whether a fresh key set is currently cached.
    pub async fn is_cached(&self) -> bool {
        let cache = self.cache.read().await;
        matches!(&*cache, Some(entry) if entry.fetched_at.elapsed() < self.cache_ttl)
    }

    /// Force a refresh of the cached key set.
    pub async fn refresh(&self) -> Result<(), JwksError> {
        let jwks = self.fetch().await?;
        let mut cache = self.cache.write().await;
        *cache = Some(CachedKeys {
            jwks,
            fetched_at: Instant::now(),
        });
        Ok(())
    }

    /// Resolve the decoding key for a token header.
    ///
    /// When the header carries a `kid`, the matching key is required; without
    /// one, the first convertible key in the set is used.
    pub async fn decoding_key_for(
        &self,
        header: &Header,
    ) -> Result<(DecodingKey, Algorithm), JwksError> {
        let jwks = self.cached_or_fetch().await?;

        match &header.kid {
            Some(kid) => {
                let jwk = jwks
                    .keys
                    .iter()
                    .find(|k| k.common.key_id.as_deref() == Some(kid.as_str()))
                    .ok_or(JwksError::NoUsableKey)?;
                decoding_key(jwk)
            }
            None => jwks
                .keys
                .iter()
                .find_map(|jwk| decoding_key(jwk).ok())
                .ok_or(JwksError::NoUsableKey),
        }
    }

    async fn cached_or_fetch(&self) -> Result<JwkSet, JwksError> {
        {
            let cache = self.cache.read().await;
            if let Some(entry) = &*cache {
                if entry.fetched_at.elapsed() < self.cache_ttl {
                    return Ok(entry.jwks.clone());
                }
            }
        }

        let jwks = self.fetch().await?;

        {
            let mut cache = self.cache.write().await;
            *cache = Some(CachedKeys {
                jwks: jwks.clone(),
                fetched_at: Instant::now(),
            });
        }

        Ok(jwks)
    }

    async fn fetch(&self) -> Result<JwkSet, JwksError> {
        let response = self
            .http
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| JwksError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(JwksError::Fetch(format!(
                "HTTP {} from JWKS endpoint",
                response.status()
            )));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| JwksError::Fetch(e.to_string()))
    }
}

/// Convert a JWK to a decoding key plus the algorithm to validate with.
fn decoding_key(jwk: &Jwk) -> Result<(DecodingKey, Algorithm), JwksError> {
    match &jwk.algorithm {
        AlgorithmParameters::RSA(rsa) => {
            let key = DecodingKey::from_rsa_components(&rsa.n, &rsa.e)
                .map_err(|_| JwksError::UnsupportedKey)?;

            let alg = jwk
                .common
                .key_algorithm
                .map(|a| match a {
                    jsonwebtoken::jwk::KeyAlgorithm::RS256 => Algorithm::RS256,
                    jsonwebtoken::jwk::KeyAlgorithm::RS384 => Algorithm::RS384,
                    jsonwebtoken::jwk::KeyAlgorithm::RS512 => Algorithm::RS512,
                    _ => Algorithm::RS256,
                })
                .unwrap_or(Algorithm::RS256);

            Ok((key, alg))
        }
        AlgorithmParameters::EllipticCurve(ec) => {
            let key = DecodingKey::from_ec_components(&ec.x, &ec.y)
                .map_err(|_| JwksError::UnsupportedKey)?;

            let alg = jwk
                .common
                .key_algorithm
                .map(|a| match a {
                    jsonwebtoken::jwk::KeyAlgorithm::ES256 => Algorithm::ES256,
                    jsonwebtoken::jwk::KeyAlgorithm::ES384 => Algorithm::ES384,
                    _ => Algorithm::ES256,
                })
                .unwrap_or(Algorithm::ES256);

            Ok((key, alg))
        }
        _ => Err(JwksError::UnsupportedKey),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_records_url() {
        let client = JwksClient::new("https://idp.example/.well-known/jwks.json");
        assert_eq!(client.jwks_url(), "https://idp.example/.well-known/jwks.json");
    }

    #[test]
    fn custom_cache_ttl() {
        let client = JwksClient::new("https://idp.example/.well-known/jwks.json")
            .with_cache_ttl(Duration::from_secs(60));
        assert_eq!(client.cache_ttl, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn cache_initially_empty() {
        let client = JwksClient::new("https://idp.example/.well-known/jwks.json");
        assert!(!client.is_cached().await);
    }
}
