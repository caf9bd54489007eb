use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Deserialize)]
struct JwksResponse {
    keys: Vec<Jwk>,
}

/// Signing key published by the identity provider (RSA or EC)
#[derive(Debug, Clone, Deserialize)]
struct Jwk {
    kid: String,
    kty: String,
    #[serde(default)]
    n: Option<String>,
    #[serde(default)]
    e: Option<String>,
    #[serde(default)]
    x: Option<String>,
    #[serde(default)]
    y: Option<String>,
}

struct JwksCache {
    keys: HashMap<String, DecodingKey>,
    last_fetched: Instant,
}

/// Fetches and caches the identity provider's signing keys
pub struct JwksClient {
    issuer_url: String,
    client: reqwest::Client,
    cache: Arc<RwLock<Option<JwksCache>>>,
    cache_ttl: Duration,
}

impl JwksClient {
    pub fn new(issuer_url: &str, cache_ttl: Duration) -> Self {
        Self {
            issuer_url: issuer_url.to_string(),
            client: reqwest::Client::new(),
            cache: Arc::new(RwLock::new(None)),
            cache_ttl,
        }
    }

    /// Client whose cache is already filled from a JWKS document
    #[cfg(test)]
    pub fn preloaded(jwks_json: &str, cache_ttl: Duration) -> Result<Self, JwksError> {
        let jwks: JwksResponse =
            serde_json::from_str(jwks_json).map_err(|e| JwksError::ParseError(e.to_string()))?;

        Ok(Self {
            issuer_url: String::new(),
            client: reqwest::Client::new(),
            cache: Arc::new(RwLock::new(Some(JwksCache {
                keys: decoding_keys(jwks)?,
                last_fetched: Instant::now(),
            }))),
            cache_ttl,
        })
    }

    pub async fn get_key(&self, kid: &str) -> Result<DecodingKey, JwksError> {
        {
            let cache = self.cache.read().await;
            if let Some(ref cached) = *cache {
                if cached.last_fetched.elapsed() < self.cache_ttl {
                    if let Some(key) = cached.keys.get(kid) {
                        return Ok(key.clone());
                    }
                }
            }
        }

        // Unknown kid or stale cache: the provider may have rotated keys
        self.fetch_jwks().await?;

        let cache = self.cache.read().await;
        cache
            .as_ref()
            .and_then(|cached| cached.keys.get(kid).cloned())
            .ok_or_else(|| JwksError::KeyNotFound(kid.to_string()))
    }

    async fn fetch_jwks(&self) -> Result<(), JwksError> {
        let jwks_url = format!("{}/jwks", self.issuer_url);
        tracing::debug!("Fetching JWKS from {}", jwks_url);

        let response = self
            .client
            .get(&jwks_url)
            .send()
            .await
            .map_err(|e| JwksError::FetchError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(JwksError::FetchError(format!(
                "Failed to fetch JWKS: HTTP {}",
                response.status()
            )));
        }

        let jwks: JwksResponse = response
            .json()
            .await
            .map_err(|e| JwksError::ParseError(e.to_string()))?;

        let keys = decoding_keys(jwks)?;
        tracing::debug!("Cached {} signing keys", keys.len());

        let mut cache = self.cache.write().await;
        *cache = Some(JwksCache {
            keys,
            last_fetched: Instant::now(),
        });

        Ok(())
    }
}

/// Convert published keys into decoding keys, skipping key types we cannot use
fn decoding_keys(jwks: JwksResponse) -> Result<HashMap<String, DecodingKey>, JwksError> {
    let mut keys = HashMap::new();

    for jwk in jwks.keys {
        let key = match (jwk.kty.as_str(), &jwk.n, &jwk.e, &jwk.x, &jwk.y) {
            ("RSA", Some(n), Some(e), _, _) => DecodingKey::from_rsa_components(n, e),
            ("EC", _, _, Some(x), Some(y)) => DecodingKey::from_ec_components(x, y),
            _ => {
                tracing::debug!("Skipping unsupported JWK {} ({})", jwk.kid, jwk.kty);
                continue;
            }
        }
        .map_err(|e| JwksError::KeyConversionError(e.to_string()))?;

        keys.insert(jwk.kid, key);
    }

    Ok(keys)
}

#[derive(Debug, thiserror::Error)]
pub enum JwksError {
    #[error("Failed to fetch JWKS: {0}")]
    FetchError(String),

    #[error("Failed to parse JWKS: {0}")]
    ParseError(String),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Failed to convert key: {0}")]
    KeyConversionError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODULUS: &str = include_str!("testdata/jwt_signing_key.n");

    fn jwks_json() -> String {
        serde_json::json!({
            "keys": [
                { "kid": "rsa-1", "kty": "RSA", "alg": "RS256", "n": MODULUS, "e": "AQAB" },
                { "kid": "oct-1", "kty": "oct", "k": "c2VjcmV0" }
            ]
        })
        .to_string()
    }

    #[test]
    fn test_decoding_keys_skips_unsupported_types() {
        let jwks: JwksResponse = serde_json::from_str(&jwks_json()).unwrap();
        let keys = decoding_keys(jwks).unwrap();

        assert!(keys.contains_key("rsa-1"));
        assert!(!keys.contains_key("oct-1"));
    }

    #[test]
    fn test_rsa_key_without_exponent_is_skipped() {
        let jwks: JwksResponse =
            serde_json::from_str(r#"{"keys":[{"kid":"broken","kty":"RSA","n":"AQAB"}]}"#).unwrap();
        assert!(decoding_keys(jwks).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_preloaded_cache_serves_known_kid() {
        let client = JwksClient::preloaded(&jwks_json(), Duration::from_secs(60)).unwrap();
        assert!(client.get_key("rsa-1").await.is_ok());
    }
}
