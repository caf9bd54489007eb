use super::model::AuthenticatedUser;
use crate::core::error::{AppError, Result};
use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
#[cfg(test)]
use mockall::automock;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use super::jwks::JwksClient;

/// Algorithms the identity provider signs access tokens with
const ALLOWED_ALGORITHMS: [Algorithm; 3] = [Algorithm::RS256, Algorithm::ES256, Algorithm::ES384];

/// Verifies a session access token and resolves its identity
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    async fn verify(&self, access_token: &str) -> Result<AuthenticatedUser>;
}

pub struct JwtValidator {
    jwks_client: Arc<JwksClient>,
    issuer: String,
    audience: String,
    leeway: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    sub: String,
    #[serde(rename = "iss")]
    _iss: String,
    #[serde(rename = "aud")]
    _aud: AudienceClaim,
    #[serde(rename = "exp")]
    _exp: u64,

    // Token exchange tokens may omit these
    #[serde(default)]
    kind: Option<String>,
    #[serde(rename = "sessionUid", default)]
    session_uid: Option<String>,
}

/// Audience can be either a single string or an array of strings
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
#[allow(dead_code)]
enum AudienceClaim {
    Single(String),
    Multiple(Vec<String>),
}

impl JwtValidator {
    pub fn new(
        jwks_client: Arc<JwksClient>,
        issuer: String,
        audience: String,
        leeway: Duration,
    ) -> Self {
        Self {
            jwks_client,
            issuer,
            audience,
            leeway: leeway.as_secs(),
        }
    }

    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser> {
        let header =
            decode_header(token).map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        if !ALLOWED_ALGORITHMS.contains(&header.alg) {
            return Err(AppError::Unauthorized(format!(
                "Unsupported algorithm: {:?}",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| AppError::Unauthorized("Missing kid in token header".to_string()))?;

        let decoding_key = self
            .jwks_client
            .get_key(&kid)
            .await
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        let mut validation = Validation::new(header.alg);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway;
        validation.validate_nbf = true;

        let claims = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?
            .claims;

        if let Some(kind) = &claims.kind {
            if kind != "AccessToken" {
                return Err(AppError::Unauthorized(
                    "Token is not an access token".to_string(),
                ));
            }
        }

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            session_uid: claims.session_uid,
        })
    }
}

#[async_trait]
impl SessionVerifier for JwtValidator {
    async fn verify(&self, access_token: &str) -> Result<AuthenticatedUser> {
        self.validate_token(access_token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SIGNING_KEY_DER: &[u8] = include_bytes!("testdata/jwt_signing_key.der");
    const MODULUS: &str = include_str!("testdata/jwt_signing_key.n");
    const ISSUER: &str = "https://auth.example.test/oidc";
    const AUDIENCE: &str = "https://api.example.test";

    fn validator() -> JwtValidator {
        let jwks = json!({
            "keys": [{ "kid": "test-key", "kty": "RSA", "n": MODULUS, "e": "AQAB" }]
        })
        .to_string();

        JwtValidator::new(
            Arc::new(JwksClient::preloaded(&jwks, Duration::from_secs(3600)).unwrap()),
            ISSUER.to_string(),
            AUDIENCE.to_string(),
            Duration::from_secs(0),
        )
    }

    fn sign(claims: serde_json::Value) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some("test-key".to_string());
        encode(&header, &claims, &EncodingKey::from_rsa_der(SIGNING_KEY_DER)).unwrap()
    }

    fn claims(overrides: serde_json::Value) -> serde_json::Value {
        let now = chrono::Utc::now().timestamp();
        let mut base = json!({
            "sub": "user-42",
            "iss": ISSUER,
            "aud": AUDIENCE,
            "iat": now,
            "exp": now + 600,
        });
        if let (Some(base), Some(extra)) = (base.as_object_mut(), overrides.as_object()) {
            for (k, v) in extra {
                base.insert(k.clone(), v.clone());
            }
        }
        base
    }

    #[tokio::test]
    async fn test_valid_token_resolves_subject() {
        let token = sign(claims(json!({ "sessionUid": "s-1" })));
        let user = validator().verify(&token).await.unwrap();

        assert_eq!(user.user_id, "user-42");
        assert_eq!(user.session_uid.as_deref(), Some("s-1"));
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let past = chrono::Utc::now().timestamp() - 3600;
        let token = sign(claims(json!({ "iat": past - 600, "exp": past })));

        let err = validator().verify(&token).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_wrong_audience_is_rejected() {
        let token = sign(claims(json!({ "aud": "https://other.example.test" })));
        assert!(validator().verify(&token).await.is_err());
    }

    #[tokio::test]
    async fn test_non_access_token_kind_is_rejected() {
        let token = sign(claims(json!({ "kind": "RefreshToken" })));
        assert!(validator().verify(&token).await.is_err());
    }

    #[tokio::test]
    async fn test_garbage_is_rejected() {
        let err = validator().verify("not-a-jwt").await.unwrap_err();
        assert_eq!(err.code(), "unauthorized");
    }
}
