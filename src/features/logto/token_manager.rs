use crate::core::config::LogtoM2MConfig;
use crate::core::error::{AppError, Result};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Refetch this long before the provider-reported expiry
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct ClientCredentialsResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    bearer: String,
    refresh_after: Instant,
}

/// Holds the Management API bearer used for account operations
/// (user creation, password checks, subject tokens) and the API root it is valid for.
pub struct LogtoTokenManager {
    config: LogtoM2MConfig,
    client: reqwest::Client,
    cache: RwLock<Option<CachedToken>>,
}

impl LogtoTokenManager {
    pub fn new(config: LogtoM2MConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            cache: RwLock::new(None),
        }
    }

    /// Management API URL for `path`, e.g. `/api/users`
    pub fn management_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Cached bearer token, fetched again once it nears expiry
    pub async fn bearer_token(&self) -> Result<String> {
        if let Some(cached) = self.cache.read().await.as_ref() {
            if Instant::now() < cached.refresh_after {
                return Ok(cached.bearer.clone());
            }
        }

        let mut cache = self.cache.write().await;

        // Another request may have refreshed while we waited for the write lock
        if let Some(cached) = cache.as_ref() {
            if Instant::now() < cached.refresh_after {
                return Ok(cached.bearer.clone());
            }
        }

        let fetched_at = Instant::now();
        let response = self.request_token().await?;

        tracing::info!(
            "Fetched Logto Management API token, expires in {} seconds",
            response.expires_in
        );

        let bearer = response.access_token;
        *cache = Some(CachedToken {
            bearer: bearer.clone(),
            refresh_after: refresh_after(fetched_at, response.expires_in),
        });

        Ok(bearer)
    }

    async fn request_token(&self) -> Result<ClientCredentialsResponse> {
        tracing::debug!("Requesting Logto M2M token from {}", self.config.token_url);

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("scope", self.config.scope.as_str()),
                ("resource", self.config.resource.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Failed to get M2M token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Logto token endpoint error: HTTP {} - {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "M2M token request failed: HTTP {}",
                status
            )));
        }

        response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse M2M token response: {}", e))
        })
    }
}

fn refresh_after(fetched_at: Instant, expires_in_secs: u64) -> Instant {
    fetched_at + Duration::from_secs(expires_in_secs).saturating_sub(REFRESH_MARGIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(api_base_url: &str) -> LogtoTokenManager {
        LogtoTokenManager::new(LogtoM2MConfig {
            client_id: "m2m".to_string(),
            client_secret: "secret".to_string(),
            resource: "https://default.logto.app/api".to_string(),
            scope: "all".to_string(),
            token_url: "http://127.0.0.1:9/oidc/token".to_string(),
            api_base_url: api_base_url.to_string(),
        })
    }

    #[test]
    fn test_management_url_joins_single_slash() {
        assert_eq!(
            manager("https://auth.example.com/").management_url("/api/users"),
            "https://auth.example.com/api/users"
        );
        assert_eq!(
            manager("https://auth.example.com").management_url("api/subject-tokens"),
            "https://auth.example.com/api/subject-tokens"
        );
    }

    #[test]
    fn test_refresh_happens_before_expiry() {
        let now = Instant::now();
        assert_eq!(refresh_after(now, 3600), now + Duration::from_secs(3540));
    }

    #[test]
    fn test_short_lived_token_is_never_reused() {
        let now = Instant::now();
        assert_eq!(refresh_after(now, 30), now);
    }

    #[tokio::test]
    async fn test_cached_token_is_reused_without_fetching() {
        // token_url points at a closed port, so any fetch would fail
        let manager = manager("https://auth.example.com");
        *manager.cache.write().await = Some(CachedToken {
            bearer: "cached".to_string(),
            refresh_after: Instant::now() + Duration::from_secs(600),
        });

        assert_eq!(manager.bearer_token().await.unwrap(), "cached");
    }

    #[tokio::test]
    async fn test_fetch_failure_is_external_service_error() {
        let manager = manager("https://auth.example.com");
        *manager.cache.write().await = Some(CachedToken {
            bearer: "stale".to_string(),
            refresh_after: Instant::now(),
        });

        let err = manager.bearer_token().await.unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(_)));
    }
}
