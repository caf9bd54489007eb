use crate::core::config::AuthTokenConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::SessionTokens;
use crate::features::logto::LogtoTokenManager;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Issues, refreshes and revokes session tokens at the identity provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Mint a session for an account the storefront has already authenticated
    async fn issue_for_user(&self, user_id: &str) -> Result<SessionTokens>;

    /// Run the refresh grant; `Unauthorized` when the refresh token is no longer valid
    async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens>;

    async fn revoke(&self, refresh_token: &str) -> Result<()>;
}

/// Response from Logto subject token creation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubjectTokenResponse {
    subject_token: String,
    expires_in: u64,
}

/// Response from the Logto token endpoint (token exchange and refresh grants)
#[derive(Debug, Deserialize)]
struct TokenEndpointResponse {
    access_token: String,
    expires_in: i64,
    refresh_token: Option<String>,
}

impl From<TokenEndpointResponse> for SessionTokens {
    fn from(r: TokenEndpointResponse) -> Self {
        Self {
            access_token: r.access_token,
            refresh_token: r.refresh_token,
            expires_in: r.expires_in,
        }
    }
}

/// Request body for subject token creation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSubjectTokenRequest {
    user_id: String,
}

/// Service for creating Logto OIDC tokens via subject token exchange
pub struct TokenService {
    config: AuthTokenConfig,
    token_manager: Arc<LogtoTokenManager>,
    http_client: reqwest::Client,
}

impl TokenService {
    pub fn new(config: AuthTokenConfig, token_manager: Arc<LogtoTokenManager>) -> Self {
        Self {
            config,
            token_manager,
            http_client: reqwest::Client::new(),
        }
    }

    fn basic_auth_header(&self) -> String {
        let credentials = format!(
            "{}:{}",
            self.config.token_exchange_app_id, self.config.token_exchange_app_secret
        );
        format!("Basic {}", BASE64.encode(credentials.as_bytes()))
    }

    /// Create a subject token for the user via Logto Management API
    async fn create_subject_token(&self, user_id: &str) -> Result<String> {
        let m2m_token = self.token_manager.bearer_token().await?;
        let url = self.token_manager.management_url("/api/subject-tokens");

        tracing::debug!("Creating subject token for user: {}", user_id);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&m2m_token)
            .json(&CreateSubjectTokenRequest {
                user_id: user_id.to_string(),
            })
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to create subject token: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                "Logto API error creating subject token: HTTP {} - {}",
                status,
                body
            );
            return Err(AppError::ExternalServiceError(format!(
                "Failed to create subject token: HTTP {}",
                status
            )));
        }

        let subject_token_response: SubjectTokenResponse = response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse subject token response: {}", e))
        })?;

        tracing::debug!(
            "Subject token created, expires in {} seconds",
            subject_token_response.expires_in
        );

        Ok(subject_token_response.subject_token)
    }

    /// POST a grant to the OIDC token endpoint.
    ///
    /// With `session_grant`, a rejected grant means the caller's session is
    /// over and maps to `Unauthorized` instead of an upstream failure.
    async fn token_grant(
        &self,
        form: &[(&str, &str)],
        grant: &str,
        session_grant: bool,
    ) -> Result<SessionTokens> {
        let response = self
            .http_client
            .post(&self.config.oidc_token_url)
            .header("Authorization", self.basic_auth_header())
            .form(form)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} failed: {}", grant, e)))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("{} failed: HTTP {} - {}", grant, status, body);

            if session_grant && (status.as_u16() == 400 || status.as_u16() == 401) {
                return Err(AppError::Unauthorized(
                    "Invalid or expired session".to_string(),
                ));
            }

            return Err(AppError::ExternalServiceError(format!(
                "{} failed: HTTP {}",
                grant, status
            )));
        }

        let tokens: TokenEndpointResponse = response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse {} response: {}", grant, e))
        })?;

        tracing::info!(
            "{} successful, expires in {} seconds, refresh_token present: {}",
            grant,
            tokens.expires_in,
            tokens.refresh_token.is_some()
        );

        Ok(tokens.into())
    }
}

#[async_trait]
impl TokenIssuer for TokenService {
    async fn issue_for_user(&self, user_id: &str) -> Result<SessionTokens> {
        let subject_token = self.create_subject_token(user_id).await?;

        let form = [
            (
                "grant_type",
                "urn:ietf:params:oauth:grant-type:token-exchange",
            ),
            ("subject_token", subject_token.as_str()),
            (
                "subject_token_type",
                "urn:ietf:params:oauth:token-type:access_token",
            ),
            ("resource", self.config.api_resource.as_str()),
            ("scope", self.config.token_scopes.as_str()),
        ];

        self.token_grant(&form, "Token exchange", false).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens> {
        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("resource", self.config.api_resource.as_str()),
            ("scope", self.config.token_scopes.as_str()),
        ];

        self.token_grant(&form, "Token refresh", true).await
    }

    async fn revoke(&self, refresh_token: &str) -> Result<()> {
        let response = self
            .http_client
            .post(&self.config.revocation_url)
            .header("Authorization", self.basic_auth_header())
            .form(&[
                ("token", refresh_token),
                ("token_type_hint", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to revoke token: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Token revocation failed: HTTP {}",
                response.status()
            )));
        }

        Ok(())
    }
}
