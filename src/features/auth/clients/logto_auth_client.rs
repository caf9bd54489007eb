use crate::core::error::{AppError, Result};
use crate::features::auth::model::IdentityUser;
use crate::features::logto::LogtoTokenManager;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Account operations at the identity provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account; `Conflict` when the email is already registered
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
    ) -> Result<IdentityUser>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<IdentityUser>>;

    /// `Ok(false)` for a wrong password
    async fn verify_password(&self, user_id: &str, password: &str) -> Result<bool>;
}

/// Logto user response from Management API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogtoUserResponse {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    primary_email: Option<String>,
    #[serde(default)]
    is_suspended: bool,
}

impl From<LogtoUserResponse> for IdentityUser {
    fn from(u: LogtoUserResponse) -> Self {
        Self {
            id: u.id,
            email: u.primary_email,
            name: u.name,
            is_suspended: u.is_suspended,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserRequest<'a> {
    primary_email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct VerifyPasswordRequest<'a> {
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LogtoErrorResponse {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: String,
}

impl LogtoErrorResponse {
    fn is_duplicate_email(&self) -> bool {
        self.code == "user.email_already_in_use"
            || self.code == "user.email.exists"
            || self.message.contains("already")
    }
}

/// Client for Logto Management API auth operations
pub struct LogtoAuthClient {
    token_manager: Arc<LogtoTokenManager>,
    http_client: reqwest::Client,
}

impl LogtoAuthClient {
    pub fn new(token_manager: Arc<LogtoTokenManager>) -> Self {
        Self {
            token_manager,
            http_client: reqwest::Client::new(),
        }
    }

    async fn m2m_token(&self) -> Result<String> {
        self.token_manager.bearer_token().await
    }
}

#[async_trait]
impl IdentityProvider for LogtoAuthClient {
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
    ) -> Result<IdentityUser> {
        let token = self.m2m_token().await?;
        let url = self.token_manager.management_url("/api/users");

        tracing::debug!("Creating user in Logto: {}", email);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&token)
            .json(&CreateUserRequest {
                primary_email: email,
                password,
                name,
            })
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Failed to create user: {}", e)))?;

        let status = response.status();

        if status.is_success() {
            let user = response.json::<LogtoUserResponse>().await.map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to parse user response: {}", e))
            })?;

            tracing::info!("Successfully created user: {}", user.id);
            return Ok(user.into());
        }

        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 422 || status.as_u16() == 400 {
            if let Ok(error_response) = serde_json::from_str::<LogtoErrorResponse>(&body) {
                if error_response.is_duplicate_email() {
                    return Err(AppError::Conflict("Email already registered".to_string()));
                }
                return Err(AppError::validation(error_response.message));
            }
            return Err(AppError::validation("Invalid registration request"));
        }

        tracing::error!("Logto API error: HTTP {} - {}", status, body);
        Err(AppError::ExternalServiceError(format!(
            "Logto API error: HTTP {}",
            status
        )))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<IdentityUser>> {
        let token = self.m2m_token().await?;

        let url = format!(
            "{}?search.primaryEmail={}&mode.primaryEmail=exact",
            self.token_manager.management_url("/api/users"),
            urlencoding::encode(email)
        );

        tracing::debug!("Searching for user by email: {}", email);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Failed to search users: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Logto API error: HTTP {} - {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "Logto API error: HTTP {}",
                status
            )));
        }

        let users = response
            .json::<Vec<LogtoUserResponse>>()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to parse users response: {}", e))
            })?;

        Ok(users
            .into_iter()
            .find(|u| {
                u.primary_email
                    .as_deref()
                    .is_some_and(|e| e.eq_ignore_ascii_case(email))
            })
            .map(Into::into))
    }

    async fn verify_password(&self, user_id: &str, password: &str) -> Result<bool> {
        let token = self.m2m_token().await?;

        let url = self
            .token_manager
            .management_url(&format!("/api/users/{}/password/verify", user_id));

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&token)
            .json(&VerifyPasswordRequest { password })
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to verify password: {}", e))
            })?;

        match response.status().as_u16() {
            204 => Ok(true),
            422 => Ok(false),
            status => {
                let body = response.text().await.unwrap_or_default();
                tracing::error!("Logto API error: HTTP {} - {}", status, body);
                Err(AppError::ExternalServiceError(format!(
                    "Logto API error: HTTP {}",
                    status
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_email_codes() {
        let parse = |s: &str| serde_json::from_str::<LogtoErrorResponse>(s).unwrap();

        assert!(parse(r#"{"code":"user.email_already_in_use","message":"x"}"#).is_duplicate_email());
        assert!(parse(r#"{"code":"other","message":"This email is already in use."}"#)
            .is_duplicate_email());
        assert!(!parse(r#"{"code":"guard.invalid_input","message":"bad"}"#).is_duplicate_email());
    }

    #[test]
    fn test_user_response_maps_to_identity_user() {
        let user: LogtoUserResponse = serde_json::from_str(
            r#"{"id":"u1","name":null,"primaryEmail":"a@b.test","isSuspended":true,"avatar":null}"#,
        )
        .unwrap();
        let identity: IdentityUser = user.into();

        assert_eq!(identity.id, "u1");
        assert_eq!(identity.email.as_deref(), Some("a@b.test"));
        assert!(identity.is_suspended);
    }
}
