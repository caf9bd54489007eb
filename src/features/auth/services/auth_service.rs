use crate::core::error::{AppError, Result};
use crate::features::auth::clients::IdentityProvider;
use crate::features::auth::dtos::{
    normalize_email, AuthUserDto, LoginRequestDto, MeResponseDto, RegisterRequestDto,
};
use crate::features::auth::model::{AuthenticatedUser, SessionTokens};
use crate::features::auth::services::token_service::TokenIssuer;
use crate::features::profiles::models::NewProfile;
use crate::features::profiles::ProfileService;
use std::sync::Arc;

/// A signed-in account plus the tokens to store in its session cookies
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: AuthUserDto,
    pub tokens: SessionTokens,
}

/// Service for authentication operations (register, login, logout)
pub struct AuthService {
    identity: Arc<dyn IdentityProvider>,
    tokens: Arc<dyn TokenIssuer>,
    profiles: Arc<ProfileService>,
}

impl AuthService {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        tokens: Arc<dyn TokenIssuer>,
        profiles: Arc<ProfileService>,
    ) -> Self {
        Self {
            identity,
            tokens,
            profiles,
        }
    }

    /// Register a new account. Expects an already validated request.
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<AuthSession> {
        let email = normalize_email(&dto.email);
        let full_name = dto
            .full_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let user = self
            .identity
            .create_user(&email, &dto.password, full_name.clone())
            .await?;

        // The account exists at this point; a missing profile is recreated on first use
        if let Err(e) = self
            .profiles
            .create(NewProfile {
                id: user.id.clone(),
                email: Some(email),
                full_name,
            })
            .await
        {
            tracing::error!("Failed to create profile for new user {}: {}", user.id, e);
        }

        let tokens = self.tokens.issue_for_user(&user.id).await?;

        tracing::info!("Registered user {}", user.id);

        Ok(AuthSession {
            user: user.into(),
            tokens,
        })
    }

    /// Login with email and password
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthSession> {
        let email = normalize_email(&dto.email);

        let user = self
            .identity
            .find_user_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        if user.is_suspended {
            return Err(AppError::Forbidden("Account is suspended".to_string()));
        }

        if !self.identity.verify_password(&user.id, &dto.password).await? {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        let tokens = self.tokens.issue_for_user(&user.id).await?;

        Ok(AuthSession {
            user: user.into(),
            tokens,
        })
    }

    /// Revoke the refresh token if there is one. Never fails: the cookies are
    /// cleared regardless.
    pub async fn logout(&self, refresh_token: Option<&str>) {
        let Some(token) = refresh_token else {
            return;
        };

        if let Err(e) = self.tokens.revoke(token).await {
            tracing::warn!("Failed to revoke refresh token on logout: {}", e);
        }
    }

    /// Current user info (for /me endpoint)
    pub async fn me(&self, user: AuthenticatedUser) -> Result<MeResponseDto> {
        let profile = self.profiles.get_or_create(&user).await?;

        Ok(MeResponseDto {
            user,
            profile: profile.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::clients::MockIdentityProvider;
    use crate::features::auth::model::IdentityUser;
    use crate::features::auth::services::MockTokenIssuer;
    use crate::features::profiles::repositories::MockProfileRepository;
    use crate::shared::test_helpers::{identity_fixture, profile_fixture};
    use sqlx::Error as SqlxError;

    fn issued() -> SessionTokens {
        SessionTokens {
            access_token: "access".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_in: 3600,
        }
    }

    fn service(
        identity: MockIdentityProvider,
        tokens: MockTokenIssuer,
        profiles: MockProfileRepository,
    ) -> AuthService {
        AuthService::new(
            Arc::new(identity),
            Arc::new(tokens),
            Arc::new(ProfileService::new(Arc::new(profiles))),
        )
    }

    fn register_dto(email: &str) -> RegisterRequestDto {
        RegisterRequestDto {
            email: email.to_string(),
            password: "correct horse".to_string(),
            full_name: Some(" Ana Lima ".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_creates_identity_profile_and_session() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_create_user()
            .withf(|email, _, name| email == "ana@example.com" && name.as_deref() == Some("Ana Lima"))
            .times(1)
            .returning(|email, _, name| {
                Ok(IdentityUser {
                    id: "user-1".to_string(),
                    email: Some(email.to_string()),
                    name,
                    is_suspended: false,
                })
            });
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_insert()
            .withf(|p| p.id == "user-1" && p.email.as_deref() == Some("ana@example.com"))
            .times(1)
            .returning(|p| Ok(profile_fixture(&p.id, false)));
        let mut tokens = MockTokenIssuer::new();
        tokens
            .expect_issue_for_user()
            .withf(|id| id == "user-1")
            .returning(|_| Ok(issued()));

        let session = service(identity, tokens, profiles)
            .register(register_dto("Ana@Example.com"))
            .await
            .unwrap();

        assert_eq!(session.user.id, "user-1");
        assert_eq!(session.tokens, issued());
    }

    #[tokio::test]
    async fn test_register_survives_profile_insert_failure() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_create_user()
            .returning(|_, _, _| Ok(identity_fixture("user-2", false)));
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_insert()
            .returning(|_| Err(AppError::Database(SqlxError::PoolTimedOut)));
        let mut tokens = MockTokenIssuer::new();
        tokens.expect_issue_for_user().returning(|_| Ok(issued()));

        let session = service(identity, tokens, profiles)
            .register(register_dto("bea@example.com"))
            .await
            .unwrap();

        assert_eq!(session.user.id, "user-2");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_issues_no_tokens() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_create_user()
            .returning(|_, _, _| Err(AppError::Conflict("Email already registered".to_string())));
        let mut profiles = MockProfileRepository::new();
        profiles.expect_insert().never();
        let mut tokens = MockTokenIssuer::new();
        tokens.expect_issue_for_user().never();

        let err = service(identity, tokens, profiles)
            .register(register_dto("taken@example.com"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "conflict");
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_unauthorized() {
        let mut identity = MockIdentityProvider::new();
        identity.expect_find_user_by_email().returning(|_| Ok(None));
        identity.expect_verify_password().never();

        let err = service(identity, MockTokenIssuer::new(), MockProfileRepository::new())
            .login(LoginRequestDto {
                email: "nobody@example.com".to_string(),
                password: "whatever".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), "unauthorized");
    }

    #[tokio::test]
    async fn test_login_suspended_account_is_forbidden() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_find_user_by_email()
            .returning(|_| Ok(Some(identity_fixture("user-3", true))));
        identity.expect_verify_password().never();

        let err = service(identity, MockTokenIssuer::new(), MockProfileRepository::new())
            .login(LoginRequestDto {
                email: "suspended@example.com".to_string(),
                password: "whatever".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), "forbidden");
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_unauthorized() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_find_user_by_email()
            .returning(|_| Ok(Some(identity_fixture("user-4", false))));
        identity
            .expect_verify_password()
            .withf(|id, _| id == "user-4")
            .returning(|_, _| Ok(false));
        let mut tokens = MockTokenIssuer::new();
        tokens.expect_issue_for_user().never();

        let err = service(identity, tokens, MockProfileRepository::new())
            .login(LoginRequestDto {
                email: "user4@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), "unauthorized");
    }

    #[tokio::test]
    async fn test_logout_ignores_revocation_failure() {
        let mut tokens = MockTokenIssuer::new();
        tokens
            .expect_revoke()
            .times(1)
            .returning(|_| Err(AppError::ExternalServiceError("down".to_string())));

        service(MockIdentityProvider::new(), tokens, MockProfileRepository::new())
            .logout(Some("refresh"))
            .await;
    }
}
