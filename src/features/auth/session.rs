//! Cookie-carried sessions.
//!
//! Reading a session never touches cookies. [`SessionResolver::resolve`]
//! returns the identity together with a [`SessionUpdate`] describing what
//! should happen to the cookies; the session middleware applies that update
//! to the response after the handler has run.

use std::sync::Arc;

use axum::http::{header, HeaderMap, HeaderValue};
use cookie::{Cookie, SameSite};

use crate::core::config::SessionConfig;
use crate::features::auth::model::{AuthenticatedUser, SessionTokens};
use crate::features::auth::services::TokenIssuer;
use crate::features::auth::SessionVerifier;
use crate::shared::constants::{REFRESH_COOKIE, SESSION_COOKIE};

/// Cookie changes produced by resolving a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    None,
    /// The access token was refreshed; write the new pair
    Refreshed(SessionTokens),
    /// The session is unusable; remove both cookies
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub user: Option<AuthenticatedUser>,
    pub update: SessionUpdate,
}

impl SessionOutcome {
    fn anonymous(update: SessionUpdate) -> Self {
        Self { user: None, update }
    }
}

/// Turns session cookies into an identity, refreshing expired access tokens
pub struct SessionResolver {
    verifier: Arc<dyn SessionVerifier>,
    tokens: Arc<dyn TokenIssuer>,
    config: SessionConfig,
}

impl SessionResolver {
    pub fn new(
        verifier: Arc<dyn SessionVerifier>,
        tokens: Arc<dyn TokenIssuer>,
        config: SessionConfig,
    ) -> Self {
        Self {
            verifier,
            tokens,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub async fn resolve(&self, access: Option<&str>, refresh: Option<&str>) -> SessionOutcome {
        if let Some(token) = access {
            match self.verifier.verify(token).await {
                Ok(user) => {
                    return SessionOutcome {
                        user: Some(user),
                        update: SessionUpdate::None,
                    }
                }
                Err(e) => tracing::debug!("Session access token rejected: {}", e),
            }
        }

        let Some(refresh_token) = refresh else {
            return match access {
                Some(_) => SessionOutcome::anonymous(SessionUpdate::Clear),
                None => SessionOutcome::anonymous(SessionUpdate::None),
            };
        };

        let mut tokens = match self.tokens.refresh(refresh_token).await {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::warn!("Session refresh failed: {}", e);
                return SessionOutcome::anonymous(SessionUpdate::Clear);
            }
        };

        match self.verifier.verify(&tokens.access_token).await {
            Ok(user) => {
                if tokens.refresh_token.is_none() {
                    tokens.refresh_token = Some(refresh_token.to_string());
                }
                SessionOutcome {
                    user: Some(user),
                    update: SessionUpdate::Refreshed(tokens),
                }
            }
            Err(e) => {
                tracing::warn!("Refreshed access token failed verification: {}", e);
                SessionOutcome::anonymous(SessionUpdate::Clear)
            }
        }
    }
}

/// Value of the named cookie from the request's `Cookie` headers
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(|cookie| cookie.ok())
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}

fn session_cookie(name: &'static str, value: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(cookie::time::Duration::seconds(max_age_secs))
        .build()
}

/// `Set-Cookie` headers that store a freshly issued session
pub fn session_cookies(tokens: &SessionTokens, config: &SessionConfig) -> Vec<Cookie<'static>> {
    let mut cookies = vec![session_cookie(
        SESSION_COOKIE,
        tokens.access_token.clone(),
        tokens.expires_in,
        config.cookie_secure,
    )];

    if let Some(refresh) = &tokens.refresh_token {
        cookies.push(session_cookie(
            REFRESH_COOKIE,
            refresh.clone(),
            config.refresh_max_age_days * 24 * 60 * 60,
            config.cookie_secure,
        ));
    }

    cookies
}

/// Cookies that remove both session cookies from the browser
pub fn clearing_cookies(config: &SessionConfig) -> Vec<Cookie<'static>> {
    [SESSION_COOKIE, REFRESH_COOKIE]
        .into_iter()
        .map(|name| {
            let mut cookie = session_cookie(name, String::new(), 0, config.cookie_secure);
            cookie.make_removal();
            cookie
        })
        .collect()
}

/// Append cookies to a response's headers
pub fn append_cookies(headers: &mut HeaderMap, cookies: Vec<Cookie<'static>>) {
    for cookie in cookies {
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                headers.append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Failed to encode {} cookie: {}", cookie.name(), e),
        }
    }
}

/// Whether a handler already wrote the session cookie (login, logout)
pub fn sets_session_cookie(headers: &HeaderMap) -> bool {
    let prefix = format!("{}=", SESSION_COOKIE);
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.starts_with(&prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::auth::services::MockTokenIssuer;
    use crate::features::auth::validator::MockSessionVerifier;

    fn tokens(access: &str, refresh: Option<&str>) -> SessionTokens {
        SessionTokens {
            access_token: access.to_string(),
            refresh_token: refresh.map(str::to_string),
            expires_in: 3600,
        }
    }

    fn resolver(verifier: MockSessionVerifier, issuer: MockTokenIssuer) -> SessionResolver {
        SessionResolver::new(Arc::new(verifier), Arc::new(issuer), SessionConfig::default())
    }

    #[tokio::test]
    async fn test_valid_access_token_needs_no_update() {
        let mut verifier = MockSessionVerifier::new();
        verifier
            .expect_verify()
            .withf(|t| t == "good")
            .returning(|_| Ok(AuthenticatedUser::new("user-1")));
        let mut issuer = MockTokenIssuer::new();
        issuer.expect_refresh().never();

        let outcome = resolver(verifier, issuer)
            .resolve(Some("good"), Some("refresh-1"))
            .await;

        assert_eq!(outcome.user, Some(AuthenticatedUser::new("user-1")));
        assert_eq!(outcome.update, SessionUpdate::None);
    }

    #[tokio::test]
    async fn test_expired_access_token_is_refreshed() {
        let mut verifier = MockSessionVerifier::new();
        verifier
            .expect_verify()
            .withf(|t| t == "expired")
            .returning(|_| Err(AppError::Unauthorized("expired".to_string())));
        verifier
            .expect_verify()
            .withf(|t| t == "fresh")
            .returning(|_| Ok(AuthenticatedUser::new("user-1")));
        let mut issuer = MockTokenIssuer::new();
        issuer
            .expect_refresh()
            .withf(|t| t == "refresh-1")
            .times(1)
            .returning(|_| Ok(tokens("fresh", None)));

        let outcome = resolver(verifier, issuer)
            .resolve(Some("expired"), Some("refresh-1"))
            .await;

        assert_eq!(outcome.user.map(|u| u.user_id).as_deref(), Some("user-1"));
        assert_eq!(
            outcome.update,
            SessionUpdate::Refreshed(tokens("fresh", Some("refresh-1")))
        );
    }

    #[tokio::test]
    async fn test_missing_access_token_with_refresh_token_is_refreshed() {
        let mut verifier = MockSessionVerifier::new();
        verifier
            .expect_verify()
            .returning(|_| Ok(AuthenticatedUser::new("user-9")));
        let mut issuer = MockTokenIssuer::new();
        issuer
            .expect_refresh()
            .returning(|_| Ok(tokens("fresh", Some("rotated"))));

        let outcome = resolver(verifier, issuer).resolve(None, Some("old")).await;

        assert!(outcome.user.is_some());
        assert_eq!(
            outcome.update,
            SessionUpdate::Refreshed(tokens("fresh", Some("rotated")))
        );
    }

    #[tokio::test]
    async fn test_failed_refresh_clears_session() {
        let mut verifier = MockSessionVerifier::new();
        verifier
            .expect_verify()
            .returning(|_| Err(AppError::Unauthorized("expired".to_string())));
        let mut issuer = MockTokenIssuer::new();
        issuer
            .expect_refresh()
            .returning(|_| Err(AppError::Unauthorized("revoked".to_string())));

        let outcome = resolver(verifier, issuer)
            .resolve(Some("expired"), Some("revoked"))
            .await;

        assert!(outcome.user.is_none());
        assert_eq!(outcome.update, SessionUpdate::Clear);
    }

    #[tokio::test]
    async fn test_invalid_access_token_without_refresh_clears_session() {
        let mut verifier = MockSessionVerifier::new();
        verifier
            .expect_verify()
            .returning(|_| Err(AppError::Unauthorized("bad".to_string())));

        let outcome = resolver(verifier, MockTokenIssuer::new())
            .resolve(Some("bad"), None)
            .await;

        assert!(outcome.user.is_none());
        assert_eq!(outcome.update, SessionUpdate::Clear);
    }

    #[tokio::test]
    async fn test_no_cookies_is_anonymous() {
        let mut verifier = MockSessionVerifier::new();
        verifier.expect_verify().never();
        let mut issuer = MockTokenIssuer::new();
        issuer.expect_refresh().never();

        let outcome = resolver(verifier, issuer).resolve(None, None).await;

        assert!(outcome.user.is_none());
        assert_eq!(outcome.update, SessionUpdate::None);
    }

    #[test]
    fn test_read_cookie_finds_named_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; atelier_session=abc.def; atelier_refresh=r1"),
        );

        assert_eq!(read_cookie(&headers, SESSION_COOKIE).as_deref(), Some("abc.def"));
        assert_eq!(read_cookie(&headers, REFRESH_COOKIE).as_deref(), Some("r1"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_session_cookies_attributes() {
        let cookies = session_cookies(&tokens("access", Some("refresh")), &SessionConfig::default());
        let rendered: Vec<String> = cookies.iter().map(|c| c.to_string()).collect();

        assert_eq!(rendered.len(), 2);
        assert!(rendered[0].starts_with("atelier_session=access"));
        assert!(rendered[0].contains("HttpOnly"));
        assert!(rendered[0].contains("SameSite=Lax"));
        assert!(rendered[0].contains("Max-Age=3600"));
        assert!(rendered[1].starts_with("atelier_refresh=refresh"));
        assert!(rendered[1].contains(&format!("Max-Age={}", 30 * 24 * 60 * 60)));
    }

    #[test]
    fn test_clearing_cookies_expire_both() {
        let mut headers = HeaderMap::new();
        append_cookies(&mut headers, clearing_cookies(&SessionConfig::default()));

        let values: Vec<&str> = headers
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();

        assert_eq!(values.len(), 2);
        assert!(values.iter().all(|v| v.contains("Max-Age=0")));
        assert!(sets_session_cookie(&headers));
    }
}
