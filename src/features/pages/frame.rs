use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Serialize;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::i18n::{locale_of_path, Locale};

/// What every page needs to know about the request it renders
#[derive(Debug, Clone)]
pub struct PageFrame {
    pub locale: Locale,
    pub path: String,
    pub user: Option<AuthenticatedUser>,
}

/// Link to the current page in another locale
#[derive(Debug, Clone, Serialize)]
pub struct Alternate {
    pub code: &'static str,
    pub href: String,
    pub current: bool,
}

impl PageFrame {
    /// Session user of a gated page
    pub fn require_user(&self) -> Result<&AuthenticatedUser> {
        self.user
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }

    /// Localized href, e.g. `href("/cart")` is `/pt/cart` on a Portuguese page
    pub fn href(&self, path: &str) -> String {
        format!("/{}{}", self.locale, path)
    }

    /// The current path in every supported locale
    pub fn alternates(&self) -> Vec<Alternate> {
        let rest = self
            .path
            .trim_start_matches('/')
            .split_once('/')
            .map(|(_, rest)| format!("/{}", rest))
            .unwrap_or_default();

        Locale::ALL
            .into_iter()
            .map(|locale| Alternate {
                code: locale.code(),
                href: format!("/{}{}", locale, rest),
                current: locale == self.locale,
            })
            .collect()
    }
}

impl<S> FromRequestParts<S> for PageFrame
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();
        let locale = parts
            .extensions
            .get::<Locale>()
            .copied()
            .unwrap_or_else(|| locale_of_path(&path));

        Ok(Self {
            locale,
            path,
            user: parts.extensions.get::<AuthenticatedUser>().cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(path: &str) -> PageFrame {
        PageFrame {
            locale: locale_of_path(path),
            path: path.to_string(),
            user: None,
        }
    }

    #[test]
    fn test_alternates_swap_locale_segment() {
        let alternates = frame("/pt/products/abc").alternates();

        let hrefs: Vec<&str> = alternates.iter().map(|a| a.href.as_str()).collect();
        assert_eq!(
            hrefs,
            vec![
                "/en/products/abc",
                "/pt/products/abc",
                "/es/products/abc",
                "/fr/products/abc"
            ]
        );
        assert!(alternates[1].current);
    }

    #[test]
    fn test_alternates_of_locale_root() {
        let alternates = frame("/fr").alternates();
        assert_eq!(alternates[0].href, "/en");
    }

    #[test]
    fn test_href_prefixes_locale() {
        assert_eq!(frame("/es/cart").href("/checkout"), "/es/checkout");
    }

    #[test]
    fn test_require_user_without_session() {
        let err = frame("/en/cart").require_user().unwrap_err();
        assert_eq!(err.code(), "unauthorized");
    }

    #[tokio::test]
    async fn test_extracts_locale_and_session_user_from_request() {
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/pt/cart")
            .body(())
            .unwrap()
            .into_parts();
        parts.extensions.insert(AuthenticatedUser::new("shopper"));

        let frame = PageFrame::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(frame.locale, Locale::Pt);
        assert_eq!(frame.path, "/pt/cart");
        assert_eq!(frame.user.map(|u| u.user_id), Some("shopper".to_string()));
    }

    #[tokio::test]
    async fn test_resolved_locale_extension_wins_over_path() {
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/")
            .body(())
            .unwrap()
            .into_parts();
        parts.extensions.insert(Locale::Fr);

        let frame = PageFrame::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(frame.locale, Locale::Fr);
        assert!(frame.user.is_none());
    }
}
