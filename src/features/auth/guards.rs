//! Route protection for pages and API routes.
//!
//! Every gate goes through [`Authorizer::check`], so pages and API routes
//! agree on who may see what:
//!
//! | Routes | No session | Session without privilege |
//! |--------|------------|---------------------------|
//! | `/{locale}/admin…` | 303 to login | 303 to `/{locale}` |
//! | `/{locale}/{cart,account,checkout}…` | 303 to login | - |
//! | `/api/admin/*` | 401 `unauthorized` | 403 `forbidden` |
//! | `/api/cart*`, `/api/auth/me`, `/api/profile*` | 401 `unauthorized` | - |

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::core::error::AppError;
use crate::features::auth::authorization::{Access, Authorizer, RequiredRole};
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::i18n::{locale_of_path, Locale};

/// Role a localized page path requires, if any
pub fn protected_section(path: &str) -> Option<RequiredRole> {
    let mut segments = path.trim_start_matches('/').split('/');
    segments.next()?;

    match segments.next()? {
        "admin" => Some(RequiredRole::Admin),
        "cart" | "account" | "checkout" => Some(RequiredRole::Customer),
        _ => None,
    }
}

/// Login page location that sends the user back to `path` afterwards
pub fn login_redirect(locale: Locale, path: &str) -> String {
    format!("/{}/login?redirect={}", locale, urlencoding::encode(path))
}

/// Page middleware: redirects visitors away from sections they may not see
pub async fn page_gate(
    State(authorizer): State<Arc<Authorizer>>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    let Some(required) = protected_section(&path) else {
        return next.run(req).await;
    };

    let locale = locale_of_path(&path);
    let user = req.extensions().get::<AuthenticatedUser>().cloned();

    match authorizer.check(user.as_ref(), required).await {
        Ok(Access::Allowed) => next.run(req).await,
        Ok(Access::Unauthenticated) => Redirect::to(&login_redirect(locale, &path)).into_response(),
        Ok(Access::Forbidden) => {
            tracing::debug!("Non-admin user redirected away from {}", path);
            Redirect::to(&format!("/{}", locale)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

async fn require_role(
    authorizer: &Authorizer,
    required: RequiredRole,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = req.extensions().get::<AuthenticatedUser>().cloned();

    match authorizer.check(user.as_ref(), required).await? {
        Access::Allowed => Ok(next.run(req).await),
        Access::Unauthenticated => Err(AppError::Unauthorized(
            "Authentication required".to_string(),
        )),
        Access::Forbidden => Err(AppError::Forbidden("Admin access required".to_string())),
    }
}

/// API middleware for `/api/admin/*`
pub async fn require_admin_api(
    State(authorizer): State<Arc<Authorizer>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_role(&authorizer, RequiredRole::Admin, req, next).await
}

/// API middleware for routes that only need a signed-in user
pub async fn require_customer_api(
    State(authorizer): State<Arc<Authorizer>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_role(&authorizer, RequiredRole::Customer, req, next).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_sections() {
        assert_eq!(protected_section("/en/admin"), Some(RequiredRole::Admin));
        assert_eq!(
            protected_section("/pt/admin/products"),
            Some(RequiredRole::Admin)
        );
        assert_eq!(protected_section("/fr/cart"), Some(RequiredRole::Customer));
        assert_eq!(
            protected_section("/es/account/orders"),
            Some(RequiredRole::Customer)
        );
        assert_eq!(protected_section("/en/checkout"), Some(RequiredRole::Customer));
    }

    #[test]
    fn test_public_pages_are_not_protected() {
        assert_eq!(protected_section("/en"), None);
        assert_eq!(protected_section("/en/products/cart"), None);
        assert_eq!(protected_section("/en/administration"), None);
        assert_eq!(protected_section("/en/login"), None);
    }

    #[test]
    fn test_login_redirect_encodes_original_path() {
        assert_eq!(
            login_redirect(Locale::Pt, "/pt/admin/products"),
            "/pt/login?redirect=%2Fpt%2Fadmin%2Fproducts"
        );
    }
}
