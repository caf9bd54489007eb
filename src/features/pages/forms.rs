use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::features::auth::dtos::{LoginRequestDto, RegisterRequestDto};
use crate::shared::i18n::Locale;

/// `?redirect=` of the login and register pages
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedirectQuery {
    pub redirect: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub redirect: Option<String>,
}

impl LoginForm {
    pub fn to_request(&self) -> LoginRequestDto {
        LoginRequestDto {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub redirect: Option<String>,
}

impl RegisterForm {
    pub fn to_request(&self) -> RegisterRequestDto {
        RegisterRequestDto {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            full_name: self
                .full_name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddToCartForm {
    pub product_id: Uuid,
    pub quantity: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuantityForm {
    pub quantity: i32,
}

/// `?error=` code shown above the cart after a failed form post
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartNotice {
    pub error: Option<String>,
}

/// Values echoed back into a login or register form after a failure
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthFormView {
    pub email: String,
    pub full_name: String,
    pub redirect: String,
    /// `redirect`, URL-encoded for the link to the other form
    pub redirect_param: String,
    pub error: Option<String>,
}

impl AuthFormView {
    pub fn new(redirect: String) -> Self {
        Self {
            redirect_param: urlencoding::encode(&redirect).into_owned(),
            redirect,
            ..Default::default()
        }
    }
}

/// Local path to continue to after signing in.
///
/// Anything that is not a plain absolute path on this site (protocol-relative
/// `//host`, backslash tricks, full URLs) falls back to the account page.
pub fn safe_redirect(target: Option<&str>, locale: Locale) -> String {
    match target {
        Some(t)
            if t.starts_with('/')
                && !t.starts_with("//")
                && !t.contains('\\')
                && !t.contains("://") =>
        {
            t.to_string()
        }
        _ => format!("/{}/account", locale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_redirect_keeps_local_paths() {
        assert_eq!(
            safe_redirect(Some("/pt/admin/products"), Locale::Pt),
            "/pt/admin/products"
        );
    }

    #[test]
    fn test_safe_redirect_rejects_foreign_targets() {
        for target in ["//evil.test", "https://evil.test", "/\\evil.test", "evil"] {
            assert_eq!(safe_redirect(Some(target), Locale::Es), "/es/account");
        }
        assert_eq!(safe_redirect(None, Locale::En), "/en/account");
    }

    #[test]
    fn test_register_form_drops_blank_name() {
        let form = RegisterForm {
            email: " ana@example.com ".to_string(),
            password: "long enough".to_string(),
            full_name: Some("   ".to_string()),
            redirect: None,
        };

        let dto = form.to_request();
        assert_eq!(dto.email, "ana@example.com");
        assert!(dto.full_name.is_none());
    }
}
