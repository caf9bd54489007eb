use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::model::{AuthenticatedUser, IdentityUser};
use crate::features::profiles::dtos::ProfileResponseDto;

/// Request DTO for account registration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: Option<String>,
}

/// Request DTO for login
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Account returned after register/login; tokens travel in cookies only
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthUserDto {
    pub id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

impl From<IdentityUser> for AuthUserDto {
    fn from(user: IdentityUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.name,
        }
    }
}

/// DTO for /api/auth/me
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponseDto {
    pub user: AuthenticatedUser,
    pub profile: ProfileResponseDto,
}

/// DTO for /api/auth/logout
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponseDto {
    pub logged_out: bool,
}

/// Normalized email used for identity lookups
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_rejects_malformed_email() {
        let dto = RegisterRequestDto {
            email: "not-an-email".to_string(),
            password: "long-enough".to_string(),
            full_name: None,
        };

        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_register_rejects_short_password() {
        let dto = RegisterRequestDto {
            email: "ana@example.com".to_string(),
            password: "short".to_string(),
            full_name: Some("Ana".to_string()),
        };

        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_register_accepts_camel_case_body() {
        let dto: RegisterRequestDto = serde_json::from_str(
            r#"{"email":"ana@example.com","password":"long-enough","fullName":"Ana Lima"}"#,
        )
        .unwrap();

        assert!(dto.validate().is_ok());
        assert_eq!(dto.full_name.as_deref(), Some("Ana Lima"));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ana@Example.COM "), "ana@example.com");
    }
}
