use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::shared::types::ApiResponse;

/// Resource a `NotFound` error refers to; selects the error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Product,
    Collection,
    CartItem,
    Profile,
    Route,
}

impl Resource {
    pub fn code(self) -> &'static str {
        match self {
            Resource::Product => "product_not_found",
            Resource::Collection => "collection_not_found",
            Resource::CartItem => "cart_item_not_found",
            Resource::Profile => "profile_not_found",
            Resource::Route => "not_found",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {1}")]
    NotFound(Resource, String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i32, available: i32 },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(resource: Resource, message: impl Into<String>) -> Self {
        AppError::NotFound(resource, message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(..) => StatusCode::NOT_FOUND,
            AppError::Validation { .. } | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::InsufficientStock { .. } | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "database_error",
            AppError::NotFound(resource, _) => resource.code(),
            AppError::Validation { .. } | AppError::BadRequest(_) => "validation_error",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden(_) => "forbidden",
            AppError::InsufficientStock { .. } => "insufficient_stock",
            AppError::Conflict(_) => "conflict",
            AppError::ExternalServiceError(_) => "external_service_error",
            AppError::Internal(_) => "internal_server_error",
        }
    }

    /// Message safe to show to clients; store and internal failures are not leaked
    pub fn public_message(&self) -> String {
        match self {
            AppError::Database(_) => "Database error occurred".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::NotFound(_, msg)
            | AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::Conflict(msg)
            | AppError::ExternalServiceError(msg) => msg.clone(),
            AppError::Validation { message, .. } => message.clone(),
            AppError::InsufficientStock { .. } => "Not enough stock available".to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation {
            message: "Invalid request parameters".to_string(),
            details: serde_json::to_value(&errors).ok(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::ExternalServiceError(msg) => tracing::error!("External service error: {}", msg),
            _ => {}
        }

        let details = match &self {
            AppError::Validation { details, .. } => details.clone(),
            AppError::InsufficientStock {
                requested,
                available,
            } => Some(json!({ "requested": requested, "available": available })),
            _ => None,
        };

        let body = Json(ApiResponse::<()>::error(
            self.code(),
            self.public_message(),
            details,
        ));

        (self.status(), body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use validator::Validate;

    async fn body_of(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_uses_resource_code() {
        let (status, body) =
            body_of(AppError::not_found(Resource::CartItem, "Cart item not found")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "cart_item_not_found");
        assert_eq!(body["error"]["message"], "Cart item not found");
    }

    #[tokio::test]
    async fn test_insufficient_stock_carries_details() {
        let (status, body) = body_of(AppError::InsufficientStock {
            requested: 7,
            available: 3,
        })
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "insufficient_stock");
        assert_eq!(body["error"]["details"]["requested"], 7);
        assert_eq!(body["error"]["details"]["available"], 3);
    }

    #[tokio::test]
    async fn test_internal_message_is_not_leaked() {
        let (status, body) = body_of(AppError::Internal("pool exhausted".into())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "internal_server_error");
        assert_eq!(body["error"]["message"], "Internal server error");
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(range(min = 1, max = 50))]
        limit: i64,
    }

    #[tokio::test]
    async fn test_validation_errors_become_details() {
        let err: AppError = Sample { limit: 500 }.validate().unwrap_err().into();
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "validation_error");
        assert!(body["error"]["details"]["limit"].is_array());
    }

    #[test]
    fn test_status_and_code_table() {
        let cases = [
            (AppError::Unauthorized("x".into()), 401, "unauthorized"),
            (AppError::Forbidden("x".into()), 403, "forbidden"),
            (AppError::BadRequest("x".into()), 400, "validation_error"),
            (AppError::Conflict("x".into()), 409, "conflict"),
            (AppError::ExternalServiceError("x".into()), 502, "external_service_error"),
            (AppError::not_found(Resource::Route, "x"), 404, "not_found"),
        ];

        for (err, status, code) in cases {
            assert_eq!(err.status().as_u16(), status);
            assert_eq!(err.code(), code);
        }
    }
}
