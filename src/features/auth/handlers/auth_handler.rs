use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{
    AuthUserDto, LoginRequestDto, LogoutResponseDto, MeResponseDto, RegisterRequestDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::routes::AuthState;
use crate::features::auth::session::{append_cookies, clearing_cookies, read_cookie, session_cookies};
use crate::shared::constants::REFRESH_COOKIE;
use crate::shared::types::ApiResponse;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use validator::Validate;

/// Register a new account and start a session
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<AuthUserDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AuthState>,
    AppJson(dto): AppJson<RegisterRequestDto>,
) -> Result<(StatusCode, HeaderMap, Json<ApiResponse<AuthUserDto>>)> {
    dto.validate()?;

    let session = state.service.register(dto).await?;

    let mut headers = HeaderMap::new();
    append_cookies(&mut headers, session_cookies(&session.tokens, &state.session));

    Ok((
        StatusCode::CREATED,
        headers,
        Json(ApiResponse::success(session.user)),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthUserDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account suspended")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AuthState>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<(HeaderMap, Json<ApiResponse<AuthUserDto>>)> {
    dto.validate()?;

    let session = state.service.login(dto).await?;

    let mut headers = HeaderMap::new();
    append_cookies(&mut headers, session_cookies(&session.tokens, &state.session));

    Ok((headers, Json(ApiResponse::success(session.user))))
}

/// End the session and clear its cookies
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = ApiResponse<LogoutResponseDto>)
    ),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<AuthState>,
    request_headers: HeaderMap,
) -> (HeaderMap, Json<ApiResponse<LogoutResponseDto>>) {
    let refresh = read_cookie(&request_headers, REFRESH_COOKIE);
    state.service.logout(refresh.as_deref()).await;

    let mut headers = HeaderMap::new();
    append_cookies(&mut headers, clearing_cookies(&state.session));

    (
        headers,
        Json(ApiResponse::success(LogoutResponseDto { logged_out: true })),
    )
}

/// Get current authenticated user and profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = ApiResponse<MeResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("session_cookie" = [])
    )
)]
pub async fn get_me(
    user: AuthenticatedUser,
    State(state): State<AuthState>,
) -> Result<Json<ApiResponse<MeResponseDto>>> {
    let me = state.service.me(user).await?;
    Ok(Json(ApiResponse::success(me)))
}
