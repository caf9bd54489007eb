use crate::features::auth::session::{
    append_cookies, clearing_cookies, read_cookie, session_cookies, sets_session_cookie,
    SessionResolver, SessionUpdate,
};
use crate::shared::constants::{REFRESH_COOKIE, SESSION_COOKIE};
use crate::shared::i18n::{resolve_locale_path, LocalePath};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use base64::prelude::*;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::now_v7().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    // Session cookies need credentialed requests, which rule out wildcard origins
    if allowed_origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_methods(Any)
            .allow_headers(Any)
            .allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
        .allow_origin(AllowOrigin::list(origins))
}

pub fn basic_auth_middleware(
    valid_credentials: Arc<String>,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, Response>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        let credentials = valid_credentials.clone();
        Box::pin(async move {
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|header| header.to_str().ok());

            if let Some(auth_header) = auth_header {
                if let Some(encoded) = auth_header.strip_prefix("Basic ") {
                    if let Ok(decoded) = BASE64_STANDARD.decode(encoded) {
                        if let Ok(creds) = String::from_utf8(decoded) {
                            if creds == *credentials {
                                return Ok(next.run(req).await);
                            }
                        }
                    }
                }
            }

            Err((
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"Swagger UI\"")],
                "Unauthorized",
            )
                .into_response())
        })
    }
}

/// Prefix locale-less page paths with the default locale and record the
/// locale of localized ones.
pub async fn localize_middleware(mut req: Request, next: Next) -> Response {
    match resolve_locale_path(req.uri().path()) {
        LocalePath::Localized(locale) => {
            req.extensions_mut().insert(locale);
            next.run(req).await
        }
        LocalePath::Redirect(mut location) => {
            if let Some(query) = req.uri().query() {
                location.push('?');
                location.push_str(query);
            }
            Redirect::temporary(&location).into_response()
        }
        LocalePath::Unlocalized => next.run(req).await,
    }
}

/// Resolve the session cookies into an `AuthenticatedUser` extension, then
/// write back whatever cookie change the resolution produced.
///
/// Handlers that set the session cookie themselves (login, logout) win.
pub async fn session_middleware(
    State(resolver): State<Arc<SessionResolver>>,
    mut req: Request,
    next: Next,
) -> Response {
    let access = read_cookie(req.headers(), SESSION_COOKIE);
    let refresh = read_cookie(req.headers(), REFRESH_COOKIE);

    let outcome = resolver
        .resolve(access.as_deref(), refresh.as_deref())
        .await;

    if let Some(user) = outcome.user {
        req.extensions_mut().insert(user);
    }

    let mut response = next.run(req).await;

    if sets_session_cookie(response.headers()) {
        return response;
    }

    match outcome.update {
        SessionUpdate::None => {}
        SessionUpdate::Refreshed(tokens) => {
            tracing::debug!("Session refreshed");
            append_cookies(
                response.headers_mut(),
                session_cookies(&tokens, resolver.config()),
            );
        }
        SessionUpdate::Clear => {
            append_cookies(response.headers_mut(), clearing_cookies(resolver.config()));
        }
    }

    response
}
