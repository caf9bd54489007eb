use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Serialize;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::auth::services::AuthSession;
use crate::features::auth::session::{
    append_cookies, clearing_cookies, read_cookie, session_cookies,
};
use crate::features::pages::forms::{
    safe_redirect, AuthFormView, LoginForm, RedirectQuery, RegisterForm,
};
use crate::features::pages::frame::PageFrame;
use crate::features::pages::state::PageState;
use crate::shared::constants::REFRESH_COOKIE;

/// Errors a sign-in form shows inline instead of on the error page
fn is_form_error(error: &AppError) -> bool {
    matches!(
        error,
        AppError::Validation { .. }
            | AppError::BadRequest(_)
            | AppError::Unauthorized(_)
            | AppError::Forbidden(_)
            | AppError::Conflict(_)
    )
}

fn form_error_key(error: &AppError) -> String {
    format!("auth.error.{}", error.code())
}

fn signed_in(state: &PageState, session: AuthSession, target: &str) -> Response {
    let mut response = Redirect::to(target).into_response();
    append_cookies(
        response.headers_mut(),
        session_cookies(&session.tokens, &state.session),
    );
    response
}

fn auth_form(
    state: &PageState,
    frame: &PageFrame,
    template: &str,
    status: StatusCode,
    mut form: AuthFormView,
    error: Option<&AppError>,
) -> Response {
    form.error = error.map(|e| state.renderer.translate(frame, &form_error_key(e)).to_string());
    state
        .renderer
        .render_with_status(frame, status, template, &form)
}

pub async fn login_page(
    State(state): State<PageState>,
    frame: PageFrame,
    Query(query): Query<RedirectQuery>,
) -> Response {
    let target = safe_redirect(query.redirect.as_deref(), frame.locale);

    if frame.user.is_some() {
        return Redirect::to(&target).into_response();
    }

    let form = AuthFormView::new(target);
    auth_form(&state, &frame, "pages/login.html", StatusCode::OK, form, None)
}

pub async fn login_submit(
    State(state): State<PageState>,
    frame: PageFrame,
    Form(form): Form<LoginForm>,
) -> Response {
    let target = safe_redirect(form.redirect.as_deref(), frame.locale);
    let request = form.to_request();

    let result = async {
        request.validate()?;
        state.auth.login(request).await
    }
    .await;

    match result {
        Ok(session) => {
            tracing::debug!("Page login for user {}", session.user.id);
            signed_in(&state, session, &target)
        }
        Err(e) if is_form_error(&e) => {
            let view = AuthFormView {
                email: form.email,
                ..AuthFormView::new(target)
            };
            auth_form(&state, &frame, "pages/login.html", e.status(), view, Some(&e))
        }
        Err(e) => state.renderer.error_page(&frame, &e),
    }
}

pub async fn register_page(
    State(state): State<PageState>,
    frame: PageFrame,
    Query(query): Query<RedirectQuery>,
) -> Response {
    let target = safe_redirect(query.redirect.as_deref(), frame.locale);

    if frame.user.is_some() {
        return Redirect::to(&target).into_response();
    }

    let form = AuthFormView::new(target);
    auth_form(&state, &frame, "pages/register.html", StatusCode::OK, form, None)
}

pub async fn register_submit(
    State(state): State<PageState>,
    frame: PageFrame,
    Form(form): Form<RegisterForm>,
) -> Response {
    let target = safe_redirect(form.redirect.as_deref(), frame.locale);
    let request = form.to_request();

    let result = async {
        request.validate()?;
        state.auth.register(request).await
    }
    .await;

    match result {
        Ok(session) => signed_in(&state, session, &target),
        Err(e) if is_form_error(&e) => {
            let view = AuthFormView {
                email: form.email,
                full_name: form.full_name.unwrap_or_default(),
                ..AuthFormView::new(target)
            };
            auth_form(&state, &frame, "pages/register.html", e.status(), view, Some(&e))
        }
        Err(e) => state.renderer.error_page(&frame, &e),
    }
}

pub async fn logout_submit(
    State(state): State<PageState>,
    frame: PageFrame,
    headers: HeaderMap,
) -> Response {
    let refresh = read_cookie(&headers, REFRESH_COOKIE);
    state.auth.logout(refresh.as_deref()).await;

    let mut response = Redirect::to(&format!("/{}", frame.locale)).into_response();
    append_cookies(response.headers_mut(), clearing_cookies(&state.session));
    response
}

#[derive(Serialize)]
struct AccountPage {
    email: Option<String>,
    full_name: Option<String>,
    is_admin: bool,
    member_since: String,
}

pub async fn account(State(state): State<PageState>, frame: PageFrame) -> Response {
    let result = async {
        let user = frame.require_user()?;
        let profile = state.profiles.get_or_create(user).await?;

        let page = AccountPage {
            email: profile.email,
            full_name: profile.full_name,
            is_admin: profile.is_admin,
            member_since: profile.created_at.format("%Y-%m-%d").to_string(),
        };

        Ok::<_, AppError>(
            state
                .renderer
                .render(&frame, "pages/account.html", &page)?
                .into_response(),
        )
    }
    .await;

    state.renderer.respond(&frame, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_errors_render_inline() {
        assert!(is_form_error(&AppError::validation("bad email")));
        assert!(is_form_error(&AppError::Unauthorized("x".to_string())));
        assert!(is_form_error(&AppError::Conflict("taken".to_string())));
        assert!(!is_form_error(&AppError::Internal("boom".to_string())));
    }

    #[test]
    fn test_form_error_key_uses_error_code() {
        assert_eq!(
            form_error_key(&AppError::Forbidden("suspended".to_string())),
            "auth.error.forbidden"
        );
    }
}
