use crate::core::config::SessionConfig;
use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthState {
    pub service: Arc<AuthService>,
    pub session: SessionConfig,
}

/// Public auth routes (no session required)
pub fn public_routes(state: AuthState) -> Router {
    Router::new()
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/logout", post(handlers::logout))
        .with_state(state)
}

/// Auth routes that need a session
pub fn protected_routes(state: AuthState) -> Router {
    Router::new()
        .route("/api/auth/me", get(handlers::get_me))
        .with_state(state)
}
