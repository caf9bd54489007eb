use std::sync::Arc;

use axum::{
    extract::Request,
    middleware::{from_fn, from_fn_with_state, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use crate::core::error::{AppError, Resource};
use crate::features::auth::guards::page_gate;
use crate::features::auth::Authorizer;
use crate::features::pages::handlers::{account, admin, cart, catalog};
use crate::features::pages::state::PageState;
use crate::shared::i18n::Locale;

/// Localized page routes. Gated sections redirect through [`page_gate`].
pub fn routes(state: PageState, authorizer: Arc<Authorizer>) -> Router {
    Router::new()
        .route("/{locale}", get(catalog::home))
        .route("/{locale}/products", get(catalog::products))
        .route("/{locale}/products/{id}", get(catalog::product_detail))
        .route("/{locale}/collections", get(catalog::collections))
        .route("/{locale}/collections/{slug}", get(catalog::collection_detail))
        .route(
            "/{locale}/login",
            get(account::login_page).post(account::login_submit),
        )
        .route(
            "/{locale}/register",
            get(account::register_page).post(account::register_submit),
        )
        .route("/{locale}/logout", post(account::logout_submit))
        .route("/{locale}/account", get(account::account))
        .route("/{locale}/cart", get(cart::cart))
        .route("/{locale}/cart/items", post(cart::add_item))
        .route("/{locale}/cart/items/{id}", post(cart::update_item))
        .route("/{locale}/checkout", get(cart::checkout))
        .route("/{locale}/admin", get(admin::dashboard))
        .route("/{locale}/admin/products", get(admin::products))
        .route_layer(from_fn_with_state(authorizer, page_gate))
        .route_layer(from_fn(require_locale))
        .with_state(state)
}

/// `{locale}` also matches unlocalized prefixes (`/api/checkout`); those are
/// not pages.
async fn require_locale(req: Request, next: Next) -> Response {
    if req.extensions().get::<Locale>().is_none() {
        return AppError::not_found(Resource::Route, "Route not found").into_response();
    }

    next.run(req).await
}
