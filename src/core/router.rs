use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::core::config::SessionConfig;
use crate::core::error::{AppError, Resource};
use crate::core::middleware::{localize_middleware, session_middleware};
use crate::features::admin::{routes as admin_routes, AdminService};
use crate::features::auth::guards::{require_admin_api, require_customer_api};
use crate::features::auth::routes::{self as auth_routes, AuthState};
use crate::features::auth::services::AuthService;
use crate::features::auth::session::SessionResolver;
use crate::features::auth::Authorizer;
use crate::features::cart::{routes as cart_routes, CartService};
use crate::features::categories::{routes as category_routes, CategoryService};
use crate::features::collections::{routes as collection_routes, CollectionService};
use crate::features::pages::frame::PageFrame;
use crate::features::pages::{routes as page_routes, PageRenderer, PageState};
use crate::features::products::{routes as product_routes, ProductService};
use crate::features::profiles::{routes as profile_routes, ProfileService};

/// Everything the HTTP surface is assembled from
#[derive(Clone)]
pub struct AppServices {
    pub session_resolver: Arc<SessionResolver>,
    pub authorizer: Arc<Authorizer>,
    pub auth: Arc<AuthService>,
    pub profiles: Arc<ProfileService>,
    pub categories: Arc<CategoryService>,
    pub products: Arc<ProductService>,
    pub collections: Arc<CollectionService>,
    pub cart: Arc<CartService>,
    pub admin: Arc<AdminService>,
    pub renderer: Arc<PageRenderer>,
    pub session: SessionConfig,
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Unknown API paths answer with the JSON envelope, anything else with the
/// localized not-found page.
async fn fallback(State(renderer): State<Arc<PageRenderer>>, frame: PageFrame) -> Response {
    let error = AppError::not_found(Resource::Route, "Route not found");

    if frame.path == "/api" || frame.path.starts_with("/api/") {
        return error.into_response();
    }

    renderer.error_page(&frame, &error)
}

/// API and page routes with their gates, session and locale handling.
///
/// Swagger, CORS and request tracing are layered on by the binary.
pub fn build_router(services: AppServices) -> Router {
    let auth_state = AuthState {
        service: services.auth.clone(),
        session: services.session.clone(),
    };

    let public_api = Router::new()
        .merge(auth_routes::public_routes(auth_state.clone()))
        .merge(category_routes::routes(services.categories.clone()))
        .merge(product_routes::routes(services.products.clone()))
        .merge(collection_routes::routes(services.collections.clone()))
        .route("/health", get(health_check));

    let customer_api = Router::new()
        .merge(auth_routes::protected_routes(auth_state))
        .merge(profile_routes::routes(services.profiles.clone()))
        .merge(cart_routes::routes(services.cart.clone()))
        .route_layer(from_fn_with_state(
            services.authorizer.clone(),
            require_customer_api,
        ));

    let admin_api = admin_routes::routes(services.admin.clone()).route_layer(
        from_fn_with_state(services.authorizer.clone(), require_admin_api),
    );

    let pages = page_routes::routes(
        PageState {
            renderer: services.renderer.clone(),
            products: services.products,
            collections: services.collections,
            categories: services.categories,
            cart: services.cart,
            auth: services.auth,
            profiles: services.profiles,
            admin: services.admin,
            session: services.session,
        },
        services.authorizer,
    );

    Router::new()
        .merge(public_api)
        .merge(customer_api)
        .nest("/api/admin", admin_api)
        .merge(pages)
        .fallback_service(
            Router::new()
                .fallback(fallback)
                .with_state(services.renderer),
        )
        // Outermost runs first: locale redirect, then session resolution
        .layer(from_fn_with_state(
            services.session_resolver,
            session_middleware,
        ))
        .layer(from_fn(localize_middleware))
}
