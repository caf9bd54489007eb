use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::cart::handlers;
use crate::features::cart::services::CartService;

/// Cart routes (session required)
pub fn routes(service: Arc<CartService>) -> Router {
    Router::new()
        .route("/api/cart", get(handlers::get_cart))
        .route("/api/cart/items", post(handlers::add_cart_item))
        .route(
            "/api/cart/items/{id}",
            get(handlers::get_cart_item)
                .patch(handlers::update_cart_item)
                .delete(handlers::delete_cart_item),
        )
        .with_state(service)
}
