use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::collections::handlers;
use crate::features::collections::services::CollectionService;

/// Public collection routes
pub fn routes(service: Arc<CollectionService>) -> Router {
    Router::new()
        .route("/api/collections", get(handlers::list_collections))
        .route("/api/collections/{slug}", get(handlers::get_collection))
        .with_state(service)
}
