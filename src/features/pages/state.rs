use std::sync::Arc;

use crate::core::config::SessionConfig;
use crate::features::admin::AdminService;
use crate::features::auth::services::AuthService;
use crate::features::cart::CartService;
use crate::features::categories::CategoryService;
use crate::features::collections::CollectionService;
use crate::features::pages::renderer::PageRenderer;
use crate::features::products::ProductService;
use crate::features::profiles::ProfileService;

/// Services the page handlers render from
#[derive(Clone)]
pub struct PageState {
    pub renderer: Arc<PageRenderer>,
    pub products: Arc<ProductService>,
    pub collections: Arc<CollectionService>,
    pub categories: Arc<CategoryService>,
    pub cart: Arc<CartService>,
    pub auth: Arc<AuthService>,
    pub profiles: Arc<ProfileService>,
    pub admin: Arc<AdminService>,
    pub session: SessionConfig,
}
