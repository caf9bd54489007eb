use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::auth;
use crate::features::cart::{dtos as cart_dtos, handlers as cart_handlers};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::collections::{dtos as collections_dtos, handlers as collections_handlers};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::features::profiles::{dtos as profiles_dtos, handlers as profiles_handlers};
use crate::shared::constants::SESSION_COOKIE;
use crate::shared::i18n::Locale;
use crate::shared::types::{ApiResponse, ErrorBody, Paginated, Pagination};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        auth::handlers::logout,
        auth::handlers::get_me,
        // Profile
        profiles_handlers::get_profile,
        profiles_handlers::update_profile,
        // Catalog (public)
        categories_handlers::list_categories,
        products_handlers::list_products,
        products_handlers::get_product,
        collections_handlers::list_collections,
        collections_handlers::get_collection,
        // Cart
        cart_handlers::get_cart,
        cart_handlers::add_cart_item,
        cart_handlers::get_cart_item,
        cart_handlers::update_cart_item,
        cart_handlers::delete_cart_item,
        // Admin
        admin_handlers::get_dashboard,
        admin_handlers::list_admin_products,
    ),
    components(
        schemas(
            // Shared
            ErrorBody,
            Pagination,
            Locale,
            // Auth
            auth::model::AuthenticatedUser,
            auth::dtos::RegisterRequestDto,
            auth::dtos::LoginRequestDto,
            auth::dtos::AuthUserDto,
            auth::dtos::MeResponseDto,
            auth::dtos::LogoutResponseDto,
            ApiResponse<auth::dtos::AuthUserDto>,
            ApiResponse<auth::dtos::MeResponseDto>,
            ApiResponse<auth::dtos::LogoutResponseDto>,
            // Profile
            profiles_dtos::ProfileResponseDto,
            profiles_dtos::UpdateProfileDto,
            ApiResponse<profiles_dtos::ProfileResponseDto>,
            // Catalog
            categories_dtos::CategoryResponseDto,
            products_dtos::ProductResponseDto,
            collections_dtos::CollectionResponseDto,
            collections_dtos::CollectionDetailDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<products_dtos::ProductResponseDto>,
            ApiResponse<Paginated<products_dtos::ProductResponseDto>>,
            ApiResponse<collections_dtos::CollectionDetailDto>,
            ApiResponse<Paginated<collections_dtos::CollectionResponseDto>>,
            // Cart
            cart_dtos::AddCartItemDto,
            cart_dtos::UpdateCartItemDto,
            cart_dtos::CartLineDto,
            cart_dtos::CartDto,
            cart_dtos::QuantityChangeDto,
            ApiResponse<cart_dtos::CartDto>,
            ApiResponse<cart_dtos::CartLineDto>,
            ApiResponse<cart_dtos::QuantityChangeDto>,
            // Admin
            admin_dtos::DashboardStatsDto,
            ApiResponse<admin_dtos::DashboardStatsDto>,
        )
    ),
    tags(
        (name = "auth", description = "Registration, login and session endpoints"),
        (name = "profile", description = "Current user's storefront profile"),
        (name = "categories", description = "Product categories"),
        (name = "products", description = "Catalog products"),
        (name = "collections", description = "Curated collections"),
        (name = "cart", description = "Current user's cart"),
        (name = "admin", description = "Admin dashboard (admin profiles only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Atelier API",
        version = "0.1.0",
        description = "API documentation for the Atelier storefront",
    )
)]
pub struct ApiDoc;

/// Adds the session cookie security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
