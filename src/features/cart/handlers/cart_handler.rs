use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::cart::dtos::{
    AddCartItemDto, CartDto, CartLineDto, QuantityChangeDto, UpdateCartItemDto,
};
use crate::features::cart::services::CartService;
use crate::shared::types::ApiResponse;

/// Get the current user's cart
#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart lines with totals", body = ApiResponse<CartDto>),
        (status = 401, description = "Unauthorized")
    ),
    security(("session_cookie" = [])),
    tag = "cart"
)]
pub async fn get_cart(
    State(service): State<Arc<CartService>>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<CartDto>>> {
    let cart = service.get_cart(&user).await?;
    Ok(Json(ApiResponse::success(cart.into())))
}

/// Add a product to the cart
#[utoipa::path(
    post,
    path = "/api/cart/items",
    request_body = AddCartItemDto,
    responses(
        (status = 201, description = "Line added or incremented", body = ApiResponse<CartLineDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Insufficient stock")
    ),
    security(("session_cookie" = [])),
    tag = "cart"
)]
pub async fn add_cart_item(
    State(service): State<Arc<CartService>>,
    user: AuthenticatedUser,
    AppJson(dto): AppJson<AddCartItemDto>,
) -> Result<(StatusCode, Json<ApiResponse<CartLineDto>>)> {
    dto.validate()?;

    let line = service.add_item(&user, dto.product_id, dto.quantity).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(line.into()))))
}

/// Get one of the current user's cart lines
#[utoipa::path(
    get,
    path = "/api/cart/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Cart item ID")
    ),
    responses(
        (status = 200, description = "Cart line", body = ApiResponse<CartLineDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Cart item not found")
    ),
    security(("session_cookie" = [])),
    tag = "cart"
)]
pub async fn get_cart_item(
    State(service): State<Arc<CartService>>,
    user: AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<CartLineDto>>> {
    let line = service.get_item(&user, id).await?;
    Ok(Json(ApiResponse::success(line.into())))
}

/// Set a cart line's quantity; 0 removes it
#[utoipa::path(
    patch,
    path = "/api/cart/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Cart item ID")
    ),
    request_body = UpdateCartItemDto,
    responses(
        (status = 200, description = "Quantity changed", body = ApiResponse<QuantityChangeDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Cart item not found"),
        (status = 409, description = "Insufficient stock")
    ),
    security(("session_cookie" = [])),
    tag = "cart"
)]
pub async fn update_cart_item(
    State(service): State<Arc<CartService>>,
    user: AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<UpdateCartItemDto>,
) -> Result<Json<ApiResponse<QuantityChangeDto>>> {
    dto.validate()?;

    let change = service.set_quantity(&user, id, dto.quantity).await?;
    Ok(Json(ApiResponse::success(change.into())))
}

/// Remove a cart line
#[utoipa::path(
    delete,
    path = "/api/cart/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Cart item ID")
    ),
    responses(
        (status = 200, description = "Line removed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Cart item not found")
    ),
    security(("session_cookie" = [])),
    tag = "cart"
)]
pub async fn delete_cart_item(
    State(service): State<Arc<CartService>>,
    user: AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.remove_item(&user, id).await?;
    Ok(Json(ApiResponse::success(())))
}
