use std::sync::Arc;

use axum::{extract::State, Json};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppPath, AppQuery};
use crate::features::products::dtos::{ProductQueryDto, ProductResponseDto};
use crate::features::products::services::ProductService;
use crate::shared::types::{ApiResponse, Paginated};

/// List active products
#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductQueryDto),
    responses(
        (status = 200, description = "Page of products", body = ApiResponse<Paginated<ProductResponseDto>>),
        (status = 400, description = "Validation error")
    ),
    tag = "products"
)]
pub async fn list_products(
    State(service): State<Arc<ProductService>>,
    AppQuery(query): AppQuery<ProductQueryDto>,
) -> Result<Json<ApiResponse<Paginated<ProductResponseDto>>>> {
    query.validate()?;

    let page = service.list(&query.public_filter(), query.page()).await?;
    Ok(Json(ApiResponse::success(page.map(Into::into))))
}

/// Get an active product by id
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponseDto>),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn get_product(
    State(service): State<Arc<ProductService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let product = service.get(id).await?;
    Ok(Json(ApiResponse::success(product.into())))
}
