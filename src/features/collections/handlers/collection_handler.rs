use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::collections::dtos::{
    CollectionDetailDto, CollectionQueryDto, CollectionResponseDto,
};
use crate::features::collections::services::CollectionService;
use crate::shared::types::{ApiResponse, Paginated};

/// List active collections
#[utoipa::path(
    get,
    path = "/api/collections",
    params(CollectionQueryDto),
    responses(
        (status = 200, description = "Page of collections", body = ApiResponse<Paginated<CollectionResponseDto>>),
        (status = 400, description = "Validation error")
    ),
    tag = "collections"
)]
pub async fn list_collections(
    State(service): State<Arc<CollectionService>>,
    AppQuery(query): AppQuery<CollectionQueryDto>,
) -> Result<Json<ApiResponse<Paginated<CollectionResponseDto>>>> {
    query.validate()?;

    let page = service.list(query.search(), query.page()).await?;
    Ok(Json(ApiResponse::success(page.map(Into::into))))
}

/// Get an active collection and its products
#[utoipa::path(
    get,
    path = "/api/collections/{slug}",
    params(
        ("slug" = String, Path, description = "Collection slug")
    ),
    responses(
        (status = 200, description = "Collection found", body = ApiResponse<CollectionDetailDto>),
        (status = 404, description = "Collection not found")
    ),
    tag = "collections"
)]
pub async fn get_collection(
    State(service): State<Arc<CollectionService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CollectionDetailDto>>> {
    let detail = service.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::success(detail.into())))
}
