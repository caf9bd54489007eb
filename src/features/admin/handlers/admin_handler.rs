use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::admin::dtos::DashboardStatsDto;
use crate::features::admin::services::AdminService;
use crate::features::products::dtos::{ProductQueryDto, ProductResponseDto};
use crate::shared::types::{ApiResponse, Paginated};

/// Dashboard widget counts
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Dashboard stats", body = ApiResponse<DashboardStatsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("session_cookie" = [])
    )
)]
pub async fn get_dashboard(
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<DashboardStatsDto>>> {
    let stats = service.dashboard().await?;
    Ok(Json(ApiResponse::success(stats.into())))
}

/// List products including inactive ones
#[utoipa::path(
    get,
    path = "/api/admin/products",
    params(ProductQueryDto),
    responses(
        (status = 200, description = "Page of products", body = ApiResponse<Paginated<ProductResponseDto>>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("session_cookie" = [])
    )
)]
pub async fn list_admin_products(
    State(service): State<Arc<AdminService>>,
    AppQuery(query): AppQuery<ProductQueryDto>,
) -> Result<Json<ApiResponse<Paginated<ProductResponseDto>>>> {
    query.validate()?;

    let page = service
        .list_products(&query.admin_filter(), query.page())
        .await?;
    Ok(Json(ApiResponse::success(page.map(Into::into))))
}
