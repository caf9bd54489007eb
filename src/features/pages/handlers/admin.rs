use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::pages::frame::PageFrame;
use crate::features::pages::handlers::catalog::{listing_query, product_filter_params};
use crate::features::pages::state::PageState;
use crate::features::pages::views::{AdminProductRow, DashboardView, PageLinks};
use crate::features::products::dtos::ProductQueryDto;
use crate::shared::constants::LOW_STOCK_THRESHOLD;

#[derive(Serialize)]
struct DashboardPage {
    stats: DashboardView,
    products_href: String,
    low_stock_threshold: i32,
}

pub async fn dashboard(State(state): State<PageState>, frame: PageFrame) -> Response {
    let result = async {
        let stats = state.admin.dashboard().await?;

        let page = DashboardPage {
            stats: stats.into(),
            products_href: frame.href("/admin/products"),
            low_stock_threshold: LOW_STOCK_THRESHOLD,
        };

        Ok::<_, AppError>(
            state
                .renderer
                .render(&frame, "pages/admin_dashboard.html", &page)?
                .into_response(),
        )
    }
    .await;

    state.renderer.respond(&frame, result)
}

#[derive(Serialize)]
struct AdminProductsPage {
    products: Vec<AdminProductRow>,
    search: Option<String>,
    active: Option<bool>,
    links: PageLinks,
}

pub async fn products(
    State(state): State<PageState>,
    frame: PageFrame,
    query: std::result::Result<Query<ProductQueryDto>, QueryRejection>,
) -> Response {
    let result = async {
        let query = listing_query(query)?;
        query.validate()?;

        let page_request = query.page();
        let page = state
            .admin
            .list_products(&query.admin_filter(), page_request)
            .await?;

        let mut params = product_filter_params(&query);
        if let Some(active) = query.active {
            params.push(("active", active.to_string()));
        }

        let view = AdminProductsPage {
            products: page
                .items
                .iter()
                .map(|p| AdminProductRow::new(p, frame.locale, LOW_STOCK_THRESHOLD))
                .collect(),
            search: query.search.clone(),
            active: query.active,
            links: PageLinks::new(&frame.path, &params, page_request, page.pagination),
        };

        Ok::<_, AppError>(
            state
                .renderer
                .render(&frame, "pages/admin_products.html", &view)?
                .into_response(),
        )
    }
    .await;

    state.renderer.respond(&frame, result)
}
