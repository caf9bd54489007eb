use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Resource, Result};
use crate::features::collections::dtos::CollectionQueryDto;
use crate::features::pages::frame::PageFrame;
use crate::features::pages::state::PageState;
use crate::features::pages::views::{
    CategoryOption, CollectionCard, CollectionView, PageLinks, ProductCard, ProductView,
};
use crate::features::products::dtos::ProductQueryDto;
use crate::shared::constants::{HOME_COLLECTIONS_LIMIT, HOME_FEATURED_LIMIT};
use crate::shared::types::PageRequest;

/// Query string of a listing page, as a validation error when it does not parse
pub(super) fn listing_query<T>(query: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    query.map(|Query(q)| q).map_err(|rejection| AppError::Validation {
        message: "Invalid query parameters".to_string(),
        details: Some(serde_json::json!({ "query": rejection.body_text() })),
    })
}

/// Filter parameters to carry into pagination links
pub(super) fn product_filter_params(query: &ProductQueryDto) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(search) = &query.search {
        params.push(("search", search.clone()));
    }
    if let Some(category) = &query.category {
        params.push(("category", category.clone()));
    }
    if let Some(collection) = &query.collection {
        params.push(("collection", collection.clone()));
    }
    if let Some(featured) = query.featured {
        params.push(("featured", featured.to_string()));
    }
    if let Some(in_stock) = query.in_stock {
        params.push(("in_stock", in_stock.to_string()));
    }
    if let Some(min) = query.min_price {
        params.push(("min_price", min.to_string()));
    }
    if let Some(max) = query.max_price {
        params.push(("max_price", max.to_string()));
    }
    params
}

#[derive(Serialize)]
struct HomePage {
    featured: Vec<ProductCard>,
    collections: Vec<CollectionCard>,
}

pub async fn home(State(state): State<PageState>, frame: PageFrame) -> Response {
    let result = async {
        let featured = state.products.featured(HOME_FEATURED_LIMIT).await?;
        let collections = state
            .collections
            .list(None, PageRequest::new(HOME_COLLECTIONS_LIMIT, 0))
            .await?;

        let page = HomePage {
            featured: featured
                .iter()
                .map(|p| ProductCard::new(p, frame.locale))
                .collect(),
            collections: collections
                .items
                .iter()
                .map(|c| CollectionCard::new(c, frame.locale))
                .collect(),
        };

        Ok::<_, AppError>(state
            .renderer
            .render(&frame, "pages/home.html", &page)?
            .into_response())
    }
    .await;

    state.renderer.respond(&frame, result)
}

#[derive(Serialize)]
struct ProductsPage {
    products: Vec<ProductCard>,
    categories: Vec<CategoryOption>,
    search: Option<String>,
    featured: Option<bool>,
    in_stock: Option<bool>,
    min_price: Option<String>,
    max_price: Option<String>,
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
            .products
            .list(&query.public_filter(), page_request)
            .await?;
        let categories = state.categories.list().await?;

        let view = ProductsPage {
            products: page
                .items
                .iter()
                .map(|p| ProductCard::new(p, frame.locale))
                .collect(),
            categories: categories
                .iter()
                .map(|c| CategoryOption::new(c, frame.locale, query.category.as_deref()))
                .collect(),
            search: query.search.clone(),
            featured: query.featured,
            in_stock: query.in_stock,
            min_price: query.min_price.map(|p| p.to_string()),
            max_price: query.max_price.map(|p| p.to_string()),
            links: PageLinks::new(
                &frame.path,
                &product_filter_params(&query),
                page_request,
                page.pagination,
            ),
        };

        Ok::<_, AppError>(state
            .renderer
            .render(&frame, "pages/products.html", &view)?
            .into_response())
    }
    .await;

    state.renderer.respond(&frame, result)
}

#[derive(Serialize)]
struct ProductPage {
    product: ProductView,
    add_action: String,
}

pub async fn product_detail(
    State(state): State<PageState>,
    frame: PageFrame,
    Path((_, id)): Path<(String, String)>,
) -> Response {
    let result = async {
        let id = Uuid::parse_str(&id)
            .map_err(|_| AppError::not_found(Resource::Product, "Product not found"))?;
        let product = state.products.get(id).await?;

        let page = ProductPage {
            product: ProductView::new(&product, frame.locale),
            add_action: frame.href("/cart/items"),
        };

        Ok::<_, AppError>(state
            .renderer
            .render(&frame, "pages/product.html", &page)?
            .into_response())
    }
    .await;

    state.renderer.respond(&frame, result)
}

#[derive(Serialize)]
struct CollectionsPage {
    collections: Vec<CollectionCard>,
    search: Option<String>,
    links: PageLinks,
}

pub async fn collections(
    State(state): State<PageState>,
    frame: PageFrame,
    query: std::result::Result<Query<CollectionQueryDto>, QueryRejection>,
) -> Response {
    let result = async {
        let query = listing_query(query)?;
        query.validate()?;

        let page_request = query.page();
        let search = query.search();
        let page = state.collections.list(search.clone(), page_request).await?;

        let params: Vec<(&str, String)> = search
            .iter()
            .map(|s| ("search", s.clone()))
            .collect();

        let view = CollectionsPage {
            collections: page
                .items
                .iter()
                .map(|c| CollectionCard::new(c, frame.locale))
                .collect(),
            search,
            links: PageLinks::new(&frame.path, &params, page_request, page.pagination),
        };

        Ok::<_, AppError>(state
            .renderer
            .render(&frame, "pages/collections.html", &view)?
            .into_response())
    }
    .await;

    state.renderer.respond(&frame, result)
}

pub async fn collection_detail(
    State(state): State<PageState>,
    frame: PageFrame,
    Path((_, slug)): Path<(String, String)>,
) -> Response {
    let result = async {
        let (collection, products) = state.collections.get_by_slug(&slug).await?;
        let view = CollectionView::new(&collection, &products, frame.locale);

        Ok::<_, AppError>(state
            .renderer
            .render(&frame, "pages/collection.html", &view)?
            .into_response())
    }
    .await;

    state.renderer.respond(&frame, result)
}
