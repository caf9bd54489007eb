use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::database::like_pattern;
use crate::core::error::{AppError, Result};
use crate::features::products::models::{Product, ProductFilter};
use crate::shared::types::PageRequest;

const PRODUCT_SELECT: &str = r#"
    SELECT p.id, p.sku, p.name_en, p.name_pt, p.name_es, p.name_fr,
           p.description_en, p.description_pt, p.description_es, p.description_fr,
           p.price, p.stock_quantity, p.images, p.is_active, p.is_featured,
           p.collection_id, col.slug AS collection_slug,
           p.category_id, cat.slug AS category_slug,
           p.created_at, p.updated_at
    FROM products p
    LEFT JOIN collections col ON col.id = p.collection_id
    LEFT JOIN categories cat ON cat.id = p.category_id
"#;

const PRODUCT_COUNT: &str = r#"
    SELECT COUNT(*)
    FROM products p
    LEFT JOIN collections col ON col.id = p.collection_id
    LEFT JOIN categories cat ON cat.id = p.category_id
"#;

const PRODUCT_ORDER: &str = " ORDER BY p.is_featured DESC, p.created_at DESC";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// One page of matching products plus the total match count
    async fn list(&self, filter: &ProductFilter, page: PageRequest) -> Result<(Vec<Product>, i64)>;

    async fn find_active_by_id(&self, id: Uuid) -> Result<Option<Product>>;

    /// Every active product of a collection, in listing order
    async fn list_for_collection(&self, collection_id: Uuid) -> Result<Vec<Product>>;
}

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the filter's predicates. Shared by the count and the page query so
/// both always see the same row set.
pub fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    builder.push(" WHERE TRUE");

    if let Some(active) = filter.active {
        builder.push(" AND p.is_active = ").push_bind(active);
    }

    if let Some(search) = &filter.search {
        let pattern = like_pattern(search);
        builder.push(" AND (p.sku ILIKE ").push_bind(pattern.clone());
        for column in ["p.name_en", "p.name_pt", "p.name_es", "p.name_fr"] {
            builder
                .push(format!(" OR {} ILIKE ", column))
                .push_bind(pattern.clone());
        }
        builder.push(")");
    }

    if let Some(category) = &filter.category {
        builder.push(" AND cat.slug = ").push_bind(category.clone());
    }

    if let Some(collection) = &filter.collection {
        builder.push(" AND col.slug = ").push_bind(collection.clone());
    }

    if let Some(featured) = filter.featured {
        builder.push(" AND p.is_featured = ").push_bind(featured);
    }

    match filter.in_stock {
        Some(true) => {
            builder.push(" AND p.stock_quantity > 0");
        }
        Some(false) => {
            builder.push(" AND p.stock_quantity = 0");
        }
        None => {}
    }

    if let Some(min) = filter.min_price {
        builder.push(" AND p.price >= ").push_bind(min);
    }

    if let Some(max) = filter.max_price {
        builder.push(" AND p.price <= ").push_bind(max);
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self, filter: &ProductFilter, page: PageRequest) -> Result<(Vec<Product>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new(PRODUCT_COUNT);
        push_filters(&mut count, filter);

        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count products: {:?}", e);
                AppError::Database(e)
            })?;

        let mut query = QueryBuilder::<Postgres>::new(PRODUCT_SELECT);
        push_filters(&mut query, filter);
        query
            .push(PRODUCT_ORDER)
            .push(" LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let products = query
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list products: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((products, total))
    }

    async fn find_active_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        sqlx::query_as::<_, Product>(&format!(
            "{} WHERE p.id = $1 AND p.is_active = TRUE",
            PRODUCT_SELECT
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get product: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_for_collection(&self, collection_id: Uuid) -> Result<Vec<Product>> {
        sqlx::query_as::<_, Product>(&format!(
            "{} WHERE p.collection_id = $1 AND p.is_active = TRUE{}",
            PRODUCT_SELECT, PRODUCT_ORDER
        ))
        .bind(collection_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list collection products: {:?}", e);
            AppError::Database(e)
        })
    }
}
