use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::admin::models::DashboardStats;
use crate::shared::constants::LOW_STOCK_THRESHOLD;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn dashboard_stats(&self) -> Result<DashboardStats>;
}

pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepository for PgAdminRepository {
    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        sqlx::query_as::<_, DashboardStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM products) AS total_products,
                (SELECT COUNT(*) FROM products WHERE is_active) AS active_products,
                (SELECT COUNT(*) FROM products WHERE is_active AND is_featured) AS featured_products,
                (SELECT COUNT(*) FROM products
                    WHERE is_active AND stock_quantity > 0 AND stock_quantity <= $1) AS low_stock_products,
                (SELECT COUNT(*) FROM products
                    WHERE is_active AND stock_quantity = 0) AS out_of_stock_products,
                (SELECT COUNT(*) FROM collections WHERE is_active) AS active_collections,
                (SELECT COALESCE(SUM(quantity), 0)::BIGINT FROM cart_items) AS cart_items
            "#,
        )
        .bind(LOW_STOCK_THRESHOLD)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to read dashboard stats: {:?}", e);
            AppError::Database(e)
        })
    }
}
