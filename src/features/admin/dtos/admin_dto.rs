use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::admin::models::DashboardStats;

/// Dashboard widget counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDto {
    pub total_products: i64,
    pub active_products: i64,
    pub featured_products: i64,
    /// Active products with stock at or below the low-stock threshold, but not zero
    pub low_stock_products: i64,
    pub out_of_stock_products: i64,
    pub active_collections: i64,
    /// Sum of quantities across every cart
    pub cart_items: i64,
}

impl From<DashboardStats> for DashboardStatsDto {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_products: stats.total_products,
            active_products: stats.active_products,
            featured_products: stats.featured_products,
            low_stock_products: stats.low_stock_products,
            out_of_stock_products: stats.out_of_stock_products,
            active_collections: stats.active_collections,
            cart_items: stats.cart_items,
        }
    }
}
