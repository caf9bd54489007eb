use sqlx::FromRow;

/// Aggregate counts read in a single query
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow)]
pub struct DashboardStats {
    pub total_products: i64,
    pub active_products: i64,
    pub featured_products: i64,
    pub low_stock_products: i64,
    pub out_of_stock_products: i64,
    pub active_collections: i64,
    pub cart_items: i64,
}
