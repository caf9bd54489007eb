use std::sync::Arc;

use crate::core::error::Result;
use crate::features::admin::models::DashboardStats;
use crate::features::admin::repositories::AdminRepository;
use crate::features::products::models::{Product, ProductFilter};
use crate::features::products::ProductService;
use crate::shared::types::{PageRequest, Paginated};

/// Service for admin dashboard data
pub struct AdminService {
    repository: Arc<dyn AdminRepository>,
    products: Arc<ProductService>,
}

impl AdminService {
    pub fn new(repository: Arc<dyn AdminRepository>, products: Arc<ProductService>) -> Self {
        Self {
            repository,
            products,
        }
    }

    pub async fn dashboard(&self) -> Result<DashboardStats> {
        self.repository.dashboard_stats().await
    }

    /// Product listing that includes inactive rows unless `filter.active` narrows it
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<Paginated<Product>> {
        self.products.list(filter, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::admin::repositories::MockAdminRepository;
    use crate::features::products::repositories::MockProductRepository;
    use crate::shared::test_helpers::product_fixture;

    #[tokio::test]
    async fn test_admin_listing_passes_filter_through() {
        let mut products = MockProductRepository::new();
        products
            .expect_list()
            .withf(|filter, page| filter.active == Some(false) && page.limit == 12)
            .times(1)
            .returning(|_, _| {
                let mut product = product_fixture();
                product.is_active = false;
                Ok((vec![product], 1))
            });

        let service = AdminService::new(
            Arc::new(MockAdminRepository::new()),
            Arc::new(ProductService::new(Arc::new(products))),
        );
        let filter = ProductFilter {
            active: Some(false),
            ..Default::default()
        };

        let page = service
            .list_products(&filter, PageRequest::new(12, 0))
            .await
            .unwrap();

        assert_eq!(page.pagination.total, 1);
        assert!(!page.items[0].is_active);
    }

    #[tokio::test]
    async fn test_dashboard_reads_repository() {
        let mut repo = MockAdminRepository::new();
        repo.expect_dashboard_stats().returning(|| {
            Ok(DashboardStats {
                total_products: 10,
                active_products: 8,
                low_stock_products: 2,
                ..Default::default()
            })
        });

        let service = AdminService::new(
            Arc::new(repo),
            Arc::new(ProductService::new(Arc::new(MockProductRepository::new()))),
        );

        let stats = service.dashboard().await.unwrap();
        assert_eq!(stats.total_products, 10);
        assert_eq!(stats.low_stock_products, 2);
    }
}
