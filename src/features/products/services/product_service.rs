use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Resource, Result};
use crate::features::products::models::{Product, ProductFilter};
use crate::features::products::repositories::ProductRepository;
use crate::shared::types::{PageRequest, Paginated};

/// Service for catalog product reads
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, filter: &ProductFilter, page: PageRequest) -> Result<Paginated<Product>> {
        let (items, total) = self.repository.list(filter, page).await?;
        Ok(Paginated::new(items, total, page))
    }

    /// Active product by id
    pub async fn get(&self, id: Uuid) -> Result<Product> {
        self.repository
            .find_active_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(Resource::Product, "Product not found"))
    }

    /// Featured active products for the home page
    pub async fn featured(&self, limit: i64) -> Result<Vec<Product>> {
        let filter = ProductFilter {
            featured: Some(true),
            ..ProductFilter::public()
        };
        let (items, _) = self
            .repository
            .list(&filter, PageRequest::new(limit, 0))
            .await?;
        Ok(items)
    }

    pub async fn list_for_collection(&self, collection_id: Uuid) -> Result<Vec<Product>> {
        self.repository.list_for_collection(collection_id).await
    }
}
