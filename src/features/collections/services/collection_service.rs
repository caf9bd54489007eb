use std::sync::Arc;

use crate::core::error::{AppError, Resource, Result};
use crate::features::collections::models::Collection;
use crate::features::collections::repositories::CollectionRepository;
use crate::features::products::models::Product;
use crate::features::products::ProductService;
use crate::shared::types::{PageRequest, Paginated};

/// Service for collection reads
pub struct CollectionService {
    repository: Arc<dyn CollectionRepository>,
    products: Arc<ProductService>,
}

impl CollectionService {
    pub fn new(repository: Arc<dyn CollectionRepository>, products: Arc<ProductService>) -> Self {
        Self {
            repository,
            products,
        }
    }

    pub async fn list(
        &self,
        search: Option<String>,
        page: PageRequest,
    ) -> Result<Paginated<Collection>> {
        let (items, total) = self.repository.list_active(search, page).await?;
        Ok(Paginated::new(items, total, page))
    }

    /// Active collection with its active products
    pub async fn get_by_slug(&self, slug: &str) -> Result<(Collection, Vec<Product>)> {
        let collection = self
            .repository
            .find_active_by_slug(slug)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    Resource::Collection,
                    format!("Collection '{}' not found", slug),
                )
            })?;

        let products = self.products.list_for_collection(collection.id).await?;

        Ok((collection, products))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::collections::repositories::MockCollectionRepository;
    use crate::features::products::repositories::MockProductRepository;
    use crate::shared::test_helpers::{collection_fixture, product_fixture};

    #[tokio::test]
    async fn test_detail_includes_collection_products() {
        let collection = collection_fixture("summer-linen");
        let collection_id = collection.id;

        let mut repo = MockCollectionRepository::new();
        repo.expect_find_active_by_slug()
            .withf(|slug| slug == "summer-linen")
            .returning(move |_| Ok(Some(collection.clone())));
        let mut products = MockProductRepository::new();
        products
            .expect_list_for_collection()
            .withf(move |id| *id == collection_id)
            .returning(|_| Ok(vec![product_fixture(), product_fixture()]));

        let service = CollectionService::new(
            Arc::new(repo),
            Arc::new(ProductService::new(Arc::new(products))),
        );
        let (found, items) = service.get_by_slug("summer-linen").await.unwrap();

        assert_eq!(found.slug, "summer-linen");
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_slug_is_collection_not_found() {
        let mut repo = MockCollectionRepository::new();
        repo.expect_find_active_by_slug().returning(|_| Ok(None));
        let mut products = MockProductRepository::new();
        products.expect_list_for_collection().never();

        let service = CollectionService::new(
            Arc::new(repo),
            Arc::new(ProductService::new(Arc::new(products))),
        );
        let err = service.get_by_slug("missing").await.unwrap_err();

        assert_eq!(err.code(), "collection_not_found");
    }
}
