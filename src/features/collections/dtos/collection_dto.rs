use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::collections::models::Collection;
use crate::features::products::dtos::ProductResponseDto;
use crate::features::products::models::Product;
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::shared::i18n::Localized;
use crate::shared::types::PageRequest;

/// Query parameters for the collection listing
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CollectionQueryDto {
    #[validate(length(min = 1, max = 100, message = "Search must be 1-100 characters"))]
    pub search: Option<String>,

    /// Page size (1-50, default 12)
    #[validate(range(min = 1, max = MAX_PAGE_SIZE, message = "Limit must be between 1 and 50"))]
    pub limit: Option<i64>,

    #[validate(range(min = 0, message = "Offset must not be negative"))]
    pub offset: Option<i64>,
}

impl CollectionQueryDto {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(
            self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            self.offset.unwrap_or(0),
        )
    }

    pub fn search(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// Response DTO for collection
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResponseDto {
    pub id: Uuid,
    pub slug: String,
    /// Name per locale: `{ en, pt, es, fr }`
    #[schema(value_type = Object)]
    pub name: Localized<String>,
    #[schema(value_type = Object)]
    pub description: Localized<Option<String>>,
    #[schema(value_type = Object)]
    pub story: Localized<Option<String>>,
    pub hero_image: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Collection> for CollectionResponseDto {
    fn from(c: Collection) -> Self {
        Self {
            name: c.name(),
            description: c.description(),
            story: c.story(),
            id: c.id,
            slug: c.slug,
            hero_image: c.hero_image,
            display_order: c.display_order,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Collection detail with its active products
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDetailDto {
    #[serde(flatten)]
    pub collection: CollectionResponseDto,
    pub products: Vec<ProductResponseDto>,
}

impl From<(Collection, Vec<Product>)> for CollectionDetailDto {
    fn from((collection, products): (Collection, Vec<Product>)) -> Self {
        Self {
            collection: collection.into(),
            products: products.into_iter().map(Into::into).collect(),
        }
    }
}
