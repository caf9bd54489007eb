use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::products::models::{Product, ProductFilter};
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::shared::i18n::Localized;
use crate::shared::types::PageRequest;
use crate::shared::validation::{non_negative_amount, validate_slug};

/// Query parameters for product listings
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[validate(schema(function = "validate_price_range"))]
#[into_params(parameter_in = Query)]
pub struct ProductQueryDto {
    /// Case-insensitive match on SKU or any localized name
    #[validate(length(min = 1, max = 100, message = "Search must be 1-100 characters"))]
    pub search: Option<String>,

    /// Category slug
    #[validate(custom(function = "validate_slug"))]
    pub category: Option<String>,

    /// Collection slug
    #[validate(custom(function = "validate_slug"))]
    pub collection: Option<String>,

    pub featured: Option<bool>,

    /// Only products with stock (`true`) or without (`false`)
    pub in_stock: Option<bool>,

    #[validate(custom(function = "non_negative_amount"))]
    #[param(value_type = Option<String>)]
    pub min_price: Option<Decimal>,

    #[validate(custom(function = "non_negative_amount"))]
    #[param(value_type = Option<String>)]
    pub max_price: Option<Decimal>,

    /// Page size (1-50, default 12)
    #[validate(range(min = 1, max = MAX_PAGE_SIZE, message = "Limit must be between 1 and 50"))]
    pub limit: Option<i64>,

    #[validate(range(min = 0, message = "Offset must not be negative"))]
    pub offset: Option<i64>,

    /// Admin listing only: active (`true`) or inactive (`false`) rows, both
    /// when absent. Public listings always show active rows.
    pub active: Option<bool>,
}

fn validate_price_range(query: &ProductQueryDto) -> Result<(), ValidationError> {
    if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
        if min > max {
            let mut err = ValidationError::new("price_range");
            err.message = Some("min_price must not exceed max_price".into());
            return Err(err);
        }
    }
    Ok(())
}

impl ProductQueryDto {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(
            self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            self.offset.unwrap_or(0),
        )
    }

    /// Filter over active rows only
    pub fn public_filter(&self) -> ProductFilter {
        ProductFilter {
            active: Some(true),
            ..self.admin_filter()
        }
    }

    pub fn admin_filter(&self) -> ProductFilter {
        ProductFilter {
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            category: self.category.clone(),
            collection: self.collection.clone(),
            featured: self.featured,
            in_stock: self.in_stock,
            min_price: self.min_price,
            max_price: self.max_price,
            active: self.active,
        }
    }
}

/// Response DTO for product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponseDto {
    pub id: Uuid,
    pub sku: String,
    /// Name per locale: `{ en, pt, es, fr }`
    #[schema(value_type = Object)]
    pub name: Localized<String>,
    #[schema(value_type = Object)]
    pub description: Localized<Option<String>>,
    #[schema(value_type = String, example = "129.90")]
    pub price: Decimal,
    pub stock_quantity: i32,
    pub in_stock: bool,
    pub images: Vec<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub collection_id: Option<Uuid>,
    pub collection_slug: Option<String>,
    pub category_id: Option<Uuid>,
    pub category_slug: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            name: p.name(),
            description: p.description(),
            in_stock: p.in_stock(),
            id: p.id,
            sku: p.sku,
            price: p.price,
            stock_quantity: p.stock_quantity,
            images: p.images,
            is_active: p.is_active,
            is_featured: p.is_featured,
            collection_id: p.collection_id,
            collection_slug: p.collection_slug,
            category_id: p.category_id,
            category_slug: p.category_slug,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
