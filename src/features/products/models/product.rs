use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::i18n::{Locale, Localized};

/// Product row joined with its collection and category slugs
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub sku: String,
    pub name_en: String,
    pub name_pt: String,
    pub name_es: String,
    pub name_fr: String,
    pub description_en: Option<String>,
    pub description_pt: Option<String>,
    pub description_es: Option<String>,
    pub description_fr: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
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

impl Product {
    pub fn name(&self) -> Localized<String> {
        Localized::new(
            self.name_en.clone(),
            self.name_pt.clone(),
            self.name_es.clone(),
            self.name_fr.clone(),
        )
    }

    pub fn description(&self) -> Localized<Option<String>> {
        Localized::new(
            self.description_en.clone(),
            self.description_pt.clone(),
            self.description_es.clone(),
            self.description_fr.clone(),
        )
    }

    pub fn name_in(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.name_en,
            Locale::Pt => &self.name_pt,
            Locale::Es => &self.name_es,
            Locale::Fr => &self.name_fr,
        }
    }

    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Conjunctive listing predicates; `None` imposes no constraint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub collection: Option<String>,
    pub featured: Option<bool>,
    pub in_stock: Option<bool>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// `Some(true)` on every public listing; admins may leave it open
    pub active: Option<bool>,
}

impl ProductFilter {
    /// Filter restricted to rows shoppers may see
    pub fn public() -> Self {
        Self {
            active: Some(true),
            ..Self::default()
        }
    }
}
