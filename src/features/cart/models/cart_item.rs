use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::i18n::{Locale, Localized};

/// Database model for a cart row
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CartItem {
    pub id: Uuid,
    pub user_id: String,
    pub product_id: Uuid,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Cart row joined with the product data shown in the cart
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CartLine {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub sku: String,
    pub name_en: String,
    pub name_pt: String,
    pub name_es: String,
    pub name_fr: String,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub images: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl CartLine {
    pub fn name(&self) -> Localized<String> {
        Localized::new(
            self.name_en.clone(),
            self.name_pt.clone(),
            self.name_es.clone(),
            self.name_fr.clone(),
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

    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The acting user's cart
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| i64::from(l.quantity)).sum()
    }

    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

/// Result of setting a line's quantity
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityChange {
    pub id: Uuid,
    pub removed: bool,
    pub line: Option<CartLine>,
}
