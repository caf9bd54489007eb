use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::i18n::Localized;

/// Database model for category
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Category {
    pub id: Uuid,
    pub slug: String,
    pub name_en: String,
    pub name_pt: String,
    pub name_es: String,
    pub name_fr: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn name(&self) -> Localized<String> {
        Localized::new(
            self.name_en.clone(),
            self.name_pt.clone(),
            self.name_es.clone(),
            self.name_fr.clone(),
        )
    }
}
