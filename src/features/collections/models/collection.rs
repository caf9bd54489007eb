use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::i18n::Localized;

/// Database model for collection
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Collection {
    pub id: Uuid,
    pub slug: String,
    pub name_en: String,
    pub name_pt: String,
    pub name_es: String,
    pub name_fr: String,
    pub description_en: Option<String>,
    pub description_pt: Option<String>,
    pub description_es: Option<String>,
    pub description_fr: Option<String>,
    pub story_en: Option<String>,
    pub story_pt: Option<String>,
    pub story_es: Option<String>,
    pub story_fr: Option<String>,
    pub hero_image: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Collection {
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

    pub fn story(&self) -> Localized<Option<String>> {
        Localized::new(
            self.story_en.clone(),
            self.story_pt.clone(),
            self.story_es.clone(),
            self.story_fr.clone(),
        )
    }
}
