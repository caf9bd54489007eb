use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::categories::models::Category;
use crate::shared::i18n::Localized;

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub slug: String,
    /// Name per locale: `{ en, pt, es, fr }`
    #[schema(value_type = Object)]
    pub name: Localized<String>,
    pub display_order: i32,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name(),
            slug: c.slug,
            display_order: c.display_order,
        }
    }
}
