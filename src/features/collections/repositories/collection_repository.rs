use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::database::like_pattern;
use crate::core::error::{AppError, Result};
use crate::features::collections::models::Collection;
use crate::shared::types::PageRequest;

const COLLECTION_SELECT: &str = r#"
    SELECT c.id, c.slug, c.name_en, c.name_pt, c.name_es, c.name_fr,
           c.description_en, c.description_pt, c.description_es, c.description_fr,
           c.story_en, c.story_pt, c.story_es, c.story_fr,
           c.hero_image, c.is_active, c.display_order, c.created_at, c.updated_at
    FROM collections c
"#;

const COLLECTION_ORDER: &str = " ORDER BY c.display_order ASC, c.created_at DESC";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// One page of active collections matching `search`, plus the total count
    async fn list_active(
        &self,
        search: Option<String>,
        page: PageRequest,
    ) -> Result<(Vec<Collection>, i64)>;

    async fn find_active_by_slug(&self, slug: &str) -> Result<Option<Collection>>;
}

pub struct PgCollectionRepository {
    pool: PgPool,
}

impl PgCollectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Active rows, optionally narrowed by a name search in any locale
pub fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, search: Option<&str>) {
    builder.push(" WHERE c.is_active = TRUE");

    if let Some(search) = search {
        let pattern = like_pattern(search);
        builder.push(" AND (c.slug ILIKE ").push_bind(pattern.clone());
        for column in ["c.name_en", "c.name_pt", "c.name_es", "c.name_fr"] {
            builder
                .push(format!(" OR {} ILIKE ", column))
                .push_bind(pattern.clone());
        }
        builder.push(")");
    }
}

#[async_trait]
impl CollectionRepository for PgCollectionRepository {
    async fn list_active(
        &self,
        search: Option<String>,
        page: PageRequest,
    ) -> Result<(Vec<Collection>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM collections c");
        push_filters(&mut count, search.as_deref());

        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count collections: {:?}", e);
                AppError::Database(e)
            })?;

        let mut query = QueryBuilder::<Postgres>::new(COLLECTION_SELECT);
        push_filters(&mut query, search.as_deref());
        query
            .push(COLLECTION_ORDER)
            .push(" LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let collections = query
            .build_query_as::<Collection>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list collections: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((collections, total))
    }

    async fn find_active_by_slug(&self, slug: &str) -> Result<Option<Collection>> {
        sqlx::query_as::<_, Collection>(&format!(
            "{} WHERE c.slug = $1 AND c.is_active = TRUE",
            COLLECTION_SELECT
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get collection by slug: {:?}", e);
            AppError::Database(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_is_limited_to_active_rows() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM collections c");
        push_filters(&mut builder, None);
        assert_eq!(
            builder.sql(),
            "SELECT 1 FROM collections c WHERE c.is_active = TRUE"
        );
    }

    #[test]
    fn test_search_matches_slug_and_names() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM collections c");
        push_filters(&mut builder, Some("linen"));

        let sql = builder.sql();
        assert!(sql.contains("AND (c.slug ILIKE $1 OR c.name_en ILIKE $2"));
        assert!(sql.ends_with("c.name_fr ILIKE $5)"));
    }
}
