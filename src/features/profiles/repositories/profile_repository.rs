use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::profiles::models::{NewProfile, Profile};

const PROFILE_COLUMNS: &str = "id, email, full_name, is_admin, created_at, updated_at";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Profile>>;

    /// Insert a profile; an existing row with the same id is returned unchanged
    /// apart from filling in a missing email
    async fn insert(&self, profile: NewProfile) -> Result<Profile>;

    async fn update_full_name(&self, id: &str, full_name: &str) -> Result<Option<Profile>>;
}

pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Profile>> {
        sqlx::query_as::<_, Profile>(&format!(
            "SELECT {} FROM profiles WHERE id = $1",
            PROFILE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get profile: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn insert(&self, profile: NewProfile) -> Result<Profile> {
        sqlx::query_as::<_, Profile>(&format!(
            r#"
            INSERT INTO profiles (id, email, full_name)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
                SET email = COALESCE(profiles.email, EXCLUDED.email)
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(&profile.id)
        .bind(&profile.email)
        .bind(&profile.full_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert profile: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn update_full_name(&self, id: &str, full_name: &str) -> Result<Option<Profile>> {
        sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET full_name = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(id)
        .bind(full_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update profile: {:?}", e);
            AppError::Database(e)
        })
    }
}
