use std::sync::Arc;

use crate::core::error::{AppError, Resource, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::profiles::dtos::UpdateProfileDto;
use crate::features::profiles::models::{NewProfile, Profile};
use crate::features::profiles::repositories::ProfileRepository;

/// Service for storefront profiles
pub struct ProfileService {
    repository: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    /// Create the profile row for a freshly registered identity
    pub async fn create(&self, profile: NewProfile) -> Result<Profile> {
        self.repository.insert(profile).await
    }

    /// Fetch the caller's profile, creating it when registration left none behind
    pub async fn get_or_create(&self, user: &AuthenticatedUser) -> Result<Profile> {
        if let Some(profile) = self.repository.find_by_id(&user.user_id).await? {
            return Ok(profile);
        }

        tracing::warn!(
            "Profile missing for user {}, creating it on demand",
            user.user_id
        );

        self.repository
            .insert(NewProfile {
                id: user.user_id.clone(),
                email: None,
                full_name: None,
            })
            .await
    }

    pub async fn update(&self, user: &AuthenticatedUser, dto: UpdateProfileDto) -> Result<Profile> {
        self.get_or_create(user).await?;

        self.repository
            .update_full_name(&user.user_id, dto.full_name.trim())
            .await?
            .ok_or_else(|| AppError::not_found(Resource::Profile, "Profile not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::profiles::repositories::MockProfileRepository;
    use crate::shared::test_helpers::profile_fixture;

    #[tokio::test]
    async fn test_get_or_create_returns_existing_profile() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_id()
            .withf(|id| id == "user-1")
            .returning(|id| Ok(Some(profile_fixture(id, false))));
        repo.expect_insert().never();

        let service = ProfileService::new(Arc::new(repo));
        let profile = service
            .get_or_create(&AuthenticatedUser::new("user-1"))
            .await
            .unwrap();

        assert_eq!(profile.id, "user-1");
    }

    #[tokio::test]
    async fn test_get_or_create_repairs_missing_profile() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|p| p.id == "user-2" && p.email.is_none())
            .times(1)
            .returning(|p| Ok(profile_fixture(&p.id, false)));

        let service = ProfileService::new(Arc::new(repo));
        let profile = service
            .get_or_create(&AuthenticatedUser::new("user-2"))
            .await
            .unwrap();

        assert_eq!(profile.id, "user-2");
        assert!(!profile.is_admin);
    }

    #[tokio::test]
    async fn test_update_trims_full_name() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(profile_fixture(id, false))));
        repo.expect_update_full_name()
            .withf(|id, name| id == "user-3" && name == "Ana Lima")
            .returning(|id, name| {
                let mut profile = profile_fixture(id, false);
                profile.full_name = Some(name.to_string());
                Ok(Some(profile))
            });

        let service = ProfileService::new(Arc::new(repo));
        let profile = service
            .update(
                &AuthenticatedUser::new("user-3"),
                UpdateProfileDto {
                    full_name: "  Ana Lima ".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(profile.full_name.as_deref(), Some("Ana Lima"));
    }
}
