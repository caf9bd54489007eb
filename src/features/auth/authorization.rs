//! Single authorization predicate shared by the page gate and the API gates.

use std::sync::Arc;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::profiles::repositories::ProfileRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredRole {
    /// Any signed-in user
    Customer,
    /// Signed-in user whose profile carries the admin flag
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Unauthenticated,
    Forbidden,
}

/// A signed-in user together with what the store knows about their privileges
#[derive(Debug, Clone, Copy)]
pub struct Principal<'a> {
    pub user: &'a AuthenticatedUser,
    pub is_admin: bool,
}

pub fn authorize(principal: Option<&Principal<'_>>, required: RequiredRole) -> Access {
    match (principal, required) {
        (None, _) => Access::Unauthenticated,
        (Some(_), RequiredRole::Customer) => Access::Allowed,
        (Some(p), RequiredRole::Admin) if p.is_admin => Access::Allowed,
        (Some(_), RequiredRole::Admin) => Access::Forbidden,
    }
}

/// Resolves the admin flag for a session, one profile lookup per check
pub struct Authorizer {
    profiles: Arc<dyn ProfileRepository>,
}

impl Authorizer {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn check(
        &self,
        user: Option<&AuthenticatedUser>,
        required: RequiredRole,
    ) -> Result<Access> {
        let Some(user) = user else {
            return Ok(authorize(None, required));
        };

        let is_admin = match required {
            RequiredRole::Customer => false,
            RequiredRole::Admin => self
                .profiles
                .find_by_id(&user.user_id)
                .await?
                .is_some_and(|p| p.is_admin),
        };

        Ok(authorize(Some(&Principal { user, is_admin }), required))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::profiles::repositories::MockProfileRepository;
    use crate::shared::test_helpers::profile_fixture;

    #[test]
    fn test_authorize_table() {
        let user = AuthenticatedUser::new("u");
        let customer = Principal {
            user: &user,
            is_admin: false,
        };
        let admin = Principal {
            user: &user,
            is_admin: true,
        };

        assert_eq!(authorize(None, RequiredRole::Customer), Access::Unauthenticated);
        assert_eq!(authorize(None, RequiredRole::Admin), Access::Unauthenticated);
        assert_eq!(authorize(Some(&customer), RequiredRole::Customer), Access::Allowed);
        assert_eq!(authorize(Some(&customer), RequiredRole::Admin), Access::Forbidden);
        assert_eq!(authorize(Some(&admin), RequiredRole::Admin), Access::Allowed);
    }

    #[tokio::test]
    async fn test_customer_check_skips_profile_lookup() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_id().never();

        let access = Authorizer::new(Arc::new(repo))
            .check(Some(&AuthenticatedUser::new("u")), RequiredRole::Customer)
            .await
            .unwrap();

        assert_eq!(access, Access::Allowed);
    }

    #[tokio::test]
    async fn test_admin_check_reads_profile_flag() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_id()
            .withf(|id| id == "admin")
            .returning(|id| Ok(Some(profile_fixture(id, true))));
        repo.expect_find_by_id()
            .withf(|id| id == "shopper")
            .returning(|id| Ok(Some(profile_fixture(id, false))));
        repo.expect_find_by_id()
            .withf(|id| id == "ghost")
            .returning(|_| Ok(None));

        let authorizer = Authorizer::new(Arc::new(repo));
        let check = |id: &'static str| {
            let authorizer = &authorizer;
            async move {
                authorizer
                    .check(Some(&AuthenticatedUser::new(id)), RequiredRole::Admin)
                    .await
                    .unwrap()
            }
        };

        assert_eq!(check("admin").await, Access::Allowed);
        assert_eq!(check("shopper").await, Access::Forbidden);
        assert_eq!(check("ghost").await, Access::Forbidden);
    }

    #[tokio::test]
    async fn test_anonymous_check_is_unauthenticated() {
        let access = Authorizer::new(Arc::new(MockProfileRepository::new()))
            .check(None, RequiredRole::Admin)
            .await
            .unwrap();

        assert_eq!(access, Access::Unauthenticated);
    }
}
