use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::profiles::dtos::{
    CreateProfileDto, ProfileQueryParams, ProfileResponseDto, UpdateProfileDto,
};
use crate::features::profiles::repositories::{ProfileFilter, ProfileRepository};
use crate::features::users::UserRepository;

/// Service for profile administration
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
    users: Arc<dyn UserRepository>,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { profiles, users }
    }

    /// List profiles, optionally filtered by role and searched by username/email
    pub async fn list(
        &self,
        params: &ProfileQueryParams,
    ) -> Result<(Vec<ProfileResponseDto>, i64)> {
        let filter = ProfileFilter {
            role: params.role,
            search: params
                .search
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        };

        let (profiles, total) = self
            .profiles
            .list(&filter, params.offset(), params.limit())
            .await?;

        Ok((profiles.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, user_id: Uuid) -> Result<ProfileResponseDto> {
        self.profiles
            .find_detail(user_id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Profile for user {} not found", user_id)))
    }

    pub async fn create(&self, dto: CreateProfileDto) -> Result<ProfileResponseDto> {
        if self.users.find_by_id(dto.user_id).await?.is_none() {
            return Err(AppError::NotFound(format!("User {} not found", dto.user_id)));
        }

        let profile = self.profiles.create(dto.user_id, dto.role).await?;
        tracing::info!(
            "Profile created: user_id={}, role={}",
            profile.user_id,
            profile.role
        );

        self.get(profile.user_id).await
    }

    pub async fn update(&self, user_id: Uuid, dto: UpdateProfileDto) -> Result<ProfileResponseDto> {
        let profile = self
            .profiles
            .update_role(user_id, dto.role)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile for user {} not found", user_id)))?;

        tracing::info!(
            "Profile role changed: user_id={}, role={}",
            profile.user_id,
            profile.role
        );

        self.get(user_id).await
    }

    pub async fn delete(&self, user_id: Uuid) -> Result<()> {
        if !self.profiles.delete(user_id).await? {
            return Err(AppError::NotFound(format!(
                "Profile for user {} not found",
                user_id
            )));
        }

        tracing::info!("Profile deleted: user_id={}", user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::profiles::models::Role;
    use crate::shared::test_helpers::InMemoryStore;

    fn service(store: &Arc<InMemoryStore>) -> ProfileService {
        ProfileService::new(store.clone(), store.clone())
    }

    fn query(role: Option<Role>, search: Option<&str>) -> ProfileQueryParams {
        ProfileQueryParams {
            page: 1,
            page_size: 10,
            role,
            search: search.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_defaults_to_mahasiswa() {
        let store = InMemoryStore::new();
        let user = store.seed_user("alice", "correct", None).await;

        let profile = service(&store)
            .create(CreateProfileDto {
                user_id: user.id,
                role: Role::default(),
            })
            .await
            .unwrap();

        assert_eq!(profile.role, Role::Mahasiswa);
        assert_eq!(profile.label, "alice (Mahasiswa)");
    }

    #[tokio::test]
    async fn test_second_profile_for_user_conflicts() {
        let store = InMemoryStore::new();
        let user = store.seed_user("alice", "correct", Some(Role::Mahasiswa)).await;

        let result = service(&store)
            .create(CreateProfileDto {
                user_id: user.id,
                role: Role::Dosen,
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_for_unknown_user_is_not_found() {
        let store = InMemoryStore::new();

        let result = service(&store)
            .create(CreateProfileDto {
                user_id: Uuid::now_v7(),
                role: Role::Dosen,
            })
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_filters_by_role_and_searches_username_or_email() {
        let store = InMemoryStore::new();
        store.seed_user("alice", "pw-alice", Some(Role::Mahasiswa)).await;
        store.seed_user("bob", "pw-bob", Some(Role::Dosen)).await;
        let carol = store.seed_user("carol", "pw-carol", Some(Role::Dosen)).await;
        store.set_email(carol.id, "carol@kampus.ac.id").await;

        let service = service(&store);

        let (dosen, total) = service.list(&query(Some(Role::Dosen), None)).await.unwrap();
        assert_eq!(total, 2);
        assert!(dosen.iter().all(|p| p.role == Role::Dosen));

        let (by_email, _) = service.list(&query(None, Some("KAMPUS.ac"))).await.unwrap();
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].username, "carol");

        let (by_username, _) = service
            .list(&query(Some(Role::Mahasiswa), Some("ali")))
            .await
            .unwrap();
        assert_eq!(by_username.len(), 1);
        assert_eq!(by_username[0].username, "alice");
    }

    #[tokio::test]
    async fn test_update_role() {
        let store = InMemoryStore::new();
        let user = store.seed_user("alice", "correct", Some(Role::Mahasiswa)).await;

        let updated = service(&store)
            .update(user.id, UpdateProfileDto { role: Role::Dosen })
            .await
            .unwrap();

        assert_eq!(updated.role, Role::Dosen);
    }
}
