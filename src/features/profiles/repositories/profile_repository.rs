use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::{contains_pattern, map_db_error};
use crate::core::error::{AppError, Result};
use crate::features::profiles::models::{Profile, ProfileDetail, Role};

/// Filters accepted by the admin profile listing
#[derive(Debug, Clone, Default)]
pub struct ProfileFilter {
    /// Exact role match
    pub role: Option<Role>,
    /// Case-insensitive substring of username or email
    pub search: Option<String>,
}

/// Storage for user profiles (at most one per user)
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>>;

    async fn find_detail(&self, user_id: Uuid) -> Result<Option<ProfileDetail>>;

    /// Attach a profile to a user. A second profile for the same user fails
    /// with `Conflict`, an unknown user with `NotFound`.
    async fn create(&self, user_id: Uuid, role: Role) -> Result<Profile>;

    async fn update_role(&self, user_id: Uuid, role: Role) -> Result<Option<Profile>>;

    async fn delete(&self, user_id: Uuid) -> Result<bool>;

    async fn list(
        &self,
        filter: &ProfileFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<ProfileDetail>, i64)>;

    /// Every profile holding `role`, ordered by username
    async fn list_by_role(&self, role: Role) -> Result<Vec<ProfileDetail>>;
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
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>> {
        sqlx::query_as::<_, Profile>("SELECT id, user_id, role FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get profile by user: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_detail(&self, user_id: Uuid) -> Result<Option<ProfileDetail>> {
        sqlx::query_as::<_, ProfileDetail>(
            r#"
            SELECT p.id, p.user_id, u.username, u.email, p.role
            FROM profiles p
            JOIN users u ON u.id = p.user_id
            WHERE p.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get profile detail: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn create(&self, user_id: Uuid, role: Role) -> Result<Profile> {
        sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, role
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(user_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_db_error(
                e,
                "User already has a profile",
                &format!("User {} not found", user_id),
            )
        })
    }

    async fn update_role(&self, user_id: Uuid, role: Role) -> Result<Option<Profile>> {
        sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles SET role = $2
            WHERE user_id = $1
            RETURNING id, user_id, role
            "#,
        )
        .bind(user_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update profile role: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn delete(&self, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete profile: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        filter: &ProfileFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<ProfileDetail>, i64)> {
        let search = filter.search.as_deref().map(contains_pattern);

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM profiles p
            JOIN users u ON u.id = p.user_id
            WHERE ($1::profile_role IS NULL OR p.role = $1)
              AND ($2::text IS NULL OR u.username ILIKE $2 OR u.email ILIKE $2)
            "#,
        )
        .bind(filter.role)
        .bind(&search)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count profiles: {:?}", e);
            AppError::Database(e)
        })?;

        let profiles = sqlx::query_as::<_, ProfileDetail>(
            r#"
            SELECT p.id, p.user_id, u.username, u.email, p.role
            FROM profiles p
            JOIN users u ON u.id = p.user_id
            WHERE ($1::profile_role IS NULL OR p.role = $1)
              AND ($2::text IS NULL OR u.username ILIKE $2 OR u.email ILIKE $2)
            ORDER BY u.username
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(filter.role)
        .bind(&search)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list profiles: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((profiles, total))
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<ProfileDetail>> {
        sqlx::query_as::<_, ProfileDetail>(
            r#"
            SELECT p.id, p.user_id, u.username, u.email, p.role
            FROM profiles p
            JOIN users u ON u.id = p.user_id
            WHERE p.role = $1
            ORDER BY u.username
            "#,
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list profiles by role: {:?}", e);
            AppError::Database(e)
        })
    }
}
