use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::password;
use crate::features::profiles::ProfileRepository;
use crate::features::users::dtos::{CreateUserDto, UserResponseDto};
use crate::features::users::models::NewUser;
use crate::features::users::UserRepository;
use crate::shared::types::PaginationQuery;

/// Service for user administration
pub struct UserService {
    users: Arc<dyn UserRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { users, profiles }
    }

    pub async fn list(&self, params: &PaginationQuery) -> Result<(Vec<UserResponseDto>, i64)> {
        let (users, total) = self.users.list(params.offset(), params.limit()).await?;
        Ok((users.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, id: Uuid) -> Result<UserResponseDto> {
        self.users
            .find_summary(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Create a user, and its profile when a role is given
    pub async fn create(&self, dto: CreateUserDto) -> Result<UserResponseDto> {
        let password_hash = password::hash_password(dto.password).await?;

        let user = self
            .users
            .create(NewUser {
                username: dto.username,
                email: dto.email.filter(|e| !e.is_empty()),
                password_hash,
                is_staff: dto.is_staff,
            })
            .await?;

        if let Some(role) = dto.role {
            if let Err(e) = self.profiles.create(user.id, role).await {
                // Roll back the half-created account
                self.users.delete(user.id).await?;
                return Err(e);
            }
        }

        tracing::info!(
            "User created: id={}, username={}, is_staff={}",
            user.id,
            user.username,
            user.is_staff
        );

        self.get(user.id).await
    }

    /// Delete a user together with its profile, grades and sessions
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.users.delete(id).await? {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }

        tracing::info!("User deleted: id={}", id);
        Ok(())
    }

    /// Create the bootstrap staff account unless the username already exists.
    ///
    /// Returns true when a new account was created.
    pub async fn ensure_staff_user(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> Result<bool> {
        if self.users.find_by_username(username).await?.is_some() {
            return Ok(false);
        }

        let password_hash = password::hash_password(password.to_string()).await?;
        let user = self
            .users
            .create(NewUser {
                username: username.to_string(),
                email: email.map(str::to_string),
                password_hash,
                is_staff: true,
            })
            .await?;

        tracing::info!("Bootstrap staff user created: {}", user.username);
        Ok(true)
    }
}
