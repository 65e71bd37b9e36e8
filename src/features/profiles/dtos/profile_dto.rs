use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::profiles::models::{ProfileDetail, Role};
use crate::shared::constants::MAX_PAGE_SIZE;
use crate::shared::types::{default_page, default_page_size};

/// Query params for the admin profile listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ProfileQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Only profiles with this role
    pub role: Option<Role>,

    /// Search in username or email
    pub search: Option<String>,
}

impl ProfileQueryParams {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Request DTO for attaching a profile to an existing user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProfileDto {
    pub user_id: Uuid,
    /// Defaults to MAHASISWA
    #[serde(default)]
    pub role: Role,
}

/// Request DTO for changing a profile's role
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileDto {
    pub role: Role,
}

/// Response DTO for a profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub role: Role,
    /// e.g. `alice (Dosen)`
    pub label: String,
}

impl From<ProfileDetail> for ProfileResponseDto {
    fn from(p: ProfileDetail) -> Self {
        let label = p.label();
        Self {
            id: p.id,
            user_id: p.user_id,
            username: p.username,
            email: p.email,
            role: p.role,
            label,
        }
    }
}
