use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::mahasiswa::models::Mahasiswa;
use crate::shared::constants::MAX_PAGE_SIZE;
use crate::shared::types::{default_page, default_page_size};

/// Query params for the admin mahasiswa listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct MahasiswaQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Search in nim, firstname, lastname or jurusan
    pub search: Option<String>,
}

impl MahasiswaQueryParams {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Request DTO for creating or replacing a student record
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct MahasiswaDto {
    /// Student number. Blank is stored as no nim.
    #[validate(length(max = 255, message = "Nim must be at most 255 characters"))]
    pub nim: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Firstname must be 1-255 characters"))]
    pub firstname: String,

    #[validate(length(min = 1, max = 255, message = "Lastname must be 1-255 characters"))]
    pub lastname: String,

    #[validate(length(max = 100, message = "Jurusan must be at most 100 characters"))]
    pub jurusan: Option<String>,
}

/// Response DTO for a student record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MahasiswaResponseDto {
    pub id: Uuid,
    pub nim: Option<String>,
    pub firstname: String,
    pub lastname: String,
    pub jurusan: Option<String>,
    /// e.g. `A11.2023.00001 - Siti Aminah - Informatika`
    pub label: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Mahasiswa> for MahasiswaResponseDto {
    fn from(m: Mahasiswa) -> Self {
        let label = m.label();
        Self {
            id: m.id,
            nim: m.nim,
            firstname: m.firstname,
            lastname: m.lastname,
            jurusan: m.jurusan,
            label,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
