use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::nilai::models::NilaiRecord;
use crate::features::profiles::models::ProfileDetail;
use crate::shared::constants::MAX_PAGE_SIZE;
use crate::shared::types::{default_page, default_page_size};

/// Query params for the admin nilai listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct NilaiQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Search in student username or course name
    pub search: Option<String>,

    /// Only grades for this course (exact match)
    pub mata_kuliah: Option<String>,
}

impl NilaiQueryParams {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Request DTO for creating or replacing a grade
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NilaiDto {
    /// Student user ID
    pub mahasiswa_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Mata kuliah must be 1-100 characters"))]
    pub mata_kuliah: String,

    pub nilai: f64,
}

/// Response DTO for a grade
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NilaiResponseDto {
    pub id: Uuid,
    pub mahasiswa_id: Uuid,
    pub username: String,
    pub mata_kuliah: String,
    pub nilai: f64,
    /// e.g. `alice - Basis Data: 88.0`
    pub label: String,
    pub created_at: DateTime<Utc>,
}

impl From<NilaiRecord> for NilaiResponseDto {
    fn from(n: NilaiRecord) -> Self {
        let label = n.label();
        Self {
            id: n.id,
            mahasiswa_id: n.mahasiswa_id,
            username: n.username,
            mata_kuliah: n.mata_kuliah,
            nilai: n.nilai,
            label,
            created_at: n.created_at,
        }
    }
}

/// A user that can be picked as the student of a grade
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CandidateDto {
    pub user_id: Uuid,
    pub username: String,
    pub label: String,
}

impl From<ProfileDetail> for CandidateDto {
    fn from(p: ProfileDetail) -> Self {
        let label = p.label();
        Self {
            user_id: p.user_id,
            username: p.username,
            label,
        }
    }
}
