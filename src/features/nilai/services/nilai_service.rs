use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::nilai::dtos::{CandidateDto, NilaiDto, NilaiQueryParams, NilaiResponseDto};
use crate::features::nilai::models::NewNilai;
use crate::features::nilai::repositories::{NilaiFilter, NilaiRepository};
use crate::features::profiles::models::Role;
use crate::features::profiles::ProfileRepository;
use crate::shared::validation::ensure_finite_score;

/// Service for grade administration
pub struct NilaiService {
    nilai: Arc<dyn NilaiRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl NilaiService {
    pub fn new(nilai: Arc<dyn NilaiRepository>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { nilai, profiles }
    }

    pub async fn list(&self, params: &NilaiQueryParams) -> Result<(Vec<NilaiResponseDto>, i64)> {
        let filter = NilaiFilter {
            search: non_blank(params.search.as_deref()),
            mata_kuliah: non_blank(params.mata_kuliah.as_deref()),
        };

        let (items, total) = self
            .nilai
            .list_nilai(&filter, params.offset(), params.limit())
            .await?;

        Ok((items.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, id: Uuid) -> Result<NilaiResponseDto> {
        self.nilai
            .find_nilai(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Nilai {} not found", id)))
    }

    /// Record a grade. The student is not required to hold the MAHASISWA role.
    pub async fn create(&self, dto: NilaiDto) -> Result<NilaiResponseDto> {
        ensure_finite_score(dto.nilai)?;

        let nilai = self.nilai.create_nilai(into_new(dto)).await?;
        tracing::info!(
            "Nilai created: id={}, mahasiswa_id={}, mata_kuliah={}",
            nilai.id,
            nilai.mahasiswa_id,
            nilai.mata_kuliah
        );

        self.get(nilai.id).await
    }

    pub async fn update(&self, id: Uuid, dto: NilaiDto) -> Result<NilaiResponseDto> {
        ensure_finite_score(dto.nilai)?;

        let nilai = self
            .nilai
            .update_nilai(id, into_new(dto))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Nilai {} not found", id)))?;

        tracing::info!("Nilai updated: id={}", nilai.id);
        self.get(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.nilai.delete_nilai(id).await? {
            return Err(AppError::NotFound(format!("Nilai {} not found", id)));
        }

        tracing::info!("Nilai deleted: id={}", id);
        Ok(())
    }

    /// Users offered as the student of a new grade: MAHASISWA profiles only
    pub async fn candidates(&self) -> Result<Vec<CandidateDto>> {
        let profiles = self.profiles.list_by_role(Role::Mahasiswa).await?;
        Ok(profiles.into_iter().map(Into::into).collect())
    }
}

fn into_new(dto: NilaiDto) -> NewNilai {
    NewNilai {
        mahasiswa_id: dto.mahasiswa_id,
        mata_kuliah: dto.mata_kuliah.trim().to_string(),
        nilai: dto.nilai,
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
