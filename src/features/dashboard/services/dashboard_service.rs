use std::sync::Arc;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::nilai::dtos::NilaiResponseDto;
use crate::features::nilai::NilaiRepository;
use crate::features::profiles::models::Role;

/// Service for the role-dependent grade views
pub struct DashboardService {
    nilai: Arc<dyn NilaiRepository>,
}

impl DashboardService {
    pub fn new(nilai: Arc<dyn NilaiRepository>) -> Self {
        Self { nilai }
    }

    /// Grades visible on the dashboard of `user`, with its effective role
    pub async fn grades_for(
        &self,
        user: &AuthenticatedUser,
    ) -> Result<(Role, Vec<NilaiResponseDto>)> {
        let role = user.effective_role();
        let records = match role {
            Role::Dosen => self.nilai.list_all().await?,
            Role::Mahasiswa => self.nilai.list_by_mahasiswa(user.user_id).await?,
        };

        Ok((role, records.into_iter().map(Into::into).collect()))
    }

    /// Every grade, for the dosen overview
    pub async fn all_grades(&self) -> Result<Vec<NilaiResponseDto>> {
        let records = self.nilai.list_all().await?;
        Ok(records.into_iter().map(Into::into).collect())
    }
}
