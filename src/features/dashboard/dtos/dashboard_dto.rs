use serde::Serialize;
use utoipa::ToSchema;

use crate::features::auth::flash::Notification;
use crate::features::nilai::dtos::NilaiResponseDto;
use crate::features::profiles::models::Role;

/// Data for the personal dashboard
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardDto {
    pub username: String,
    /// Profile role, MAHASISWA when the user has no profile
    pub role: Role,
    /// Every grade for DOSEN, the user's own grades otherwise
    pub nilai_list: Vec<NilaiResponseDto>,
    pub messages: Vec<Notification>,
}

/// Data for the dosen-only grade overview
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DosenOverviewDto {
    pub nilai_list: Vec<NilaiResponseDto>,
    pub messages: Vec<Notification>,
}
