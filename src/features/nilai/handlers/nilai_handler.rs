use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireStaff;
use crate::features::nilai::dtos::{CandidateDto, NilaiDto, NilaiQueryParams, NilaiResponseDto};
use crate::features::nilai::services::NilaiService;
use crate::shared::types::{ApiResponse, Meta};

/// List grades (search by student username/course, filter by course)
#[utoipa::path(
    get,
    path = "/api/admin/nilai",
    params(NilaiQueryParams),
    responses(
        (status = 200, description = "List of grades", body = ApiResponse<Vec<NilaiResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Staff access required")
    ),
    tag = "nilai",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn list_nilai(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<NilaiService>>,
    Query(params): Query<NilaiQueryParams>,
) -> Result<Json<ApiResponse<Vec<NilaiResponseDto>>>> {
    let (items, total) = service.list(&params).await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// List users that can be chosen as the student of a grade
#[utoipa::path(
    get,
    path = "/api/admin/nilai/candidates",
    responses(
        (
            status = 200,
            description = "Users with a MAHASISWA profile",
            body = ApiResponse<Vec<CandidateDto>>
        )
    ),
    tag = "nilai",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn list_candidates(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<NilaiService>>,
) -> Result<Json<ApiResponse<Vec<CandidateDto>>>> {
    let candidates = service.candidates().await?;
    Ok(Json(ApiResponse::success(Some(candidates), None, None)))
}

/// Record a grade
#[utoipa::path(
    post,
    path = "/api/admin/nilai",
    request_body = NilaiDto,
    responses(
        (status = 201, description = "Grade created", body = ApiResponse<NilaiResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Student not found")
    ),
    tag = "nilai",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn create_nilai(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<NilaiService>>,
    AppJson(dto): AppJson<NilaiDto>,
) -> Result<(StatusCode, Json<ApiResponse<NilaiResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let nilai = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(nilai), None, None)),
    ))
}

/// Get a grade by ID
#[utoipa::path(
    get,
    path = "/api/admin/nilai/{id}",
    params(("id" = Uuid, Path, description = "Nilai ID")),
    responses(
        (status = 200, description = "Grade found", body = ApiResponse<NilaiResponseDto>),
        (status = 404, description = "Grade not found")
    ),
    tag = "nilai",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn get_nilai(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<NilaiService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<NilaiResponseDto>>> {
    let nilai = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(nilai), None, None)))
}

/// Replace a grade
#[utoipa::path(
    put,
    path = "/api/admin/nilai/{id}",
    params(("id" = Uuid, Path, description = "Nilai ID")),
    request_body = NilaiDto,
    responses(
        (status = 200, description = "Grade updated", body = ApiResponse<NilaiResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Grade or student not found")
    ),
    tag = "nilai",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn update_nilai(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<NilaiService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<NilaiDto>,
) -> Result<Json<ApiResponse<NilaiResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let nilai = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(nilai),
        Some("Nilai updated successfully".to_string()),
        None,
    )))
}

/// Delete a grade
#[utoipa::path(
    delete,
    path = "/api/admin/nilai/{id}",
    params(("id" = Uuid, Path, description = "Nilai ID")),
    responses(
        (status = 200, description = "Grade deleted"),
        (status = 404, description = "Grade not found")
    ),
    tag = "nilai",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn delete_nilai(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<NilaiService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Nilai deleted successfully".to_string()),
        None,
    )))
}
