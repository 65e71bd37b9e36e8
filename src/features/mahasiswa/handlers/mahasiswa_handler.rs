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
use crate::features::mahasiswa::dtos::{MahasiswaDto, MahasiswaQueryParams, MahasiswaResponseDto};
use crate::features::mahasiswa::services::MahasiswaService;
use crate::shared::types::{ApiResponse, Meta};

/// List student records (search by nim, name or jurusan)
#[utoipa::path(
    get,
    path = "/api/admin/mahasiswa",
    params(MahasiswaQueryParams),
    responses(
        (
            status = 200,
            description = "List of student records",
            body = ApiResponse<Vec<MahasiswaResponseDto>>
        ),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Staff access required")
    ),
    tag = "mahasiswa",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn list_mahasiswa(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<MahasiswaService>>,
    Query(params): Query<MahasiswaQueryParams>,
) -> Result<Json<ApiResponse<Vec<MahasiswaResponseDto>>>> {
    let (items, total) = service.list(&params).await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Create a student record
#[utoipa::path(
    post,
    path = "/api/admin/mahasiswa",
    request_body = MahasiswaDto,
    responses(
        (
            status = 201,
            description = "Student record created",
            body = ApiResponse<MahasiswaResponseDto>
        ),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Nim already in use")
    ),
    tag = "mahasiswa",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn create_mahasiswa(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<MahasiswaService>>,
    AppJson(dto): AppJson<MahasiswaDto>,
) -> Result<(StatusCode, Json<ApiResponse<MahasiswaResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let mahasiswa = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(mahasiswa), None, None)),
    ))
}

/// Get a student record by ID
#[utoipa::path(
    get,
    path = "/api/admin/mahasiswa/{id}",
    params(("id" = Uuid, Path, description = "Mahasiswa ID")),
    responses(
        (
            status = 200,
            description = "Student record found",
            body = ApiResponse<MahasiswaResponseDto>
        ),
        (status = 404, description = "Student record not found")
    ),
    tag = "mahasiswa",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn get_mahasiswa(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<MahasiswaService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MahasiswaResponseDto>>> {
    let mahasiswa = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(mahasiswa), None, None)))
}

/// Replace a student record
#[utoipa::path(
    put,
    path = "/api/admin/mahasiswa/{id}",
    params(("id" = Uuid, Path, description = "Mahasiswa ID")),
    request_body = MahasiswaDto,
    responses(
        (
            status = 200,
            description = "Student record updated",
            body = ApiResponse<MahasiswaResponseDto>
        ),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Student record not found"),
        (status = 409, description = "Nim already in use")
    ),
    tag = "mahasiswa",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn update_mahasiswa(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<MahasiswaService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<MahasiswaDto>,
) -> Result<Json<ApiResponse<MahasiswaResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let mahasiswa = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(mahasiswa),
        Some("Mahasiswa updated successfully".to_string()),
        None,
    )))
}

/// Delete a student record
#[utoipa::path(
    delete,
    path = "/api/admin/mahasiswa/{id}",
    params(("id" = Uuid, Path, description = "Mahasiswa ID")),
    responses(
        (status = 200, description = "Student record deleted"),
        (status = 404, description = "Student record not found")
    ),
    tag = "mahasiswa",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn delete_mahasiswa(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<MahasiswaService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Mahasiswa deleted successfully".to_string()),
        None,
    )))
}
