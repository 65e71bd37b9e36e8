use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireStaff;
use crate::features::profiles::dtos::{
    CreateProfileDto, ProfileQueryParams, ProfileResponseDto, UpdateProfileDto,
};
use crate::features::profiles::services::ProfileService;
use crate::shared::types::{ApiResponse, Meta};

/// List profiles (filter by role, search by username/email)
#[utoipa::path(
    get,
    path = "/api/admin/profiles",
    params(ProfileQueryParams),
    responses(
        (
            status = 200,
            description = "List of profiles",
            body = ApiResponse<Vec<ProfileResponseDto>>
        ),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Staff access required")
    ),
    tag = "profiles",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn list_profiles(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<ProfileService>>,
    Query(params): Query<ProfileQueryParams>,
) -> Result<Json<ApiResponse<Vec<ProfileResponseDto>>>> {
    let (items, total) = service.list(&params).await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Attach a profile to a user
#[utoipa::path(
    post,
    path = "/api/admin/profiles",
    request_body = CreateProfileDto,
    responses(
        (status = 201, description = "Profile created", body = ApiResponse<ProfileResponseDto>),
        (status = 404, description = "User not found"),
        (status = 409, description = "User already has a profile")
    ),
    tag = "profiles",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn create_profile(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<ProfileService>>,
    AppJson(dto): AppJson<CreateProfileDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProfileResponseDto>>)> {
    let profile = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(profile), None, None)),
    ))
}

/// Get the profile of a user
#[utoipa::path(
    get,
    path = "/api/admin/profiles/{user_id}",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Profile found", body = ApiResponse<ProfileResponseDto>),
        (status = 404, description = "Profile not found")
    ),
    tag = "profiles",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn get_profile(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<ProfileService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    let profile = service.get(user_id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

/// Change the role of a profile
#[utoipa::path(
    put,
    path = "/api/admin/profiles/{user_id}",
    params(("user_id" = Uuid, Path, description = "User ID")),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<ProfileResponseDto>),
        (status = 400, description = "Invalid role"),
        (status = 404, description = "Profile not found")
    ),
    tag = "profiles",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn update_profile(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<ProfileService>>,
    Path(user_id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateProfileDto>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    let profile = service.update(user_id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(profile),
        Some("Profile updated successfully".to_string()),
        None,
    )))
}

/// Delete the profile of a user (the user itself is kept)
#[utoipa::path(
    delete,
    path = "/api/admin/profiles/{user_id}",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Profile deleted"),
        (status = 404, description = "Profile not found")
    ),
    tag = "profiles",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn delete_profile(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<ProfileService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(user_id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Profile deleted successfully".to_string()),
        None,
    )))
}
