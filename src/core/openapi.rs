use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, flash, handlers as auth_handlers};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::mahasiswa::{dtos as mahasiswa_dtos, handlers as mahasiswa_handlers};
use crate::features::nilai::{dtos as nilai_dtos, handlers as nilai_handlers};
use crate::features::profiles::{
    dtos as profiles_dtos, handlers as profiles_handlers, models as profiles_models,
};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Accounts pages
        auth_handlers::login_page,
        auth_handlers::login,
        auth_handlers::logout,
        dashboard_handlers::dashboard,
        dashboard_handlers::dosen_overview,
        // Admin: users
        users_handlers::list_users,
        users_handlers::create_user,
        users_handlers::get_user,
        users_handlers::delete_user,
        // Admin: profiles
        profiles_handlers::list_profiles,
        profiles_handlers::create_profile,
        profiles_handlers::get_profile,
        profiles_handlers::update_profile,
        profiles_handlers::delete_profile,
        // Admin: nilai
        nilai_handlers::list_nilai,
        nilai_handlers::list_candidates,
        nilai_handlers::create_nilai,
        nilai_handlers::get_nilai,
        nilai_handlers::update_nilai,
        nilai_handlers::delete_nilai,
        // Admin: mahasiswa
        mahasiswa_handlers::list_mahasiswa,
        mahasiswa_handlers::create_mahasiswa,
        mahasiswa_handlers::get_mahasiswa,
        mahasiswa_handlers::update_mahasiswa,
        mahasiswa_handlers::delete_mahasiswa,
    ),
    components(
        schemas(
            Meta,
            profiles_models::Role,
            flash::Notification,
            flash::NotificationLevel,
            auth_dtos::LoginRequestDto,
            auth_dtos::LoginPageDto,
            dashboard_dtos::DashboardDto,
            dashboard_dtos::DosenOverviewDto,
            users_dtos::CreateUserDto,
            users_dtos::UserResponseDto,
            profiles_dtos::CreateProfileDto,
            profiles_dtos::UpdateProfileDto,
            profiles_dtos::ProfileResponseDto,
            nilai_dtos::NilaiDto,
            nilai_dtos::NilaiResponseDto,
            nilai_dtos::CandidateDto,
            mahasiswa_dtos::MahasiswaDto,
            mahasiswa_dtos::MahasiswaResponseDto,
            ApiResponse<auth_dtos::LoginPageDto>,
            ApiResponse<dashboard_dtos::DashboardDto>,
            ApiResponse<dashboard_dtos::DosenOverviewDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<profiles_dtos::ProfileResponseDto>>,
            ApiResponse<profiles_dtos::ProfileResponseDto>,
            ApiResponse<Vec<nilai_dtos::NilaiResponseDto>>,
            ApiResponse<nilai_dtos::NilaiResponseDto>,
            ApiResponse<Vec<nilai_dtos::CandidateDto>>,
            ApiResponse<Vec<mahasiswa_dtos::MahasiswaResponseDto>>,
            ApiResponse<mahasiswa_dtos::MahasiswaResponseDto>,
        )
    ),
    tags(
        (name = "accounts", description = "Login, logout and the role-dependent grade pages"),
        (name = "users", description = "User administration (staff only)"),
        (name = "profiles", description = "Profile and role administration (staff only)"),
        (name = "nilai", description = "Grade administration (staff only)"),
        (name = "mahasiswa", description = "Student registry administration (staff only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Kampus API",
        version = "0.1.0",
        description = "API documentation for the campus registry and accounts service",
    )
)]
pub struct ApiDoc;

/// Adds the session cookie and bearer token security schemes
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("kampus_session"))),
            );
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("opaque session token")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_accounts_and_admin_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/accounts/login",
            "/accounts/logout",
            "/accounts/dashboard",
            "/accounts/dosen",
            "/api/admin/users/{id}",
            "/api/admin/profiles/{user_id}",
            "/api/admin/nilai/candidates",
            "/api/admin/mahasiswa",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {}",
                expected
            );
        }

        let components = doc.components.clone().expect("components");
        assert!(components.security_schemes.contains_key("session_cookie"));
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
