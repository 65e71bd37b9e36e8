use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::{AppConfig, SessionConfig, SwaggerConfig};
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::auth::{self, AuthService, SessionStore};
use crate::features::dashboard::{self, DashboardService};
use crate::features::mahasiswa::{
    routes as mahasiswa_routes, MahasiswaRepository, MahasiswaService,
};
use crate::features::nilai::{routes as nilai_routes, NilaiRepository, NilaiService};
use crate::features::profiles::{routes as profiles_routes, ProfileRepository, ProfileService};
use crate::features::users::{routes as users_routes, UserRepository, UserService};

/// Storage backends the services are built on
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub nilai: Arc<dyn NilaiRepository>,
    pub mahasiswa: Arc<dyn MahasiswaRepository>,
    pub sessions: Arc<dyn SessionStore>,
}

/// All services shared by the router
pub struct AppServices {
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub profiles: Arc<ProfileService>,
    pub nilai: Arc<NilaiService>,
    pub mahasiswa: Arc<MahasiswaService>,
    pub dashboard: Arc<DashboardService>,
}

impl AppServices {
    pub fn new(repositories: Repositories, session: SessionConfig) -> Self {
        let Repositories {
            users,
            profiles,
            nilai,
            mahasiswa,
            sessions,
        } = repositories;

        Self {
            auth: Arc::new(AuthService::new(users.clone(), sessions, session)),
            users: Arc::new(UserService::new(users.clone(), profiles.clone())),
            profiles: Arc::new(ProfileService::new(profiles.clone(), users)),
            nilai: Arc::new(NilaiService::new(nilai.clone(), profiles)),
            mahasiswa: Arc::new(MahasiswaService::new(mahasiswa)),
            dashboard: Arc::new(DashboardService::new(nilai)),
        }
    }
}

async fn health_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

/// Build the application router with all routes and layers
pub fn build_router(services: &AppServices, app: &AppConfig, swagger: &SwaggerConfig) -> Router {
    let swagger_modifier = SwaggerInfoModifier {
        title: swagger.title.clone(),
        version: swagger.version.clone(),
        description: swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger_router =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));
    let swagger_router = if let Some(credentials) = swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        swagger_router.layer(from_fn(middleware::basic_auth_middleware(Arc::new(
            credentials,
        ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        swagger_router
    };

    // Pages under /accounts
    let account_routes = Router::new()
        .merge(auth::routes(Arc::clone(&services.auth)))
        .merge(dashboard::routes(Arc::clone(&services.dashboard)));

    // Staff-only management API
    let admin_routes = Router::new()
        .merge(users_routes::admin_routes(Arc::clone(&services.users)))
        .merge(profiles_routes::admin_routes(Arc::clone(&services.profiles)))
        .merge(nilai_routes::admin_routes(Arc::clone(&services.nilai)))
        .merge(mahasiswa_routes::admin_routes(Arc::clone(
            &services.mahasiswa,
        )));

    let health_route = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(swagger_router)
        .merge(account_routes)
        .merge(admin_routes)
        .merge(health_route)
        .layer(from_fn_with_state(
            Arc::clone(&services.auth),
            middleware::session_middleware,
        ))
        .layer(DefaultBodyLimit::max(app.max_request_body_size))
        .layer(middleware::cors_layer(app.cors_allowed_origins.clone()))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
