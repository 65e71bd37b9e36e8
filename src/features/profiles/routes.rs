use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::profiles::handlers;
use crate::features::profiles::services::ProfileService;

/// Admin routes for profiles (staff only)
pub fn admin_routes(service: Arc<ProfileService>) -> Router {
    Router::new()
        .route(
            "/api/admin/profiles",
            get(handlers::list_profiles).post(handlers::create_profile),
        )
        .route(
            "/api/admin/profiles/{user_id}",
            get(handlers::get_profile)
                .put(handlers::update_profile)
                .delete(handlers::delete_profile),
        )
        .with_state(service)
}
