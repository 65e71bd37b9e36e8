use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::nilai::handlers;
use crate::features::nilai::services::NilaiService;

/// Admin routes for grades (staff only)
pub fn admin_routes(service: Arc<NilaiService>) -> Router {
    Router::new()
        .route(
            "/api/admin/nilai",
            get(handlers::list_nilai).post(handlers::create_nilai),
        )
        .route("/api/admin/nilai/candidates", get(handlers::list_candidates))
        .route(
            "/api/admin/nilai/{id}",
            get(handlers::get_nilai)
                .put(handlers::update_nilai)
                .delete(handlers::delete_nilai),
        )
        .with_state(service)
}
