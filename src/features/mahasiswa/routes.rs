use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::mahasiswa::handlers;
use crate::features::mahasiswa::services::MahasiswaService;

/// Admin routes for the student registry (staff only)
pub fn admin_routes(service: Arc<MahasiswaService>) -> Router {
    Router::new()
        .route(
            "/api/admin/mahasiswa",
            get(handlers::list_mahasiswa).post(handlers::create_mahasiswa),
        )
        .route(
            "/api/admin/mahasiswa/{id}",
            get(handlers::get_mahasiswa)
                .put(handlers::update_mahasiswa)
                .delete(handlers::delete_mahasiswa),
        )
        .with_state(service)
}
