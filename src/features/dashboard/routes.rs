use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Logged-in pages: the dashboard and the dosen-only overview
pub fn routes(service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/accounts/dashboard", get(handlers::dashboard))
        .route("/accounts/dosen", get(handlers::dosen_overview))
        .with_state(service)
}
