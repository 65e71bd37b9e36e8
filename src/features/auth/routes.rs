use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;

/// Login and logout pages (public)
pub fn routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route(
            "/accounts/login",
            get(handlers::login_page).post(handlers::login),
        )
        .route(
            "/accounts/logout",
            get(handlers::logout).post(handlers::logout),
        )
        .with_state(service)
}
