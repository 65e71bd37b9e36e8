use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{AppendHeaders, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::core::error::Result;
use crate::features::auth::flash::{self, Flash};
use crate::features::auth::guards::{LoginRequired, RequireDosen};
use crate::features::dashboard::dtos::{DashboardDto, DosenOverviewDto};
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Personal dashboard: all grades for DOSEN, own grades otherwise
#[utoipa::path(
    get,
    path = "/accounts/dashboard",
    responses(
        (status = 200, description = "Dashboard data", body = ApiResponse<DashboardDto>),
        (status = 303, description = "Not logged in, redirect to the login form")
    ),
    tag = "accounts",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn dashboard(
    LoginRequired(user): LoginRequired,
    State(service): State<Arc<DashboardService>>,
    flash: Flash,
) -> Result<Response> {
    let (role, nilai_list) = service.grades_for(&user).await?;
    let clear_flash = !flash.is_empty();

    let page = DashboardDto {
        username: user.username,
        role,
        nilai_list,
        messages: flash.into_messages(),
    };
    Ok(page_response(page, clear_flash))
}

/// Dosen-only overview of every grade
#[utoipa::path(
    get,
    path = "/accounts/dosen",
    responses(
        (status = 200, description = "All grades", body = ApiResponse<DosenOverviewDto>),
        (status = 303, description = "Not a dosen, redirect to the login form")
    ),
    tag = "accounts",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn dosen_overview(
    RequireDosen(_user): RequireDosen,
    State(service): State<Arc<DashboardService>>,
    flash: Flash,
) -> Result<Response> {
    let nilai_list = service.all_grades().await?;
    let clear_flash = !flash.is_empty();

    let page = DosenOverviewDto {
        nilai_list,
        messages: flash.into_messages(),
    };
    Ok(page_response(page, clear_flash))
}

/// Wrap page data in the envelope, dropping the flash cookie once shown
fn page_response<T: Serialize>(page: T, clear_flash: bool) -> Response {
    let body = Json(ApiResponse::success(Some(page), None, None));
    if clear_flash {
        (
            AppendHeaders([(header::SET_COOKIE, flash::clear_cookie())]),
            body,
        )
            .into_response()
    } else {
        body.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::flash::Notification;
    use crate::features::dashboard::routes;
    use crate::features::profiles::models::Role;
    use crate::shared::constants::MSG_LOGIN_SUCCESS;
    use crate::shared::test_helpers::{auth_service, session_cookie, session_layer, InMemoryStore};
    use axum::http::{HeaderValue, StatusCode};
    use axum_test::TestServer;
    use serde_json::Value;

    async fn server() -> (TestServer, Arc<crate::features::auth::AuthService>) {
        let store = InMemoryStore::new();
        store.seed_user("pak_budi", "pw-dosen", Some(Role::Dosen)).await;
        let alice = store.seed_user("alice", "correct", Some(Role::Mahasiswa)).await;
        let bob = store.seed_user("bob", "pw-bob", Some(Role::Mahasiswa)).await;
        store.seed_nilai(alice.id, "Basis Data", 88.0).await;
        store.seed_nilai(bob.id, "Kalkulus", 72.0).await;

        let auth = auth_service(&store);
        let app = session_layer(
            routes::routes(Arc::new(DashboardService::new(store.clone()))),
            auth.clone(),
        );
        (TestServer::new(app).unwrap(), auth)
    }

    #[tokio::test]
    async fn test_dashboard_redirects_anonymous_to_login() {
        let (server, _) = server().await;

        let response = server.get("/accounts/dashboard").await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(
            response.header(header::LOCATION),
            "/accounts/login?next=%2Faccounts%2Fdashboard"
        );
    }

    #[tokio::test]
    async fn test_dashboard_filters_by_role() {
        let (server, auth) = server().await;

        let dosen = session_cookie(&auth, "pak_budi", "pw-dosen").await;
        let body: Value = server
            .get("/accounts/dashboard")
            .add_header(header::COOKIE, dosen)
            .await
            .json();
        assert_eq!(body["data"]["role"], "DOSEN");
        assert_eq!(body["data"]["nilai_list"].as_array().unwrap().len(), 2);

        let alice = session_cookie(&auth, "alice", "correct").await;
        let body: Value = server
            .get("/accounts/dashboard")
            .add_header(header::COOKIE, alice)
            .await
            .json();
        assert_eq!(body["data"]["username"], "alice");
        assert_eq!(body["data"]["role"], "MAHASISWA");
        let grades = body["data"]["nilai_list"].as_array().unwrap();
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0]["label"], "alice - Basis Data: 88.0");
    }

    #[tokio::test]
    async fn test_dashboard_shows_and_clears_flash() {
        let (server, auth) = server().await;
        let alice = session_cookie(&auth, "alice", "correct").await;
        let queued = flash::encode(&[Notification::success(MSG_LOGIN_SUCCESS)]);
        let cookies = format!(
            "{}; kampus_messages={}",
            alice.to_str().unwrap(),
            queued
        );

        let response = server
            .get("/accounts/dashboard")
            .add_header(header::COOKIE, HeaderValue::from_str(&cookies).unwrap())
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["messages"][0]["message"], MSG_LOGIN_SUCCESS);
        let set_cookie = response.header(header::SET_COOKIE);
        assert!(set_cookie
            .to_str()
            .unwrap()
            .starts_with("kampus_messages=; Path=/; Max-Age=0"));
    }

    #[tokio::test]
    async fn test_dosen_view_redirects_non_dosen() {
        let (server, auth) = server().await;

        let anonymous = server.get("/accounts/dosen").await;
        anonymous.assert_status(StatusCode::SEE_OTHER);

        let alice = session_cookie(&auth, "alice", "correct").await;
        let mahasiswa = server
            .get("/accounts/dosen")
            .add_header(header::COOKIE, alice)
            .await;
        mahasiswa.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(
            mahasiswa.header(header::LOCATION),
            "/accounts/login?next=%2Faccounts%2Fdosen"
        );
    }

    #[tokio::test]
    async fn test_dosen_view_lists_every_grade() {
        let (server, auth) = server().await;
        let dosen = session_cookie(&auth, "pak_budi", "pw-dosen").await;

        let response = server
            .get("/accounts/dosen")
            .add_header(header::COOKIE, dosen)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["nilai_list"].as_array().unwrap().len(), 2);
    }
}
