use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    Json,
};
use validator::{Validate, ValidationErrors};

use crate::core::extractor::AppForm;
use crate::features::auth::dtos::{LoginPageDto, LoginQuery, LoginRequestDto};
use crate::features::auth::flash::{self, Flash, Notification};
use crate::features::auth::guards::SessionState;
use crate::features::auth::services::{AuthService, LoginOutcome};
use crate::shared::constants::{
    DASHBOARD_PATH, LOGIN_PATH, MSG_LOGIN_FAILED, MSG_LOGIN_SUCCESS, MSG_LOGOUT,
};
use crate::shared::cookies::{build_cookie, expire_cookie};
use crate::shared::types::ApiResponse;

/// Show the login form
#[utoipa::path(
    get,
    path = "/accounts/login",
    params(LoginQuery),
    responses(
        (status = 200, description = "Login form", body = ApiResponse<LoginPageDto>),
        (status = 303, description = "Already logged in, redirect to the dashboard")
    ),
    tag = "accounts"
)]
pub async fn login_page(
    session: SessionState,
    flash: Flash,
    Query(query): Query<LoginQuery>,
) -> Response {
    if let SessionState::Authenticated(_) = session {
        return Redirect::to(DASHBOARD_PATH).into_response();
    }

    let clear_flash = !flash.is_empty();
    let page = LoginPageDto {
        username: String::new(),
        next: query.safe_next().map(str::to_string),
        messages: flash.into_messages(),
        errors: Vec::new(),
    };
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

/// Submit credentials
#[utoipa::path(
    post,
    path = "/accounts/login",
    params(LoginQuery),
    request_body(content = LoginRequestDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in, redirect to `next` or the dashboard"),
        (
            status = 400,
            description = "Missing username or password",
            body = ApiResponse<LoginPageDto>
        ),
        (
            status = 401,
            description = "Invalid credentials, form re-displayed",
            body = ApiResponse<LoginPageDto>
        )
    ),
    tag = "accounts"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    session: SessionState,
    flash: Flash,
    Query(query): Query<LoginQuery>,
    AppForm(dto): AppForm<LoginRequestDto>,
) -> Response {
    if let SessionState::Authenticated(_) = session {
        return Redirect::to(DASHBOARD_PATH).into_response();
    }

    let next = query.safe_next().map(str::to_string);
    let mut messages = flash.into_messages();

    if let Err(e) = dto.validate() {
        let page = LoginPageDto {
            username: dto.username,
            next,
            messages,
            errors: field_messages(&e),
        };
        return form_response(StatusCode::BAD_REQUEST, page, "Validation error");
    }

    let outcome = match service.login(&dto.username, &dto.password).await {
        Ok(outcome) => outcome,
        Err(e) => return e.into_response(),
    };

    match outcome {
        LoginOutcome::InvalidCredentials => {
            messages.push(Notification::error(MSG_LOGIN_FAILED));
            let page = LoginPageDto {
                username: dto.username,
                next,
                messages,
                errors: Vec::new(),
            };
            form_response(StatusCode::UNAUTHORIZED, page, MSG_LOGIN_FAILED)
        }
        LoginOutcome::Authenticated(issued) => {
            let config = service.session_config();
            messages.push(Notification::success(MSG_LOGIN_SUCCESS));

            let session_cookie = build_cookie(
                &config.cookie_name,
                &issued.token,
                config.ttl.as_secs(),
                config.cookie_secure,
            );
            let flash_cookie = flash::queue_cookie(&messages, config.cookie_secure);

            (
                AppendHeaders([
                    (header::SET_COOKIE, session_cookie),
                    (header::SET_COOKIE, flash_cookie),
                ]),
                Redirect::to(next.as_deref().unwrap_or(DASHBOARD_PATH)),
            )
                .into_response()
        }
    }
}

/// Log out and return to the login form
#[utoipa::path(
    post,
    path = "/accounts/logout",
    responses(
        (status = 303, description = "Logged out, redirect to the login form")
    ),
    tag = "accounts"
)]
pub async fn logout(
    State(service): State<Arc<AuthService>>,
    headers: HeaderMap,
    flash: Flash,
) -> Response {
    let token = service.token_from_headers(&headers);
    if let Err(e) = service.logout(token.as_deref()).await {
        tracing::error!("Failed to close session on logout: {:?}", e);
    }

    let config = service.session_config();
    let mut messages = flash.into_messages();
    messages.push(Notification::info(MSG_LOGOUT));

    (
        AppendHeaders([
            (
                header::SET_COOKIE,
                expire_cookie(&config.cookie_name, config.cookie_secure),
            ),
            (
                header::SET_COOKIE,
                flash::queue_cookie(&messages, config.cookie_secure),
            ),
        ]),
        Redirect::to(LOGIN_PATH),
    )
        .into_response()
}

/// Re-display the login form with an error status. Queued notifications are
/// shown here, so the flash cookie is dropped.
fn form_response(status: StatusCode, page: LoginPageDto, message: &str) -> Response {
    let errors = (!page.errors.is_empty()).then(|| page.errors.clone());
    (
        status,
        AppendHeaders([(header::SET_COOKIE, flash::clear_cookie())]),
        Json(ApiResponse::failure(page, Some(message.to_string()), errors)),
    )
        .into_response()
}

/// `field: message` lines, sorted by field name
fn field_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut lines: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();
    lines.sort();
    lines
}
