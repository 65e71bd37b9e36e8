//! Access guards for page routes and the admin API.
//!
//! The session middleware attaches an [`AuthenticatedUser`] to requests that
//! carry a live session. The guards below read it back:
//!
//! - [`SessionState`]: never rejects, tells anonymous and logged-in callers apart
//! - [`LoginRequired`]: any logged-in user, others are redirected to the login page
//! - [`RequireDosen`]: users whose profile role is DOSEN, others are redirected
//! - [`RequireStaff`]: staff users, answered with 401/403 for the JSON admin API

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::constants::LOGIN_PATH;

/// Whether the request belongs to a logged-in user
#[derive(Debug, Clone)]
pub enum SessionState {
    Anonymous,
    Authenticated(AuthenticatedUser),
}

impl<S> FromRequestParts<S> for SessionState
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(match parts.extensions.get::<AuthenticatedUser>() {
            Some(user) => SessionState::Authenticated(user.clone()),
            None => SessionState::Anonymous,
        })
    }
}

/// Rejection sending the caller to the login page, remembering where they were
#[derive(Debug, Clone)]
pub struct LoginRedirect {
    pub next: String,
}

impl LoginRedirect {
    fn from_parts(parts: &Parts) -> Self {
        let next = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());
        Self { next }
    }

    pub fn location(&self) -> String {
        format!("{}?next={}", LOGIN_PATH, urlencoding::encode(&self.next))
    }
}

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to(&self.location()).into_response()
    }
}

/// Guard for pages that need a logged-in user.
///
/// # Example
/// ```ignore
/// pub async fn handler(LoginRequired(user): LoginRequired) { ... }
/// ```
pub struct LoginRequired(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for LoginRequired
where
    S: Send + Sync,
{
    type Rejection = LoginRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(LoginRequired)
            .ok_or_else(|| LoginRedirect::from_parts(parts))
    }
}

/// Guard for dosen-only pages. Anyone else, including logged-in MAHASISWA
/// users and users without a profile, is redirected to the login page.
pub struct RequireDosen(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireDosen
where
    S: Send + Sync,
{
    type Rejection = LoginRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthenticatedUser>() {
            Some(user) if user.is_dosen() => Ok(RequireDosen(user.clone())),
            _ => Err(LoginRedirect::from_parts(parts)),
        }
    }
}

/// Guard for the admin API.
pub struct RequireStaff(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_staff {
            return Err(AppError::Forbidden("Staff access required".to_string()));
        }

        Ok(RequireStaff(user.clone()))
    }
}
