use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::auth::flash::Notification;

/// Form-encoded credential submission
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct LoginQuery {
    /// Local path to continue to after logging in
    pub next: Option<String>,
}

impl LoginQuery {
    /// `next` when it is a local absolute path, otherwise `None`
    pub fn safe_next(&self) -> Option<&str> {
        self.next
            .as_deref()
            .filter(|next| is_local_path(next))
    }
}

/// A single leading `/`, no scheme-relative `//`, no backslashes and nothing
/// that cannot go into a `Location` header
fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
}

/// Data for the login form
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginPageDto {
    /// Previously submitted username, empty on first display
    pub username: String,
    pub next: Option<String>,
    pub messages: Vec<Notification>,
    /// Field-level problems with the submitted form
    pub errors: Vec<String>,
}
