//! One-shot notifications carried across a redirect in a cookie.
//!
//! Login and logout queue a notification before redirecting; the next page
//! returns the queued notifications in its payload and clears the cookie.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use base64::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::FLASH_COOKIE_NAME;
use crate::shared::cookies::{build_cookie, expire_cookie, read_cookie};

/// Flash cookies only need to survive a single redirect
const FLASH_MAX_AGE_SECS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Encode notifications as base64url JSON
pub fn encode(messages: &[Notification]) -> String {
    let json = serde_json::to_vec(messages).unwrap_or_default();
    BASE64_URL_SAFE_NO_PAD.encode(json)
}

/// Decode a cookie value; anything unreadable yields no notifications
pub fn decode(value: &str) -> Vec<Notification> {
    BASE64_URL_SAFE_NO_PAD
        .decode(value)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

/// `Set-Cookie` value queueing `messages` for the next page
pub fn queue_cookie(messages: &[Notification], secure: bool) -> String {
    build_cookie(FLASH_COOKIE_NAME, &encode(messages), FLASH_MAX_AGE_SECS, secure)
}

/// `Set-Cookie` value dropping any queued notification
pub fn clear_cookie() -> String {
    expire_cookie(FLASH_COOKIE_NAME, false)
}

/// Notifications queued by a previous response
#[derive(Debug, Clone, Default)]
pub struct Flash(pub Vec<Notification>);

impl Flash {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_messages(self) -> Vec<Notification> {
        self.0
    }
}

impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Flash(
            read_cookie(&parts.headers, FLASH_COOKIE_NAME)
                .map(|value| decode(&value))
                .unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_value_is_cookie_safe() {
        let encoded = encode(&[Notification::success("Berhasil masuk.")]);
        assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(decode(&encoded), vec![Notification::success("Berhasil masuk.")]);
    }

    #[test]
    fn test_tampered_cookie_yields_nothing() {
        assert!(decode("%%%not-base64%%%").is_empty());
        assert!(decode(&BASE64_URL_SAFE_NO_PAD.encode(b"{\"level\":1}")).is_empty());
    }

    #[test]
    fn test_level_serialises_lowercase() {
        let json = serde_json::to_value(Notification::info("Anda telah logout.")).unwrap();
        assert_eq!(json["level"], "info");
        assert_eq!(json["message"], "Anda telah logout.");
    }
}
