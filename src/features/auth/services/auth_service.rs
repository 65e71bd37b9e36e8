use std::sync::Arc;

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Utc};
use rand::distributions::{Alphanumeric, DistString};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::core::config::SessionConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::password;
use crate::features::auth::repositories::SessionStore;
use crate::features::users::UserRepository;
use crate::shared::cookies::read_cookie;

const TOKEN_LENGTH: usize = 64;

/// Session freshly issued by a successful login
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Raw token, handed to the client once
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub username: String,
}

/// Result of a credential submission
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    Authenticated(IssuedSession),
    InvalidCredentials,
}

/// Service for login, logout and session resolution
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
    config: SessionConfig,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionStore>,
        config: SessionConfig,
    ) -> Self {
        Self {
            users,
            sessions,
            config,
        }
    }

    pub fn session_config(&self) -> &SessionConfig {
        &self.config
    }

    /// Verify credentials and open a session on success
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome> {
        let Some(user) = self.users.find_by_username(username).await? else {
            tracing::warn!("Login failed: unknown username '{}'", username);
            return Ok(LoginOutcome::InvalidCredentials);
        };

        if !password::verify_password(password.to_string(), user.password_hash.clone()).await? {
            tracing::warn!("Login failed: wrong password for '{}'", username);
            return Ok(LoginOutcome::InvalidCredentials);
        }

        let token = generate_token();
        let ttl = chrono::Duration::from_std(self.config.ttl)
            .map_err(|e| AppError::Internal(format!("Invalid session TTL: {}", e)))?;
        let expires_at = Utc::now() + ttl;

        self.sessions
            .create_session(user.id, &hash_token(&token), expires_at)
            .await?;

        tracing::info!("User logged in: {}", user.username);

        Ok(LoginOutcome::Authenticated(IssuedSession {
            token,
            expires_at,
            user_id: user.id,
            username: user.username,
        }))
    }

    /// End the session behind `token`. Succeeds whether or not it existed.
    pub async fn logout(&self, token: Option<&str>) -> Result<()> {
        if let Some(token) = token {
            if self.sessions.delete_session(&hash_token(token)).await? {
                tracing::info!("Session closed");
            }
        }
        Ok(())
    }

    /// Identity behind an unexpired session token
    pub async fn resolve(&self, token: &str) -> Result<Option<AuthenticatedUser>> {
        let identity = self
            .sessions
            .find_identity(&hash_token(token), Utc::now())
            .await?;

        if identity.is_none() {
            tracing::debug!("Session token did not resolve to an active session");
        }
        Ok(identity)
    }

    pub async fn purge_expired(&self) -> Result<u64> {
        let removed = self.sessions.delete_expired(Utc::now()).await?;
        if removed > 0 {
            tracing::info!("Purged {} expired sessions", removed);
        }
        Ok(removed)
    }

    /// Session token from the session cookie, or a `Bearer` authorization header
    pub fn token_from_headers(&self, headers: &HeaderMap) -> Option<String> {
        read_cookie(headers, &self.config.cookie_name).or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
        })
    }
}

fn generate_token() -> String {
    Alphanumeric.sample_string(&mut rand::thread_rng(), TOKEN_LENGTH)
}

/// Hex SHA-256 digest stored in place of the raw token
pub(crate) fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
