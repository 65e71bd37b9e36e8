use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::profiles::models::Role;

/// Identity resolved from a session token, attached to the request by the
/// session middleware
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
    pub is_staff: bool,
    /// `None` when the user has no profile
    pub role: Option<Role>,
}

impl AuthenticatedUser {
    /// True only when the user has a profile with the DOSEN role
    pub fn is_dosen(&self) -> bool {
        self.role == Some(Role::Dosen)
    }

    /// Profile role, falling back to MAHASISWA for users without a profile
    pub fn effective_role(&self) -> Role {
        self.role.unwrap_or_default()
    }
}

/// Database model for a login session. Only the digest of the token is kept.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
