use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Role held by a profile, matching the `profile_role` database enum
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "profile_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    Mahasiswa,
    Dosen,
}

impl Role {
    /// Stored value, e.g. `MAHASISWA`
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Mahasiswa => "MAHASISWA",
            Role::Dosen => "DOSEN",
        }
    }

    /// Human-readable name, e.g. `Mahasiswa`
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Mahasiswa => "Mahasiswa",
            Role::Dosen => "Dosen",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MAHASISWA" => Ok(Role::Mahasiswa),
            "DOSEN" => Ok(Role::Dosen),
            other => Err(format!(
                "Invalid role '{}', expected MAHASISWA or DOSEN",
                other
            )),
        }
    }
}

/// Database model for the one-to-one profile of a user
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: Role,
}

/// Profile joined with its user, for admin listings
#[derive(Debug, Clone, FromRow)]
pub struct ProfileDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub role: Role,
}

impl ProfileDetail {
    /// Label shown in admin listings, e.g. `alice (Dosen)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.username, self.role.display_name())
    }
}
