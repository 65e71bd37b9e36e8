use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a student record of the registry
#[derive(Debug, Clone, FromRow)]
pub struct Mahasiswa {
    pub id: Uuid,
    /// Student number, unique when present
    pub nim: Option<String>,
    pub firstname: String,
    pub lastname: String,
    pub jurusan: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Mahasiswa {
    /// e.g. `A11.2023.00001 - Siti Aminah - Informatika`; a missing value
    /// prints as `None`
    pub fn label(&self) -> String {
        format!(
            "{} - {} {} - {}",
            self.nim.as_deref().unwrap_or("None"),
            self.firstname,
            self.lastname,
            self.jurusan.as_deref().unwrap_or("None")
        )
    }
}

/// Fields written on create and update
#[derive(Debug, Clone)]
pub struct NewMahasiswa {
    pub nim: Option<String>,
    pub firstname: String,
    pub lastname: String,
    pub jurusan: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mahasiswa(nim: Option<&str>, jurusan: Option<&str>) -> Mahasiswa {
        Mahasiswa {
            id: Uuid::now_v7(),
            nim: nim.map(str::to_string),
            firstname: "Siti".to_string(),
            lastname: "Aminah".to_string(),
            jurusan: jurusan.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_label() {
        assert_eq!(
            mahasiswa(Some("A11.2023.00001"), Some("Informatika")).label(),
            "A11.2023.00001 - Siti Aminah - Informatika"
        );
    }

    #[test]
    fn test_label_with_missing_values() {
        assert_eq!(mahasiswa(None, None).label(), "None - Siti Aminah - None");
    }
}
