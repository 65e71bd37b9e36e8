use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a grade row
#[derive(Debug, Clone, FromRow)]
pub struct Nilai {
    pub id: Uuid,
    pub mahasiswa_id: Uuid,
    pub mata_kuliah: String,
    pub nilai: f64,
    pub created_at: DateTime<Utc>,
}

/// Fields written on create and update
#[derive(Debug, Clone)]
pub struct NewNilai {
    pub mahasiswa_id: Uuid,
    pub mata_kuliah: String,
    pub nilai: f64,
}

/// Grade row joined with the student's username
#[derive(Debug, Clone, FromRow)]
pub struct NilaiRecord {
    pub id: Uuid,
    pub mahasiswa_id: Uuid,
    pub username: String,
    pub mata_kuliah: String,
    pub nilai: f64,
    pub created_at: DateTime<Utc>,
}

impl NilaiRecord {
    /// e.g. `alice - Basis Data: 88.0`
    pub fn label(&self) -> String {
        format!(
            "{} - {}: {}",
            self.username,
            self.mata_kuliah,
            format_score(self.nilai)
        )
    }
}

/// Whole scores keep one decimal place (`88.0`), others print as-is
pub fn format_score(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
