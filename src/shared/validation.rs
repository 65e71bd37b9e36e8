use lazy_static::lazy_static;
use regex::Regex;

use crate::core::error::{AppError, Result};

lazy_static! {
    /// Regex for validating login usernames
    /// ASCII letters, digits and `@ . + - _`, nothing else
    /// - Valid: "alice", "budi.santoso", "dosen+if", "user@kampus"
    /// - Invalid: "user name", "user/name", "", "nama#1"
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_.@+-]+$").unwrap();
}

/// Grade scores must be finite; NaN and infinities are rejected
pub fn ensure_finite_score(value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AppError::Validation(
            "nilai: Nilai must be a finite number".to_string(),
        ))
    }
}
