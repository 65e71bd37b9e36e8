//! Argon2 password hashing on the blocking thread pool.

use crate::core::error::{AppError, Result};

/// Hash a password into a PHC string
pub async fn hash_password(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || password_auth::generate_hash(password))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))
}

/// Check a password against a stored PHC string. A malformed hash counts as
/// a mismatch.
pub async fn verify_password(password: String, password_hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || {
        password_auth::verify_password(password, &password_hash).is_ok()
    })
    .await
    .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))
}
