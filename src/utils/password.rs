//! Password hashing and verification.
//!
//! New passwords are stored as Argon2id PHC strings. Any other stored value,
//! including one that happens to look like a PHC string for another algorithm
//! (`$secret`), is legacy cleartext and compared directly, so accounts created
//! before hashing was introduced can still log in and be upgraded.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde_json::json;
use tokio::task;

use crate::error::AppError;

/// Outcome of comparing a submitted password with the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// Matched an Argon2 hash.
    Match,
    /// Matched a legacy cleartext value; the caller should re-hash it.
    LegacyMatch,
    Mismatch,
}

/// Hashes `password` with Argon2id and a random salt.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal("Failed to hash password", json!({ "reason": e.to_string() })))
}

/// Argon2 variants a stored PHC string may name.
const ARGON2_IDENTS: [&str; 3] = ["argon2id", "argon2i", "argon2d"];

/// Compares `password` with a stored hash (or legacy cleartext value).
pub fn verify_password(password: &str, stored: &str) -> Verification {
    let hash = PasswordHash::new(stored)
        .ok()
        .filter(|parsed| ARGON2_IDENTS.contains(&parsed.algorithm.as_str()));

    match hash {
        Some(parsed) => {
            if Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
            {
                Verification::Match
            } else {
                Verification::Mismatch
            }
        }
        None if stored == password => Verification::LegacyMatch,
        None => Verification::Mismatch,
    }
}

/// Runs [`hash_password`] on the blocking pool.
///
/// Argon2 is CPU-intensive and must not stall the async workers.
pub async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::internal("Password hashing task failed", json!({ "reason": e.to_string() })))?
}

/// Runs [`verify_password`] on the blocking pool.
pub async fn verify_password_blocking(
    password: String,
    stored: String,
) -> Result<Verification, AppError> {
    task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|e| {
            AppError::internal(
                "Password verification task failed",
                json!({ "reason": e.to_string() }),
            )
        })
}
