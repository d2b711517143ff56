//! # Password hashing and verification — Argon2id
//!
//! The password credential is opaque to the rest of the service: it enters
//! here as plaintext and leaves as a PHC-format string (e.g.
//! `$argon2id$v=19$m=19456,t=2,p=1$...`) stored on the identity record.
//!
//! - [`hash_password`] — generates a random salt via [`OsRng`] and hashes
//!   with the default (memory-hard) Argon2id parameters.
//! - [`verify_password`] — parses a stored PHC string and checks a
//!   plaintext against it. `Ok(false)` means mismatch; `Err` means the
//!   stored hash itself is malformed.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

/// Failures of the hashing collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(String),
    #[error("invalid password hash: {0}")]
    InvalidHash(String),
}

/// Hash a password using Argon2id. Returns a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC-format hash string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
