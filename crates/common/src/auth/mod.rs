//! Authentication utilities
//!
//! Provides:
//! - Password hashing for stored users
//! - Password verification for the login flow
//!
//! There are no sessions or tokens; the login endpoint checks credentials
//! and returns the user payload, nothing more.

use crate::errors::{AppError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a plaintext password for storage.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal {
            message: format!("Failed to hash password: {}", e),
        })?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored hash.
///
/// An unparseable stored hash counts as a mismatch rather than an error;
/// the login flow treats both the same way.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("password").unwrap();
        assert!(verify_password("password", &hash));
        assert!(!verify_password("wrong_password", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hash1 = hash_password("password").unwrap();
        let hash2 = hash_password("password").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_malformed_stored_hash_is_a_mismatch() {
        assert!(!verify_password("password", "not-a-phc-string"));
        assert!(!verify_password("password", ""));
    }
}
