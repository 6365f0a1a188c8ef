//! Password hashing and verification — Argon2id
//!
//! [`hash_password`] generates a random salt via [`OsRng`] and returns the
//! hash as a PHC-format string, which is what the `password_hash` column of
//! the `users` table stores. [`verify_password`] parses a stored PHC string
//! and checks a plaintext candidate against it: `Ok(true)` on match,
//! `Ok(false)` on mismatch, `Err` if the stored hash is malformed.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password using Argon2id. Returns a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| format!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC-format hash string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| format!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("segredo123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("segredo123", &hash).unwrap());
        assert!(!verify_password("outra-senha", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("segredo123").unwrap();
        let b = hash_password("segredo123").unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("segredo123", "not-a-phc-string").is_err());
    }
}
