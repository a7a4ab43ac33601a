//! Password hashing using argon2
//!
//! Stored passwords are Argon2id PHC strings with a random salt.
//! Verification goes through argon2's own comparison, which is
//! constant-time over the derived hash.

use anyhow::{Context, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

pub struct PasswordService;

impl PasswordService {
    /// Hash a password (blocking, CPU-heavy)
    pub fn hash(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    /// Hash on the blocking thread pool
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .context("password hashing task panicked")?
    }

    /// Check a password against a stored PHC string
    ///
    /// `Ok(false)` is a mismatch; `Err` means the stored hash itself is
    /// unreadable, which is a storage problem rather than a bad login.
    pub fn verify(password: &str, stored_hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Verify on the blocking thread pool
    pub async fn verify_async(password: String, stored_hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &stored_hash))
            .await
            .context("password verification task panicked")?
    }
}
