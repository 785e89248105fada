//! Password hashing utilities using Argon2

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher,
        PasswordVerifier, SaltString,
    },
    Argon2,
};
use once_cell::sync::Lazy;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Trait for password hashing operations
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a password with a fresh random salt.
    ///
    /// Repeated calls with the same plaintext produce different
    /// outputs; callers must not assume determinism.
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verify a password against a hash.
    ///
    /// A malformed hash verifies false; it never raises.
    fn verify(&self, password: &str, hash: &str) -> bool;

    /// Run a verification against a fixed throwaway hash.
    ///
    /// Used on rejection paths that have no stored hash to check, so
    /// the work done does not reveal whether an account exists.
    fn dummy_verify(&self, password: &str) {
        self.verify(password, &DUMMY_HASH);
    }
}

/// Argon2-based password hasher
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

/// Hash of a throwaway password, computed once per process
static DUMMY_HASH: Lazy<String> = Lazy::new(|| {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(b"hotgigs-dummy-password", &salt)
        .map(|hash| hash.to_string())
        .unwrap_or_default()
});
