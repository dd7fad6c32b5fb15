//! Credential hashing using Argon2

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Argon2,
};
use std::fmt::Debug;

use crate::domain::DomainError;

/// Derived credential material for one account
///
/// The salt is kept as its own opaque string beside the full PHC hash
/// string, matching the record's two secret fields.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub hash: String,
    pub salt: String,
}

/// Trait for credential derivation and verification
pub trait CredentialHasher: Send + Sync + Debug {
    /// Derive hash and salt from a password
    fn derive(&self, password: &str) -> Result<Credentials, DomainError>;

    /// Verify a password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2-based credential hasher
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    /// Create a new Argon2 hasher
    pub fn new() -> Self {
        Self
    }
}

impl CredentialHasher for Argon2Hasher {
    fn derive(&self, password: &str) -> Result<Credentials, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))?;

        Ok(Credentials {
            hash: hash.to_string(),
            salt: salt.as_str().to_string(),
        })
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_and_verify() {
        let hasher = Argon2Hasher::new();
        let password = "my_secure_password";

        let credentials = hasher.derive(password).unwrap();

        assert!(hasher.verify(password, &credentials.hash));
        assert!(!hasher.verify("wrong_password", &credentials.hash));
    }

    #[test]
    fn test_salts_are_unique() {
        let hasher = Argon2Hasher::new();
        let password = "my_secure_password";

        let first = hasher.derive(password).unwrap();
        let second = hasher.derive(password).unwrap();

        assert_ne!(first.salt, second.salt);
        assert_ne!(first.hash, second.hash);

        // Both derivations still verify
        assert!(hasher.verify(password, &first.hash));
        assert!(hasher.verify(password, &second.hash));
    }

    #[test]
    fn test_hash_embeds_the_salt() {
        let hasher = Argon2Hasher::new();
        let credentials = hasher.derive("my_secure_password").unwrap();

        assert!(credentials.hash.contains(&credentials.salt));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = Argon2Hasher::new();

        assert!(!hasher.verify("password", "invalid_hash_format"));
        assert!(!hasher.verify("password", ""));
    }
}
