//! Argon2id password hashing.

use argon2::Argon2;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::infrastructure::ports::{PasswordError, PasswordHasherPort};

/// Argon2id with the crate's default parameters and a random salt per hash.
#[derive(Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasherPort for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hash(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        let parsed =
            PasswordHash::new(stored_hash).map_err(|e| PasswordError::CorruptHash(e.to_string()))?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash("segredo1").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("segredo1", &hash).unwrap());
        assert!(!hasher.verify("segredo2", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let hasher = Argon2Hasher::new();
        assert_ne!(hasher.hash("segredo1").unwrap(), hasher.hash("segredo1").unwrap());
    }

    #[test]
    fn garbage_hash_is_reported_as_corrupt() {
        let hasher = Argon2Hasher::new();
        assert!(matches!(
            hasher.verify("segredo1", "not-a-hash"),
            Err(PasswordError::CorruptHash(_))
        ));
    }
}
