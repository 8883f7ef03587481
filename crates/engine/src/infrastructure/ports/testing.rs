//! Testability ports for injecting time, randomness and hashing.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::error::PasswordError;

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    fn gen_uuid(&self) -> Uuid;
}

/// One-way password hashing.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasherPort: Send + Sync {
    /// Hash with a fresh salt and return a PHC string.
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError>;
}
