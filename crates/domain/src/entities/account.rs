//! Account entity - a registered user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::AccountId;

pub const MAX_USERNAME_LEN: usize = 14;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 14;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    /// PHC-formatted password hash. Never the plain password.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AccountId::new(),
            username: username.into(),
            password_hash: password_hash.into(),
            created_at: now,
        }
    }

    pub fn validate_username(username: &str) -> Result<(), DomainError> {
        if username.is_empty() {
            return Err(DomainError::validation("Username cannot be empty"));
        }
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(DomainError::validation(format!(
                "Username must be at most {MAX_USERNAME_LEN} characters"
            )));
        }
        Ok(())
    }

    pub fn validate_password(password: &str) -> Result<(), DomainError> {
        let len = password.chars().count();
        if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
            return Err(DomainError::validation(format!(
                "Password must be between {MIN_PASSWORD_LEN} and {MAX_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}
