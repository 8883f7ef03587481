//! Error types for port operations.

use midian_domain::DomainError;

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Storage operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Business constraint violated. The record was left unchanged.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// The owner already holds the maximum number of records. Nothing was stored.
    #[error("Limit reached: at most {limit} per owner")]
    LimitReached { limit: usize },
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Create a ConstraintViolation error.
    pub fn constraint(message: impl ToString) -> Self {
        Self::ConstraintViolation(message.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_constraint(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }
}

impl From<DomainError> for RepoError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            DomainError::Validation(msg) | DomainError::Constraint(msg) => {
                Self::ConstraintViolation(msg)
            }
            DomainError::Parse(msg) => Self::Serialization(msg),
        }
    }
}

/// Password hashing failures. Never carries the password itself.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PasswordError {
    #[error("Password hash failure: {0}")]
    Hash(String),
    #[error("Corrupt password hash: {0}")]
    CorruptHash(String),
}
