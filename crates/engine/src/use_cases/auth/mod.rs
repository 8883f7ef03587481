//! Account use cases: registration, login and token sessions.

mod login;
mod register;

pub use login::{Login, Logout};
pub use register::Register;

use std::sync::Arc;

use midian_domain::DomainError;

use crate::infrastructure::ports::{PasswordError, RepoError};
use crate::stores::TokenStore;

/// Container for account use cases.
pub struct AuthUseCases {
    pub register: Arc<Register>,
    pub login: Arc<Login>,
    pub logout: Arc<Logout>,
    pub tokens: Arc<TokenStore>,
}

impl AuthUseCases {
    pub fn new(
        register: Arc<Register>,
        login: Arc<Login>,
        logout: Arc<Logout>,
        tokens: Arc<TokenStore>,
    ) -> Self {
        Self {
            register,
            login,
            logout,
            tokens,
        }
    }

    /// The username behind a live token.
    pub async fn resolve(&self, token: &str) -> Option<String> {
        self.tokens.resolve(token).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),
    /// Unknown user and wrong password look the same to the caller.
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<DomainError> for AuthError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::Constraint(msg) => Self::Validation(msg),
            other => Self::Validation(other.to_string()),
        }
    }
}
