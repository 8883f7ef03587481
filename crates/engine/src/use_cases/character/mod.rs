//! Character use cases.

mod create;
mod roster;

pub use create::{CreateCharacter, STARTING_GOLD, STARTING_POTION};
pub use roster::CharacterRoster;

use std::sync::Arc;

use midian_domain::{CharacterClass, DomainError};

use crate::infrastructure::ports::RepoError;

/// Container for character use cases.
pub struct CharacterUseCases {
    pub create: Arc<CreateCharacter>,
    pub roster: Arc<CharacterRoster>,
}

impl CharacterUseCases {
    pub fn new(create: Arc<CreateCharacter>, roster: Arc<CharacterRoster>) -> Self {
        Self { create, roster }
    }

    pub fn classes(&self) -> [CharacterClass; 4] {
        CharacterClass::all()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error("{0}")]
    Validation(String),
    #[error("Character '{0}' already exists")]
    NameTaken(String),
    #[error("Character limit reached ({max} per account)")]
    LimitReached { max: usize },
    #[error("Character '{0}' not found")]
    NotFound(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<DomainError> for CharacterError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::Constraint(msg) => Self::Validation(msg),
            other => Self::Validation(other.to_string()),
        }
    }
}
