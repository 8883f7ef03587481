//! Repository port traits.

use async_trait::async_trait;
use midian_domain::{Account, CharacterRecord, CharacterUpdate};

use super::error::RepoError;

// =============================================================================
// Character Ledger
// =============================================================================

/// Persistent record of each owner's characters.
///
/// `update` is the only way to change a stored character. Implementations
/// apply the whole [`CharacterUpdate`] atomically per record: either every
/// change lands or the record is left as it was and a
/// [`RepoError::ConstraintViolation`] is returned.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn list(&self, owner: &str) -> Result<Vec<CharacterRecord>, RepoError>;

    async fn get(&self, owner: &str, name: &str) -> Result<Option<CharacterRecord>, RepoError>;

    /// Store a new character.
    ///
    /// The name check and the `limit` check run under the same lock as the
    /// write. A taken name is a [`RepoError::ConstraintViolation`]; an owner
    /// already holding `limit` characters is a [`RepoError::LimitReached`].
    async fn insert(
        &self,
        owner: &str,
        record: CharacterRecord,
        limit: usize,
    ) -> Result<(), RepoError>;

    /// Apply a partial update and return the stored result.
    async fn update(
        &self,
        owner: &str,
        name: &str,
        update: CharacterUpdate,
    ) -> Result<CharacterRecord, RepoError>;

    /// Returns true if a character was removed.
    async fn delete(&self, owner: &str, name: &str) -> Result<bool, RepoError>;
}

// =============================================================================
// Accounts
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepo: Send + Sync {
    async fn get(&self, username: &str) -> Result<Option<Account>, RepoError>;

    /// Store a new account. Fails if the username is taken.
    async fn insert(&self, account: Account) -> Result<(), RepoError>;
}
