//! In-memory character ledger.

use async_trait::async_trait;
use dashmap::DashMap;
use midian_domain::{CharacterRecord, CharacterUpdate};

use crate::infrastructure::ports::{CharacterRepo, RepoError};

/// Characters grouped by owner.
///
/// Every write takes the owner's shard lock for the whole read-modify-write,
/// so two updates to the same character never interleave.
#[derive(Default)]
pub struct InMemoryCharacterRepo {
    owners: DashMap<String, Vec<CharacterRecord>>,
}

impl InMemoryCharacterRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CharacterRepo for InMemoryCharacterRepo {
    async fn list(&self, owner: &str) -> Result<Vec<CharacterRecord>, RepoError> {
        Ok(self
            .owners
            .get(owner)
            .map(|chars| chars.clone())
            .unwrap_or_default())
    }

    async fn get(&self, owner: &str, name: &str) -> Result<Option<CharacterRecord>, RepoError> {
        Ok(self
            .owners
            .get(owner)
            .and_then(|chars| chars.iter().find(|c| c.name == name).cloned()))
    }

    async fn insert(
        &self,
        owner: &str,
        record: CharacterRecord,
        limit: usize,
    ) -> Result<(), RepoError> {
        let mut chars = self.owners.entry(owner.to_string()).or_default();
        if chars.iter().any(|c| c.name == record.name) {
            return Err(RepoError::constraint(format!(
                "character '{}' already exists",
                record.name
            )));
        }
        if chars.len() >= limit {
            return Err(RepoError::LimitReached { limit });
        }
        chars.push(record);
        Ok(())
    }

    async fn update(
        &self,
        owner: &str,
        name: &str,
        update: CharacterUpdate,
    ) -> Result<CharacterRecord, RepoError> {
        let mut chars = self
            .owners
            .get_mut(owner)
            .ok_or_else(|| RepoError::not_found("Character", name))?;
        let record = chars
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| RepoError::not_found("Character", name))?;

        record.apply(&update)?;
        Ok(record.clone())
    }

    async fn delete(&self, owner: &str, name: &str) -> Result<bool, RepoError> {
        let Some(mut chars) = self.owners.get_mut(owner) else {
            return Ok(false);
        };
        let before = chars.len();
        chars.retain(|c| c.name != name);
        Ok(chars.len() != before)
    }
}
