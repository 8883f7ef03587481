//! Listing, lookup and deletion of an owner's characters.

use std::sync::Arc;

use midian_domain::CharacterRecord;

use crate::infrastructure::ports::CharacterRepo;
use crate::stores::ProgressStore;

use super::CharacterError;

pub struct CharacterRoster {
    characters: Arc<dyn CharacterRepo>,
    progress: Arc<ProgressStore>,
}

impl CharacterRoster {
    pub fn new(characters: Arc<dyn CharacterRepo>, progress: Arc<ProgressStore>) -> Self {
        Self {
            characters,
            progress,
        }
    }

    pub async fn list(&self, owner: &str) -> Result<Vec<CharacterRecord>, CharacterError> {
        Ok(self.characters.list(owner).await?)
    }

    pub async fn get(&self, owner: &str, name: &str) -> Result<CharacterRecord, CharacterError> {
        self.characters
            .get(owner, name)
            .await?
            .ok_or_else(|| CharacterError::NotFound(name.to_string()))
    }

    /// Remove the character and end all of its mission runs, so a new
    /// character reusing the name starts from scratch.
    pub async fn delete(&self, owner: &str, name: &str) -> Result<(), CharacterError> {
        if !self.characters.delete(owner, name).await? {
            return Err(CharacterError::NotFound(name.to_string()));
        }
        let runs_ended = self.progress.remove_character(owner, name);
        tracing::info!(
            owner = %owner,
            character = %name,
            runs_ended,
            "Character deleted"
        );
        Ok(())
    }
}
