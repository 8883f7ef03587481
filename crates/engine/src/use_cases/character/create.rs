//! Create character use case.

use std::sync::Arc;

use midian_domain::{CharacterClass, CharacterColor, CharacterRecord, MAX_CHARACTERS_PER_OWNER};

use crate::infrastructure::catalog::ItemCatalog;
use crate::infrastructure::ports::{CharacterRepo, ClockPort, RepoError};

use super::CharacterError;

pub const STARTING_GOLD: i64 = 100;
pub const STARTING_POTION: &str = "Poção de Cura";

pub struct CreateCharacter {
    characters: Arc<dyn CharacterRepo>,
    items: Arc<ItemCatalog>,
    clock: Arc<dyn ClockPort>,
}

impl CreateCharacter {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        items: Arc<ItemCatalog>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            characters,
            items,
            clock,
        }
    }

    pub async fn execute(
        &self,
        owner: &str,
        name: &str,
        class: &str,
        color: Option<&str>,
    ) -> Result<CharacterRecord, CharacterError> {
        let name = CharacterRecord::normalize_name(name)?;
        let class: CharacterClass = class.parse()?;
        let color = match color {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => CharacterColor::default(),
        };

        let mut record = CharacterRecord::new(name.clone(), class, color, self.clock.now())
            .with_gold(STARTING_GOLD)
            .with_item(STARTING_POTION, 1);
        match self.items.class_item(class) {
            Some(gear) => record = record.with_item(gear.name.clone(), 1),
            None => tracing::warn!(class = %class, "No starting gear in the item table"),
        }

        // The ledger checks the name and the owner limit under its write lock.
        self.characters
            .insert(owner, record.clone(), MAX_CHARACTERS_PER_OWNER)
            .await
            .map_err(|e| match e {
                RepoError::ConstraintViolation(_) => CharacterError::NameTaken(name.clone()),
                RepoError::LimitReached { limit } => CharacterError::LimitReached { max: limit },
                other => CharacterError::Repo(other),
            })?;

        tracing::info!(
            owner = %owner,
            character = %record.name,
            class = %class,
            "Character created"
        );
        Ok(record)
    }
}
