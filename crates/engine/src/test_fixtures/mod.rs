//! Common helpers for use case and API tests.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use midian_domain::{CharacterClass, CharacterColor, CharacterRecord, MAX_CHARACTERS_PER_OWNER};

use crate::infrastructure::catalog::{ItemCatalog, MissionCatalog};
use crate::infrastructure::memory::InMemoryCharacterRepo;
use crate::infrastructure::ports::CharacterRepo;

pub const OWNER: &str = "alice";

/// A level 1 character with 100 gold and full hp.
pub fn character(name: &str, class: CharacterClass) -> CharacterRecord {
    let created = Utc
        .with_ymd_and_hms(2025, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);
    CharacterRecord::new(name, class, CharacterColor::Cinza, created).with_gold(100)
}

/// Ledger holding the given characters for [`OWNER`].
pub async fn ledger_with(records: Vec<CharacterRecord>) -> Arc<InMemoryCharacterRepo> {
    let repo = Arc::new(InMemoryCharacterRepo::new());
    for record in records {
        repo.insert(OWNER, record, MAX_CHARACTERS_PER_OWNER)
            .await
            .expect("seed character");
    }
    repo
}

pub fn missions() -> Arc<MissionCatalog> {
    Arc::new(MissionCatalog::builtin().expect("builtin missions"))
}

pub fn items() -> Arc<ItemCatalog> {
    Arc::new(ItemCatalog::builtin().expect("builtin items"))
}
