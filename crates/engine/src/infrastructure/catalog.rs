//! Static game content: missions and shop items.
//!
//! Both catalogs are loaded once at startup and are read-only afterwards.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use midian_domain::{CharacterClass, DomainError, MissionSummary, MissionTemplate, ShopItem};

const BUILTIN_MISSIONS: &str = include_str!("../../data/missions.json");
const BUILTIN_ITEMS: &str = include_str!("../../data/items.json");

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid catalog: {0}")]
    Invalid(#[from] DomainError),
}

// =============================================================================
// Missions
// =============================================================================

/// Every mission the server offers, keyed by id.
#[derive(Debug, Clone)]
pub struct MissionCatalog {
    missions: BTreeMap<String, MissionTemplate>,
}

impl MissionCatalog {
    /// Missions shipped with the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_MISSIONS)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse a JSON array of missions.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let missions: Vec<MissionTemplate> = serde_json::from_str(raw)?;
        Ok(Self::from_missions(missions)?)
    }

    /// Validate and index missions. Duplicate ids and broken room graphs
    /// are rejected.
    pub fn from_missions(missions: Vec<MissionTemplate>) -> Result<Self, DomainError> {
        let mut indexed = BTreeMap::new();
        for mission in missions {
            mission.validate()?;
            let id = mission.id.clone();
            if indexed.insert(id.clone(), mission).is_some() {
                return Err(DomainError::validation(format!(
                    "duplicate mission id '{id}'"
                )));
            }
        }
        Ok(Self { missions: indexed })
    }

    /// An independent copy of the mission, safe to mutate.
    pub fn get(&self, mission_id: &str) -> Option<MissionTemplate> {
        self.missions.get(mission_id).cloned()
    }

    pub fn summaries(&self) -> Vec<MissionSummary> {
        self.missions.values().map(MissionTemplate::summary).collect()
    }

    pub fn summary(&self, mission_id: &str) -> Option<MissionSummary> {
        self.missions.get(mission_id).map(MissionTemplate::summary)
    }

    pub fn len(&self) -> usize {
        self.missions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }
}

// =============================================================================
// Shop items
// =============================================================================

#[derive(Debug, Clone)]
pub struct ItemCatalog {
    items: Vec<ShopItem>,
}

impl ItemCatalog {
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_ITEMS)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let items: Vec<ShopItem> = serde_json::from_str(raw)?;
        Ok(Self::new(items)?)
    }

    pub fn new(items: Vec<ShopItem>) -> Result<Self, DomainError> {
        for (idx, item) in items.iter().enumerate() {
            if item.price < 0 {
                return Err(DomainError::validation(format!(
                    "item '{}' has a negative price",
                    item.name
                )));
            }
            if items[..idx].iter().any(|other| other.name == item.name) {
                return Err(DomainError::validation(format!(
                    "duplicate item '{}'",
                    item.name
                )));
            }
        }
        Ok(Self { items })
    }

    pub fn all(&self) -> &[ShopItem] {
        &self.items
    }

    pub fn get(&self, name: &str) -> Option<&ShopItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// The gear a new character of `class` starts with.
    pub fn class_item(&self, class: CharacterClass) -> Option<&ShopItem> {
        self.items.iter().find(|item| item.class == Some(class))
    }
}
