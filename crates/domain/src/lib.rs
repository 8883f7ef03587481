//! MidianText Domain - Core domain types, value objects, and invariants.
//!
//! Everything in this crate is pure: no I/O, no clocks, no randomness.
//! The engine crate drives these types through its use cases.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{
    Account, ActionOutcome, BaseStats, CharacterClass, CharacterColor, CharacterRecord,
    CharacterStatus, Enemy, ExitTarget, ItemKind, MissionAction, MissionProgress,
    MissionRewards, MissionRuleError, MissionStep, MissionSummary, MissionTemplate,
    ProgressCounters, ProgressKey, Room, ShopItem, StatusSnapshot, Treasure, TreasureContents,
    MAX_CHARACTERS_PER_OWNER, MISSION_END, STRIKE_DAMAGE,
};
pub use error::DomainError;
pub use ids::{AccountId, CharacterId};
pub use value_objects::{CharacterField, CharacterUpdate, FieldChange};
