//! Domain entities.

mod account;
mod character;
mod item;
mod mission;
mod progress;

pub use account::Account;
pub use character::{
    BaseStats, CharacterClass, CharacterColor, CharacterRecord, CharacterStatus, StatusSnapshot,
    MAX_CHARACTERS_PER_OWNER,
};
pub use item::{ItemKind, ShopItem};
pub use mission::{
    Enemy, ExitTarget, MissionRewards, MissionSummary, MissionTemplate, Room, Treasure,
    TreasureContents, MISSION_END,
};
pub use progress::{
    ActionOutcome, MissionAction, MissionProgress, MissionRuleError, MissionStep,
    ProgressCounters, ProgressKey, STRIKE_DAMAGE,
};
