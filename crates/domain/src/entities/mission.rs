//! Mission entity - a quest laid out as a directed graph of rooms.
//!
//! Templates are immutable catalog data. Every running session works on its
//! own clone, so rooms can be emptied of enemies and treasures without the
//! change leaking into other sessions.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Exit target that ends the mission instead of leading to another room.
pub const MISSION_END: &str = "fim";

/// A complete mission definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty: String,
    pub min_level: u32,
    pub rewards: MissionRewards,
    pub rooms: BTreeMap<String, Room>,
    pub starting_room: String,
}

impl MissionTemplate {
    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn room_mut(&mut self, room_id: &str) -> Option<&mut Room> {
        self.rooms.get_mut(room_id)
    }

    /// Lightweight view without the room graph.
    pub fn summary(&self) -> MissionSummary {
        MissionSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            difficulty: self.difficulty.clone(),
            min_level: self.min_level,
            rewards: self.rewards.clone(),
        }
    }

    /// Check that the starting room exists and that every exit points at a
    /// room of this mission or at the mission end.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.rooms.contains_key(&self.starting_room) {
            return Err(DomainError::validation(format!(
                "mission '{}' starts in unknown room '{}'",
                self.id, self.starting_room
            )));
        }

        for (key, room) in &self.rooms {
            if key != &room.id {
                return Err(DomainError::validation(format!(
                    "mission '{}' stores room '{}' under key '{}'",
                    self.id, room.id, key
                )));
            }
            for (direction, target) in &room.exits {
                if let ExitTarget::Room(target_id) = target {
                    if !self.rooms.contains_key(target_id) {
                        return Err(DomainError::validation(format!(
                            "mission '{}': exit '{}' of room '{}' leads to unknown room '{}'",
                            self.id, direction, room.id, target_id
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

/// Rewards granted when the mission end is reached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionRewards {
    pub gold: i64,
    pub exp: i64,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Mission listing entry, without rooms, enemies or treasures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty: String,
    pub min_level: u32,
    pub rewards: MissionRewards,
}

/// A node of the mission graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub enemies: Vec<Enemy>,
    #[serde(default)]
    pub treasures: Vec<Treasure>,
    pub exits: BTreeMap<String, ExitTarget>,
    #[serde(default)]
    pub visited: bool,
}

impl Room {
    pub fn enemy(&self, enemy_id: &str) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == enemy_id)
    }

    pub fn enemy_mut(&mut self, enemy_id: &str) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == enemy_id)
    }

    pub fn treasure(&self, treasure_id: &str) -> Option<&Treasure> {
        self.treasures.iter().find(|t| t.id == treasure_id)
    }

    pub fn remove_enemy(&mut self, enemy_id: &str) {
        self.enemies.retain(|e| e.id != enemy_id);
    }

    pub fn remove_treasure(&mut self, treasure_id: &str) {
        self.treasures.retain(|t| t.id != treasure_id);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: String,
    pub name: String,
    /// Current hit points for this mission instance.
    pub hp: i64,
    pub attack: i64,
    pub defense: i64,
    pub gold_drop: i64,
    pub exp_drop: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treasure {
    pub id: String,
    pub name: String,
    pub contents: TreasureContents,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasureContents {
    #[serde(default)]
    pub gold: i64,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Where an exit leads.
///
/// Serialized as the bare room id, with [`MISSION_END`] standing for `End`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExitTarget {
    Room(String),
    End,
}

impl ExitTarget {
    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }
}

impl From<String> for ExitTarget {
    fn from(value: String) -> Self {
        if value == MISSION_END {
            Self::End
        } else {
            Self::Room(value)
        }
    }
}

impl From<&str> for ExitTarget {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ExitTarget> for String {
    fn from(value: ExitTarget) -> Self {
        match value {
            ExitTarget::Room(id) => id,
            ExitTarget::End => MISSION_END.to_string(),
        }
    }
}

impl fmt::Display for ExitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Room(id) => f.write_str(id),
            Self::End => f.write_str(MISSION_END),
        }
    }
}
