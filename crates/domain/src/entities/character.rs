//! Character entity - a player's adventurer and its resource ledger.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::CharacterId;
use crate::value_objects::{CharacterField, CharacterUpdate};

pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 20;
pub const MAX_CHARACTERS_PER_OWNER: usize = 3;

/// Playable classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Assassino,
    Arqueiro,
    Mago,
    Soldado,
}

/// Starting attributes of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: i64,
    pub strg: i64,
    pub mag: i64,
    pub spd: i64,
    pub luck: i64,
    pub defe: i64,
    pub mov: i64,
}

impl CharacterClass {
    pub fn all() -> [CharacterClass; 4] {
        [Self::Assassino, Self::Arqueiro, Self::Mago, Self::Soldado]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assassino => "Assassino",
            Self::Arqueiro => "Arqueiro",
            Self::Mago => "Mago",
            Self::Soldado => "Soldado",
        }
    }

    pub fn base_stats(&self) -> BaseStats {
        match self {
            Self::Assassino => BaseStats {
                hp: 15,
                strg: 8,
                mag: 6,
                spd: 12,
                luck: 6,
                defe: 8,
                mov: 4,
            },
            Self::Arqueiro => BaseStats {
                hp: 14,
                strg: 10,
                mag: 4,
                spd: 13,
                luck: 7,
                defe: 7,
                mov: 3,
            },
            Self::Mago => BaseStats {
                hp: 11,
                strg: 3,
                mag: 18,
                spd: 7,
                luck: 5,
                defe: 6,
                mov: 3,
            },
            Self::Soldado => BaseStats {
                hp: 18,
                strg: 16,
                mag: 3,
                spd: 5,
                luck: 4,
                defe: 15,
                mov: 2,
            },
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .into_iter()
            .find(|class| class.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "Invalid class '{wanted}'. Choose one of: Assassino, Arqueiro, Mago, Soldado"
                ))
            })
    }
}

/// Display color of a character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterColor {
    Vermelho,
    Verde,
    Azul,
    #[default]
    Cinza,
}

impl CharacterColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vermelho => "vermelho",
            Self::Verde => "verde",
            Self::Azul => "azul",
            Self::Cinza => "cinza",
        }
    }
}

impl fmt::Display for CharacterColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterColor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vermelho" | "red" => Ok(Self::Vermelho),
            "verde" | "green" => Ok(Self::Verde),
            "azul" | "blue" => Ok(Self::Azul),
            "cinza" | "gray" | "grey" => Ok(Self::Cinza),
            other => Err(DomainError::validation(format!("Invalid color '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStatus {
    pub hp_atual: i64,
    pub hp_max: i64,
    pub strg: i64,
    pub mag: i64,
    pub spd: i64,
    pub luck: i64,
    pub defe: i64,
    pub mov: i64,
}

impl From<BaseStats> for CharacterStatus {
    fn from(stats: BaseStats) -> Self {
        Self {
            hp_atual: stats.hp,
            hp_max: stats.hp,
            strg: stats.strg,
            mag: stats.mag,
            spd: stats.spd,
            luck: stats.luck,
            defe: stats.defe,
            mov: stats.mov,
        }
    }
}

/// The subset of a character reported alongside mission results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub hp: i64,
    pub hp_max: i64,
    pub level: i64,
    pub gold: i64,
}

/// A character as stored in the ledger.
///
/// Invariants: `0 <= hp_atual <= hp_max`, `gold >= 0`, every inventory
/// quantity is positive. [`CharacterRecord::apply`] is the only mutation path
/// that checks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: CharacterId,
    pub name: String,
    pub character_class: CharacterClass,
    pub color: CharacterColor,
    pub level: i64,
    pub gold: i64,
    pub status: CharacterStatus,
    pub itens: BTreeMap<String, i64>,
    pub created_at: DateTime<Utc>,
}

impl CharacterRecord {
    /// A fresh level 1 character with full hp, no gold and no items.
    pub fn new(
        name: impl Into<String>,
        character_class: CharacterClass,
        color: CharacterColor,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            character_class,
            color,
            level: 1,
            gold: 0,
            status: character_class.base_stats().into(),
            itens: BTreeMap::new(),
            created_at: now,
        }
    }

    pub fn with_gold(mut self, gold: i64) -> Self {
        self.gold = gold.max(0);
        self
    }

    pub fn with_level(mut self, level: i64) -> Self {
        self.level = level.max(1);
        self
    }

    pub fn with_item(mut self, name: impl Into<String>, quantity: i64) -> Self {
        if quantity > 0 {
            *self.itens.entry(name.into()).or_insert(0) += quantity;
        }
        self
    }

    /// Trim and check a requested character name.
    pub fn normalize_name(raw: &str) -> Result<String, DomainError> {
        let name = raw.trim();
        let len = name.chars().count();
        if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
            return Err(DomainError::validation(format!(
                "Character name must be between {MIN_NAME_LEN} and {MAX_NAME_LEN} characters"
            )));
        }
        Ok(name.to_string())
    }

    pub fn item_quantity(&self, item: &str) -> i64 {
        self.itens.get(item).copied().unwrap_or(0)
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            hp: self.status.hp_atual,
            hp_max: self.status.hp_max,
            level: self.level,
            gold: self.gold,
        }
    }

    /// Apply every change of `update` or none of them.
    pub fn apply(&mut self, update: &CharacterUpdate) -> Result<(), DomainError> {
        let mut next = self.clone();

        for (field, change) in update.changes() {
            match field {
                CharacterField::Gold => {
                    let gold = change.resolve(next.gold);
                    if gold < 0 {
                        return Err(DomainError::constraint(format!(
                            "gold cannot go below zero (have {}, would be {gold})",
                            next.gold
                        )));
                    }
                    next.gold = gold;
                }
                CharacterField::Level => {
                    let level = change.resolve(next.level);
                    if level < 1 {
                        return Err(DomainError::validation("level must be at least 1"));
                    }
                    next.level = level;
                }
                CharacterField::HpMax => {
                    let hp_max = change.resolve(next.status.hp_max);
                    if hp_max < 1 {
                        return Err(DomainError::validation("hp_max must be at least 1"));
                    }
                    next.status.hp_max = hp_max;
                    next.status.hp_atual = next.status.hp_atual.min(hp_max);
                }
                CharacterField::HpCurrent => {
                    next.status.hp_atual = change
                        .resolve(next.status.hp_atual)
                        .clamp(0, next.status.hp_max);
                }
                CharacterField::Item(name) => {
                    let have = next.item_quantity(name);
                    let quantity = change.resolve(have);
                    if quantity < 0 {
                        return Err(DomainError::constraint(format!(
                            "not enough '{name}' (have {have})"
                        )));
                    }
                    if quantity == 0 {
                        next.itens.remove(name);
                    } else {
                        next.itens.insert(name.clone(), quantity);
                    }
                }
            }
        }

        *self = next;
        Ok(())
    }
}
