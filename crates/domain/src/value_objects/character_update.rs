//! Partial updates to a character record.
//!
//! A [`CharacterUpdate`] is an ordered list of field changes addressed by
//! dotted paths (`gold`, `status.hp_atual`, `itens.Poção de Cura`). Ledger
//! adapters apply the whole list atomically.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Addressable field of a character record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CharacterField {
    Gold,
    Level,
    HpCurrent,
    HpMax,
    /// Quantity of a named inventory item.
    Item(String),
}

impl CharacterField {
    const ITEM_PREFIX: &'static str = "itens.";

    pub fn path(&self) -> String {
        match self {
            Self::Gold => "gold".to_string(),
            Self::Level => "level".to_string(),
            Self::HpCurrent => "status.hp_atual".to_string(),
            Self::HpMax => "status.hp_max".to_string(),
            Self::Item(name) => format!("{}{}", Self::ITEM_PREFIX, name),
        }
    }
}

impl fmt::Display for CharacterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for CharacterField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gold" => Ok(Self::Gold),
            "level" => Ok(Self::Level),
            "status.hp_atual" => Ok(Self::HpCurrent),
            "status.hp_max" => Ok(Self::HpMax),
            other => match other.strip_prefix(Self::ITEM_PREFIX) {
                Some(name) if !name.is_empty() => Ok(Self::Item(name.to_string())),
                _ => Err(DomainError::parse(format!(
                    "unknown character field '{other}'"
                ))),
            },
        }
    }
}

impl TryFrom<String> for CharacterField {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CharacterField> for String {
    fn from(value: CharacterField) -> Self {
        value.path()
    }
}

/// How a field changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldChange {
    Set(i64),
    /// Relative change; negative values subtract.
    Add(i64),
}

impl FieldChange {
    pub fn resolve(self, current: i64) -> i64 {
        match self {
            Self::Set(value) => value,
            Self::Add(delta) => current.saturating_add(delta),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterUpdate {
    changes: Vec<(CharacterField, FieldChange)>,
}

impl CharacterUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: CharacterField, value: i64) -> Self {
        self.changes.push((field, FieldChange::Set(value)));
        self
    }

    pub fn add(mut self, field: CharacterField, delta: i64) -> Self {
        self.changes.push((field, FieldChange::Add(delta)));
        self
    }

    pub fn changes(&self) -> &[(CharacterField, FieldChange)] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
