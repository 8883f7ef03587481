//! Shop item entity.

use serde::{Deserialize, Serialize};

use super::character::CharacterClass;

/// Item category as used by the shop table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Consumivel,
    Arma,
    Armadura,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Consumivel => "consumivel",
            Self::Arma => "arma",
            Self::Armadura => "armadura",
        }
    }
}

/// An item the shop sells.
///
/// Plain data: the catalog is loaded once and every combination is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    pub name: String,
    pub kind: ItemKind,
    pub effect: String,
    pub description: String,
    /// Purchase price in gold.
    pub price: i64,
    /// Class the item is made for, if any.
    #[serde(default)]
    pub class: Option<CharacterClass>,
}

impl ShopItem {
    /// Gold paid back for one unit.
    pub fn sell_price(&self) -> i64 {
        self.price / 2
    }

    pub fn is_weapon_for(&self, class: CharacterClass) -> bool {
        self.kind == ItemKind::Arma && self.class == Some(class)
    }
}
