//! Read-only views of domain state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use midian_domain::{
    CharacterClass, CharacterRecord, Enemy, MissionRewards, MissionSummary, MissionTemplate,
    ProgressCounters, Room, ShopItem, StatusSnapshot, Treasure,
};

// =============================================================================
// Missions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardsView {
    pub gold: i64,
    pub exp: i64,
    pub items: Vec<String>,
}

impl From<MissionRewards> for RewardsView {
    fn from(r: MissionRewards) -> Self {
        Self {
            gold: r.gold,
            exp: r.exp,
            items: r.items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionSummaryView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty: String,
    pub min_level: u32,
    pub rewards: RewardsView,
}

impl From<MissionSummary> for MissionSummaryView {
    fn from(s: MissionSummary) -> Self {
        Self {
            id: s.id,
            name: s.name,
            description: s.description,
            difficulty: s.difficulty,
            min_level: s.min_level,
            rewards: s.rewards.into(),
        }
    }
}

/// Header returned when a mission starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionInfoView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty: String,
}

impl From<&MissionTemplate> for MissionInfoView {
    fn from(m: &MissionTemplate) -> Self {
        Self {
            id: m.id.clone(),
            name: m.name.clone(),
            description: m.description.clone(),
            difficulty: m.difficulty.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: String,
    pub name: String,
    pub hp: i64,
    pub attack: i64,
    pub defense: i64,
    pub gold_drop: i64,
    pub exp_drop: i64,
}

impl From<&Enemy> for EnemyView {
    fn from(e: &Enemy) -> Self {
        Self {
            id: e.id.clone(),
            name: e.name.clone(),
            hp: e.hp,
            attack: e.attack,
            defense: e.defense,
            gold_drop: e.gold_drop,
            exp_drop: e.exp_drop,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasureContentsView {
    pub gold: i64,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasureView {
    pub id: String,
    pub name: String,
    pub contents: TreasureContentsView,
}

impl From<&Treasure> for TreasureView {
    fn from(t: &Treasure) -> Self {
        Self {
            id: t.id.clone(),
            name: t.name.clone(),
            contents: TreasureContentsView {
                gold: t.contents.gold,
                items: t.contents.items.clone(),
            },
        }
    }
}

/// The room a character stands in, as the client renders it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub enemies: Vec<EnemyView>,
    pub treasures: Vec<TreasureView>,
    /// Direction to target room id, or `"fim"` for the mission exit.
    pub exits: BTreeMap<String, String>,
}

impl From<&Room> for RoomView {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.clone(),
            name: room.name.clone(),
            description: room.description.clone(),
            enemies: room.enemies.iter().map(EnemyView::from).collect(),
            treasures: room.treasures.iter().map(TreasureView::from).collect(),
            exits: room
                .exits
                .iter()
                .map(|(direction, target)| (direction.clone(), target.to_string()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressView {
    pub visited_rooms: usize,
    pub defeated_enemies: usize,
    pub collected_treasures: usize,
    pub completed: bool,
}

impl From<ProgressCounters> for ProgressView {
    fn from(c: ProgressCounters) -> Self {
        Self {
            visited_rooms: c.visited_rooms,
            defeated_enemies: c.defeated_enemies,
            collected_treasures: c.collected_treasures,
            completed: c.completed,
        }
    }
}

// =============================================================================
// Characters
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStatusView {
    pub hp: i64,
    pub hp_max: i64,
    pub level: i64,
    pub gold: i64,
}

impl From<StatusSnapshot> for CharacterStatusView {
    fn from(s: StatusSnapshot) -> Self {
        Self {
            hp: s.hp,
            hp_max: s.hp_max,
            level: s.level,
            gold: s.gold,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterStatsView {
    pub hp_atual: i64,
    pub hp_max: i64,
    pub strg: i64,
    pub mag: i64,
    pub spd: i64,
    pub luck: i64,
    pub defe: i64,
    pub mov: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterView {
    pub id: Uuid,
    pub name: String,
    pub character_class: String,
    pub color: String,
    pub level: i64,
    pub gold: i64,
    pub status: CharacterStatsView,
    pub itens: BTreeMap<String, i64>,
    pub created_at: String,
}

impl From<CharacterRecord> for CharacterView {
    fn from(c: CharacterRecord) -> Self {
        Self {
            id: *c.id.as_uuid(),
            name: c.name,
            character_class: c.character_class.to_string(),
            color: c.color.to_string(),
            level: c.level,
            gold: c.gold,
            status: CharacterStatsView {
                hp_atual: c.status.hp_atual,
                hp_max: c.status.hp_max,
                strg: c.status.strg,
                mag: c.status.mag,
                spd: c.status.spd,
                luck: c.status.luck,
                defe: c.status.defe,
                mov: c.status.mov,
            },
            itens: c.itens,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// A playable class and its starting attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassView {
    pub name: String,
    pub hp: i64,
    pub strg: i64,
    pub mag: i64,
    pub spd: i64,
    pub luck: i64,
    pub defe: i64,
    pub mov: i64,
}

impl From<CharacterClass> for ClassView {
    fn from(class: CharacterClass) -> Self {
        let stats = class.base_stats();
        Self {
            name: class.to_string(),
            hp: stats.hp,
            strg: stats.strg,
            mag: stats.mag,
            spd: stats.spd,
            luck: stats.luck,
            defe: stats.defe,
            mov: stats.mov,
        }
    }
}

// =============================================================================
// Shop
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopItemView {
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "efeito")]
    pub effect: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor")]
    pub price: i64,
    #[serde(rename = "classe", skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl From<&ShopItem> for ShopItemView {
    fn from(item: &ShopItem) -> Self {
        Self {
            name: item.name.clone(),
            kind: item.kind.as_str().to_string(),
            effect: item.effect.clone(),
            description: item.description.clone(),
            price: item.price,
            class: item.class.map(|c| c.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use midian_domain::ExitTarget;

    #[test]
    fn room_view_renders_end_exit_as_sentinel() {
        let room = Room {
            id: "camara".to_string(),
            name: "Câmara".to_string(),
            description: String::new(),
            enemies: vec![],
            treasures: vec![],
            exits: [("saida".to_string(), ExitTarget::End)].into_iter().collect(),
            visited: true,
        };

        let view = RoomView::from(&room);
        assert_eq!(view.exits.get("saida").map(String::as_str), Some("fim"));
    }

    #[test]
    fn shop_item_uses_table_field_names() {
        let item = ShopItem {
            name: "Arco Élfico".to_string(),
            kind: midian_domain::ItemKind::Arma,
            effect: "+4 Força".to_string(),
            description: String::new(),
            price: 350,
            class: Some(CharacterClass::Arqueiro),
        };

        let json = serde_json::to_value(ShopItemView::from(&item)).unwrap();
        assert_eq!(json["tipo"], "arma");
        assert_eq!(json["valor"], 350);
        assert_eq!(json["classe"], "Arqueiro");
    }
}
