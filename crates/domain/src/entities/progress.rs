//! Mission progress - one character's run through one mission.
//!
//! The progress owns a private copy of the mission graph. Transitions mutate
//! that copy and describe the character ledger changes they imply as a
//! [`CharacterUpdate`]; persisting those changes is the caller's job.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::mission::{ExitTarget, MissionRewards, MissionTemplate, Room};
use crate::value_objects::{CharacterField, CharacterUpdate};

/// Damage dealt by the character on every `fight` action.
pub const STRIKE_DAMAGE: i64 = 15;

/// Composite key identifying a progress record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgressKey {
    pub username: String,
    pub character_name: String,
    pub mission_id: String,
}

impl ProgressKey {
    pub fn new(
        username: impl Into<String>,
        character_name: impl Into<String>,
        mission_id: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            character_name: character_name.into(),
            mission_id: mission_id.into(),
        }
    }
}

impl fmt::Display for ProgressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.username, self.character_name, self.mission_id
        )
    }
}

/// An action a character can take inside a mission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissionAction {
    Move { direction: String },
    Fight { enemy_id: String },
    Collect { treasure_id: String },
}

impl MissionAction {
    /// Build an action from its wire name and optional target.
    ///
    /// A missing target is treated as an empty one, which then fails the
    /// room lookup with the matching error.
    pub fn parse(action: &str, target: Option<&str>) -> Result<Self, MissionRuleError> {
        let target = target.unwrap_or_default().to_string();
        match action {
            "move" => Ok(Self::Move { direction: target }),
            "fight" => Ok(Self::Fight { enemy_id: target }),
            "collect" => Ok(Self::Collect {
                treasure_id: target,
            }),
            other => Err(MissionRuleError::InvalidAction(other.to_string())),
        }
    }
}

/// Why a mission transition was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MissionRuleError {
    #[error("Mission already completed")]
    AlreadyCompleted,
    #[error("Invalid direction: '{0}'")]
    InvalidDirection(String),
    #[error("Target not found in this room: '{0}'")]
    InvalidTarget(String),
    #[error("Enemy already defeated: '{0}'")]
    AlreadyDefeated(String),
    #[error("Treasure already collected: '{0}'")]
    AlreadyCollected(String),
    #[error("Invalid action: '{0}'")]
    InvalidAction(String),
    #[error("Mission graph has no room '{0}'")]
    UnknownRoom(String),
}

/// What happened as the result of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Moved {
        room_name: String,
    },
    Completed {
        rewards: MissionRewards,
    },
    EnemyStruck {
        enemy_name: String,
        remaining_hp: i64,
        retaliation: i64,
    },
    EnemyDefeated {
        enemy_name: String,
        gold_drop: i64,
    },
    TreasureCollected {
        treasure_name: String,
        gold: i64,
    },
}

impl ActionOutcome {
    /// Human-readable description for the player.
    pub fn message(&self) -> String {
        match self {
            Self::Moved { room_name } => format!("You moved to: {room_name}"),
            Self::Completed { rewards } => {
                format!("Mission complete! You earned {} gold!", rewards.gold)
            }
            Self::EnemyStruck {
                enemy_name,
                remaining_hp,
                retaliation,
            } => format!(
                "You attacked {enemy_name}! The enemy still has {remaining_hp} HP and hit back for {retaliation}."
            ),
            Self::EnemyDefeated {
                enemy_name,
                gold_drop,
            } => format!("You defeated {enemy_name}! Gained {gold_drop} gold."),
            Self::TreasureCollected {
                treasure_name,
                gold,
            } => format!("You collected {treasure_name}! Gained {gold} gold."),
        }
    }
}

/// A successful transition plus the ledger changes it requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionStep {
    pub outcome: ActionOutcome,
    pub ledger: CharacterUpdate,
}

/// Counters reported with every action response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressCounters {
    pub visited_rooms: usize,
    pub defeated_enemies: usize,
    pub collected_treasures: usize,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionProgress {
    pub character_name: String,
    pub mission_id: String,
    pub current_room: String,
    pub visited_rooms: Vec<String>,
    pub defeated_enemies: Vec<String>,
    pub collected_treasures: Vec<String>,
    pub completed: bool,
    pub mission: MissionTemplate,
}

impl MissionProgress {
    /// Begin a run at the template's starting room.
    ///
    /// Takes the template by value: the progress becomes the sole owner of
    /// this copy of the graph.
    pub fn start(
        character_name: impl Into<String>,
        mut mission: MissionTemplate,
    ) -> Result<Self, MissionRuleError> {
        let starting_room = mission.starting_room.clone();
        mission
            .room_mut(&starting_room)
            .ok_or_else(|| MissionRuleError::UnknownRoom(starting_room.clone()))?
            .visited = true;

        Ok(Self {
            character_name: character_name.into(),
            mission_id: mission.id.clone(),
            current_room: starting_room.clone(),
            visited_rooms: vec![starting_room],
            defeated_enemies: Vec::new(),
            collected_treasures: Vec::new(),
            completed: false,
            mission,
        })
    }

    pub fn room(&self) -> Result<&Room, MissionRuleError> {
        self.mission
            .room(&self.current_room)
            .ok_or_else(|| MissionRuleError::UnknownRoom(self.current_room.clone()))
    }

    fn room_mut(&mut self) -> Result<&mut Room, MissionRuleError> {
        let id = self.current_room.clone();
        self.mission
            .room_mut(&id)
            .ok_or(MissionRuleError::UnknownRoom(id))
    }

    pub fn counters(&self) -> ProgressCounters {
        ProgressCounters {
            visited_rooms: self.visited_rooms.len(),
            defeated_enemies: self.defeated_enemies.len(),
            collected_treasures: self.collected_treasures.len(),
            completed: self.completed,
        }
    }

    /// Apply an action to this run.
    ///
    /// On error nothing has been mutated.
    pub fn apply(&mut self, action: &MissionAction) -> Result<MissionStep, MissionRuleError> {
        if self.completed {
            return Err(MissionRuleError::AlreadyCompleted);
        }

        match action {
            MissionAction::Move { direction } => self.travel(direction),
            MissionAction::Fight { enemy_id } => self.strike(enemy_id),
            MissionAction::Collect { treasure_id } => self.collect(treasure_id),
        }
    }

    fn travel(&mut self, direction: &str) -> Result<MissionStep, MissionRuleError> {
        let target = self
            .room()?
            .exits
            .get(direction)
            .cloned()
            .ok_or_else(|| MissionRuleError::InvalidDirection(direction.to_string()))?;

        match target {
            ExitTarget::End => {
                let rewards = self.mission.rewards.clone();
                self.completed = true;
                Ok(MissionStep {
                    ledger: CharacterUpdate::new().add(CharacterField::Gold, rewards.gold),
                    outcome: ActionOutcome::Completed { rewards },
                })
            }
            ExitTarget::Room(next_id) => {
                let next = self
                    .mission
                    .room_mut(&next_id)
                    .ok_or_else(|| MissionRuleError::UnknownRoom(next_id.clone()))?;
                next.visited = true;
                let room_name = next.name.clone();

                if !self.visited_rooms.contains(&next_id) {
                    self.visited_rooms.push(next_id.clone());
                }
                self.current_room = next_id;

                Ok(MissionStep {
                    outcome: ActionOutcome::Moved { room_name },
                    ledger: CharacterUpdate::new(),
                })
            }
        }
    }

    fn strike(&mut self, enemy_id: &str) -> Result<MissionStep, MissionRuleError> {
        if self.defeated_enemies.iter().any(|id| id == enemy_id) {
            return Err(MissionRuleError::AlreadyDefeated(enemy_id.to_string()));
        }

        let room = self.room_mut()?;
        let enemy = room
            .enemy_mut(enemy_id)
            .ok_or_else(|| MissionRuleError::InvalidTarget(enemy_id.to_string()))?;

        enemy.hp -= STRIKE_DAMAGE;

        if enemy.hp > 0 {
            let outcome = ActionOutcome::EnemyStruck {
                enemy_name: enemy.name.clone(),
                remaining_hp: enemy.hp,
                retaliation: enemy.attack,
            };
            return Ok(MissionStep {
                ledger: CharacterUpdate::new().add(CharacterField::HpCurrent, -enemy.attack),
                outcome,
            });
        }

        let enemy_name = enemy.name.clone();
        let gold_drop = enemy.gold_drop;
        room.remove_enemy(enemy_id);
        self.defeated_enemies.push(enemy_id.to_string());

        Ok(MissionStep {
            outcome: ActionOutcome::EnemyDefeated {
                enemy_name,
                gold_drop,
            },
            ledger: CharacterUpdate::new().add(CharacterField::Gold, gold_drop),
        })
    }

    fn collect(&mut self, treasure_id: &str) -> Result<MissionStep, MissionRuleError> {
        if self.collected_treasures.iter().any(|id| id == treasure_id) {
            return Err(MissionRuleError::AlreadyCollected(treasure_id.to_string()));
        }

        let room = self.room_mut()?;
        let treasure = room
            .treasure(treasure_id)
            .cloned()
            .ok_or_else(|| MissionRuleError::InvalidTarget(treasure_id.to_string()))?;
        room.remove_treasure(treasure_id);
        self.collected_treasures.push(treasure_id.to_string());

        Ok(MissionStep {
            ledger: CharacterUpdate::new().add(CharacterField::Gold, treasure.contents.gold),
            outcome: ActionOutcome::TreasureCollected {
                treasure_name: treasure.name,
                gold: treasure.contents.gold,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::mission::{Enemy, Treasure, TreasureContents};
    use crate::value_objects::FieldChange;

    fn crypt() -> MissionTemplate {
        let hall = Room {
            id: "hall".to_string(),
            name: "Hall".to_string(),
            description: "A dusty hall".to_string(),
            enemies: vec![Enemy {
                id: "ghoul".to_string(),
                name: "Ghoul".to_string(),
                hp: 30,
                attack: 8,
                defense: 5,
                gold_drop: 50,
                exp_drop: 40,
            }],
            treasures: vec![Treasure {
                id: "chest".to_string(),
                name: "Old Chest".to_string(),
                contents: TreasureContents {
                    gold: 75,
                    items: vec!["Poção de Cura".to_string()],
                },
            }],
            exits: [
                ("back".to_string(), ExitTarget::from("gate")),
                ("out".to_string(), ExitTarget::End),
            ]
            .into_iter()
            .collect(),
            visited: false,
        };
        let gate = Room {
            id: "gate".to_string(),
            name: "Gate".to_string(),
            description: "The way in".to_string(),
            enemies: vec![],
            treasures: vec![],
            exits: [("in".to_string(), ExitTarget::from("hall"))]
                .into_iter()
                .collect(),
            visited: false,
        };

        MissionTemplate {
            id: "crypt".to_string(),
            name: "Crypt".to_string(),
            description: String::new(),
            difficulty: "Fácil".to_string(),
            min_level: 1,
            rewards: MissionRewards {
                gold: 200,
                exp: 150,
                items: vec!["Amuleto".to_string()],
            },
            rooms: [("hall".to_string(), hall), ("gate".to_string(), gate)]
                .into_iter()
                .collect(),
            starting_room: "gate".to_string(),
        }
    }

    fn fight(id: &str) -> MissionAction {
        MissionAction::Fight {
            enemy_id: id.to_string(),
        }
    }

    fn go(direction: &str) -> MissionAction {
        MissionAction::Move {
            direction: direction.to_string(),
        }
    }

    #[test]
    fn start_marks_starting_room_visited() {
        let progress = MissionProgress::start("Hero", crypt()).unwrap();
        assert_eq!(progress.current_room, "gate");
        assert_eq!(progress.visited_rooms, vec!["gate".to_string()]);
        assert!(progress.room().unwrap().visited);
        assert!(!progress.mission.room("hall").unwrap().visited);
    }

    #[test]
    fn parse_rejects_unknown_action() {
        let err = MissionAction::parse("flee", None).unwrap_err();
        assert_eq!(err, MissionRuleError::InvalidAction("flee".to_string()));
    }

    #[test]
    fn move_follows_exit_and_records_visit_once() {
        let mut progress = MissionProgress::start("Hero", crypt()).unwrap();

        let step = progress.apply(&go("in")).unwrap();
        assert!(step.ledger.is_empty());
        assert_eq!(progress.current_room, "hall");

        progress.apply(&go("back")).unwrap();
        progress.apply(&go("in")).unwrap();
        assert_eq!(progress.visited_rooms, vec!["gate", "hall"]);
        assert!(progress.mission.room("hall").unwrap().visited);
    }

    #[test]
    fn move_with_unknown_direction_fails_without_moving() {
        let mut progress = MissionProgress::start("Hero", crypt()).unwrap();
        let err = progress.apply(&go("up")).unwrap_err();
        assert_eq!(err, MissionRuleError::InvalidDirection("up".to_string()));
        assert_eq!(progress.current_room, "gate");
    }

    #[test]
    fn fight_drops_hp_by_fixed_damage_until_defeat() {
        let mut progress = MissionProgress::start("Hero", crypt()).unwrap();
        progress.apply(&go("in")).unwrap();

        let first = progress.apply(&fight("ghoul")).unwrap();
        assert_eq!(
            first.outcome,
            ActionOutcome::EnemyStruck {
                enemy_name: "Ghoul".to_string(),
                remaining_hp: 15,
                retaliation: 8,
            }
        );
        assert_eq!(
            first.ledger.changes(),
            &[(CharacterField::HpCurrent, FieldChange::Add(-8))]
        );

        let second = progress.apply(&fight("ghoul")).unwrap();
        assert_eq!(
            second.outcome,
            ActionOutcome::EnemyDefeated {
                enemy_name: "Ghoul".to_string(),
                gold_drop: 50,
            }
        );
        assert_eq!(
            second.ledger.changes(),
            &[(CharacterField::Gold, FieldChange::Add(50))]
        );
        assert!(progress.room().unwrap().enemies.is_empty());
        assert_eq!(progress.defeated_enemies, vec!["ghoul"]);

        let third = progress.apply(&fight("ghoul")).unwrap_err();
        assert_eq!(third, MissionRuleError::AlreadyDefeated("ghoul".to_string()));
    }

    #[test]
    fn fight_against_absent_enemy_is_invalid_target() {
        let mut progress = MissionProgress::start("Hero", crypt()).unwrap();
        let err = progress.apply(&fight("ghoul")).unwrap_err();
        assert_eq!(err, MissionRuleError::InvalidTarget("ghoul".to_string()));
    }

    #[test]
    fn collect_grants_gold_exactly_once() {
        let mut progress = MissionProgress::start("Hero", crypt()).unwrap();
        progress.apply(&go("in")).unwrap();

        let collect = MissionAction::Collect {
            treasure_id: "chest".to_string(),
        };
        let step = progress.apply(&collect).unwrap();
        assert_eq!(
            step.ledger.changes(),
            &[(CharacterField::Gold, FieldChange::Add(75))]
        );
        assert!(progress.room().unwrap().treasures.is_empty());

        let err = progress.apply(&collect).unwrap_err();
        assert_eq!(err, MissionRuleError::AlreadyCollected("chest".to_string()));
    }

    #[test]
    fn reaching_the_end_completes_and_blocks_further_actions() {
        let mut progress = MissionProgress::start("Hero", crypt()).unwrap();
        progress.apply(&go("in")).unwrap();

        let step = progress.apply(&go("out")).unwrap();
        assert!(progress.completed);
        assert_eq!(
            step.ledger.changes(),
            &[(CharacterField::Gold, FieldChange::Add(200))]
        );
        match step.outcome {
            ActionOutcome::Completed { rewards } => assert_eq!(rewards.exp, 150),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(progress.current_room, "hall");

        let err = progress.apply(&go("back")).unwrap_err();
        assert_eq!(err, MissionRuleError::AlreadyCompleted);
    }

    #[test]
    fn instance_changes_never_reach_the_template() {
        let template = crypt();
        let mut progress = MissionProgress::start("Hero", template.clone()).unwrap();
        progress.apply(&go("in")).unwrap();
        progress.apply(&fight("ghoul")).unwrap();

        assert_eq!(template.room("hall").unwrap().enemies[0].hp, 30);
        assert_eq!(progress.room().unwrap().enemies[0].hp, 15);
    }

    #[test]
    fn counters_track_history() {
        let mut progress = MissionProgress::start("Hero", crypt()).unwrap();
        progress.apply(&go("in")).unwrap();
        progress
            .apply(&MissionAction::Collect {
                treasure_id: "chest".to_string(),
            })
            .unwrap();

        let counters = progress.counters();
        assert_eq!(counters.visited_rooms, 2);
        assert_eq!(counters.defeated_enemies, 0);
        assert_eq!(counters.collected_treasures, 1);
        assert!(!counters.completed);
    }
}
