//! Mission action use case.
//!
//! Applies one move/fight/collect to a running mission. The transition runs
//! on a working copy of the progress while the slot lock is held; the
//! character ledger is updated next, and only when that succeeds is the
//! working copy committed.

use std::sync::Arc;

use midian_domain::{
    ActionOutcome, MissionAction, MissionRewards, MissionRuleError, ProgressCounters,
    ProgressKey, Room, StatusSnapshot,
};

use crate::infrastructure::ports::CharacterRepo;
use crate::stores::ProgressStore;

use super::MissionError;

#[derive(Debug, Clone)]
pub struct ActionResult {
    pub outcome: ActionOutcome,
    pub room: Room,
    pub status: StatusSnapshot,
    pub counters: ProgressCounters,
}

impl ActionResult {
    pub fn message(&self) -> String {
        self.outcome.message()
    }

    /// Rewards, if this action completed the mission.
    pub fn rewards(&self) -> Option<&MissionRewards> {
        match &self.outcome {
            ActionOutcome::Completed { rewards } => Some(rewards),
            _ => None,
        }
    }
}

pub struct PerformAction {
    characters: Arc<dyn CharacterRepo>,
    progress: Arc<ProgressStore>,
}

impl PerformAction {
    pub fn new(characters: Arc<dyn CharacterRepo>, progress: Arc<ProgressStore>) -> Self {
        Self {
            characters,
            progress,
        }
    }

    pub async fn execute(
        &self,
        username: &str,
        character_name: &str,
        mission_id: &str,
        action: &str,
        target: Option<&str>,
    ) -> Result<ActionResult, MissionError> {
        let key = ProgressKey::new(username, character_name, mission_id);
        let mut slot = self
            .progress
            .lock_existing(&key)
            .await
            .ok_or(MissionError::NotStarted)?;
        let current = slot.as_ref().ok_or(MissionError::NotStarted)?;

        if current.completed {
            return Err(MissionRuleError::AlreadyCompleted.into());
        }

        let character = self
            .characters
            .get(username, character_name)
            .await?
            .ok_or_else(|| MissionError::CharacterNotFound(character_name.to_string()))?;

        let action = MissionAction::parse(action, target)?;
        let mut working = current.clone();
        let step = working.apply(&action)?;
        let room = working.room()?.clone();

        let character = if step.ledger.is_empty() {
            character
        } else {
            self.characters
                .update(username, character_name, step.ledger)
                .await
                .inspect_err(|e| {
                    tracing::warn!(
                        username = %username,
                        character = %character_name,
                        mission_id = %mission_id,
                        error = %e,
                        "Ledger update failed, mission progress left unchanged"
                    );
                })?
        };

        let counters = working.counters();
        *slot = Some(working);

        tracing::debug!(
            username = %username,
            character = %character_name,
            mission_id = %mission_id,
            room = %room.id,
            completed = counters.completed,
            "Mission action applied"
        );

        Ok(ActionResult {
            outcome: step.outcome,
            room,
            status: character.snapshot(),
            counters,
        })
    }
}

#[cfg(test)]
mod tests {
    use midian_domain::{CharacterClass, STRIKE_DAMAGE};

    use super::*;
    use crate::infrastructure::memory::InMemoryCharacterRepo;
    use crate::infrastructure::ports::{MockCharacterRepo, RepoError};
    use crate::test_fixtures::{character, ledger_with, missions, OWNER};
    use crate::use_cases::character::CharacterRoster;
    use crate::use_cases::mission::StartMission;

    const TOMB: &str = "tumbas_farao";

    struct Harness {
        ledger: Arc<InMemoryCharacterRepo>,
        store: Arc<ProgressStore>,
        action: PerformAction,
    }

    impl Harness {
        async fn started(class: CharacterClass) -> Self {
            let ledger = ledger_with(vec![character("Lia", class)]).await;
            let store = Arc::new(ProgressStore::new());
            StartMission::new(ledger.clone(), missions(), store.clone())
                .execute(OWNER, "Lia", TOMB)
                .await
                .unwrap();
            let action = PerformAction::new(ledger.clone(), store.clone());
            Self {
                ledger,
                store,
                action,
            }
        }

        async fn act(&self, action: &str, target: &str) -> Result<ActionResult, MissionError> {
            self.action
                .execute(OWNER, "Lia", TOMB, action, Some(target))
                .await
        }

        async fn gold(&self) -> i64 {
            self.ledger.get(OWNER, "Lia").await.unwrap().unwrap().gold
        }
    }

    #[tokio::test]
    async fn tomb_walkthrough_settles_gold_along_the_way() {
        let h = Harness::started(CharacterClass::Assassino).await;

        let moved = h.act("move", "esquerda").await.unwrap();
        assert_eq!(moved.room.id, "sala_guardiao");
        assert_eq!(moved.room.enemy("guardiao_1").unwrap().hp, 30);

        let struck = h.act("fight", "guardiao_1").await.unwrap();
        assert_eq!(
            struck.outcome,
            ActionOutcome::EnemyStruck {
                enemy_name: "Guardião Esquelético".to_string(),
                remaining_hp: 30 - STRIKE_DAMAGE,
                retaliation: 8,
            }
        );
        assert_eq!(struck.status.hp, 7);

        let defeated = h.act("fight", "guardiao_1").await.unwrap();
        assert!(matches!(defeated.outcome, ActionOutcome::EnemyDefeated { gold_drop: 50, .. }));
        assert!(defeated.room.enemies.is_empty());
        assert_eq!(defeated.status.gold, 150);
        assert_eq!(defeated.status.hp, 7);

        let chamber = h.act("move", "frente").await.unwrap();
        assert_eq!(chamber.room.id, "camara_tesouro");

        let loot = h.act("collect", "tesouro_principal").await.unwrap();
        assert_eq!(loot.status.gold, 450);
        assert!(loot.room.treasures.is_empty());

        let done = h.act("move", "saida").await.unwrap();
        assert!(done.counters.completed);
        assert_eq!(done.status.gold, 650);
        assert_eq!(done.rewards().unwrap().exp, 150);
        assert_eq!(done.counters.visited_rooms, 3);
        assert_eq!(done.counters.defeated_enemies, 1);
        assert_eq!(done.counters.collected_treasures, 1);
        assert_eq!(h.gold().await, 650);

        let after = h.act("move", "saida").await;
        assert!(matches!(
            after,
            Err(MissionError::Rule(MissionRuleError::AlreadyCompleted))
        ));
        assert_eq!(h.gold().await, 650);
    }

    #[tokio::test]
    async fn defeated_enemy_cannot_be_fought_again() {
        let h = Harness::started(CharacterClass::Soldado).await;
        h.act("move", "esquerda").await.unwrap();
        h.act("fight", "guardiao_1").await.unwrap();
        h.act("fight", "guardiao_1").await.unwrap();

        let again = h.act("fight", "guardiao_1").await;

        assert!(matches!(
            again,
            Err(MissionError::Rule(MissionRuleError::AlreadyDefeated(_)))
        ));
        assert_eq!(h.gold().await, 150);
    }

    #[tokio::test]
    async fn treasure_is_collected_once() {
        let h = Harness::started(CharacterClass::Arqueiro).await;
        h.act("move", "direita").await.unwrap();
        h.act("collect", "bau_2").await.unwrap();

        let again = h.act("collect", "bau_2").await;

        assert!(matches!(
            again,
            Err(MissionError::Rule(MissionRuleError::AlreadyCollected(_)))
        ));
        assert_eq!(h.gold().await, 160);
    }

    #[tokio::test]
    async fn hp_never_drops_below_zero() {
        let h = Harness::started(CharacterClass::Mago).await;
        h.act("move", "esquerda").await.unwrap();
        h.act("move", "frente").await.unwrap();

        // Faraó Múmia: 50 hp, hits for 12. Mago starts with 11 hp.
        let first = h.act("fight", "farao_mumia").await.unwrap();
        assert_eq!(first.status.hp, 0);
        let second = h.act("fight", "farao_mumia").await.unwrap();
        assert_eq!(second.status.hp, 0);
    }

    #[tokio::test]
    async fn invalid_inputs_map_to_rule_errors() {
        let h = Harness::started(CharacterClass::Assassino).await;

        assert!(matches!(
            h.act("move", "cima").await,
            Err(MissionError::Rule(MissionRuleError::InvalidDirection(_)))
        ));
        assert!(matches!(
            h.act("fight", "guardiao_1").await,
            Err(MissionError::Rule(MissionRuleError::InvalidTarget(_)))
        ));
        assert!(matches!(
            h.act("flee", "").await,
            Err(MissionError::Rule(MissionRuleError::InvalidAction(_)))
        ));
    }

    #[tokio::test]
    async fn action_without_started_mission_is_not_started() {
        let ledger = ledger_with(vec![character("Lia", CharacterClass::Assassino)]).await;
        let store = Arc::new(ProgressStore::new());
        let action = PerformAction::new(ledger, store.clone());

        let result = action
            .execute(OWNER, "Lia", TOMB, "move", Some("esquerda"))
            .await;

        assert!(matches!(result, Err(MissionError::NotStarted)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn deleted_character_is_reported_after_progress_checks() {
        let h = Harness::started(CharacterClass::Assassino).await;
        h.ledger.delete(OWNER, "Lia").await.unwrap();

        let result = h.act("move", "esquerda").await;

        assert!(matches!(result, Err(MissionError::CharacterNotFound(_))));
    }

    #[tokio::test]
    async fn recreated_character_does_not_inherit_the_old_run() {
        let h = Harness::started(CharacterClass::Assassino).await;
        h.act("move", "esquerda").await.unwrap();
        h.act("move", "frente").await.unwrap();

        CharacterRoster::new(h.ledger.clone(), h.store.clone())
            .delete(OWNER, "Lia")
            .await
            .unwrap();
        h.ledger
            .insert(OWNER, character("Lia", CharacterClass::Mago), 3)
            .await
            .unwrap();

        let result = h.act("collect", "tesouro_principal").await;

        assert!(matches!(result, Err(MissionError::NotStarted)));
        assert_eq!(h.gold().await, 100);
        assert!(h
            .store
            .get(&ProgressKey::new(OWNER, "Lia", TOMB))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn failed_ledger_write_leaves_progress_untouched() {
        let store = Arc::new(ProgressStore::new());
        let seed = ledger_with(vec![character("Lia", CharacterClass::Assassino)]).await;
        StartMission::new(seed, missions(), store.clone())
            .execute(OWNER, "Lia", TOMB)
            .await
            .unwrap();

        let mut repo = MockCharacterRepo::new();
        repo.expect_get()
            .returning(|_, _| Ok(Some(character("Lia", CharacterClass::Assassino))));
        repo.expect_update()
            .times(1)
            .returning(|_, _, _| Err(RepoError::database("update", "disk full")));
        let action = PerformAction::new(Arc::new(repo), store.clone());

        action
            .execute(OWNER, "Lia", TOMB, "move", Some("esquerda"))
            .await
            .unwrap();
        let result = action
            .execute(OWNER, "Lia", TOMB, "fight", Some("guardiao_1"))
            .await;

        assert!(matches!(result, Err(MissionError::Repo(_))));
        let run = store
            .get(&ProgressKey::new(OWNER, "Lia", TOMB))
            .await
            .unwrap();
        assert_eq!(run.room().unwrap().enemy("guardiao_1").unwrap().hp, 30);
        assert!(run.defeated_enemies.is_empty());
    }

    #[tokio::test]
    async fn concurrent_fights_on_one_run_serialize() {
        let h = Arc::new(Harness::started(CharacterClass::Soldado).await);
        h.act("move", "esquerda").await.unwrap();

        let a = {
            let h = h.clone();
            tokio::spawn(async move { h.act("fight", "guardiao_1").await })
        };
        let b = {
            let h = h.clone();
            tokio::spawn(async move { h.act("fight", "guardiao_1").await })
        };
        let outcomes = [a.await.unwrap().unwrap(), b.await.unwrap().unwrap()];

        let struck = outcomes
            .iter()
            .filter(|r| matches!(r.outcome, ActionOutcome::EnemyStruck { .. }))
            .count();
        let defeated = outcomes
            .iter()
            .filter(|r| matches!(r.outcome, ActionOutcome::EnemyDefeated { .. }))
            .count();
        assert_eq!((struck, defeated), (1, 1));

        let stored = h.ledger.get(OWNER, "Lia").await.unwrap().unwrap();
        assert_eq!(stored.gold, 150);
        assert_eq!(stored.status.hp_atual, 18 - 8);
        let run = h
            .store
            .get(&ProgressKey::new(OWNER, "Lia", TOMB))
            .await
            .unwrap();
        assert_eq!(run.defeated_enemies, vec!["guardiao_1"]);
    }
}
