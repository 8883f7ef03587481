//! Start mission use case.
//!
//! Puts a character at the entrance of a fresh copy of a mission. Starting a
//! mission that is already running throws the old run away.

use std::sync::Arc;

use midian_domain::{MissionProgress, ProgressKey, Room, StatusSnapshot};

use crate::infrastructure::catalog::MissionCatalog;
use crate::infrastructure::ports::CharacterRepo;
use crate::stores::ProgressStore;

use super::MissionError;

/// A freshly started run.
#[derive(Debug, Clone)]
pub struct StartedMission {
    pub progress: MissionProgress,
    pub room: Room,
    pub status: StatusSnapshot,
}

pub struct StartMission {
    characters: Arc<dyn CharacterRepo>,
    catalog: Arc<MissionCatalog>,
    progress: Arc<ProgressStore>,
}

impl StartMission {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        catalog: Arc<MissionCatalog>,
        progress: Arc<ProgressStore>,
    ) -> Self {
        Self {
            characters,
            catalog,
            progress,
        }
    }

    pub async fn execute(
        &self,
        username: &str,
        character_name: &str,
        mission_id: &str,
    ) -> Result<StartedMission, MissionError> {
        // 1. Resolve character
        let character = self
            .characters
            .get(username, character_name)
            .await?
            .ok_or_else(|| MissionError::CharacterNotFound(character_name.to_string()))?;

        // 2. Resolve mission (an owned copy)
        let template = self
            .catalog
            .get(mission_id)
            .ok_or_else(|| MissionError::MissionNotFound(mission_id.to_string()))?;

        // 3. Level gate
        if character.level < i64::from(template.min_level) {
            return Err(MissionError::LevelTooLow {
                required: template.min_level,
                actual: character.level,
            });
        }

        // 4. Build and store the run
        let progress = MissionProgress::start(character_name, template)?;
        let room = progress.room()?.clone();
        let key = ProgressKey::new(username, character_name, mission_id);
        self.progress.create(&key, progress.clone()).await;

        tracing::info!(
            username = %username,
            character = %character_name,
            mission_id = %mission_id,
            "Mission started"
        );

        Ok(StartedMission {
            progress,
            room,
            status: character.snapshot(),
        })
    }
}

#[cfg(test)]
mod tests {
    use midian_domain::{CharacterClass, MissionAction};

    use super::*;
    use crate::infrastructure::ports::{MockCharacterRepo, RepoError};
    use crate::test_fixtures::{character, ledger_with, missions, OWNER};

    async fn use_case() -> (StartMission, Arc<ProgressStore>) {
        let ledger = ledger_with(vec![character("Lia", CharacterClass::Assassino)]).await;
        let progress = Arc::new(ProgressStore::new());
        (
            StartMission::new(ledger, missions(), progress.clone()),
            progress,
        )
    }

    #[tokio::test]
    async fn start_places_character_at_entrance() {
        let (start, store) = use_case().await;

        let started = start.execute(OWNER, "Lia", "tumbas_farao").await.unwrap();

        assert_eq!(started.room.id, "entrada");
        assert!(started.room.visited);
        assert_eq!(started.status.hp, 15);
        assert_eq!(started.status.gold, 100);

        let stored = store
            .get(&ProgressKey::new(OWNER, "Lia", "tumbas_farao"))
            .await
            .unwrap();
        assert_eq!(stored.visited_rooms, vec!["entrada"]);
        assert!(!stored.completed);
    }

    #[tokio::test]
    async fn restarting_resets_progress() {
        let (start, store) = use_case().await;
        let key = ProgressKey::new(OWNER, "Lia", "tumbas_farao");
        start.execute(OWNER, "Lia", "tumbas_farao").await.unwrap();
        {
            let mut guard = store.lock(&key).await;
            let run = guard.as_mut().unwrap();
            run.apply(&MissionAction::Move {
                direction: "esquerda".to_string(),
            })
            .unwrap();
        }

        start.execute(OWNER, "Lia", "tumbas_farao").await.unwrap();

        let stored = store.get(&key).await.unwrap();
        assert_eq!(stored.current_room, "entrada");
        assert_eq!(stored.visited_rooms.len(), 1);
    }

    #[tokio::test]
    async fn unknown_character_is_rejected() {
        let (start, _) = use_case().await;
        let result = start.execute(OWNER, "Ghost", "tumbas_farao").await;
        assert!(matches!(result, Err(MissionError::CharacterNotFound(name)) if name == "Ghost"));
    }

    #[tokio::test]
    async fn unknown_mission_is_rejected() {
        let (start, store) = use_case().await;
        let result = start.execute(OWNER, "Lia", "nowhere").await;
        assert!(matches!(result, Err(MissionError::MissionNotFound(_))));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn level_gate_blocks_without_creating_progress() {
        let raw = include_str!("../../../data/missions.json").replace(
            "\"min_level\": 1",
            "\"min_level\": 3",
        );
        let catalog = Arc::new(MissionCatalog::from_json(&raw).unwrap());
        let ledger = ledger_with(vec![character("Lia", CharacterClass::Mago)]).await;
        let store = Arc::new(ProgressStore::new());
        let start = StartMission::new(ledger, catalog, store.clone());

        let result = start.execute(OWNER, "Lia", "tumbas_farao").await;

        assert!(matches!(
            result,
            Err(MissionError::LevelTooLow { required: 3, actual: 1 })
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn ledger_failure_propagates() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get()
            .returning(|_, _| Err(RepoError::database("get", "connection reset")));
        let start = StartMission::new(
            Arc::new(repo),
            missions(),
            Arc::new(ProgressStore::new()),
        );

        let result = start.execute(OWNER, "Lia", "tumbas_farao").await;

        assert!(matches!(result, Err(MissionError::Repo(RepoError::Database { .. }))));
    }
}
