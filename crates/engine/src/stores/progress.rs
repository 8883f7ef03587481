//! Mission progress storage.
//!
//! One slot per `(username, character, mission)` key. Each slot is an async
//! mutex, so everything done to one run happens in order while different
//! runs proceed in parallel.

use std::sync::Arc;

use dashmap::DashMap;
use midian_domain::{MissionProgress, ProgressKey};
use tokio::sync::{Mutex, OwnedMutexGuard};

type Slot = Arc<Mutex<Option<MissionProgress>>>;

/// Exclusive access to one progress slot. `None` means no run exists.
pub type ProgressGuard = OwnedMutexGuard<Option<MissionProgress>>;

#[derive(Default)]
pub struct ProgressStore {
    slots: DashMap<ProgressKey, Slot>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: &ProgressKey) -> Slot {
        self.slots.entry(key.clone()).or_default().clone()
    }

    /// Store a fresh run, replacing whatever was there.
    pub async fn create(&self, key: &ProgressKey, progress: MissionProgress) {
        *self.lock(key).await = Some(progress);
    }

    /// Snapshot of the current run.
    pub async fn get(&self, key: &ProgressKey) -> Option<MissionProgress> {
        let slot = self.slots.get(key).map(|s| s.value().clone())?;
        let guard = slot.lock().await;
        guard.clone()
    }

    /// Wait for exclusive access to the slot. Hold the guard across the
    /// whole read-modify-write.
    pub async fn lock(&self, key: &ProgressKey) -> ProgressGuard {
        self.slot(key).lock_owned().await
    }

    /// Like [`ProgressStore::lock`] but never creates a slot for an unknown key.
    pub async fn lock_existing(&self, key: &ProgressKey) -> Option<ProgressGuard> {
        let slot = self.slots.get(key).map(|s| s.value().clone())?;
        Some(slot.lock_owned().await)
    }

    pub async fn remove(&self, key: &ProgressKey) -> Option<MissionProgress> {
        let (_, slot) = self.slots.remove(key)?;
        let mut guard = slot.lock().await;
        guard.take()
    }

    /// Drop every run of one character, whatever the mission. Returns how
    /// many runs were dropped.
    ///
    /// A caller already holding one of those slots finishes against the
    /// detached slot; later lookups no longer see it.
    pub fn remove_character(&self, username: &str, character_name: &str) -> usize {
        let mut dropped = 0;
        self.slots.retain(|key, _| {
            let owned = key.username == username && key.character_name == character_name;
            if owned {
                dropped += 1;
            }
            !owned
        });
        dropped
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
