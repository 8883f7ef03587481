//! Expiring key/value map for short-lived state such as session tokens.
//!
//! Expired entries are invisible to readers immediately but stay in memory
//! until `cleanup_expired()` runs.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, Expiring<V>>>,
    ttl: Duration,
}

struct Expiring<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Expiring<V> {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Insert a value that expires after the cache's TTL, replacing any
    /// existing entry.
    pub async fn insert(&self, key: K, value: V) {
        self.insert_expiring(key, value, Instant::now() + self.ttl)
            .await;
    }

    /// Insert a value with an explicit expiry instant.
    pub async fn insert_expiring(&self, key: K, value: V, expires_at: Instant) {
        self.entries
            .write()
            .await
            .insert(key, Expiring { value, expires_at });
    }

    /// Get a value if it exists and hasn't expired.
    pub async fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone())
    }

    /// Remove a value regardless of expiry. Returns whether it was live.
    pub async fn remove(&self, key: &K) -> bool {
        let now = Instant::now();
        self.entries
            .write()
            .await
            .remove(key)
            .is_some_and(|entry| entry.is_live(now))
    }

    /// Drop every expired entry and return how many were dropped.
    pub async fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let mut guard = self.entries.write().await;
        let before = guard.len();
        guard.retain(|_, entry| entry.is_live(now));
        before - guard.len()
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_lived() -> TtlCache<String, String> {
        TtlCache::new(Duration::from_secs(7200))
    }

    fn past() -> Instant {
        Instant::now()
            .checked_sub(Duration::from_millis(5))
            .unwrap_or_else(Instant::now)
    }

    #[tokio::test]
    async fn live_entry_is_returned() {
        let cache = long_lived();
        cache.insert("token".to_string(), "alice".to_string()).await;
        assert_eq!(
            cache.get(&"token".to_string()).await,
            Some("alice".to_string())
        );
    }

    #[tokio::test]
    async fn expired_entry_is_hidden() {
        let cache = long_lived();
        cache
            .insert_expiring("token".to_string(), "alice".to_string(), past())
            .await;
        assert_eq!(cache.get(&"token".to_string()).await, None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn remove_reports_whether_entry_was_live() {
        let cache = long_lived();
        cache.insert("a".to_string(), "alice".to_string()).await;
        cache
            .insert_expiring("b".to_string(), "bob".to_string(), past())
            .await;

        assert!(cache.remove(&"a".to_string()).await);
        assert!(!cache.remove(&"b".to_string()).await);
        assert!(!cache.remove(&"c".to_string()).await);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn cleanup_drops_only_expired_entries() {
        let cache = long_lived();
        cache
            .insert_expiring("old1".to_string(), "a".to_string(), past())
            .await;
        cache
            .insert_expiring("old2".to_string(), "b".to_string(), past())
            .await;
        cache.insert("fresh".to_string(), "c".to_string()).await;

        assert_eq!(cache.cleanup_expired().await, 2);
        assert_eq!(cache.len().await, 1);
        assert!(cache.get(&"fresh".to_string()).await.is_some());
    }
}
