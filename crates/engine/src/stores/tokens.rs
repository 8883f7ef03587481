//! Bearer tokens issued at login.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::infrastructure::cache::TtlCache;
use crate::infrastructure::ports::RandomPort;

/// Token source backed by the OS random generator (UUID v4).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRandom;

impl RandomPort for SystemRandom {
    fn gen_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Opaque token to username, each entry valid for a fixed TTL.
pub struct TokenStore {
    tokens: TtlCache<String, String>,
    random: Arc<dyn RandomPort>,
}

impl TokenStore {
    pub fn new(ttl: Duration, random: Arc<dyn RandomPort>) -> Self {
        Self {
            tokens: TtlCache::new(ttl),
            random,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.tokens.ttl()
    }

    /// Mint a new token for `username`. Earlier tokens stay valid.
    pub async fn issue(&self, username: &str) -> String {
        let token = self.random.gen_uuid().to_string();
        self.tokens.insert(token.clone(), username.to_string()).await;
        token
    }

    /// The username a live token belongs to.
    pub async fn resolve(&self, token: &str) -> Option<String> {
        self.tokens.get(&token.to_string()).await
    }

    pub async fn revoke(&self, token: &str) -> bool {
        self.tokens.remove(&token.to_string()).await
    }

    pub async fn purge_expired(&self) -> usize {
        self.tokens.cleanup_expired().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockRandomPort;

    #[tokio::test]
    async fn issued_token_resolves_to_its_user() {
        let store = TokenStore::new(Duration::from_secs(60), Arc::new(SystemRandom));

        let token = store.issue("alice").await;

        assert!(Uuid::parse_str(&token).is_ok());
        assert_eq!(store.resolve(&token).await, Some("alice".to_string()));
        assert_eq!(store.resolve("not-a-token").await, None);
    }

    #[tokio::test]
    async fn token_comes_from_random_port() {
        let fixed = Uuid::from_u128(7);
        let mut random = MockRandomPort::new();
        random.expect_gen_uuid().times(1).returning(move || fixed);
        let store = TokenStore::new(Duration::from_secs(60), Arc::new(random));

        assert_eq!(store.issue("alice").await, fixed.to_string());
    }

    #[tokio::test]
    async fn expired_token_no_longer_resolves() {
        let store = TokenStore::new(Duration::from_millis(10), Arc::new(SystemRandom));
        let token = store.issue("alice").await;

        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(store.resolve(&token).await, None);
        assert_eq!(store.purge_expired().await, 1);
    }

    #[tokio::test]
    async fn revoked_token_no_longer_resolves() {
        let store = TokenStore::new(Duration::from_secs(60), Arc::new(SystemRandom));
        let token = store.issue("alice").await;

        assert!(store.revoke(&token).await);
        assert_eq!(store.resolve(&token).await, None);
    }
}
