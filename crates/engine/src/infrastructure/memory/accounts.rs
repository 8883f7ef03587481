//! In-memory account store.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use midian_domain::Account;

use crate::infrastructure::ports::{AccountRepo, RepoError};

#[derive(Default)]
pub struct InMemoryAccountRepo {
    accounts: DashMap<String, Account>,
}

impl InMemoryAccountRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepo for InMemoryAccountRepo {
    async fn get(&self, username: &str) -> Result<Option<Account>, RepoError> {
        Ok(self.accounts.get(username).map(|a| a.clone()))
    }

    async fn insert(&self, account: Account) -> Result<(), RepoError> {
        match self.accounts.entry(account.username.clone()) {
            Entry::Occupied(_) => Err(RepoError::constraint(format!(
                "username '{}' is taken",
                account.username
            ))),
            Entry::Vacant(slot) => {
                slot.insert(account);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[tokio::test]
    async fn second_insert_with_same_username_fails() {
        let repo = InMemoryAccountRepo::new();
        repo.insert(Account::new("alice", "hash-1", Utc::now()))
            .await
            .unwrap();

        let dup = repo.insert(Account::new("alice", "hash-2", Utc::now())).await;

        assert!(matches!(dup, Err(RepoError::ConstraintViolation(_))));
        let stored = repo.get("alice").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "hash-1");
    }
}
