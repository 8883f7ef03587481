//! Register account use case.

use std::sync::Arc;

use midian_domain::Account;

use crate::infrastructure::ports::{AccountRepo, ClockPort, PasswordHasherPort};

use super::AuthError;

pub struct Register {
    accounts: Arc<dyn AccountRepo>,
    hasher: Arc<dyn PasswordHasherPort>,
    clock: Arc<dyn ClockPort>,
}

impl Register {
    pub fn new(
        accounts: Arc<dyn AccountRepo>,
        hasher: Arc<dyn PasswordHasherPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            accounts,
            hasher,
            clock,
        }
    }

    pub async fn execute(&self, username: &str, password: &str) -> Result<Account, AuthError> {
        Account::validate_username(username)?;
        Account::validate_password(password)?;

        if self.accounts.get(username).await?.is_some() {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        let hash = self.hasher.hash(password)?;
        let account = Account::new(username, hash, self.clock.now());

        // A concurrent registration can still win between the lookup and here.
        self.accounts
            .insert(account.clone())
            .await
            .map_err(|e| {
                if e.is_constraint() {
                    AuthError::UsernameTaken(username.to_string())
                } else {
                    AuthError::Repo(e)
                }
            })?;

        tracing::info!(username = %username, "Account registered");
        Ok(account)
    }
}
