//! Login and logout use cases.

use std::sync::Arc;

use crate::infrastructure::ports::{AccountRepo, PasswordHasherPort};
use crate::stores::TokenStore;

use super::AuthError;

pub struct Login {
    accounts: Arc<dyn AccountRepo>,
    hasher: Arc<dyn PasswordHasherPort>,
    tokens: Arc<TokenStore>,
}

impl Login {
    pub fn new(
        accounts: Arc<dyn AccountRepo>,
        hasher: Arc<dyn PasswordHasherPort>,
        tokens: Arc<TokenStore>,
    ) -> Self {
        Self {
            accounts,
            hasher,
            tokens,
        }
    }

    /// Check the credentials and issue a fresh token.
    pub async fn execute(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let Some(account) = self.accounts.get(username).await? else {
            tracing::debug!(username = %username, "Login for unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &account.password_hash)? {
            tracing::debug!(username = %username, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&account.username).await;
        tracing::info!(username = %username, "User logged in");
        Ok(token)
    }
}

pub struct Logout {
    tokens: Arc<TokenStore>,
}

impl Logout {
    pub fn new(tokens: Arc<TokenStore>) -> Self {
        Self { tokens }
    }

    /// Returns false if the token was already gone.
    pub async fn execute(&self, token: &str) -> bool {
        self.tokens.revoke(token).await
    }
}
