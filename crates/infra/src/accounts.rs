//! Registration and credential checks.

use chrono::{SubsecRound, Utc};
use thiserror::Error;
use tracing::{info, instrument};

use accrue_auth::{CredentialError, Email, Password, PasswordHasher, User};
use accrue_core::{DomainError, UserId};

use crate::error::StoreError;
use crate::user_store::UserStore;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error("email is already registered")]
    EmailTaken,

    /// Unknown email and wrong password are deliberately indistinguishable.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(_) => Self::EmailTaken,
            other => Self::Store(other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AccountService<S> {
    store: S,
    hasher: PasswordHasher,
}

impl<S> AccountService<S>
where
    S: UserStore,
{
    pub fn new(store: S, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    #[instrument(skip(self, email, password), err)]
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AccountError> {
        let email = Email::parse(email)?;
        let password = Password::parse(password)?;

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(AccountError::EmailTaken);
        }

        let hasher = self.hasher.clone();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| CredentialError::Hashing(e.to_string()))??;

        // The store still rejects a concurrent registration of the same email.
        let user = self
            .store
            .insert(User::new(UserId::new(), email, password_hash, Utc::now().trunc_subsecs(6)))
            .await?;

        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    #[instrument(skip(self, email, password), err)]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AccountError> {
        let email = Email::parse(email).map_err(|_| AccountError::InvalidCredentials)?;
        let Some(user) = self.store.find_by_email(&email).await? else {
            return Err(AccountError::InvalidCredentials);
        };

        let hasher = self.hasher.clone();
        let candidate = password.to_string();
        let stored = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&candidate, &stored))
            .await
            .map_err(|e| CredentialError::Hashing(e.to_string()))??;

        if !matches {
            return Err(AccountError::InvalidCredentials);
        }
        Ok(user)
    }

    pub async fn get(&self, id: UserId) -> Result<Option<User>, AccountError> {
        Ok(self.store.get(id).await?)
    }
}
