use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use accrue_auth::{Email, User};
use accrue_core::UserId;

use super::UserStore;
use crate::error::StoreError;

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<UserId, User>,
    by_email: HashMap<Email, UserId>,
}

/// In-memory user store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: User) -> Result<User, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        if inner.by_email.contains_key(&user.email) {
            return Err(StoreError::Duplicate(format!("email {} already registered", user.email)));
        }
        if inner.users.contains_key(&user.id) {
            return Err(StoreError::Duplicate(format!("user {} already exists", user.id)));
        }

        inner.by_email.insert(user.email.clone(), user.id);
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        Ok(inner
            .by_email
            .get(email)
            .and_then(|id| inner.users.get(id))
            .cloned())
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        Ok(inner.users.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(email: &str) -> User {
        User::new(
            UserId::new(),
            Email::parse(email).unwrap(),
            "$argon2id$v=19$stub".to_string(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn insert_then_lookup_by_email_and_id() {
        let store = InMemoryUserStore::new();
        let alice = store.insert(user("alice@example.com")).await.unwrap();

        let by_email = store
            .find_by_email(&Email::parse("ALICE@example.com").unwrap())
            .await
            .unwrap();
        assert_eq!(by_email, Some(alice.clone()));
        assert_eq!(store.get(alice.id).await.unwrap(), Some(alice));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = InMemoryUserStore::new();
        store.insert(user("alice@example.com")).await.unwrap();

        let err = store.insert(user("alice@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn missing_user_is_none() {
        let store = InMemoryUserStore::new();
        assert_eq!(store.get(UserId::new()).await.unwrap(), None);
        assert_eq!(
            store
                .find_by_email(&Email::parse("nobody@example.com").unwrap())
                .await
                .unwrap(),
            None
        );
    }
}
