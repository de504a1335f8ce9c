//! Storage for registered users.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;

use accrue_auth::{Email, User};
use accrue_core::UserId;

use crate::error::StoreError;

pub use in_memory::InMemoryUserStore;
pub use postgres::PostgresUserStore;

/// Storage port for users. Email uniqueness is enforced here.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user; `StoreError::Duplicate` if the email is taken.
    async fn insert(&self, user: User) -> Result<User, StoreError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StoreError>;

    async fn get(&self, id: UserId) -> Result<Option<User>, StoreError>;
}

#[async_trait]
impl<S> UserStore for Arc<S>
where
    S: UserStore + ?Sized,
{
    async fn insert(&self, user: User) -> Result<User, StoreError> {
        (**self).insert(user).await
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StoreError> {
        (**self).find_by_email(email).await
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, StoreError> {
        (**self).get(id).await
    }
}
