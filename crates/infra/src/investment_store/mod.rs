//! Append-only, owner-scoped storage for investment records.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;

use accrue_core::UserId;
use accrue_investments::Investment;

use crate::error::StoreError;

pub use in_memory::InMemoryInvestmentStore;
pub use postgres::PostgresInvestmentStore;

/// Storage port for investment records.
///
/// There is deliberately no update or delete: records are immutable once
/// appended.
#[async_trait]
pub trait InvestmentStore: Send + Sync {
    /// Durably append one record and return it as stored.
    async fn append(&self, investment: Investment) -> Result<Investment, StoreError>;

    /// All records owned by `owner`, in the order they were appended.
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Investment>, StoreError>;
}

#[async_trait]
impl<S> InvestmentStore for Arc<S>
where
    S: InvestmentStore + ?Sized,
{
    async fn append(&self, investment: Investment) -> Result<Investment, StoreError> {
        (**self).append(investment).await
    }

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Investment>, StoreError> {
        (**self).list_for_owner(owner).await
    }
}
