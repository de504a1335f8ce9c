use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use accrue_core::UserId;
use accrue_investments::Investment;

use super::InvestmentStore;
use crate::error::StoreError;

/// In-memory investment store.
///
/// Intended for tests/dev. Each owner's records live in a `Vec`, so append
/// order is creation order.
#[derive(Debug, Default)]
pub struct InMemoryInvestmentStore {
    by_owner: RwLock<HashMap<UserId, Vec<Investment>>>,
}

impl InMemoryInvestmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvestmentStore for InMemoryInvestmentStore {
    async fn append(&self, investment: Investment) -> Result<Investment, StoreError> {
        let mut map = self
            .by_owner
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let records = map.entry(investment.owner_id()).or_default();
        if records.iter().any(|r| r.id_typed() == investment.id_typed()) {
            return Err(StoreError::Duplicate(format!(
                "investment {} already stored",
                investment.id_typed()
            )));
        }
        records.push(investment.clone());

        Ok(investment)
    }

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Investment>, StoreError> {
        let map = self
            .by_owner
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        Ok(map.get(&owner).cloned().unwrap_or_default())
    }
}
