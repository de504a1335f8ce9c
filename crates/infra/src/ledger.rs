//! Investment ledger: validates submissions, computes interest and persists
//! the resulting records through an [`InvestmentStore`].

use chrono::{SubsecRound, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument};

use accrue_core::{InvestmentId, UserId};
use accrue_interest::{Computation, InterestKind};
use accrue_investments::{Investment, InvestmentError, InvestmentSubmission, InvestmentTerms};

use crate::error::StoreError;
use crate::investment_store::InvestmentStore;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Invalid(#[from] InvestmentError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Interest computed for a submission without recording anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    #[serde(flatten)]
    pub terms: InvestmentTerms,
    pub interest: f64,
    pub total_amount: f64,
}

#[derive(Debug, Clone)]
pub struct InvestmentLedger<S> {
    store: S,
}

impl<S> InvestmentLedger<S>
where
    S: InvestmentStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Pure interest computation, no validation and no persistence.
    pub fn compute(
        &self,
        kind: InterestKind,
        amount: f64,
        interest_rate: f64,
        time_period: f64,
    ) -> Computation {
        accrue_interest::compute(kind, amount, interest_rate, time_period)
    }

    pub fn quote(&self, submission: &InvestmentSubmission) -> Result<Quote, LedgerError> {
        let terms = submission.parse()?;
        let computed = terms.checked_compute()?;
        Ok(Quote {
            terms,
            interest: computed.interest,
            total_amount: computed.total,
        })
    }

    /// Validate, compute and persist one investment for `owner`.
    ///
    /// Nothing is stored when validation fails.
    #[instrument(skip(self, submission), fields(owner_id = %owner), err)]
    pub async fn record(
        &self,
        owner: UserId,
        submission: &InvestmentSubmission,
    ) -> Result<Investment, LedgerError> {
        let terms = submission.parse()?;
        // Postgres TIMESTAMPTZ keeps microseconds; match it so reads equal writes.
        let created_at = Utc::now().trunc_subsecs(6);
        let investment = Investment::create(InvestmentId::new(), owner, terms, created_at)?;
        let stored = self.store.append(investment).await?;

        info!(
            investment_id = %stored.id_typed(),
            interest_type = %stored.interest_type(),
            interest = stored.interest(),
            "investment recorded"
        );
        Ok(stored)
    }

    /// All investments owned by `owner`, in creation order.
    pub async fn list(&self, owner: UserId) -> Result<Vec<Investment>, LedgerError> {
        Ok(self.store.list_for_owner(owner).await?)
    }
}
