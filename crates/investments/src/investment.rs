use chrono::{DateTime, Utc};
use serde::Serialize;

use accrue_core::{DomainError, DomainResult, Entity, InvestmentId, UserId};
use accrue_interest::InterestKind;

use crate::{InvestmentError, InvestmentTerms};

/// A persisted investment and the interest derived from its terms.
///
/// # Invariants
/// - `owner_id` is fixed at creation.
/// - `interest == compute(interest_type, amount, interest_rate, time_period).interest`.
/// - `total_amount == amount + interest`.
///
/// There are no setters. A changed investment is a new record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Investment {
    id: InvestmentId,
    owner_id: UserId,
    amount: f64,
    interest_rate: f64,
    time_period: f64,
    interest_type: InterestKind,
    interest: f64,
    total_amount: f64,
    created_at: DateTime<Utc>,
}

/// Column-level view of a stored investment, used to rehydrate from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentParts {
    pub id: InvestmentId,
    pub owner_id: UserId,
    pub amount: f64,
    pub interest_rate: f64,
    pub time_period: f64,
    pub interest_type: InterestKind,
    pub interest: f64,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
}

impl Investment {
    /// Compute interest for `terms` and build the record owned by `owner_id`.
    ///
    /// Fails only when the computation overflows to a non-finite value.
    pub fn create(
        id: InvestmentId,
        owner_id: UserId,
        terms: InvestmentTerms,
        created_at: DateTime<Utc>,
    ) -> Result<Self, InvestmentError> {
        let computed = terms.checked_compute()?;

        Ok(Self {
            id,
            owner_id,
            amount: terms.amount(),
            interest_rate: terms.interest_rate(),
            time_period: terms.time_period(),
            interest_type: terms.kind(),
            interest: computed.interest,
            total_amount: computed.total,
            created_at,
        })
    }

    /// Rebuild a record read back from storage, re-checking the derived fields.
    pub fn from_parts(parts: InvestmentParts) -> DomainResult<Self> {
        let expected = accrue_interest::compute(
            parts.interest_type,
            parts.amount,
            parts.interest_rate,
            parts.time_period,
        );

        if parts.interest != expected.interest {
            return Err(DomainError::invariant(format!(
                "investment {}: stored interest {} differs from computed {}",
                parts.id, parts.interest, expected.interest
            )));
        }
        if parts.total_amount != parts.amount + parts.interest {
            return Err(DomainError::invariant(format!(
                "investment {}: total_amount {} != amount + interest",
                parts.id, parts.total_amount
            )));
        }

        Ok(Self {
            id: parts.id,
            owner_id: parts.owner_id,
            amount: parts.amount,
            interest_rate: parts.interest_rate,
            time_period: parts.time_period,
            interest_type: parts.interest_type,
            interest: parts.interest,
            total_amount: parts.total_amount,
            created_at: parts.created_at,
        })
    }

    pub fn into_parts(self) -> InvestmentParts {
        InvestmentParts {
            id: self.id,
            owner_id: self.owner_id,
            amount: self.amount,
            interest_rate: self.interest_rate,
            time_period: self.time_period,
            interest_type: self.interest_type,
            interest: self.interest,
            total_amount: self.total_amount,
            created_at: self.created_at,
        }
    }

    pub fn id_typed(&self) -> InvestmentId {
        self.id
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    pub fn time_period(&self) -> f64 {
        self.time_period
    }

    pub fn interest_type(&self) -> InterestKind {
        self.interest_type
    }

    pub fn interest(&self) -> f64 {
        self.interest
    }

    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Investment {
    type Id = InvestmentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
