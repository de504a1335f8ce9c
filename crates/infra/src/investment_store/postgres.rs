//! Postgres-backed investment store.
//!
//! Creation order is the `seq BIGSERIAL` column; `list_for_owner` sorts on it.
//! Every query is scoped by `owner_id`, so one owner can never read another
//! owner's records through this adapter.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use accrue_core::{InvestmentId, UserId};
use accrue_interest::InterestKind;
use accrue_investments::{Investment, InvestmentParts};

use super::InvestmentStore;
use crate::error::{StoreError, map_sqlx_error};

#[derive(Debug, Clone)]
pub struct PostgresInvestmentStore {
    pool: Arc<PgPool>,
}

impl PostgresInvestmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

fn investment_from_row(row: &PgRow) -> Result<Investment, StoreError> {
    let decode = |e: sqlx::Error| map_sqlx_error("decode_investment", e);

    let interest_type: String = row.try_get("interest_type").map_err(decode)?;
    let interest_type: InterestKind = interest_type
        .parse()
        .map_err(|e: accrue_interest::UnknownInterestKind| StoreError::Corrupt(e.to_string()))?;

    let parts = InvestmentParts {
        id: InvestmentId::from_uuid(row.try_get::<Uuid, _>("id").map_err(decode)?),
        owner_id: UserId::from_uuid(row.try_get::<Uuid, _>("owner_id").map_err(decode)?),
        amount: row.try_get("amount").map_err(decode)?,
        interest_rate: row.try_get("interest_rate").map_err(decode)?,
        time_period: row.try_get("time_period").map_err(decode)?,
        interest_type,
        interest: row.try_get("interest").map_err(decode)?,
        total_amount: row.try_get("total_amount").map_err(decode)?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(decode)?,
    };

    Investment::from_parts(parts).map_err(|e| StoreError::Corrupt(e.to_string()))
}

#[async_trait]
impl InvestmentStore for PostgresInvestmentStore {
    #[instrument(
        skip(self, investment),
        fields(
            investment_id = %investment.id_typed(),
            owner_id = %investment.owner_id()
        ),
        err
    )]
    async fn append(&self, investment: Investment) -> Result<Investment, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO investments (
                id,
                owner_id,
                amount,
                interest_rate,
                time_period,
                interest_type,
                interest,
                total_amount,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(Uuid::from(investment.id_typed()))
        .bind(Uuid::from(investment.owner_id()))
        .bind(investment.amount())
        .bind(investment.interest_rate())
        .bind(investment.time_period())
        .bind(investment.interest_type().as_str())
        .bind(investment.interest())
        .bind(investment.total_amount())
        .bind(investment.created_at())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("append_investment", e))?;

        Ok(investment)
    }

    #[instrument(skip(self), fields(owner_id = %owner), err)]
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Investment>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT
                id,
                owner_id,
                amount,
                interest_rate,
                time_period,
                interest_type,
                interest,
                total_amount,
                created_at
            FROM investments
            WHERE owner_id = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(Uuid::from(owner))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_investments", e))?;

        rows.iter().map(investment_from_row).collect()
    }
}
