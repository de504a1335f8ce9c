//! Postgres connection pool and schema bootstrap.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::instrument;

use crate::error::{StoreError, map_sqlx_error};

/// Tables are created on startup when missing; there is no migration history.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id            UUID PRIMARY KEY,
        email         TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at    TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS investments (
        seq           BIGSERIAL PRIMARY KEY,
        id            UUID NOT NULL UNIQUE,
        owner_id      UUID NOT NULL REFERENCES users (id),
        amount        DOUBLE PRECISION NOT NULL,
        interest_rate DOUBLE PRECISION NOT NULL,
        time_period   DOUBLE PRECISION NOT NULL,
        interest_type TEXT NOT NULL CHECK (interest_type IN ('simple', 'compound')),
        interest      DOUBLE PRECISION NOT NULL,
        total_amount  DOUBLE PRECISION NOT NULL,
        created_at    TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS investments_owner_seq_idx
        ON investments (owner_id, seq)
    "#,
];

/// Open a pool against `database_url`.
#[instrument(skip(database_url), err)]
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, StoreError> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .map_err(|e| map_sqlx_error("connect", e))
}

/// Create the `users` and `investments` tables if they do not exist.
#[instrument(skip(pool), err)]
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
    }
    tracing::info!("database schema ready");
    Ok(())
}
