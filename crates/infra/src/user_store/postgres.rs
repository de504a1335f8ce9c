//! Postgres-backed user store. The `users.email` unique index backs
//! `StoreError::Duplicate`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use accrue_auth::{Email, User};
use accrue_core::UserId;

use super::UserStore;
use crate::error::{StoreError, map_sqlx_error};

#[derive(Debug, Clone)]
pub struct PostgresUserStore {
    pool: Arc<PgPool>,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

fn user_from_row(row: &PgRow) -> Result<User, StoreError> {
    let decode = |e: sqlx::Error| map_sqlx_error("decode_user", e);

    let email: String = row.try_get("email").map_err(decode)?;
    let email = Email::parse(&email).map_err(|e| StoreError::Corrupt(e.to_string()))?;

    Ok(User::new(
        UserId::from_uuid(row.try_get::<Uuid, _>("id").map_err(decode)?),
        email,
        row.try_get("password_hash").map_err(decode)?,
        row.try_get::<DateTime<Utc>, _>("created_at").map_err(decode)?,
    ))
}

#[async_trait]
impl UserStore for PostgresUserStore {
    #[instrument(skip(self, user), fields(user_id = %user.id), err)]
    async fn insert(&self, user: User) -> Result<User, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::from(user.id))
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_user", e))?;

        Ok(user)
    }

    #[instrument(skip(self, email), err)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_user_by_email", e))?;

        row.as_ref().map(user_from_row).transpose()
    }

    #[instrument(skip(self), fields(user_id = %id), err)]
    async fn get(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(id))
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_user", e))?;

        row.as_ref().map(user_from_row).transpose()
    }
}
