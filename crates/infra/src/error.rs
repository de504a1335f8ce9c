use thiserror::Error;

/// Storage operation error.
///
/// These are **infrastructure errors** as opposed to domain errors
/// (validation, invariants). They are surfaced to callers, never swallowed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique key (e.g. a user's email) is already present.
    #[error("duplicate key: {0}")]
    Duplicate(String),

    /// A stored row could not be turned back into a valid domain value.
    #[error("corrupt record: {0}")]
    Corrupt(String),

    /// Connection, query or lock failure.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Map SQLx errors to `StoreError`.
///
/// | SQLx error | `StoreError` |
/// |---|---|
/// | Database, SQLSTATE `23505` (unique violation) | `Duplicate` |
/// | `ColumnDecode` / `ColumnNotFound` | `Corrupt` |
/// | anything else (pool closed, IO, other database errors) | `Backend` |
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Duplicate(format!("{operation}: {}", db.message()))
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_) => {
            StoreError::Corrupt(format!("{operation}: {err}"))
        }
        _ => {
            tracing::warn!(operation, error = %err, "database operation failed");
            StoreError::Backend(format!("{operation}: {err}"))
        }
    }
}
