//! # Database Error Types
//!
//! Typed failures for the snapshot storage layer.
//!
//! Nothing here reaches the user: the slot adapter converts `DbError`
//! into the store layer's `StoreError` at the crate boundary, and the
//! store layer logs and swallows it. The variants exist so the log lines
//! say *what kind* of failure happened, not just that sqlx was unhappy.

use thiserror::Error;

/// Snapshot storage failures.
#[derive(Debug, Error)]
pub enum DbError {
    /// The database could not be opened or the pool is gone.
    /// Usually a path, permission, or disk problem on first launch.
    #[error("Snapshot database unavailable: {0}")]
    ConnectionFailed(String),

    /// A schema migration did not apply cleanly.
    #[error("Snapshot schema migration failed: {0}")]
    MigrationFailed(String),

    /// A statement failed at execution time.
    #[error("Snapshot query failed: {0}")]
    QueryFailed(String),

    /// No pool connection became available within the busy timeout.
    #[error("Snapshot database is busy")]
    Busy,

    /// Anything sqlx reports that has no better bucket.
    #[error("Snapshot storage error: {0}")]
    Other(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => DbError::Busy,
            sqlx::Error::PoolClosed => {
                DbError::ConnectionFailed("connection pool is closed".to_string())
            }
            other => DbError::Other(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
