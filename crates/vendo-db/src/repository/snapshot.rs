//! # Snapshot Repository
//!
//! Database operations for persisted store snapshots.
//!
//! ## Access Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  How the Snapshot Table Is Used                         │
//! │                                                                         │
//! │  App start:       get("vendo.cart")      ← one read per store          │
//! │  Every commit:    put("vendo.cart", ..)  ← upsert, last write wins     │
//! │  Store reset:     delete("vendo.cart")                                  │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────┐                       │
//! │  │ snapshots                                   │                       │
//! │  │                                             │                       │
//! │  │ vendo.cart       | {"version":1,...} | ...  │                       │
//! │  │ vendo.favorites  | {"version":1,...} | ...  │                       │
//! │  │ vendo.onboarding | {"version":2,...} | ...  │                       │
//! │  └─────────────────────────────────────────────┘                       │
//! │                                                                         │
//! │  Reads and writes touch exactly one row; there is never a join.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for snapshot database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = SnapshotRepository::new(pool);
///
/// repo.put("vendo.cart", b"{...}").await?;
/// let bytes = repo.get("vendo.cart").await?;
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    /// Creates a new SnapshotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    /// Gets the snapshot stored under `key`.
    ///
    /// ## Returns
    /// * `Ok(Some(bytes))` - Snapshot found
    /// * `Ok(None)` - Nothing stored under the key
    pub async fn get(&self, key: &str) -> DbResult<Option<Vec<u8>>> {
        let row: Option<(Vec<u8>,)> =
            sqlx::query_as("SELECT value FROM snapshots WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        debug!(key = %key, found = row.is_some(), "Snapshot read");
        Ok(row.map(|(value,)| value))
    }

    /// Stores `bytes` under `key`, replacing any previous value.
    ///
    /// Whole-value overwrite: last write wins, no merging. This matches
    /// the store layer's write-back semantics, where an in-flight write
    /// may be superseded by a newer one.
    pub async fn put(&self, key: &str, bytes: &[u8]) -> DbResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO snapshots (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(bytes)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = bytes.len(), "Snapshot written");
        Ok(())
    }

    /// Deletes the snapshot stored under `key`. Idempotent.
    pub async fn delete(&self, key: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM snapshots WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        debug!(key = %key, "Snapshot deleted");
        Ok(())
    }

    /// Lists all stored snapshot keys.
    ///
    /// ## Usage
    /// Diagnostics (e.g. a debug screen listing what state the device
    /// holds locally).
    pub async fn keys(&self) -> DbResult<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT key FROM snapshots ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|(key,)| key).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_repo() -> SnapshotRepository {
        let db = Database::open(DbConfig::in_memory()).await.unwrap();
        db.snapshots()
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = test_repo().await;
        assert_eq!(repo.get("vendo.cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let repo = test_repo().await;

        repo.put("vendo.cart", b"snapshot-1").await.unwrap();

        assert_eq!(
            repo.get("vendo.cart").await.unwrap(),
            Some(b"snapshot-1".to_vec())
        );
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let repo = test_repo().await;

        repo.put("vendo.cart", b"snapshot-1").await.unwrap();
        repo.put("vendo.cart", b"snapshot-2").await.unwrap();

        assert_eq!(
            repo.get("vendo.cart").await.unwrap(),
            Some(b"snapshot-2".to_vec())
        );
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = test_repo().await;

        repo.put("vendo.cart", b"snapshot").await.unwrap();
        repo.delete("vendo.cart").await.unwrap();
        repo.delete("vendo.cart").await.unwrap();

        assert_eq!(repo.get("vendo.cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_keys_are_sorted_and_isolated() {
        let repo = test_repo().await;

        repo.put("vendo.onboarding", b"o").await.unwrap();
        repo.put("vendo.cart", b"c").await.unwrap();
        repo.put("vendo.favorites", b"f").await.unwrap();

        assert_eq!(
            repo.keys().await.unwrap(),
            vec!["vendo.cart", "vendo.favorites", "vendo.onboarding"]
        );

        repo.delete("vendo.cart").await.unwrap();
        assert_eq!(
            repo.keys().await.unwrap(),
            vec!["vendo.favorites", "vendo.onboarding"]
        );
    }
}
