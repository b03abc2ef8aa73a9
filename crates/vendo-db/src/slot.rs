//! # SQLite Slot
//!
//! The production implementation of the store layer's key-value slot.
//!
//! This is the seam between the two crates: `vendo-store` persists opaque
//! envelope bytes through `KeyValueSlot`, and this adapter maps those
//! calls onto the snapshot repository. Database errors are converted to
//! `StoreError` here so the store layer can log and swallow them without
//! knowing sqlx exists.

use async_trait::async_trait;

use vendo_store::{KeyValueSlot, StoreError, StoreResult};

use crate::pool::Database;

/// SQLite-backed key-value slot.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::open(DbConfig::new(data_dir.join("vendo.db"))).await?;
/// let slot: Arc<dyn KeyValueSlot> = Arc::new(SqliteSlot::new(db));
/// let cart = CartStore::load(slot).await;
/// ```
#[derive(Debug, Clone)]
pub struct SqliteSlot {
    db: Database,
}

impl SqliteSlot {
    /// Creates a slot over an open database handle.
    pub fn new(db: Database) -> Self {
        SqliteSlot { db }
    }
}

#[async_trait]
impl KeyValueSlot for SqliteSlot {
    async fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.db
            .snapshots()
            .get(key)
            .await
            .map_err(|e| StoreError::slot_read(key, e.to_string()))
    }

    async fn write(&self, key: &str, bytes: Vec<u8>) -> StoreResult<()> {
        self.db
            .snapshots()
            .put(key, &bytes)
            .await
            .map_err(|e| StoreError::slot_write(key, e.to_string()))
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.db
            .snapshots()
            .delete(key)
            .await
            .map_err(|e| StoreError::slot_write(key, e.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
