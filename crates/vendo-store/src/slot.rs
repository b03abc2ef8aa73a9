//! # Key-Value Slot
//!
//! The durable storage contract the stores persist through.
//!
//! ## Key Namespace
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     One Key Per Store Instance                          │
//! │                                                                         │
//! │  vendo.cart        ──► cart snapshot (machine, lines, promo, points)   │
//! │  vendo.favorites   ──► favorite product ids                            │
//! │  vendo.onboarding  ──► onboarding completion state                     │
//! │                                                                         │
//! │  Keys never overlap, so clearing one store's slot cannot disturb       │
//! │  another's. Values are opaque bytes to the slot; the envelope format   │
//! │  (versioned JSON) belongs to the store layer.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The trait is object-safe so a store can hold `Arc<dyn KeyValueSlot>`
//! and stay ignorant of the storage engine behind it. `vendo-db` provides
//! the SQLite implementation; [`MemorySlot`] backs tests and ephemeral
//! sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Slot Keys
// =============================================================================

/// Slot key for the cart store snapshot.
pub const CART_SLOT_KEY: &str = "vendo.cart";

/// Slot key for the favorites store snapshot.
pub const FAVORITES_SLOT_KEY: &str = "vendo.favorites";

/// Slot key for the onboarding store snapshot.
pub const ONBOARDING_SLOT_KEY: &str = "vendo.onboarding";

// =============================================================================
// Trait
// =============================================================================

/// A durable key-value slot.
///
/// ## Contract
/// - `read` returns the last successfully written bytes for the key, or
///   `None` if nothing was ever written
/// - `write` overwrites whole values: last write wins, no merging
/// - `remove` is idempotent
///
/// Implementations must be safe to call from any task; the stores issue
/// fire-and-forget writes from spawned tasks.
#[async_trait]
pub trait KeyValueSlot: Send + Sync {
    /// Reads the value stored under `key`, if any.
    async fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Writes `bytes` under `key`, replacing any previous value.
    async fn write(&self, key: &str, bytes: Vec<u8>) -> StoreResult<()>;

    /// Removes the value stored under `key`, if any.
    async fn remove(&self, key: &str) -> StoreResult<()>;
}

// =============================================================================
// In-Memory Slot
// =============================================================================

/// In-memory slot implementation.
///
/// Used in tests (simulated restarts share one slot through an `Arc`) and
/// as the fallback when the app runs without durable storage.
#[derive(Debug, Default)]
pub struct MemorySlot {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemorySlot {
    /// Creates an empty in-memory slot.
    pub fn new() -> Self {
        MemorySlot::default()
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.entries
            .lock()
            .map_err(|e| StoreError::slot_read("<memory>", e.to_string()))
    }
}

#[async_trait]
impl KeyValueSlot for MemorySlot {
    async fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn write(&self, key: &str, bytes: Vec<u8>) -> StoreResult<()> {
        self.lock()?.insert(key.to_string(), bytes);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
