//! # Observable Store
//!
//! The minimal reactive state container behind every Vendo store.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Store<S> Lifecycle                               │
//! │                                                                         │
//! │  App start                                                              │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  Store::load(initial, slot, key, version, migrate)                      │
//! │      │                                                                  │
//! │      ├── slot empty ───────────────► initial                            │
//! │      ├── version matches ──────────► stored snapshot                    │
//! │      ├── version differs ──────────► migrate(old) or initial            │
//! │      └── read/parse failure ───────► initial (logged, never fatal)      │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  UI event ──► update(f) ──► commit new snapshot                         │
//! │                   │                                                     │
//! │                   ├──► watch channel ──► subscribers re-render          │
//! │                   └──► spawned write-back ──► durable slot              │
//! │                        (failure logged; memory stays authoritative)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! State lives behind a `Mutex` because the Mini App host may invoke
//! commands from more than one thread. The mutex serializes writers; it
//! does not queue work. Snapshots handed out are owned clones, so a caller
//! can diff against a previous snapshot at leisure.
//!
//! ## Notification Policy
//! Subscribers observe committed snapshots through a `tokio::sync::watch`
//! channel rather than synchronous callbacks. A subscriber reacting to a
//! change therefore can never re-enter the mutation path on the same
//! stack, and slow subscribers only ever miss intermediate snapshots,
//! never the latest one.

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::slot::KeyValueSlot;

// =============================================================================
// Snapshot Envelope
// =============================================================================

/// What actually lands in the durable slot: the snapshot wrapped with the
/// schema version it was written at. The state itself stays a raw JSON
/// value until the version check decides how to decode it.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEnvelope {
    version: u32,
    state: serde_json::Value,
}

/// Migration hook for persisted snapshots.
///
/// Receives the raw stored state and the version it was written at;
/// returns the migrated state, or `None` to discard the old snapshot and
/// start from the default.
pub type MigrateFn<S> = fn(serde_json::Value, u32) -> Option<S>;

/// Persistence configuration for a store instance.
struct Persistence {
    slot: Arc<dyn KeyValueSlot>,
    key: String,
    version: u32,
}

// =============================================================================
// Store
// =============================================================================

/// A minimal observable state container.
///
/// Holds a typed snapshot, commits whole-state replacements, notifies
/// subscribers, and (when configured) writes every committed snapshot to a
/// durable key-value slot.
///
/// ## Usage
/// ```rust
/// use vendo_store::store::Store;
///
/// #[derive(Clone, Default, serde::Serialize)]
/// struct Counter { count: i64 }
///
/// let store = Store::new(Counter::default());
/// store.update(|s| s.count += 1);
/// assert_eq!(store.get().count, 1);
/// ```
pub struct Store<S> {
    state: Mutex<S>,
    tx: watch::Sender<S>,
    persistence: Option<Persistence>,
}

impl<S> Store<S>
where
    S: Clone + Serialize + Send + Sync + 'static,
{
    /// Creates an ephemeral store (no persistence).
    pub fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial.clone());
        Store {
            state: Mutex::new(initial),
            tx,
            persistence: None,
        }
    }

    /// Creates a persisted store, hydrating from the slot.
    ///
    /// ## Hydration
    /// - Slot empty → `initial`
    /// - Stored version equals `version` → decoded snapshot
    /// - Stored version differs → `migrate` (if given), else `initial`
    /// - Any read or parse failure → `initial`
    ///
    /// Hydration never fails the caller; a broken slot costs the user
    /// their saved state, not the app start.
    pub async fn load(
        initial: S,
        slot: Arc<dyn KeyValueSlot>,
        key: impl Into<String>,
        version: u32,
        migrate: Option<MigrateFn<S>>,
    ) -> Self
    where
        S: DeserializeOwned,
    {
        let key = key.into();
        let state = Self::hydrate(initial, &slot, &key, version, migrate).await;

        let (tx, _rx) = watch::channel(state.clone());
        Store {
            state: Mutex::new(state),
            tx,
            persistence: Some(Persistence { slot, key, version }),
        }
    }

    async fn hydrate(
        initial: S,
        slot: &Arc<dyn KeyValueSlot>,
        key: &str,
        version: u32,
        migrate: Option<MigrateFn<S>>,
    ) -> S
    where
        S: DeserializeOwned,
    {
        let bytes = match slot.read(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return initial,
            Err(e) => {
                warn!(key = %key, error = %e, "Slot read failed; using default state");
                return initial;
            }
        };

        let envelope: SnapshotEnvelope = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(key = %key, error = %e, "Persisted snapshot unreadable; using default state");
                return initial;
            }
        };

        if envelope.version == version {
            match serde_json::from_value(envelope.state) {
                Ok(state) => state,
                Err(e) => {
                    warn!(key = %key, error = %e, "Persisted snapshot undecodable; using default state");
                    initial
                }
            }
        } else {
            match migrate.and_then(|migrate| migrate(envelope.state, envelope.version)) {
                Some(state) => {
                    info!(
                        key = %key,
                        from = envelope.version,
                        to = version,
                        "Migrated persisted snapshot"
                    );
                    state
                }
                None => {
                    warn!(
                        key = %key,
                        stored = envelope.version,
                        expected = version,
                        "Discarding persisted snapshot with unsupported version"
                    );
                    initial
                }
            }
        }
    }

    /// Returns an owned clone of the current snapshot.
    ///
    /// Synchronous, no side effects.
    pub fn get(&self) -> S {
        self.state.lock().expect("store mutex poisoned").clone()
    }

    /// Executes a function with read access to the current snapshot.
    ///
    /// Cheaper than [`Store::get`] for small projections.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&S) -> R,
    {
        let state = self.state.lock().expect("store mutex poisoned");
        f(&state)
    }

    /// Commits a mutation: runs `f` on the state, publishes the new
    /// snapshot to subscribers, and triggers the persistence write-back.
    ///
    /// Returns whatever `f` returns, so operations can surface signals
    /// (e.g. an `AddOutcome`) from inside the commit.
    pub fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut S) -> R,
    {
        let (result, snapshot) = {
            let mut state = self.state.lock().expect("store mutex poisoned");
            let result = f(&mut state);
            (result, state.clone())
        };

        // Subscribers see the snapshot only after the lock is released
        self.tx.send_replace(snapshot.clone());
        self.persist(snapshot);
        result
    }

    /// Subscribes to committed snapshots.
    ///
    /// The receiver always holds the latest snapshot; dropping it
    /// unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }

    /// Fire-and-forget write-back of a committed snapshot.
    ///
    /// Serialization happens inline (the snapshot is already owned); the
    /// slot write runs on a spawned task. Failures are logged and
    /// swallowed - the in-memory state is authoritative for the running
    /// session, persistence only matters across restarts.
    fn persist(&self, snapshot: S) {
        let Some(persistence) = &self.persistence else {
            return;
        };

        let state = match serde_json::to_value(&snapshot) {
            Ok(state) => state,
            Err(e) => {
                warn!(key = %persistence.key, error = %e, "Snapshot serialization failed; state not persisted");
                return;
            }
        };
        let envelope = SnapshotEnvelope {
            version: persistence.version,
            state,
        };
        let bytes = match serde_json::to_vec(&envelope) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(key = %persistence.key, error = %e, "Snapshot serialization failed; state not persisted");
                return;
            }
        };

        let slot = Arc::clone(&persistence.slot);
        let key = persistence.key.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = slot.write(&key, bytes).await {
                        warn!(key = %key, error = %e, "Snapshot write-back failed");
                    }
                });
            }
            Err(_) => {
                warn!(key = %persistence.key, "No async runtime available; state not persisted");
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::MemorySlot;
    use std::time::Duration;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Counter {
        count: i64,
    }

    async fn persisted_bytes(slot: &Arc<MemorySlot>, key: &str) -> Vec<u8> {
        for _ in 0..200 {
            if let Some(bytes) = slot.read(key).await.unwrap() {
                return bytes;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("snapshot was never persisted");
    }

    #[test]
    fn test_get_and_update() {
        let store = Store::new(Counter::default());

        store.update(|s| s.count += 1);
        store.update(|s| s.count += 2);

        assert_eq!(store.get().count, 3);
        assert_eq!(store.read(|s| s.count), 3);
    }

    #[test]
    fn test_update_returns_closure_result() {
        let store = Store::new(Counter::default());

        let after = store.update(|s| {
            s.count += 5;
            s.count
        });

        assert_eq!(after, 5);
    }

    #[test]
    fn test_snapshots_are_independent() {
        let store = Store::new(Counter::default());

        let before = store.get();
        store.update(|s| s.count = 42);

        // The earlier snapshot is an owned clone; committing a new state
        // must not mutate it (callers diff against old snapshots)
        assert_eq!(before.count, 0);
        assert_eq!(store.get().count, 42);
    }

    #[tokio::test]
    async fn test_subscribers_see_committed_snapshots() {
        let store = Store::new(Counter::default());
        let mut rx = store.subscribe();

        store.update(|s| s.count = 7);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().count, 7);
    }

    #[tokio::test]
    async fn test_dropping_receiver_unsubscribes() {
        let store = Store::new(Counter::default());
        let rx = store.subscribe();
        drop(rx);

        // Committing with no subscribers must not fail
        store.update(|s| s.count = 1);
        assert_eq!(store.get().count, 1);
    }

    #[tokio::test]
    async fn test_update_persists_versioned_envelope() {
        let slot = Arc::new(MemorySlot::new());
        let store = Store::load(
            Counter::default(),
            slot.clone() as Arc<dyn KeyValueSlot>,
            "test.counter",
            3,
            None,
        )
        .await;

        store.update(|s| s.count = 9);

        let bytes = persisted_bytes(&slot, "test.counter").await;
        let envelope: SnapshotEnvelope = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(envelope.version, 3);
        assert_eq!(envelope.state["count"], 9);
    }

    #[tokio::test]
    async fn test_hydrates_last_committed_state() {
        let slot = Arc::new(MemorySlot::new());

        {
            let store = Store::load(
                Counter::default(),
                slot.clone() as Arc<dyn KeyValueSlot>,
                "test.counter",
                1,
                None,
            )
            .await;
            store.update(|s| s.count = 11);
            persisted_bytes(&slot, "test.counter").await;
        }

        // "Restart": a fresh store against the same slot
        let store = Store::load(
            Counter::default(),
            slot.clone() as Arc<dyn KeyValueSlot>,
            "test.counter",
            1,
            None,
        )
        .await;
        assert_eq!(store.get().count, 11);
    }

    #[tokio::test]
    async fn test_version_mismatch_without_migration_falls_back() {
        let slot = Arc::new(MemorySlot::new());
        let stale = serde_json::to_vec(&SnapshotEnvelope {
            version: 1,
            state: serde_json::json!({ "count": 99 }),
        })
        .unwrap();
        slot.write("test.counter", stale).await.unwrap();

        let store = Store::load(
            Counter::default(),
            slot.clone() as Arc<dyn KeyValueSlot>,
            "test.counter",
            2,
            None,
        )
        .await;

        assert_eq!(store.get().count, 0);
    }

    #[tokio::test]
    async fn test_version_mismatch_with_migration() {
        let slot = Arc::new(MemorySlot::new());
        let stale = serde_json::to_vec(&SnapshotEnvelope {
            version: 1,
            state: serde_json::json!({ "count": 99 }),
        })
        .unwrap();
        slot.write("test.counter", stale).await.unwrap();

        fn migrate(old: serde_json::Value, old_version: u32) -> Option<Counter> {
            (old_version == 1).then(|| Counter {
                count: old["count"].as_i64().unwrap_or(0) * 10,
            })
        }

        let store = Store::load(
            Counter::default(),
            slot.clone() as Arc<dyn KeyValueSlot>,
            "test.counter",
            2,
            Some(migrate as MigrateFn<Counter>),
        )
        .await;

        assert_eq!(store.get().count, 990);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_falls_back_to_default() {
        let slot = Arc::new(MemorySlot::new());
        slot.write("test.counter", b"not json at all".to_vec())
            .await
            .unwrap();

        let store = Store::load(
            Counter::default(),
            slot.clone() as Arc<dyn KeyValueSlot>,
            "test.counter",
            1,
            None,
        )
        .await;

        assert_eq!(store.get(), Counter::default());
    }
}
