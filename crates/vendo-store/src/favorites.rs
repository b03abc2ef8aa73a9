//! # Favorites Store
//!
//! The user's favorite products, as a persisted set of product ids.
//!
//! Favorites only reference catalog entries; the products themselves live
//! in the backend catalog. A favorite pointing at a product that has since
//! disappeared is harmless - the frontend simply has nothing to render
//! for it.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

use crate::slot::{KeyValueSlot, FAVORITES_SLOT_KEY};
use crate::store::Store;

/// Snapshot schema version for the persisted favorites.
pub const FAVORITES_SNAPSHOT_VERSION: u32 = 1;

/// The favorites state: product ids, deterministically ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorites {
    pub product_ids: BTreeSet<String>,
}

/// The favorites store.
pub struct FavoritesStore {
    store: Store<Favorites>,
}

impl FavoritesStore {
    /// Creates an ephemeral favorites store (no persistence).
    pub fn new() -> Self {
        FavoritesStore {
            store: Store::new(Favorites::default()),
        }
    }

    /// Creates the favorites store, hydrating from the slot.
    pub async fn load(slot: Arc<dyn KeyValueSlot>) -> Self {
        FavoritesStore {
            store: Store::load(
                Favorites::default(),
                slot,
                FAVORITES_SLOT_KEY,
                FAVORITES_SNAPSHOT_VERSION,
                None,
            )
            .await,
        }
    }

    /// Toggles a product id; returns whether it is a favorite afterwards.
    pub fn toggle(&self, product_id: &str) -> bool {
        let is_favorite = self.store.update(|favorites| {
            if favorites.product_ids.remove(product_id) {
                false
            } else {
                favorites.product_ids.insert(product_id.to_string());
                true
            }
        });
        debug!(product_id = %product_id, is_favorite, "toggle_favorite");
        is_favorite
    }

    /// Checks whether a product id is a favorite.
    pub fn contains(&self, product_id: &str) -> bool {
        self.store
            .read(|favorites| favorites.product_ids.contains(product_id))
    }

    /// Returns the favorite product ids in deterministic order.
    pub fn ids(&self) -> Vec<String> {
        self.store
            .read(|favorites| favorites.product_ids.iter().cloned().collect())
    }

    /// Number of favorites.
    pub fn len(&self) -> usize {
        self.store.read(|favorites| favorites.product_ids.len())
    }

    /// Checks whether no favorites are stored.
    pub fn is_empty(&self) -> bool {
        self.store.read(|favorites| favorites.product_ids.is_empty())
    }

    /// Removes all favorites.
    pub fn clear(&self) {
        debug!("clear_favorites");
        self.store.update(|favorites| favorites.product_ids.clear());
    }

    /// Subscribes to committed favorites snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Favorites> {
        self.store.subscribe()
    }
}

impl Default for FavoritesStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
