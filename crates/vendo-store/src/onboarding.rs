//! # Onboarding Store
//!
//! Tracks whether the user has seen the onboarding flow, and against which
//! content version. Bumping the content version in a release re-shows the
//! flow to users who completed an older one.
//!
//! ## Snapshot History
//! ```text
//! version 1: { "completed": bool }
//! version 2: { "completedVersion": number | null }   (current)
//! ```
//! The v1 → v2 migration maps `completed: true` to `completedVersion: 1`,
//! so long-time users are not shown the original onboarding again, but do
//! see any newer content.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

use crate::slot::{KeyValueSlot, ONBOARDING_SLOT_KEY};
use crate::store::Store;

/// Snapshot schema version for the persisted onboarding state.
pub const ONBOARDING_SNAPSHOT_VERSION: u32 = 2;

/// The onboarding state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Onboarding {
    /// The content version the user last completed, `None` if never.
    pub completed_version: Option<u32>,
}

/// Migrates pre-v2 onboarding snapshots.
fn migrate_onboarding(old: serde_json::Value, old_version: u32) -> Option<Onboarding> {
    match old_version {
        1 => {
            let completed = old.get("completed")?.as_bool()?;
            Some(Onboarding {
                completed_version: completed.then_some(1),
            })
        }
        _ => None,
    }
}

/// The onboarding store.
pub struct OnboardingStore {
    store: Store<Onboarding>,
}

impl OnboardingStore {
    /// Creates an ephemeral onboarding store (no persistence).
    pub fn new() -> Self {
        OnboardingStore {
            store: Store::new(Onboarding::default()),
        }
    }

    /// Creates the onboarding store, hydrating from the slot.
    pub async fn load(slot: Arc<dyn KeyValueSlot>) -> Self {
        OnboardingStore {
            store: Store::load(
                Onboarding::default(),
                slot,
                ONBOARDING_SLOT_KEY,
                ONBOARDING_SNAPSHOT_VERSION,
                Some(migrate_onboarding),
            )
            .await,
        }
    }

    /// Whether the onboarding flow should be shown for the given content
    /// version: never completed, or completed against older content.
    pub fn should_show(&self, current_content_version: u32) -> bool {
        self.store.read(|onboarding| {
            onboarding
                .completed_version
                .map_or(true, |completed| completed < current_content_version)
        })
    }

    /// Marks the onboarding flow completed for the given content version.
    pub fn complete(&self, content_version: u32) {
        debug!(content_version, "onboarding_complete");
        self.store
            .update(|onboarding| onboarding.completed_version = Some(content_version));
    }

    /// Forgets the completion (e.g. for a "replay tutorial" action).
    pub fn reset(&self) {
        debug!("onboarding_reset");
        self.store
            .update(|onboarding| onboarding.completed_version = None);
    }

    /// Subscribes to committed onboarding snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Onboarding> {
        self.store.subscribe()
    }
}

impl Default for OnboardingStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
