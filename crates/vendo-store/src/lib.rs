//! # vendo-store: Reactive State Stores for Vendo
//!
//! This crate provides the observable state containers the Mini App
//! frontend drives, and the persistence contract that lets them survive
//! app restarts.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vendo State Flow                                 │
//! │                                                                         │
//! │  UI event ("add to cart")                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   vendo-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌────────────────┐  │   │
//! │  │   │   Store<S>    │   │ Domain stores │   │  KeyValueSlot  │  │   │
//! │  │   │  (store.rs)   │   │ CartStore     │   │   (slot.rs)    │  │   │
//! │  │   │               │◄──│ Favorites     │──►│                │  │   │
//! │  │   │ get / update  │   │ Onboarding    │   │ MemorySlot     │  │   │
//! │  │   │ subscribe     │   │               │   │ SqliteSlot*    │  │   │
//! │  │   └───────────────┘   └───────────────┘   └────────────────┘  │   │
//! │  │                                                 *in vendo-db   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subscribers re-render; snapshot written back to the durable slot      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The generic observable `Store<S>` with versioned persistence
//! - [`slot`] - The durable key-value slot contract + in-memory implementation
//! - [`cart_store`] - The cart engine behind a persisted store
//! - [`favorites`] - Favorite product ids
//! - [`onboarding`] - Onboarding completion tracking with snapshot migration
//! - [`error`] - Persistence error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vendo_store::{CartStore, FavoritesStore, OnboardingStore};
//!
//! // One instance per domain, created at bootstrap and passed down
//! let slot: Arc<dyn vendo_store::KeyValueSlot> = open_sqlite_slot().await?;
//! let cart = CartStore::load(slot.clone()).await;
//! let favorites = FavoritesStore::load(slot.clone()).await;
//! let onboarding = OnboardingStore::load(slot).await;
//!
//! cart.add_item(&product);
//! let draft = cart.begin_checkout()?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart_store;
pub mod error;
pub mod favorites;
pub mod onboarding;
pub mod slot;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart_store::{CartStore, CART_SNAPSHOT_VERSION};
pub use error::{StoreError, StoreResult};
pub use favorites::{Favorites, FavoritesStore, FAVORITES_SNAPSHOT_VERSION};
pub use onboarding::{Onboarding, OnboardingStore, ONBOARDING_SNAPSHOT_VERSION};
pub use slot::{
    KeyValueSlot, MemorySlot, CART_SLOT_KEY, FAVORITES_SLOT_KEY, ONBOARDING_SLOT_KEY,
};
pub use store::{MigrateFn, Store};
