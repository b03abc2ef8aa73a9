//! # Cart Store
//!
//! The cart engine behind a persisted observable store.
//!
//! ## Checkout Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Store Lifecycle                              │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│  Draft   │────►│  Order   │       │
//! │  │  Cart    │     │          │     │ Assembled│     │ Confirmed│       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │               │              │
//! │                   add_item          begin_checkout       │              │
//! │                   update_quantity   (snapshot out)       │              │
//! │                   apply_promo            │               │              │
//! │                   set_points             ▼               ▼              │
//! │                        │       external order collaborator              │
//! │                        │                            complete_checkout   │
//! │                        ▼                                 │              │
//! │                   clear ◄────────────────────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This layer is what the frontend bindings call. It validates input where
//! input enters (promo codes), delegates every pricing decision to the pure
//! engine in `vendo-core`, and logs what happened. The order submission
//! itself belongs to the remote collaborator; this store only assembles the
//! draft and clears itself once the caller reports success.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

use vendo_core::cart::{AddOutcome, Cart, CartTotals};
use vendo_core::error::{CoreError, CoreResult};
use vendo_core::types::{Machine, OrderDraft, OrderDraftLine, Product};
use vendo_core::validation::{validate_discount_percent, validate_order_draft, validate_promo_code};

use crate::slot::{KeyValueSlot, CART_SLOT_KEY};
use crate::store::Store;

/// Snapshot schema version for the persisted cart.
pub const CART_SNAPSHOT_VERSION: u32 = 1;

/// The cart store.
///
/// One instance per process, created at application bootstrap and handed
/// to consumers explicitly - no hidden globals.
pub struct CartStore {
    store: Store<Cart>,
}

impl CartStore {
    /// Creates an ephemeral cart store (no persistence). Used in tests and
    /// sessions without durable storage.
    pub fn new() -> Self {
        CartStore {
            store: Store::new(Cart::new()),
        }
    }

    /// Creates the cart store, hydrating any pending cart from the slot so
    /// a user reopening the app finds their order where they left it.
    pub async fn load(slot: Arc<dyn KeyValueSlot>) -> Self {
        CartStore {
            store: Store::load(Cart::new(), slot, CART_SLOT_KEY, CART_SNAPSHOT_VERSION, None).await,
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Returns an owned snapshot of the cart.
    pub fn snapshot(&self) -> Cart {
        self.store.get()
    }

    /// Returns the derived totals for the current cart.
    pub fn totals(&self) -> CartTotals {
        self.store.read(|cart| CartTotals::from(cart))
    }

    /// Subscribes to committed cart snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.store.subscribe()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Selects the machine for this order.
    pub fn set_machine(&self, machine: Machine) {
        debug!(machine_id = %machine.id, "set_machine");
        self.store.update(|cart| cart.set_machine(machine));
    }

    /// Adds a product to the cart (merge-by-id, quantity 1 increments).
    pub fn add_item(&self, product: &Product) -> AddOutcome {
        let outcome = self.store.update(|cart| cart.add_line(product));
        debug!(product_id = %product.id, ?outcome, "add_item");
        outcome
    }

    /// Sets the quantity of a cart line; `quantity ≤ 0` removes it.
    pub fn update_quantity(&self, product_id: &str, quantity: i64) {
        debug!(product_id = %product_id, quantity, "update_quantity");
        self.store
            .update(|cart| cart.update_quantity(product_id, quantity));
    }

    /// Removes a cart line; silent no-op when absent.
    pub fn remove_item(&self, product_id: &str) {
        debug!(product_id = %product_id, "remove_item");
        self.store.update(|cart| cart.remove_line(product_id));
    }

    /// Clears the cart entirely (machine, lines, promo, points).
    pub fn clear(&self) {
        debug!("clear_cart");
        self.store.update(Cart::clear);
    }

    /// Applies a backend-validated promo code to the cart.
    ///
    /// The discount percentage comes from the promo-validation
    /// collaborator; this layer re-checks only what the engine trusts
    /// blindly: the code format and the percentage range.
    pub fn apply_promo(&self, code: &str, discount_percent: u32) -> CoreResult<()> {
        validate_promo_code(code)?;
        validate_discount_percent(discount_percent)?;

        debug!(code = %code, discount_percent, "apply_promo");
        self.store
            .update(|cart| cart.apply_promo(code.trim(), discount_percent));
        Ok(())
    }

    /// Removes the applied promo, if any.
    pub fn remove_promo(&self) {
        debug!("remove_promo");
        self.store.update(Cart::remove_promo);
    }

    /// Sets the loyalty points to redeem, clamped by the engine against
    /// the caller-supplied balance and the remaining payable amount.
    ///
    /// Returns the effective (clamped) redemption.
    pub fn set_points_to_redeem(&self, requested: i64, available_balance: i64) -> i64 {
        let stored = self
            .store
            .update(|cart| cart.set_points_to_redeem(requested, available_balance));
        debug!(requested, available_balance, stored, "set_points_to_redeem");
        stored
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Assembles the checkout snapshot for the order-creation collaborator.
    ///
    /// Does not mutate the cart: the order is not placed yet. Call
    /// [`CartStore::complete_checkout`] once the collaborator confirms.
    pub fn begin_checkout(&self) -> CoreResult<OrderDraft> {
        let cart = self.snapshot();

        let machine = cart.machine.as_ref().ok_or(CoreError::MachineNotSelected)?;
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let draft = OrderDraft {
            draft_id: Uuid::new_v4().to_string(),
            machine_id: machine.id.clone(),
            lines: cart
                .lines
                .iter()
                .map(|line| OrderDraftLine {
                    product_id: line.product_id.clone(),
                    name: line.name.clone(),
                    unit_price_units: line.unit_price_units,
                    quantity: line.quantity,
                    line_total_units: line.line_total_units(),
                })
                .collect(),
            promo_code: cart.promo.as_ref().map(|p| p.code.clone()),
            points_to_redeem: cart.points_discount_units(),
            subtotal_units: cart.subtotal_units(),
            promo_discount_units: cart.promo_discount_units(),
            points_discount_units: cart.points_discount_units(),
            total_units: cart.total_units(),
            created_at: Utc::now(),
        };
        validate_order_draft(&draft)?;

        info!(
            draft_id = %draft.draft_id,
            machine_id = %draft.machine_id,
            lines = draft.lines.len(),
            total = draft.total_units,
            "Order draft assembled"
        );
        Ok(draft)
    }

    /// Clears the cart after the collaborator confirmed the order.
    pub fn complete_checkout(&self) {
        info!("Checkout complete; clearing cart");
        self.clear();
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
