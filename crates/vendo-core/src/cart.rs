//! # Cart Pricing Engine
//!
//! The cart and its pricing/points-redemption math.
//!
//! ## Pricing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Pricing Pipeline                              │
//! │                                                                         │
//! │  lines: Σ(unit_price × quantity)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal ── floor(subtotal × promo% / 100) ──► promo discount         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  remaining payable ── min(points, remaining) ──► points discount       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total = max(0, subtotal − promo discount − points discount)           │
//! │                                                                         │
//! │  INVARIANTS (hold after every operation):                               │
//! │    • total ≥ 0                                                          │
//! │    • promo discount + points discount ≤ subtotal                        │
//! │    • emptying the cart clears machine, promo and points                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived, Not Stored
//! Totals are recomputed from the lines on every read. The state shape is
//! small and recomputation is O(number of lines), so there is nothing to
//! invalidate and no cache to get wrong.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Machine, Product, Promo};
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY, UNITS_PER_POINT};

// =============================================================================
// Cart Line
// =============================================================================

/// One product entry in the cart with its quantity.
///
/// ## Design Notes
/// - `product_id`: the uniqueness key; adding the same product merges lines
/// - name/price/image are frozen copies taken when the line is created, so
///   the cart displays consistent data even if the catalog changes while
///   the order is still open
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Product ID (backend identifier).
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Price in whole units at time of adding (frozen).
    /// This is critical: we lock in the price when the line is created.
    pub unit_price_units: i64,

    /// Catalog image at time of adding (frozen).
    pub image_url: Option<String>,

    /// Quantity in cart. Always in `[1, MAX_LINE_QUANTITY]`.
    pub quantity: i64,
}

impl CartLine {
    /// Creates a new cart line from a product with quantity 1.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment. If the product price changes
    /// in the catalog, this cart line retains the original price.
    pub fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price_units: product.price_units,
            image_url: product.image_url.clone(),
            quantity: 1,
        }
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total_units(&self) -> i64 {
        self.unit_price_units * self.quantity
    }
}

// =============================================================================
// Add Outcome
// =============================================================================

/// Result of an `add_line` call.
///
/// The engine never throws for expected conditions; it signals them so the
/// UI can react (toast, haptic, disabled button).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AddOutcome {
    /// A new line was appended with quantity 1.
    Added,
    /// An existing line for the same product had its quantity incremented.
    Merged,
    /// The product is flagged unavailable; the cart was not changed.
    Unavailable,
    /// The cart already holds `MAX_CART_LINES` distinct lines; not changed.
    CartFull,
}

impl AddOutcome {
    /// Whether the call changed the cart.
    pub const fn changed_cart(&self) -> bool {
        matches!(self, AddOutcome::Added | AddOutcome::Merged)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart for one checkout cycle.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product merges)
/// - Quantity is in `[1, MAX_LINE_QUANTITY]`; setting it to 0 removes the line
/// - Maximum distinct lines: `MAX_CART_LINES`
/// - An empty cart has no machine, no promo and no points: emptying the
///   cart by any path resets all three
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    /// The machine selected for this order; `None` until chosen.
    pub machine: Option<Machine>,

    /// Lines in insertion order (= display order).
    pub lines: Vec<CartLine>,

    /// Applied promo code and its discount, if any.
    pub promo: Option<Promo>,

    /// Loyalty points the user chose to redeem. Never negative; clamped
    /// against the caller-supplied balance and the remaining payable amount
    /// when set, and re-clamped at read time should the cart shrink after.
    pub points_to_redeem: i64,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Selects the machine for this order. Does not touch the lines.
    ///
    /// The engine is deliberately permissive here: whether switching
    /// machines with a non-empty cart should clear it is a UI-flow rule,
    /// not an engine rule.
    pub fn set_machine(&mut self, machine: Machine) {
        self.machine = Some(machine);
    }

    /// Adds a product to the cart, merging by product id.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity + 1 (clamped at the per-line max)
    /// - Product not in cart: appended as a new line with quantity 1
    /// - Product unavailable: no-op, signalled as `Unavailable`
    /// - Cart at capacity: no-op, signalled as `CartFull`
    pub fn add_line(&mut self, product: &Product) -> AddOutcome {
        if !product.is_available {
            return AddOutcome::Unavailable;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = (line.quantity + 1).min(MAX_LINE_QUANTITY);
            return AddOutcome::Merged;
        }

        if self.lines.len() >= MAX_CART_LINES {
            return AddOutcome::CartFull;
        }

        self.lines.push(CartLine::from_product(product));
        AddOutcome::Added
    }

    /// Sets the quantity of the line matching `product_id`.
    ///
    /// ## Behavior
    /// - `quantity ≤ 0`: removes the line entirely
    /// - otherwise: sets the quantity, clamped at the per-line max
    /// - unknown id: silent no-op (the id came from the same render pass
    ///   as the cart snapshot, so a miss is stale UI, not an error)
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_line(product_id);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity.min(MAX_LINE_QUANTITY);
        }
    }

    /// Removes the line matching `product_id`; silent no-op if absent.
    ///
    /// Removing the last line resets the whole checkout context (machine,
    /// promo, points): a cart is tied to one machine per checkout cycle.
    pub fn remove_line(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
        self.reset_if_empty();
    }

    /// Clears the cart back to the pristine empty state.
    ///
    /// Used after a successful checkout and for the explicit "clear cart"
    /// action. Calling it on an empty cart is a no-op.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.machine = None;
        self.promo = None;
        self.points_to_redeem = 0;
    }

    /// Applies a validated promo code.
    ///
    /// The engine only stores the pair; the caller is responsible for
    /// resolving the code against the backend and validating the
    /// percentage beforehand.
    pub fn apply_promo(&mut self, code: impl Into<String>, discount_percent: u32) {
        self.promo = Some(Promo {
            code: code.into(),
            discount_percent,
        });
    }

    /// Removes the applied promo, if any.
    pub fn remove_promo(&mut self) {
        self.promo = None;
    }

    /// Sets the loyalty points to redeem, clamped into
    /// `[0, min(available_balance, subtotal − promo discount)]`.
    ///
    /// `available_balance` is supplied by the caller from the loyalty
    /// collaborator; the engine holds no knowledge of the user's true
    /// ledger and only enforces internal consistency.
    ///
    /// Returns the clamped value actually stored, so the UI can reflect
    /// the effective redemption immediately.
    pub fn set_points_to_redeem(&mut self, requested: i64, available_balance: i64) -> i64 {
        let clamped = requested.clamp(0, self.redeem_ceiling(available_balance));
        self.points_to_redeem = clamped;
        clamped
    }

    /// The maximum number of points redeemable right now given the
    /// caller-supplied balance: `min(balance, subtotal − promo discount)`.
    pub fn redeem_ceiling(&self, available_balance: i64) -> i64 {
        let remaining_payable = self.subtotal_units() - self.promo_discount_units();
        available_balance.max(0).min(remaining_payable)
    }

    /// Invariant: an empty cart has no machine, promo or points.
    fn reset_if_empty(&mut self) {
        if self.lines.is_empty() {
            self.machine = None;
            self.promo = None;
            self.points_to_redeem = 0;
        }
    }

    // -------------------------------------------------------------------------
    // Derived totals (recomputed on every read)
    // -------------------------------------------------------------------------

    /// Sum of line totals, before any discount.
    pub fn subtotal_units(&self) -> i64 {
        self.lines
            .iter()
            .map(|l| Money::from_units(l.line_total_units()))
            .sum::<Money>()
            .units()
    }

    /// Promo discount: `floor(subtotal × percent / 100)`, capped at the
    /// subtotal so a mis-validated percentage can never drive the total
    /// negative.
    pub fn promo_discount_units(&self) -> i64 {
        let subtotal = Money::from_units(self.subtotal_units());
        match &self.promo {
            Some(promo) => subtotal.percent(promo.discount_percent).min(subtotal).units(),
            None => 0,
        }
    }

    /// Points discount: the stored redemption (at `UNITS_PER_POINT`)
    /// re-clamped against what is still payable. The clamp at set time
    /// covers the common path; the read-time clamp keeps the discount
    /// bound intact when lines are removed afterwards.
    pub fn points_discount_units(&self) -> i64 {
        let remaining_payable = self.subtotal_units() - self.promo_discount_units();
        (self.points_to_redeem * UNITS_PER_POINT).min(remaining_payable)
    }

    /// Grand total: `max(0, subtotal − promo discount − points discount)`.
    pub fn total_units(&self) -> i64 {
        Money::from_units(self.subtotal_units())
            .saturating_minus(Money::from_units(
                self.promo_discount_units() + self.points_discount_units(),
            ))
            .units()
    }

    /// Number of distinct lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal_units: i64,
    pub promo_discount_units: i64,
    pub points_discount_units: i64,
    pub total_units: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            subtotal_units: cart.subtotal_units(),
            promo_discount_units: cart.promo_discount_units(),
            points_discount_units: cart.points_discount_units(),
            total_units: cart.total_units(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_product(id: &str, price_units: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            description: None,
            price_units,
            image_url: None,
            category: None,
            is_available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_machine(id: &str) -> Machine {
        Machine {
            id: id.to_string(),
            name: format!("Machine {}", id),
            address: "1 Demo Street".to_string(),
            is_online: true,
        }
    }

    #[test]
    fn test_add_line() {
        let mut cart = Cart::new();
        let product = test_product("esp", 12_000);

        assert_eq!(cart.add_line(&product), AddOutcome::Added);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 1);
        assert_eq!(cart.subtotal_units(), 12_000);
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut cart = Cart::new();
        let product = test_product("esp", 12_000);

        assert_eq!(cart.add_line(&product), AddOutcome::Added);
        assert_eq!(cart.add_line(&product), AddOutcome::Merged);

        // Still one line for the product id, never a duplicate entry
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal_units(), 24_000);
    }

    #[test]
    fn test_add_unavailable_is_noop() {
        let mut cart = Cart::new();
        let mut product = test_product("esp", 12_000);
        product.is_available = false;

        let outcome = cart.add_line(&product);
        assert_eq!(outcome, AddOutcome::Unavailable);
        assert!(!outcome.changed_cart());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_clamps_at_max_quantity() {
        let mut cart = Cart::new();
        let product = test_product("esp", 100);

        cart.add_line(&product);
        cart.update_quantity("esp", MAX_LINE_QUANTITY);
        assert_eq!(cart.add_line(&product), AddOutcome::Merged);

        assert_eq!(cart.total_quantity(), MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_add_signals_cart_full() {
        let mut cart = Cart::new();
        for i in 0..MAX_CART_LINES {
            cart.add_line(&test_product(&format!("p{}", i), 100));
        }

        let overflow = test_product("one-too-many", 100);
        assert_eq!(cart.add_line(&overflow), AddOutcome::CartFull);
        assert_eq!(cart.line_count(), MAX_CART_LINES);

        // Merging into an existing line still works at capacity
        assert_eq!(cart.add_line(&test_product("p0", 100)), AddOutcome::Merged);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("esp", 12_000));

        cart.update_quantity("esp", 5);
        assert_eq!(cart.total_quantity(), 5);
        assert_eq!(cart.subtotal_units(), 60_000);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("esp", 12_000));

        cart.update_quantity("esp", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("esp", 12_000));

        cart.update_quantity("ghost", 3);
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_remove_line_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("esp", 12_000));

        cart.remove_line("ghost");
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_add_remove_round_trip() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("esp", 12_000));
        let before = cart.lines.clone();

        cart.add_line(&test_product("lat", 15_000));
        cart.remove_line("lat");

        assert_eq!(cart.lines, before);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("b", 100));
        cart.add_line(&test_product("a", 200));
        cart.add_line(&test_product("c", 300));

        let ids: Vec<&str> = cart.lines.iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_line_freezes_price() {
        let mut cart = Cart::new();
        let mut product = test_product("esp", 12_000);
        cart.add_line(&product);

        // Catalog price changes after the line was created
        product.price_units = 99_000;
        cart.add_line(&product);

        // The merged line keeps the frozen price
        assert_eq!(cart.subtotal_units(), 24_000);
    }

    #[test]
    fn test_emptying_cart_resets_checkout_context() {
        let mut cart = Cart::new();
        cart.set_machine(test_machine("m1"));
        cart.add_line(&test_product("esp", 12_000));
        cart.apply_promo("COFFEE10", 10);
        cart.set_points_to_redeem(1_000, 5_000);

        cart.remove_line("esp");

        assert!(cart.is_empty());
        assert!(cart.machine.is_none());
        assert!(cart.promo.is_none());
        assert_eq!(cart.points_to_redeem, 0);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = Cart::new();
        cart.set_machine(test_machine("m1"));
        cart.add_line(&test_product("esp", 12_000));

        cart.clear();
        let after_first = cart.clone();
        cart.clear();

        assert_eq!(cart, after_first);
        assert_eq!(cart.subtotal_units(), 0);
        assert_eq!(cart.total_quantity(), 0);
        assert!(cart.machine.is_none());
    }

    #[test]
    fn test_promo_discount_floors() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("odd", 11_999));

        cart.apply_promo("TEN", 10);

        // 10% of 11 999 = 1 199.9 → 1 199
        assert_eq!(cart.promo_discount_units(), 1_199);
        assert_eq!(cart.total_units(), 10_800);
    }

    #[test]
    fn test_remove_promo() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("esp", 12_000));
        cart.apply_promo("TEN", 10);

        cart.remove_promo();

        assert_eq!(cart.promo_discount_units(), 0);
        assert_eq!(cart.total_units(), 12_000);
    }

    #[test]
    fn test_overlarge_promo_cannot_drive_total_negative() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("esp", 12_000));

        // A percentage the caller should have rejected
        cart.apply_promo("BROKEN", 250);

        assert_eq!(cart.promo_discount_units(), 12_000);
        assert_eq!(cart.total_units(), 0);
    }

    #[test]
    fn test_points_clamp_to_balance() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("esp", 12_000));

        let stored = cart.set_points_to_redeem(100_000, 5_000);

        assert_eq!(stored, 5_000);
        assert_eq!(cart.points_discount_units(), 5_000);
    }

    #[test]
    fn test_points_clamp_to_remaining_payable() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("esp", 12_000));
        cart.apply_promo("TEN", 10);

        // Remaining payable is 12 000 - 1 200 = 10 800, balance is larger
        let stored = cart.set_points_to_redeem(50_000, 999_999);

        assert_eq!(stored, 10_800);
        assert_eq!(cart.total_units(), 0);
    }

    #[test]
    fn test_negative_points_request_clamps_to_zero() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("esp", 12_000));

        assert_eq!(cart.set_points_to_redeem(-5, 5_000), 0);
        assert_eq!(cart.points_to_redeem, 0);
    }

    #[test]
    fn test_points_reclamp_after_cart_shrinks() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("esp", 12_000));
        cart.add_line(&test_product("lat", 15_000));
        cart.set_points_to_redeem(20_000, 20_000);

        // Cart shrinks below the stored redemption
        cart.remove_line("lat");

        // Stored value is stale but reads stay consistent
        assert_eq!(cart.points_discount_units(), 12_000);
        assert_eq!(cart.total_units(), 0);
        assert!(cart.promo_discount_units() + cart.points_discount_units() <= cart.subtotal_units());
    }

    /// Asserts the pricing invariants that must hold in every reachable
    /// state: non-negative total, discounts bounded by the subtotal.
    fn assert_invariants(cart: &Cart) {
        assert!(cart.total_units() >= 0);
        assert!(
            cart.promo_discount_units() + cart.points_discount_units() <= cart.subtotal_units()
        );
    }

    #[test]
    fn test_discount_bound_holds_across_sequences() {
        let mut cart = Cart::new();

        cart.add_line(&test_product("a", 11_999));
        assert_invariants(&cart);

        cart.add_line(&test_product("b", 7));
        assert_invariants(&cart);

        cart.apply_promo("NINETY", 90);
        assert_invariants(&cart);

        cart.set_points_to_redeem(i64::MAX, 3_000);
        assert_invariants(&cart);

        cart.update_quantity("a", 3);
        assert_invariants(&cart);

        cart.remove_line("b");
        assert_invariants(&cart);

        cart.update_quantity("a", 0);
        assert_invariants(&cart);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_checkout_scenario() {
        // The full storefront walk-through: espresso twice, promo, points
        let mut cart = Cart::new();
        cart.set_machine(test_machine("lobby"));
        let espresso = test_product("esp", 12_000);

        cart.add_line(&espresso);
        assert_eq!(cart.subtotal_units(), 12_000);

        cart.add_line(&espresso);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal_units(), 24_000);

        cart.apply_promo("COFFEE10", 10);
        assert_eq!(cart.promo_discount_units(), 2_400);
        assert_eq!(cart.total_units(), 21_600);

        let stored = cart.set_points_to_redeem(100_000, 5_000);
        assert_eq!(stored, 5_000);
        assert_eq!(cart.total_units(), 16_600);

        cart.clear();
        assert_eq!(cart.subtotal_units(), 0);
        assert_eq!(cart.total_units(), 0);
        assert!(cart.machine.is_none());
        assert!(cart.promo.is_none());
        assert_eq!(cart.points_to_redeem, 0);
    }

    #[test]
    fn test_totals_summary() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("esp", 12_000));
        cart.add_line(&test_product("esp", 12_000));
        cart.apply_promo("COFFEE10", 10);

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 1);
        assert_eq!(totals.total_quantity, 2);
        assert_eq!(totals.subtotal_units, 24_000);
        assert_eq!(totals.promo_discount_units, 2_400);
        assert_eq!(totals.points_discount_units, 0);
        assert_eq!(totals.total_units, 21_600);
    }

    #[test]
    fn test_cart_snapshot_round_trips_through_json() {
        let mut cart = Cart::new();
        cart.set_machine(test_machine("m1"));
        cart.add_line(&test_product("esp", 12_000));
        cart.apply_promo("COFFEE10", 10);

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, cart);
        assert_eq!(restored.total_units(), cart.total_units());
    }
}
