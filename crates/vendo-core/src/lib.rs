//! # vendo-core: Pure Business Logic for Vendo
//!
//! This crate is the **heart** of the Vendo storefront. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Vendo Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Mini App Frontend (TypeScript)                  │   │
//! │  │    Catalog UI ──► Cart UI ──► Checkout UI ──► Rewards UI       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ generated bindings (ts-rs)             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  vendo-store (state layer)                      │   │
//! │  │    CartStore, FavoritesStore, OnboardingStore                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vendo-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │  Machine  │  │  percent  │  │  CartLine │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Machine, Product, Promo, OrderDraft, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart pricing and points-redemption engine
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are whole currency units (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use vendo_core::cart::Cart;
//! use vendo_core::types::Product;
//!
//! let espresso = Product {
//!     id: "esp".to_string(),
//!     name: "Espresso".to_string(),
//!     description: None,
//!     price_units: 12_000,
//!     image_url: None,
//!     category: Some("coffee".to_string()),
//!     is_available: true,
//!     created_at: Utc::now(),
//!     updated_at: Utc::now(),
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_line(&espresso);
//! cart.add_line(&espresso);
//!
//! cart.apply_promo("COFFEE10", 10);
//! assert_eq!(cart.subtotal_units(), 24_000);
//! assert_eq!(cart.promo_discount_units(), 2_400);
//! assert_eq!(cart.total_units(), 21_600);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vendo_core::Money` instead of
// `use vendo_core::money::Money`

pub use cart::{AddOutcome, Cart, CartLine, CartTotals};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of distinct lines allowed in a single cart
///
/// ## Business Reason
/// A vending machine order is small by nature; the cap prevents runaway
/// carts that the machine could never dispense in one session.
pub const MAX_CART_LINES: usize = 50;

/// Maximum quantity of a single line in the cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 100 instead of 10) and
/// keeps a single order within one bunker refill.
pub const MAX_LINE_QUANTITY: i64 = 99;

/// Redemption rate for loyalty points
///
/// One point is worth exactly one currency unit at checkout. The rate is a
/// constant of the program, not a per-machine setting.
pub const UNITS_PER_POINT: i64 = 1;
