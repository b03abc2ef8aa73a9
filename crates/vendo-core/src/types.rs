//! # Domain Types
//!
//! Core domain types used throughout Vendo.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Machine      │   │    Product      │   │     Promo       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  code           │       │
//! │  │  name           │   │  name           │   │  discount_%     │       │
//! │  │  address        │   │  price_units    │   │  (0..=100)      │       │
//! │  │  is_online      │   │  is_available   │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────┐                         │
//! │  │    OrderDraft (checkout snapshot)         │                         │
//! │  │  ───────────────────────────────────────  │                         │
//! │  │  draft_id, machine_id, lines,             │                         │
//! │  │  promo_code, points_to_redeem, totals     │                         │
//! │  └───────────────────────────────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All types carry `serde` + `ts-rs` derives: the Mini App frontend consumes
//! them as generated TypeScript, and the stores persist them as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Machine
// =============================================================================

/// A vending machine the user can order from.
///
/// The cart is tied to exactly one machine per checkout cycle; the machine
/// list itself comes from the backend catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Machine {
    /// Backend identifier.
    pub id: String,

    /// Display name shown in the machine picker.
    pub name: String,

    /// Street address / placement hint.
    pub address: String,

    /// Whether the machine is currently reachable.
    /// Offline machines stay listed but cannot take orders.
    pub is_online: bool,
}

// =============================================================================
// Product
// =============================================================================

/// A product offered by the storefront catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Backend identifier.
    pub id: String,

    /// Display name shown in the catalog and on cart lines.
    pub name: String,

    /// Optional description for the product detail sheet.
    pub description: Option<String>,

    /// Price in whole currency units.
    pub price_units: i64,

    /// Catalog image URL.
    pub image_url: Option<String>,

    /// Catalog category (e.g. "coffee", "snacks").
    pub category: Option<String>,

    /// Whether the product can currently be ordered.
    /// Unavailable products stay visible but reject cart adds.
    pub is_available: bool,

    /// When the catalog entry was created (backend timestamp).
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the catalog entry was last updated (backend timestamp).
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_units(self.price_units)
    }
}

// =============================================================================
// Promo
// =============================================================================

/// An applied promo code with its validated discount.
///
/// Code and percentage are present/absent together by construction: the cart
/// stores a single `Option<Promo>`. The percentage is validated by the
/// caller (the backend resolves the code) before it reaches the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Promo {
    /// The code the user entered, as validated by the backend.
    pub code: String,

    /// Percentage discount on the subtotal, in `[0, 100]`.
    pub discount_percent: u32,
}

// =============================================================================
// Order Draft
// =============================================================================

/// One line of an order draft.
/// Frozen copy of the cart line at checkout time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderDraftLine {
    pub product_id: String,
    /// Product name at checkout time (frozen).
    pub name: String,
    /// Unit price in whole units at checkout time (frozen).
    pub unit_price_units: i64,
    /// Quantity ordered.
    pub quantity: i64,
    /// Line total before discounts (unit_price × quantity).
    pub line_total_units: i64,
}

/// The checkout snapshot handed to the order-creation collaborator.
///
/// ## Snapshot Pattern
/// The draft freezes everything the backend needs to price-check and create
/// the order: lines with frozen prices, the promo code, the points the user
/// chose to redeem, and the four totals the engine computed. After the
/// collaborator confirms the order, the cart is cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderDraft {
    /// Client-generated idempotency id (UUID v4).
    pub draft_id: String,

    /// The machine this order will be dispensed from.
    pub machine_id: String,

    /// Ordered lines, insertion order preserved.
    pub lines: Vec<OrderDraftLine>,

    /// Applied promo code, if any.
    pub promo_code: Option<String>,

    /// Loyalty points redeemed against the total (1 point = 1 unit).
    pub points_to_redeem: i64,

    /// Sum of line totals.
    pub subtotal_units: i64,

    /// Promo discount, floored to a whole unit.
    pub promo_discount_units: i64,

    /// Points discount (equals the clamped `points_to_redeem`).
    pub points_discount_units: i64,

    /// Amount payable after all discounts.
    pub total_units: i64,

    /// When the draft was assembled on the client.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_price_as_money() {
        let product = Product {
            id: "esp".to_string(),
            name: "Espresso".to_string(),
            description: None,
            price_units: 12_000,
            image_url: None,
            category: Some("coffee".to_string()),
            is_available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(product.price().units(), 12_000);
    }

    #[test]
    fn test_promo_serde_shape() {
        let promo = Promo {
            code: "COFFEE10".to_string(),
            discount_percent: 10,
        };
        let json = serde_json::to_value(&promo).unwrap();
        assert_eq!(json["code"], "COFFEE10");
        assert_eq!(json["discountPercent"], 10);
    }
}
