//! # Money Module
//!
//! Monetary values as whole currency units in an `i64` newtype.
//!
//! ## Why Integer Units?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  NO FLOATS IN PRICING                                                   │
//! │                                                                         │
//! │  A 10% promo on 11 999 in floating point:                               │
//! │    11999 * 0.1 = 1199.9000000000001   → which unit is the discount?     │
//! │                                                                         │
//! │  Here every amount is a whole i64 (the storefront currency carries no   │
//! │  minor unit), and percentage shares FLOOR to the next whole unit:       │
//! │    percent(10) of 11 999 = 1 199                                        │
//! │                                                                         │
//! │  The floored fraction stays with the merchant, and the discount can     │
//! │  never exceed the amount it was computed from.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The API is deliberately small: construction from units, the arithmetic
//! the pricing pipeline needs, and nothing that would invite float math.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whole currency units.
///
/// Signed so intermediate arithmetic (deltas, over-discount checks) stays
/// representable; persisted amounts are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Wraps a whole-unit amount.
    ///
    /// ```rust
    /// use vendo_core::money::Money;
    ///
    /// let price = Money::from_units(12_000);
    /// assert_eq!(price.units(), 12_000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Unwraps to whole units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// The zero amount.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// True for the zero amount.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// A percentage share of this amount, floored to a whole unit.
    ///
    /// Widens through i128 so even near-`i64::MAX` amounts cannot
    /// overflow mid-multiplication. Division truncates toward zero, which
    /// equals flooring for the non-negative amounts the pricing pipeline
    /// feeds in.
    ///
    /// ```rust
    /// use vendo_core::money::Money;
    ///
    /// assert_eq!(Money::from_units(24_000).percent(10).units(), 2_400);
    /// // 5% of 999 = 49.95, floored
    /// assert_eq!(Money::from_units(999).percent(5).units(), 49);
    /// ```
    pub fn percent(&self, percent: u32) -> Money {
        let share = (self.0 as i128 * percent as i128) / 100;
        Money(share as i64)
    }

    /// Subtraction that bottoms out at zero.
    ///
    /// The grand total uses this so a discount stack can never produce a
    /// negative amount payable.
    ///
    /// ```rust
    /// use vendo_core::money::Money;
    ///
    /// let total = Money::from_units(500);
    /// assert_eq!(total.saturating_minus(Money::from_units(800)).units(), 0);
    /// ```
    #[inline]
    pub const fn saturating_minus(&self, other: Money) -> Money {
        let diff = self.0 - other.0;
        if diff < 0 {
            Money(0)
        } else {
            Money(diff)
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug/log formatting: the raw unit count. Currency symbols, grouping
/// and localization belong to the frontend.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Quantity scaling (line totals).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Subtotals fold line totals with `.sum()`.
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
