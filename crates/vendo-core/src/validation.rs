//! # Validation Module
//!
//! Input validation utilities for Vendo.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Store layer (Rust)                                           │
//! │  └── THIS MODULE: promo input, draft sanity                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend (remote collaborator)                                │
//! │  ├── Promo code resolution                                             │
//! │  ├── Price re-check on order creation                                  │
//! │  └── Loyalty ledger enforcement                                        │
//! │                                                                         │
//! │  Defense in depth: the engine trusts validated input; these checks     │
//! │  run where the input enters, not inside every cart mutation            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vendo_core::validation::{validate_promo_code, validate_discount_percent};
//!
//! // Validate promo input before storing it on the cart
//! validate_promo_code("COFFEE10").unwrap();
//! validate_discount_percent(10).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::OrderDraft;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum accepted promo code length.
const MAX_PROMO_CODE_LEN: usize = 32;

// =============================================================================
// Promo Validators
// =============================================================================

/// Validates a promo code's format.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 32 characters
/// - Must contain only alphanumeric characters, hyphens, underscores
///
/// Whether the code *exists* is the backend's call; this only rejects
/// input that could never be a code.
///
/// ## Example
/// ```rust
/// use vendo_core::validation::validate_promo_code;
///
/// assert!(validate_promo_code("COFFEE10").is_ok());
/// assert!(validate_promo_code("").is_err());
/// assert!(validate_promo_code("has space").is_err());
/// ```
pub fn validate_promo_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "promo code".to_string(),
        });
    }

    if code.len() > MAX_PROMO_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "promo code".to_string(),
            max: MAX_PROMO_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "promo code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a discount percentage.
///
/// ## Rules
/// - Must be between 0 and 100 inclusive
pub fn validate_discount_percent(percent: u32) -> ValidationResult<()> {
    if percent > 100 {
        return Err(ValidationError::OutOfRange {
            field: "discount percent".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in whole units.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (promotional freebies)
pub fn validate_price_units(units: i64) -> ValidationResult<()> {
    if units < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a points amount.
///
/// ## Rules
/// - Must be non-negative (>= 0)
pub fn validate_points(points: i64) -> ValidationResult<()> {
    if points < 0 {
        return Err(ValidationError::OutOfRange {
            field: "points".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Draft Validators
// =============================================================================

/// Validates an assembled order draft before it is handed to the
/// order-creation collaborator.
///
/// The draft is built from engine state, so a failure here is a
/// programming error upstream rather than bad user input; the check is a
/// cheap final gate before the snapshot leaves the process.
pub fn validate_order_draft(draft: &OrderDraft) -> ValidationResult<()> {
    if draft.machine_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "machine id".to_string(),
        });
    }

    for line in &draft.lines {
        validate_quantity(line.quantity)?;
        validate_price_units(line.unit_price_units)?;
    }

    validate_points(draft.points_to_redeem)?;
    validate_price_units(draft.total_units)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
