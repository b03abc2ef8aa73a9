//! # Error Types
//!
//! Domain error types for vendo-core.
//!
//! ## Where Errors Live
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  vendo-core (this file)    CoreError, ValidationError                   │
//! │  vendo-store               StoreError  (snapshot persistence)           │
//! │  vendo-db                  DbError     (SQLite operations)              │
//! │                                                                         │
//! │  ValidationError ──► CoreError ──► store layer ──► frontend message     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note how little is an error here. Routine cart mutations are total:
//! an unavailable product or a stale line id is signalled through a
//! return value, not raised. `CoreError` appears only where an explicit
//! `Result` makes sense - checkout draft assembly and promo input - and
//! every variant carries the context (field, bounds) the frontend needs
//! to phrase a message. All derives go through `thiserror`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations on the explicit `Result` paths.
///
/// The frontend catches these and owns the user-facing wording.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was requested before a machine was selected.
    ///
    /// Happens when the user lands on checkout from a deep link, or when
    /// a restored session references a machine that is gone.
    #[error("No vending machine selected for this order")]
    MachineNotSelected,

    /// Checkout was requested on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A validation failure surfacing through a domain operation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Caller input that failed a precondition check, caught before any
/// business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The field was missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// The field exceeded its length cap.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// The number fell outside its allowed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// The number was zero or negative where a positive one is needed.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// The field contained characters or structure it must not.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
