//! # Store Error Types
//!
//! Errors for snapshot persistence.
//!
//! These rarely reach the caller: write-back failures are caught at the
//! store boundary and logged, and hydration failures fall back to the
//! default initial state. The type exists so slot implementations have a
//! precise contract to fail with.

use thiserror::Error;

/// Snapshot persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Snapshot could not be serialized to JSON.
    #[error("Snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The durable slot failed to read.
    #[error("Slot read failed for '{key}': {message}")]
    SlotRead { key: String, message: String },

    /// The durable slot failed to write.
    #[error("Slot write failed for '{key}': {message}")]
    SlotWrite { key: String, message: String },
}

impl StoreError {
    /// Creates a SlotRead error.
    pub fn slot_read(key: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::SlotRead {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a SlotWrite error.
    pub fn slot_write(key: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::SlotWrite {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::slot_write("vendo.cart", "disk full");
        assert_eq!(
            err.to_string(),
            "Slot write failed for 'vendo.cart': disk full"
        );
    }
}
