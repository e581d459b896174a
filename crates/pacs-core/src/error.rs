//! # Error Types
//!
//! Domain-specific error types for pacs-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pacs-core errors (this file)                                          │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  pacs-pricelist errors (separate crate)                                │
//! │  └── PriceListError   - Price sheet read/parse failures                │
//! │                                                                         │
//! │  quoter errors (in app)                                                │
//! │  └── ApiError         - What the shell prints (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error Here
//! Pricing never fails. A missing price row contributes zero, a catalog that
//! has not finished loading prices everything at zero, and a quantity edit
//! below one is ignored. Those paths return neutral values instead.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Every variant is recoverable; the caller aborts the action and leaves
/// configuration and cart untouched.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Ordering was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Size key does not name a known chassis.
    #[error("Unknown size: {0}")]
    UnknownSize(String),

    /// PLC model name is not in the model list.
    #[error("Unknown PLC model: {0}")]
    UnknownModel(String),

    /// Option code is not valid for the field.
    ///
    /// ## When This Occurs
    /// - `set voltage XX` in the shell
    /// - A deserialized configuration carrying a foreign code
    #[error("Unknown {field} option: {value}")]
    UnknownOption { field: String, value: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownOption {
            field: "voltage".to_string(),
            value: "XX".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown voltage option: XX");
        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("customer name");
        assert_eq!(err.to_string(), "customer name is required");

        let err = ValidationError::NotAllowed {
            field: "sd".to_string(),
            allowed: vec!["S".to_string(), "N".to_string()],
        };
        assert_eq!(err.to_string(), "sd must be one of: [\"S\", \"N\"]");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("company").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
