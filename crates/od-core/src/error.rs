//! # Error Types
//!
//! Domain-specific error types for od-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  od-core errors (this file)                                            │
//! │  ├── CoreError        - Cart / catalog / checkout failures             │
//! │  └── ValidationError  - Input and selection validation failures        │
//! │                                                                         │
//! │  od-auth errors (separate crate)                                       │
//! │  └── AuthError        - Provider rejections, transport failures        │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── ApiError         - What the presentation layer sees               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Neither `Validation` nor `EntryNotFound` is retryable: both mean the
//! caller let an action through that the UI should have gated.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A cart operation referenced an entry id that is not in the cart.
    ///
    /// Only mutation-by-reference operations raise this. Removing an
    /// absent entry is a no-op.
    #[error("Cart entry not found: {0}")]
    EntryNotFound(String),

    /// Catalog item cannot be found.
    #[error("Catalog item not found: {0}")]
    ItemNotFound(u32),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The catalog listing could not be decoded.
    #[error("Failed to load catalog: {0}")]
    CatalogLoadFailed(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::CatalogLoadFailed(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Covers both form input (checkout, auth forms) and customization
/// selections that do not satisfy an item's required option groups.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (bad price string, malformed email, ...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// A required option group has no choice yet.
    ///
    /// ## User Workflow
    /// ```text
    /// Customize "Chicken Mortadella"
    ///      │
    ///      ├── Sandwich: Pulled Beef   ✓
    ///      └── Bread:    (none)        ✗
    ///      │
    ///      ▼
    /// MissingChoice { group: "Choose Bread" }
    ///      │
    ///      ▼
    /// "Add to Cart" stays disabled
    /// ```
    #[error("{group} is required")]
    MissingChoice { group: String },

    /// An option group does not apply to the item being customized.
    #[error("{group} does not apply to {item}")]
    GroupNotApplicable { group: String, item: String },

    /// More add-ons than the group allows.
    #[error("At most {max} add-ons can be selected")]
    TooManyAddOns { max: usize },

    /// The same add-on appears more than once.
    #[error("Add-on '{0}' selected more than once")]
    DuplicateAddOn(String),
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid_format(field: &str, reason: &str) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.to_string(),
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
        let err = CoreError::EntryNotFound("abc".to_string());
        assert_eq!(err.to_string(), "Cart entry not found: abc");

        let err = CoreError::ItemNotFound(42);
        assert_eq!(err.to_string(), "Catalog item not found: 42");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MissingChoice {
            group: "Choose Bread".to_string(),
        };
        assert_eq!(err.to_string(), "Choose Bread is required");

        let err = ValidationError::TooManyAddOns { max: 3 };
        assert_eq!(err.to_string(), "At most 3 add-ons can be selected");

        assert_eq!(ValidationError::required("email").to_string(), "email is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("phone").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
