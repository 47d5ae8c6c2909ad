//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Screen                      Rust Layer                                 │
//! │  ──────                      ──────────                                 │
//! │                                                                         │
//! │  "Add to Cart" tapped                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Auth Error? ──── AuthError::Rejected("...") ──────┐             │  │
//! │  │         │                                          │             │  │
//! │  │         ▼                                          ▼             │  │
//! │  │  Validation Error? ─── CoreError::Validation ──── ApiError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  e.code    = "VALIDATION_ERROR"                                         │
//! │  e.message = "Choose Bread is required"                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use od_auth::AuthError;
use od_core::{CoreError, ValidationError};
use serde::Serialize;
use ts_rs::TS;

use crate::state::ConfigError;

/// Error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Cart entry not found: 6c1f..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Entry, item or session not found
    NotFound,

    /// Input or selection failed validation
    ValidationError,

    /// The auth backend refused or could not be reached
    AuthFailed,

    /// Configuration could not be loaded or is invalid
    ConfigError,

    /// Anything else
    #[serde(rename = "INTERNAL_ERROR")]
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EntryNotFound(id) => ApiError::not_found("Cart entry", &id),
            CoreError::ItemNotFound(id) => ApiError::not_found("Menu item", &id.to_string()),
            CoreError::EmptyCart => ApiError::validation("Your cart is empty"),
            CoreError::CatalogLoadFailed(e) => {
                tracing::error!("Catalog load failed: {}", e);
                ApiError::internal("The menu could not be loaded")
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Auth failures keep the provider's message when it is safe to show
/// (see [`AuthError::user_message`]).
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidInput(message) => ApiError::validation(message),
            e if e.is_config_error() => {
                tracing::error!("Auth configuration error: {}", e);
                ApiError::new(ErrorCode::ConfigError, e.user_message())
            }
            e => ApiError::new(ErrorCode::AuthFailed, e.user_message()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
