//! # Auth Errors
//!
//! Error types for the authentication boundary.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Auth Error Categories                              │
//! │                                                                         │
//! │  Input (before any request)                                            │
//! │  └── InvalidInput     "Please enter both email and password"           │
//! │                                                                         │
//! │  Provider said no                                                      │
//! │  └── Rejected         "Invalid login credentials"                      │
//! │                                                                         │
//! │  Transport (retryable)                                                 │
//! │  ├── ConnectionFailed                                                  │
//! │  ├── Timeout                                                           │
//! │  └── ServerError (5xx)                                                 │
//! │                                                                         │
//! │  Protocol                                                              │
//! │  └── ParseError       unexpected response body                         │
//! │                                                                         │
//! │  Configuration                                                         │
//! │  ├── InvalidConfig                                                     │
//! │  ├── InvalidUrl                                                        │
//! │  └── ConfigLoadFailed                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these touch cart state; the storefront shows
//! [`AuthError::user_message`] and carries on.

use thiserror::Error;

/// Shown for anything the user cannot act on.
const GENERIC_FAILURE: &str = "An error occurred. Please try again.";

/// Authentication errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    // =========================================================================
    // Input Errors
    // =========================================================================
    /// The form was incomplete or malformed; no request was sent.
    #[error("{0}")]
    InvalidInput(String),

    // =========================================================================
    // Provider Errors
    // =========================================================================
    /// The provider refused the request (bad credentials, expired code...).
    #[error("{0}")]
    Rejected(String),

    /// The response body did not have the expected shape.
    #[error("Unexpected auth response: {0}")]
    ParseError(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Could not reach the auth service.
    #[error("Cannot reach auth service: {0}")]
    ConnectionFailed(String),

    /// The request did not finish within the configured timeout.
    #[error("Auth request timed out")]
    Timeout,

    /// The auth service failed (5xx).
    #[error("Auth service error ({status}): {message}")]
    ServerError { status: u16, message: String },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration values are unusable.
    #[error("Invalid auth configuration: {0}")]
    InvalidConfig(String),

    /// The project URL could not be parsed or joined.
    #[error("Invalid auth URL: {0}")]
    InvalidUrl(String),

    /// auth.toml could not be read or parsed.
    #[error("Failed to load auth config: {0}")]
    ConfigLoadFailed(String),
}

/// Convenience type alias for Results with AuthError.
pub type AuthResult<T> = Result<T, AuthError>;

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AuthError::Timeout
        } else if err.is_decode() {
            AuthError::ParseError(err.to_string())
        } else if err.is_builder() {
            AuthError::InvalidConfig(err.to_string())
        } else {
            AuthError::ConnectionFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        AuthError::ParseError(err.to_string())
    }
}

impl From<url::ParseError> for AuthError {
    fn from(err: url::ParseError) -> Self {
        AuthError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for AuthError {
    fn from(err: std::io::Error) -> Self {
        AuthError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for AuthError {
    fn from(err: toml::de::Error) -> Self {
        AuthError::ConfigLoadFailed(err.to_string())
    }
}

impl From<od_core::ValidationError> for AuthError {
    fn from(err: od_core::ValidationError) -> Self {
        AuthError::InvalidInput(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl AuthError {
    /// Returns true if retrying the same request might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AuthError::ConnectionFailed(_) | AuthError::Timeout | AuthError::ServerError { .. }
        )
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidConfig(_) | AuthError::InvalidUrl(_) | AuthError::ConfigLoadFailed(_)
        )
    }

    /// Text for the alert the user sees.
    ///
    /// Input and provider messages are shown as-is; everything else
    /// collapses to a generic retry prompt.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidInput(msg) | AuthError::Rejected(msg) => msg.clone(),
            AuthError::Timeout | AuthError::ConnectionFailed(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(AuthError::Timeout.is_retryable());
        assert!(AuthError::ConnectionFailed("refused".into()).is_retryable());
        assert!(AuthError::ServerError {
            status: 503,
            message: "down".into()
        }
        .is_retryable());

        assert!(!AuthError::Rejected("Invalid login credentials".into()).is_retryable());
        assert!(!AuthError::InvalidInput("missing".into()).is_retryable());
    }

    #[test]
    fn test_user_message() {
        let err = AuthError::Rejected("Invalid login credentials".into());
        assert_eq!(err.user_message(), "Invalid login credentials");

        let err = AuthError::ParseError("missing field `user`".into());
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_validation_error_becomes_input_error() {
        let err: AuthError = od_core::ValidationError::Required {
            field: "email".into(),
        }
        .into();
        assert_eq!(err, AuthError::InvalidInput("email is required".into()));
    }

    #[test]
    fn test_config_errors() {
        let err: AuthError = url::Url::parse("not a url").unwrap_err().into();
        assert!(err.is_config_error());
    }
}
