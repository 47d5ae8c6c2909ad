//! # Validation Module
//!
//! Input validation for the customer-facing forms and the menu search box.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (React Native)                                  │
//! │  ├── Empty-field checks, keyboard types                                │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront command (Rust)                                    │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: field rules                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Auth provider                                                │
//! │  └── Credential checks, duplicate accounts, OTP expiry                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use od_core::validation::{validate_email, validate_phone};
//!
//! assert!(validate_email("ayesha@example.com").is_ok());
//! assert_eq!(validate_phone("+92 300 1234567").unwrap(), "+923001234567");
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest search query accepted.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

/// Longest special-instructions note accepted at checkout.
pub const MAX_INSTRUCTIONS_LEN: usize = 500;

/// Shortest password the auth provider accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns the whole menu)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

/// Validates a customer's full name.
///
/// ## Rules
/// - Must not be empty
/// - Maximum 100 characters
pub fn validate_full_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("full name"));
    }

    if name.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "full name".to_string(),
            max: 100,
        });
    }

    Ok(name.to_string())
}

/// Validates an email address.
///
/// This is a shape check only (one `@`, a local part, a dotted domain, no
/// whitespace); deliverability is the provider's problem.
///
/// ## Example
/// ```rust
/// use od_core::validation::validate_email;
///
/// assert!(validate_email("ayesha@example.com").is_ok());
/// assert!(validate_email("ayesha@localhost").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }

    let malformed = || ValidationError::invalid_format("email", "must look like name@domain.com");

    if email.chars().any(char::is_whitespace) {
        return Err(malformed());
    }

    let (local, domain) = email.split_once('@').ok_or_else(malformed)?;
    if local.is_empty() || domain.contains('@') {
        return Err(malformed());
    }

    // Domain needs at least one dot with text on both sides of every label
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(malformed());
    }

    Ok(email.to_string())
}

/// Validates a phone number and returns it in compact form.
///
/// ## Rules
/// - Spaces and dashes are ignored
/// - Optional leading `+`
/// - 10 to 13 digits
///
/// ## Example
/// ```rust
/// use od_core::validation::validate_phone;
///
/// assert_eq!(validate_phone("0300-1234567").unwrap(), "03001234567");
/// assert!(validate_phone("12345").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<String> {
    let compact: String = phone
        .trim()
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();

    if compact.is_empty() {
        return Err(ValidationError::required("phone"));
    }

    let digits = compact.strip_prefix('+').unwrap_or(&compact);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            "phone",
            "must contain only digits and an optional leading +",
        ));
    }

    let count = digits.len() as i64;
    if !(10..=13).contains(&count) {
        return Err(ValidationError::OutOfRange {
            field: "phone digits".to_string(),
            min: 10,
            max: 13,
        });
    }

    Ok(compact)
}

/// Validates a password at sign-up.
///
/// Sign-in only checks presence; the provider decides whether it matches.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::invalid_format(
            "password",
            "must be at least 6 characters",
        ));
    }

    Ok(())
}

/// Validates a one-time verification code.
///
/// ## Rules
/// - Must not be empty
/// - Digits only
pub fn validate_otp_code(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::required("verification code"));
    }

    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            "verification code",
            "must contain only digits",
        ));
    }

    Ok(code.to_string())
}

/// Validates the free-text instructions note at checkout.
///
/// ## Rules
/// - Can be empty
/// - Maximum 500 characters
pub fn validate_instructions(note: &str) -> ValidationResult<String> {
    let note = note.trim();

    if note.chars().count() > MAX_INSTRUCTIONS_LEN {
        return Err(ValidationError::TooLong {
            field: "instructions".to_string(),
            max: MAX_INSTRUCTIONS_LEN,
        });
    }

    Ok(note.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
