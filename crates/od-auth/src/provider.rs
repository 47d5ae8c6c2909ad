//! # Auth Provider Contract
//!
//! Request types, outcomes, and the trait every auth backend implements.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  form fields ──► SignInRequest ──► validate() ──► AuthProvider::sign_in │
//! │                                       │                   │             │
//! │                                       ▼                   ▼             │
//! │                               InvalidInput        AuthOutcome / Error   │
//! │                               (no request sent)                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use od_core::validation::{validate_email, validate_otp_code, validate_password, validate_phone};

use crate::error::{AuthError, AuthResult};

// =============================================================================
// Requests
// =============================================================================

/// Email and password sign-in.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl SignInRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        SignInRequest {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Both fields must be present. The provider judges the rest.
    pub fn validate(&self) -> AuthResult<()> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AuthError::InvalidInput(
                "Please enter both email and password".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Registration form gender choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl FromStr for Gender {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(AuthError::InvalidInput(format!("Unknown gender: {}", s))),
        }
    }
}

/// Profile details stored as user metadata at sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpProfile {
    pub full_name: String,
    #[serde(default)]
    pub gender: Gender,
    pub date_of_birth: Option<NaiveDate>,
}

/// Account registration.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub profile: SignUpProfile,
}

impl SignUpRequest {
    /// Name, email and password are required; email must be well-formed
    /// and the password long enough for the provider.
    pub fn validate(&self) -> AuthResult<()> {
        if self.profile.full_name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
        {
            return Err(AuthError::InvalidInput(
                "Please fill in all required fields".into(),
            ));
        }
        validate_email(&self.email)?;
        validate_password(&self.password)?;

        if let Some(dob) = self.profile.date_of_birth {
            if dob > Utc::now().date_naive() {
                return Err(AuthError::InvalidInput(
                    "Date of birth cannot be in the future".into(),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("email", &self.email)
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

/// SMS one-time code verification.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    pub phone: String,
    pub code: String,
}

impl VerifyCodeRequest {
    pub fn validate(&self) -> AuthResult<()> {
        if self.code.trim().is_empty() {
            return Err(AuthError::InvalidInput("Please enter the OTP".into()));
        }
        validate_otp_code(&self.code)?;
        validate_phone(&self.phone)?;
        Ok(())
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// Which operation an outcome or event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthAction {
    SignIn,
    SignUp,
    VerifyCode,
}

impl AuthAction {
    /// Confirmation text shown when the action succeeds.
    pub const fn success_message(&self) -> &'static str {
        match self {
            AuthAction::SignIn => "You have been logged in successfully",
            AuthAction::SignUp => {
                "Registration successful. Please check your email for verification."
            }
            AuthAction::VerifyCode => "Your phone number has been verified",
        }
    }
}

/// The account a session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl AuthUser {
    /// What "Already logged in as ..." shows: phone, else email, else id.
    pub fn display_name(&self) -> &str {
        [self.phone.as_deref(), self.email.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or(self.id.as_str())
    }
}

/// A signed-in session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub user: AuthUser,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Successful result of an auth operation.
///
/// Sign-up may succeed without a session when the provider wants the
/// email confirmed first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub action: AuthAction,
    pub user: AuthUser,
    pub session: Option<Session>,
}

impl AuthOutcome {
    pub fn message(&self) -> &'static str {
        self.action.success_message()
    }
}

// =============================================================================
// Provider Trait
// =============================================================================

/// A hosted authentication backend.
///
/// Implementations do not validate input; callers run the request's
/// `validate()` first (as [`crate::flow::AuthFlow`] does).
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, request: &SignInRequest) -> AuthResult<AuthOutcome>;

    async fn sign_up(&self, request: &SignUpRequest) -> AuthResult<AuthOutcome>;

    async fn verify_code(&self, request: &VerifyCodeRequest) -> AuthResult<AuthOutcome>;
}
