//! # Auth Commands
//!
//! Login, registration and OTP verification from the side menu.
//!
//! ## Request / Result Split
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  request_login() ──► AlreadySignedIn ("Already logged in as ...")      │
//! │         │        └─► ShowLogin (view opened, fresh guard)              │
//! │         ▼                                                               │
//! │  sign_in(email, password)                                               │
//! │         │  empty field → VALIDATION_ERROR now, nothing sent            │
//! │         ▼                                                               │
//! │  request runs on a tokio task ──► poll_auth_events()                   │
//! │                                     success → session stored, message  │
//! │                                     failure → provider's message       │
//! │                                                                         │
//! │  dismiss_login() before the answer ──► answer dropped                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use od_auth::{
    AuthAction, AuthEvent, AuthProvider, SignInRequest, SignUpRequest, VerifyCodeRequest,
};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::AuthState;

/// What the side menu's "Login" entry should do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoginPrompt {
    AlreadySignedIn { message: String },
    ShowLogin,
}

/// A finished auth request, ready for an alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AuthEventView {
    #[ts(as = "String")]
    pub action: AuthAction,
    pub success: bool,
    pub message: String,
    /// Display name of the signed-in user, when the request produced one.
    pub user: Option<String>,
}

impl From<AuthEvent> for AuthEventView {
    fn from(event: AuthEvent) -> Self {
        match event.result {
            Ok(outcome) => AuthEventView {
                action: event.action,
                success: true,
                message: outcome.message().to_string(),
                user: Some(outcome.user.display_name().to_string()),
            },
            Err(err) => AuthEventView {
                action: event.action,
                success: false,
                message: err.user_message(),
                user: None,
            },
        }
    }
}

/// Opens the login view unless someone is already signed in.
pub fn request_login<P: AuthProvider + 'static>(auth: &AuthState<P>) -> LoginPrompt {
    debug!("request_login command");
    match auth.current_user() {
        Some(user) => LoginPrompt::AlreadySignedIn {
            message: format!("Already logged in as {}", user.display_name()),
        },
        None => {
            auth.open_view();
            LoginPrompt::ShowLogin
        }
    }
}

/// The login view closed. Answers still in flight are dropped.
pub fn dismiss_login<P: AuthProvider + 'static>(auth: &AuthState<P>) {
    debug!("dismiss_login command");
    auth.dismiss_view();
}

/// Starts an email/password sign-in. Must be called inside a tokio runtime.
pub fn sign_in<P: AuthProvider + 'static>(
    auth: &AuthState<P>,
    email: &str,
    password: &str,
) -> Result<JoinHandle<()>, ApiError> {
    debug!(email = %email, "sign_in command");
    Ok(auth
        .flow()
        .sign_in(SignInRequest::new(email, password), auth.ticket())?)
}

/// Starts a registration.
pub fn sign_up<P: AuthProvider + 'static>(
    auth: &AuthState<P>,
    request: SignUpRequest,
) -> Result<JoinHandle<()>, ApiError> {
    debug!(email = %request.email, "sign_up command");
    Ok(auth.flow().sign_up(request, auth.ticket())?)
}

/// Starts an SMS code verification.
pub fn verify_code<P: AuthProvider + 'static>(
    auth: &AuthState<P>,
    phone: &str,
    code: &str,
) -> Result<JoinHandle<()>, ApiError> {
    debug!(phone = %phone, "verify_code command");
    let request = VerifyCodeRequest {
        phone: phone.to_string(),
        code: code.to_string(),
    };
    Ok(auth.flow().verify_code(request, auth.ticket())?)
}

/// Results that arrived for the open login view.
pub fn poll_auth_events<P: AuthProvider + 'static>(auth: &AuthState<P>) -> Vec<AuthEventView> {
    auth.drain().into_iter().map(AuthEventView::from).collect()
}

/// Display name of the signed-in user, if any.
pub fn current_user<P: AuthProvider + 'static>(auth: &AuthState<P>) -> Option<String> {
    auth.current_user().map(|user| user.display_name().to_string())
}

pub fn sign_out<P: AuthProvider + 'static>(auth: &AuthState<P>) {
    debug!("sign_out command");
    auth.sign_out();
}
