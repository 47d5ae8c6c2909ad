//! # od-auth: Account Authentication for the OD Storefront
//!
//! Sign-in, sign-up and SMS code verification against a hosted auth
//! backend, delivered to the UI as events.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          od-auth                                        │
//! │                                                                         │
//! │  ┌──────────────┐                                                       │
//! │  │   provider   │  SignInRequest / SignUpRequest / VerifyCodeRequest   │
//! │  │              │  AuthProvider trait, AuthOutcome, Session            │
//! │  └──────┬───────┘                                                       │
//! │         │ implemented by                                                │
//! │  ┌──────▼───────┐      ┌──────────────┐                                 │
//! │  │   supabase   │◄─────│    config    │  auth.toml + OD_AUTH_*         │
//! │  │  (reqwest)   │      └──────────────┘                                 │
//! │  └──────┬───────┘                                                       │
//! │         │ driven by                                                     │
//! │  ┌──────▼───────┐                                                       │
//! │  │     flow     │  tokio tasks, mpsc events, ViewGuard tickets         │
//! │  └──────────────┘                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here reads or writes cart state.

pub mod config;
pub mod error;
pub mod flow;
pub mod provider;
pub mod supabase;

pub use config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use flow::{AuthEvent, AuthEvents, AuthFlow, Ticket, ViewGuard};
pub use provider::{
    AuthAction, AuthOutcome, AuthProvider, AuthUser, Gender, Session, SignInRequest,
    SignUpProfile, SignUpRequest, VerifyCodeRequest,
};
pub use supabase::SupabaseClient;
