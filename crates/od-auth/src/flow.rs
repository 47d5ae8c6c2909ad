//! # Auth Flow
//!
//! Runs auth requests off the UI path and hands results back as events.
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Login modal opens ──► ViewGuard::new()                                 │
//! │         │                                                               │
//! │  "Login" tapped ────► AuthFlow::sign_in(req, guard.ticket())            │
//! │         │                 │ validate() fails → error returned now       │
//! │         │                 ▼                                             │
//! │         │            tokio::spawn ──► provider.sign_in() ──┐            │
//! │         │                                                  │            │
//! │  modal dismissed ──► guard.dismiss()                        │            │
//! │                                                             ▼            │
//! │                                 mpsc ──► AuthEvent { ticket, result }   │
//! │                                                             │            │
//! │                                  guard.accepts(&ticket)? ───┤            │
//! │                                        yes: show result     │            │
//! │                                        no:  drop silently ◄─┘            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no cancellation: a request whose view went away still runs to
//! completion, and its event is ignored.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::AuthResult;
use crate::provider::{
    AuthAction, AuthOutcome, AuthProvider, SignInRequest, SignUpRequest, VerifyCodeRequest,
};

// =============================================================================
// View Guard
// =============================================================================

/// Liveness marker for one auth view (login modal, OTP sheet...).
///
/// Each dismissal bumps a generation counter; tickets issued before the
/// bump no longer match.
#[derive(Debug, Clone, Default)]
pub struct ViewGuard {
    generation: Arc<AtomicU64>,
}

/// Issued per request; compared against the guard when the result lands.
#[derive(Debug, Clone)]
pub struct Ticket {
    guard: Arc<AtomicU64>,
    generation: u64,
}

impl ViewGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticket(&self) -> Ticket {
        Ticket {
            guard: Arc::clone(&self.generation),
            generation: self.generation.load(Ordering::Acquire),
        }
    }

    /// The view went away; outstanding tickets become stale.
    pub fn dismiss(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Whether a result carrying `ticket` should still be shown.
    pub fn accepts(&self, ticket: &Ticket) -> bool {
        Arc::ptr_eq(&self.generation, &ticket.guard)
            && ticket.generation == self.generation.load(Ordering::Acquire)
    }
}

impl Ticket {
    /// Whether the issuing view is still open.
    pub fn is_live(&self) -> bool {
        self.generation == self.guard.load(Ordering::Acquire)
    }
}

// =============================================================================
// Events
// =============================================================================

/// A finished auth request.
#[derive(Debug)]
pub struct AuthEvent {
    pub ticket: Ticket,
    pub action: AuthAction,
    pub result: AuthResult<AuthOutcome>,
}

/// Receiving end of an [`AuthFlow`].
#[derive(Debug)]
pub struct AuthEvents {
    rx: mpsc::UnboundedReceiver<AuthEvent>,
}

impl AuthEvents {
    /// Next event still wanted by `guard`'s view, skipping stale ones.
    ///
    /// Returns `None` once every sender is gone.
    pub async fn next_for(&mut self, guard: &ViewGuard) -> Option<AuthEvent> {
        while let Some(event) = self.rx.recv().await {
            if guard.accepts(&event.ticket) {
                return Some(event);
            }
            debug!(action = ?event.action, "dropping auth result for dismissed view");
        }
        None
    }

    /// Drains every event already delivered, keeping only live ones.
    pub fn drain_for(&mut self, guard: &ViewGuard) -> Vec<AuthEvent> {
        let mut live = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            if guard.accepts(&event.ticket) {
                live.push(event);
            } else {
                debug!(action = ?event.action, "dropping auth result for dismissed view");
            }
        }
        live
    }
}

// =============================================================================
// Flow
// =============================================================================

/// Dispatches validated requests to a provider on tokio tasks.
///
/// Must be used from inside a tokio runtime.
pub struct AuthFlow<P> {
    provider: Arc<P>,
    events: mpsc::UnboundedSender<AuthEvent>,
}

impl<P> Clone for AuthFlow<P> {
    fn clone(&self) -> Self {
        AuthFlow {
            provider: Arc::clone(&self.provider),
            events: self.events.clone(),
        }
    }
}

impl<P: AuthProvider + 'static> AuthFlow<P> {
    pub fn new(provider: P) -> (Self, AuthEvents) {
        let (tx, rx) = mpsc::unbounded_channel();
        let flow = AuthFlow {
            provider: Arc::new(provider),
            events: tx,
        };
        (flow, AuthEvents { rx })
    }

    /// Validates and starts a sign-in. Input errors come back immediately.
    pub fn sign_in(&self, request: SignInRequest, ticket: Ticket) -> AuthResult<JoinHandle<()>> {
        request.validate()?;
        let provider = Arc::clone(&self.provider);
        Ok(self.dispatch(AuthAction::SignIn, ticket, async move {
            provider.sign_in(&request).await
        }))
    }

    /// Validates and starts a registration.
    pub fn sign_up(&self, request: SignUpRequest, ticket: Ticket) -> AuthResult<JoinHandle<()>> {
        request.validate()?;
        let provider = Arc::clone(&self.provider);
        Ok(self.dispatch(AuthAction::SignUp, ticket, async move {
            provider.sign_up(&request).await
        }))
    }

    /// Validates and starts an OTP verification.
    pub fn verify_code(
        &self,
        request: VerifyCodeRequest,
        ticket: Ticket,
    ) -> AuthResult<JoinHandle<()>> {
        request.validate()?;
        let provider = Arc::clone(&self.provider);
        Ok(self.dispatch(AuthAction::VerifyCode, ticket, async move {
            provider.verify_code(&request).await
        }))
    }

    fn dispatch<F>(&self, action: AuthAction, ticket: Ticket, work: F) -> JoinHandle<()>
    where
        F: Future<Output = AuthResult<AuthOutcome>> + Send + 'static,
    {
        let events = self.events.clone();
        debug!(?action, "auth request started");

        tokio::spawn(async move {
            let result = work.await;
            if let Err(ref err) = result {
                warn!(?action, error = %err, "auth request failed");
            }
            if events.send(AuthEvent { ticket, action, result }).is_err() {
                debug!(?action, "auth event receiver dropped");
            }
        })
    }
}
